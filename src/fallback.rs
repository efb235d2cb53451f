use crate::news::NewsItem;
use crate::topic::Topic;

/// Hand-picked reference links shown when neither a live fetch nor the cache
/// has anything to offer.
const FALLBACK_NEWS: [(&str, &str, &str, Topic); 8] = [
    (
        "India targets 30% EV sales share by 2030 under National EV Policy",
        "https://economictimes.indiatimes.com/topic/national-electric-mobility-mission",
        "Economic Times",
        Topic::ElectricVehicles,
    ),
    (
        "MNRE Green Hydrogen Mission: 5 MTPA production target by 2030",
        "https://mnre.gov.in/green-hydrogen-mission/",
        "MNRE",
        Topic::GreenHydrogen,
    ),
    (
        "Indian Railways achieves 100% broad-gauge electrification",
        "https://pib.gov.in/PressReleasePage.aspx?PRID=1944980",
        "PIB India",
        Topic::RailElectrification,
    ),
    (
        "Ethanol blending crosses 12% milestone; E20 target by 2025-26",
        "https://mopng.gov.in/en/refining/bio-fuel",
        "MoPNG",
        Topic::EthanolBiofuels,
    ),
    (
        "India's transport sector CO\u{2082} emissions: IEA analysis 2024",
        "https://www.iea.org/countries/india",
        "IEA",
        Topic::TransportEmissions,
    ),
    (
        "FAME-II scheme: Over 7,400 electric buses sanctioned across India",
        "https://heavyindustries.gov.in/fame-india-phase-ii",
        "Ministry of Heavy Industries",
        Topic::PolicyIndustry,
    ),
    (
        "CEEW: Clean transport investment surge in India 2024",
        "https://www.ceew.in/publications",
        "CEEW",
        Topic::PolicyIndustry,
    ),
    (
        "Air quality improvement linked to EV uptake in Indian cities: IQAir",
        "https://www.iqair.com/world-air-quality-report",
        "IQAir",
        Topic::TransportEmissions,
    ),
];

pub fn fallback_items() -> Vec<NewsItem> {
    FALLBACK_NEWS
        .iter()
        .map(|(title, url, source, topic)| NewsItem::new(title, url, None, source, *topic))
        .collect()
}
