//! Keyword based topic classification.
//!
//! Every item is assigned exactly one of six fixed topics. Topics are tested in
//! declaration order and the first keyword hit wins. `PolicyIndustry` doubles as
//! the catch-all for text that matches nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "Electric Vehicles")]
    ElectricVehicles,
    #[serde(rename = "Ethanol & Biofuels")]
    EthanolBiofuels,
    #[serde(rename = "Green Hydrogen")]
    GreenHydrogen,
    #[serde(rename = "Rail Electrification")]
    RailElectrification,
    #[serde(rename = "Transport Emissions")]
    TransportEmissions,
    #[serde(rename = "Policy & Industry")]
    PolicyIndustry,
}

impl Topic {
    /// All topics in matching order.
    pub const ALL: [Topic; 6] = [
        Topic::ElectricVehicles,
        Topic::EthanolBiofuels,
        Topic::GreenHydrogen,
        Topic::RailElectrification,
        Topic::TransportEmissions,
        Topic::PolicyIndustry,
    ];

    pub const DEFAULT: Topic = Topic::PolicyIndustry;

    pub fn label(&self) -> &'static str {
        match self {
            Topic::ElectricVehicles => "Electric Vehicles",
            Topic::EthanolBiofuels => "Ethanol & Biofuels",
            Topic::GreenHydrogen => "Green Hydrogen",
            Topic::RailElectrification => "Rail Electrification",
            Topic::TransportEmissions => "Transport Emissions",
            Topic::PolicyIndustry => "Policy & Industry",
        }
    }

    /// Lowercase substrings, some padded with spaces to match whole words.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::ElectricVehicles => &[
                "electric vehicle",
                " ev ",
                "evs",
                "battery electric",
                "bev",
                "charging station",
                "tata nexon",
                "ola electric",
                "ather",
                "e-scooter",
                "e-bus",
            ],
            Topic::EthanolBiofuels => &[
                "ethanol",
                "biofuel",
                "blending",
                "e20",
                "molasses",
                "flex fuel",
                "sugarcane",
            ],
            Topic::GreenHydrogen => &[
                "green hydrogen",
                "hydrogen fuel",
                "electrolyser",
                "fuel cell",
                "mnre hydrogen",
                "h2",
            ],
            Topic::RailElectrification => &[
                "rail electrif",
                "indian railways",
                "railway electr",
                "vande bharat",
                "metro rail",
            ],
            Topic::TransportEmissions => &[
                "transport emission",
                "vehicular emission",
                "air pollution",
                "pm2.5",
                "co2 emission",
                "carbon emission",
                "decarboni",
            ],
            Topic::PolicyIndustry => &[
                "fame scheme",
                "mnre",
                "morth",
                "niti aayog",
                "renewable energy policy",
                "ev policy",
                "clean energy",
                "net zero",
                "sustainability",
            ],
        }
    }

    fn matches(&self, padded: &str) -> bool {
        self.keywords().iter().any(|kw| padded.contains(kw))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify free text (usually title and description joined by a space).
pub fn classify(text: &str) -> Topic {
    // Padding lets " ev " match at the very start or end of the text.
    let padded = format!(" {} ", text).to_lowercase();

    Topic::ALL
        .into_iter()
        .find(|topic| topic.matches(&padded))
        .unwrap_or(Topic::DEFAULT)
}
