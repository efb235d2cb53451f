//! Declarative configuration for the emissions projection chart.
//!
//! The page hands this JSON straight to the charting library. Keys follow the
//! library's camelCase option names.

use serde::Serialize;

const YEARS: [&str; 9] = ["2020", "2025", "2030", "2035", "2040", "2045", "2050", "2060", "2070"];
const BUSINESS_AS_USUAL: [f64; 9] = [100.0, 112.0, 128.0, 148.0, 165.0, 185.0, 200.0, 230.0, 260.0];
const ACCELERATED_ADOPTION: [f64; 9] = [100.0, 105.0, 92.0, 75.0, 55.0, 35.0, 20.0, 8.0, 2.0];

const FONT_FAMILY: &str = "'Inter', sans-serif";

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u32; 2]>,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
    pub point_background_color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: serde_json::Value,
    pub scales: serde_json::Value,
}

/// Index-normalized CO₂ curves: business as usual vs accelerated adoption.
pub fn emissions_chart() -> ChartConfig {
    let font = serde_json::json!({ "family": FONT_FAMILY });

    ChartConfig {
        kind: "line",
        data: ChartData {
            labels: YEARS.to_vec(),
            datasets: vec![
                Dataset {
                    label: "Business-As-Usual (BAU)",
                    data: BUSINESS_AS_USUAL.to_vec(),
                    border_color: "#8b6f47",
                    background_color: "rgba(139, 111, 71, 0.08)",
                    border_width: 2.0,
                    border_dash: Some([6, 4]),
                    fill: false,
                    tension: 0.4,
                    point_radius: 4,
                    point_background_color: "#8b6f47",
                },
                Dataset {
                    label: "Accelerated Renewable Adoption",
                    data: ACCELERATED_ADOPTION.to_vec(),
                    border_color: "#3e5432",
                    background_color: "rgba(62, 84, 50, 0.1)",
                    border_width: 2.5,
                    border_dash: None,
                    fill: true,
                    tension: 0.4,
                    point_radius: 4,
                    point_background_color: "#3e5432",
                },
            ],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            plugins: serde_json::json!({
                "legend": {
                    "position": "bottom",
                    "labels": {
                        "usePointStyle": true,
                        "padding": 20,
                        "font": { "family": FONT_FAMILY, "size": 12 }
                    }
                }
            }),
            scales: serde_json::json!({
                "y": {
                    "beginAtZero": true,
                    "title": { "display": true, "text": "CO₂ Emissions Index", "font": font.clone() },
                    "grid": { "color": "rgba(0,0,0,0.06)" },
                    "ticks": { "font": font.clone() }
                },
                "x": {
                    "title": { "display": true, "text": "Year", "font": font.clone() },
                    "grid": { "display": false },
                    "ticks": { "font": font.clone() }
                }
            }),
        },
    }
}
