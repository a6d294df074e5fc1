use serde::{ Serialize, Deserialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    SCurve,
    CostCurve,
    Lcoe,
    OilDemand,
    MarketShare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderHint {
    Line,
    Bar,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl Citation {
    pub fn new(name: &str, description: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<f64>) -> Self {
        Self { label: label.into(), points }
    }
}

/// Render-ready chart: x-axis `labels` plus one or more `series` of equal length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub title: String,
    pub chart_title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub render_hint: RenderHint,
    pub citations: Vec<Citation>,
}

/// Body of `POST /api/charts`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartRequest {
    pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub charts: Vec<ChartDescriptor>,
}
