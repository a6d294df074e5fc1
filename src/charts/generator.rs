//! Chart builders. Each returns a fully populated [`ChartDescriptor`]; the
//! dispatcher only picks which ones to call and attaches citations.

use crate::models::chart::{ ChartDescriptor, ChartKind, Citation, RenderHint, Series };

/// Logistic steepness for adoption curves.
const S_CURVE_STEEPNESS: f64 = 0.5;

/// Years past saturation that an adoption curve keeps plotting.
const S_CURVE_TAIL_YEARS: i32 = 5;

/// Production doubles every this many years in the cost model.
const COST_DOUBLING_YEARS: f64 = 2.0;

/// Logistic adoption percentage for every year in `start..=saturation + 5`.
pub fn s_curve_points(start: i32, inflection: i32, saturation: i32) -> Vec<(i32, f64)> {
    let midpoint = f64::from(inflection - start);
    (start..=saturation + S_CURVE_TAIL_YEARS)
        .map(|year| {
            let x = f64::from(year - start);
            let adoption = 100.0 / (1.0 + (-S_CURVE_STEEPNESS * (x - midpoint)).exp());
            (year, adoption)
        })
        .collect()
}

/// Wright's-law style decline: `initial * (2^(elapsed/2))^-learning_rate`.
pub fn cost_curve_points(initial_cost: f64, learning_rate: f64, start: i32, end: i32) -> Vec<(i32, f64)> {
    (start..=end)
        .map(|year| {
            let elapsed = f64::from(year - start);
            let doublings = (elapsed / COST_DOUBLING_YEARS).exp2();
            (year, initial_cost * doublings.powf(-learning_rate))
        })
        .collect()
}

fn split_years(points: Vec<(i32, f64)>) -> (Vec<String>, Vec<f64>) {
    points
        .into_iter()
        .map(|(year, value)| (year.to_string(), value))
        .unzip()
}

fn labels(years: &[&str]) -> Vec<String> {
    years
        .iter()
        .map(|y| y.to_string())
        .collect()
}

pub fn s_curve(
    title: &str,
    technology: &str,
    start: i32,
    inflection: i32,
    saturation: i32,
    citations: Vec<Citation>
) -> ChartDescriptor {
    let (labels, adoption) = split_years(s_curve_points(start, inflection, saturation));
    ChartDescriptor {
        kind: ChartKind::SCurve,
        title: title.to_string(),
        chart_title: format!("{} S-Curve Adoption Pattern", technology),
        labels,
        series: vec![Series::new(format!("{} Adoption (%)", technology), adoption)],
        render_hint: RenderHint::Line,
        citations,
    }
}

pub fn cost_curve(
    title: &str,
    technology: &str,
    initial_cost: f64,
    learning_rate: f64,
    start: i32,
    end: i32,
    citations: Vec<Citation>
) -> ChartDescriptor {
    let (labels, costs) = split_years(cost_curve_points(initial_cost, learning_rate, start, end));
    ChartDescriptor {
        kind: ChartKind::CostCurve,
        title: title.to_string(),
        chart_title: format!("{} Cost Decline (Wright's Law)", technology),
        labels,
        series: vec![Series::new(format!("{} Cost", technology), costs)],
        render_hint: RenderHint::Line,
        citations,
    }
}

pub fn solar_lcoe(title: &str, citations: Vec<Citation>) -> ChartDescriptor {
    ChartDescriptor {
        kind: ChartKind::Lcoe,
        title: title.to_string(),
        chart_title: "Solar PV LCOE Forecast ($/kWh)".to_string(),
        labels: labels(&["2015", "2020", "2024", "2025", "2030", "2035"]),
        series: vec![
            Series::new("Utility-Scale Solar", vec![0.064, 0.048, 0.02, 0.015, 0.01, 0.005]),
            Series::new("Residential Solar", vec![0.151, 0.094, 0.05, 0.035, 0.02, 0.01])
        ],
        render_hint: RenderHint::Line,
        citations,
    }
}

pub fn crude_oil_demand(title: &str, citations: Vec<Citation>) -> ChartDescriptor {
    ChartDescriptor {
        kind: ChartKind::OilDemand,
        title: title.to_string(),
        chart_title: "Crude Oil Demand Peak Projection".to_string(),
        labels: labels(&["2020", "2022", "2023", "2025", "2027", "2030", "2032", "2035"]),
        series: vec![
            Series::new(
                "China (Million Barrels/Day)",
                vec![12.5, 13.0, 13.2, 13.4, 13.5, 10.0, 7.0, 4.0]
            ),
            Series::new(
                "Global (Million Barrels/Day)",
                vec![95.0, 97.0, 98.0, 99.0, 99.5, 100.0, 80.0, 50.0]
            )
        ],
        render_hint: RenderHint::Line,
        citations,
    }
}

/// Sector of a legacy-vs-disruptive market share table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sector {
    Transportation,
    Energy,
    Generic,
}

impl Sector {
    fn table(self) -> &'static ShareTable {
        match self {
            Sector::Transportation => &TRANSPORTATION_SHARE,
            Sector::Energy => &ENERGY_SHARE,
            Sector::Generic => &GENERIC_SHARE,
        }
    }
}

struct ShareTable {
    chart_title: &'static str,
    years: &'static [&'static str],
    legacy: &'static [f64],
    disruptive: &'static [f64],
}

static TRANSPORTATION_SHARE: ShareTable = ShareTable {
    chart_title: "Transportation: ICE vs EV Market Share",
    years: &["2020", "2022", "2024", "2026", "2028", "2030"],
    legacy: &[97.0, 92.0, 75.0, 40.0, 15.0, 5.0],
    disruptive: &[3.0, 8.0, 25.0, 60.0, 85.0, 95.0],
};

static ENERGY_SHARE: ShareTable = ShareTable {
    chart_title: "Energy: Fossil vs Renewable",
    years: &["2020", "2025", "2030", "2035"],
    legacy: &[80.0, 50.0, 10.0, 0.0],
    disruptive: &[20.0, 50.0, 90.0, 100.0],
};

static GENERIC_SHARE: ShareTable = ShareTable {
    chart_title: "Market Share Transformation",
    years: &["2025", "2030", "2035"],
    legacy: &[90.0, 50.0, 20.0],
    disruptive: &[10.0, 50.0, 80.0],
};

pub fn market_share(title: &str, sector: Sector, citations: Vec<Citation>) -> ChartDescriptor {
    let table = sector.table();
    ChartDescriptor {
        kind: ChartKind::MarketShare,
        title: title.to_string(),
        chart_title: table.chart_title.to_string(),
        labels: labels(table.years),
        series: vec![
            Series::new("Legacy Technology", table.legacy.to_vec()),
            Series::new("Disruptive Technology", table.disruptive.to_vec())
        ],
        render_hint: RenderHint::Bar,
        citations,
    }
}
