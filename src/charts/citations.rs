use crate::models::chart::Citation;

/// `(name, description, url)` rows.
pub type CitationTable = &'static [(&'static str, &'static str, &'static str)];

pub fn expand(table: CitationTable) -> Vec<Citation> {
    table
        .iter()
        .map(|(name, description, url)| Citation::new(name, description, url))
        .collect()
}

pub const TWO_WHEELER: CitationTable = &[
    ("NITI Aayog EV Report", "India's electric mobility transition roadmap", "https://www.niti.gov.in/"),
    ("CEEW Transport Study", "Council on Energy, Environment and Water analysis", "https://www.ceew.in/"),
    ("India EV Market Research", "Electric two-wheeler adoption forecasts", "https://www.indianevmarket.com"),
];

pub const OIL_DEMAND: CitationTable = &[
    (
        "RethinkX Energy Report 2020",
        "Comprehensive analysis of oil demand disruption",
        "https://www.rethinkx.com/energy",
    ),
    (
        "IEA World Energy Outlook",
        "International Energy Agency global oil demand projections",
        "https://www.iea.org/reports/world-energy-outlook-2023",
    ),
    (
        "BP Statistical Review",
        "Historical and projected crude oil consumption data",
        "https://www.bp.com/en/global/corporate/energy-economics/statistical-review-of-world-energy.html",
    ),
];

pub const EV_ADOPTION: CitationTable = &[
    (
        "RethinkX Transportation Report",
        "EV adoption S-curve analysis and projections",
        "https://www.rethinkx.com/transportation",
    ),
    (
        "BloombergNEF EV Outlook",
        "Global electric vehicle market forecasts",
        "https://about.bnef.com/electric-vehicle-outlook/",
    ),
    (
        "IEA Global EV Data",
        "Electric vehicle stock and sales statistics",
        "https://www.iea.org/data-and-statistics/data-tools/global-ev-data-explorer",
    ),
];

pub const TRANSPORTATION_SHARE: CitationTable = &[
    (
        "Clean Disruption of Energy",
        "Tony Seba's market transformation analysis",
        "https://tonyseba.com/portfolio-item/clean-disruption-of-energy-and-transportation/",
    ),
    (
        "McKinsey Auto Insights",
        "Automotive industry transformation data",
        "https://www.mckinsey.com/industries/automotive-and-assembly",
    ),
];

pub const SOLAR_LCOE: CitationTable = &[
    (
        "IRENA Renewable Cost Database",
        "Solar PV LCOE historical trends and forecasts",
        "https://www.irena.org/costs",
    ),
    (
        "NREL Cost Analysis",
        "National Renewable Energy Laboratory cost projections",
        "https://www.nrel.gov/solar/market-research-analysis/solar-cost-targets.html",
    ),
    (
        "Lazard LCOE Analysis",
        "Levelized cost of energy comparative analysis",
        "https://www.lazard.com/research-insights/levelized-cost-of-energyplus/",
    ),
];

pub const ENERGY_SHARE: CitationTable = &[
    (
        "RethinkX Rethinking Energy 2020-2030",
        "Solar-Wind-Battery disruption framework",
        "https://www.rethinkx.com/energy",
    ),
    (
        "IEA Renewables Report",
        "Global renewable energy capacity and generation",
        "https://www.iea.org/reports/renewables-2023",
    ),
];

pub const COST_CURVE: CitationTable = &[
    (
        "Wright's Law Research",
        "Learning curve and cost reduction analysis",
        "https://www.sciencedirect.com/topics/engineering/learning-curve",
    ),
    ("Tony Seba Clean Disruption", "Exponential cost improvement frameworks", "https://tonyseba.com"),
    ("MIT Technology Review", "Technology cost decline tracking", "https://www.technologyreview.com"),
];

pub const BATTERY_COST: CitationTable = &[
    (
        "BloombergNEF Battery Price Survey",
        "Annual lithium-ion battery pack prices",
        "https://about.bnef.com/blog/lithium-ion-battery-pack-prices-hit-record-low/",
    ),
    (
        "NREL Battery Cost Research",
        "Energy storage cost and performance analysis",
        "https://www.nrel.gov/transportation/battery-cost.html",
    ),
    (
        "Tesla Battery Day Data",
        "Real-world battery cost reduction trajectories",
        "https://www.tesla.com/2020shareholdermeeting",
    ),
];

pub const GENERIC_ADOPTION: CitationTable = &[
    ("Market Research Data", "Technology adoption patterns and projections", "https://www.rethinkx.com/reports"),
];
