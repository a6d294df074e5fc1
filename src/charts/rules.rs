//! Keyword rules that decide which charts accompany a query.
//!
//! Rules are evaluated in order against the lower-cased query. Every matching
//! rule contributes its charts; a rule marked [`Trigger::WhenNothingMatched`]
//! only fires if no earlier rule produced anything.

use super::citations::{ self, CitationTable };
use super::generator::{ self, Sector };
use crate::models::chart::{ ChartDescriptor, Citation };

/// Substring test over an already lower-cased query.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// At least one keyword is present.
    AnyOf(&'static [&'static str]),
    /// Every group has at least one keyword present.
    AllOf(&'static [&'static [&'static str]]),
    /// At least one inner predicate holds.
    Either(&'static [Predicate]),
}

impl Predicate {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Predicate::AnyOf(words) => words.iter().any(|w| lowered.contains(w)),
            Predicate::AllOf(groups) =>
                groups.iter().all(|group| group.iter().any(|w| lowered.contains(w))),
            Predicate::Either(inner) => inner.iter().any(|p| p.matches(lowered)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Always,
    WhenNothingMatched,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub predicate: Predicate,
    pub trigger: Trigger,
    pub build: fn() -> Vec<ChartDescriptor>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("predicate", &self.predicate)
            .field("trigger", &self.trigger)
            .finish()
    }
}

fn cite(table: CitationTable) -> Vec<Citation> {
    citations::expand(table)
}

fn two_wheeler_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::s_curve(
            "Two-Wheeler Electrification (India)",
            "Electric Two-Wheelers",
            2023,
            2027,
            2030,
            cite(citations::TWO_WHEELER)
        )
    ]
}

fn oil_charts() -> Vec<ChartDescriptor> {
    vec![generator::crude_oil_demand("Crude Oil Demand Peak", cite(citations::OIL_DEMAND))]
}

fn transportation_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::s_curve(
            "EV Adoption S-Curve",
            "Electric Vehicles",
            2020,
            2025,
            2030,
            cite(citations::EV_ADOPTION)
        ),
        generator::market_share(
            "Transportation Market Share",
            Sector::Transportation,
            cite(citations::TRANSPORTATION_SHARE)
        )
    ]
}

fn energy_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::solar_lcoe("Solar Cost Projection", cite(citations::SOLAR_LCOE)),
        generator::market_share("Energy Transformation", Sector::Energy, cite(citations::ENERGY_SHARE))
    ]
}

fn cost_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::cost_curve(
            "Technology Cost Curve",
            "Technology",
            100.0,
            0.2,
            2010,
            2035,
            cite(citations::COST_CURVE)
        )
    ]
}

fn battery_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::cost_curve(
            "Battery Cost Decline",
            "Battery Storage",
            200.0,
            0.18,
            2015,
            2035,
            cite(citations::BATTERY_COST)
        )
    ]
}

fn generic_adoption_charts() -> Vec<ChartDescriptor> {
    vec![
        generator::s_curve(
            "Technology Adoption Curve",
            "Technology Adoption",
            2020,
            2025,
            2030,
            cite(citations::GENERIC_ADOPTION)
        )
    ]
}

/// Built-in rule table, in evaluation order.
pub static DEFAULT_RULES: &[Rule] = &[
    Rule {
        name: "two-wheeler",
        predicate: Predicate::Either(
            &[
                Predicate::AnyOf(&["two-wheeler", "two wheeler", "scooter", "motorcycle"]),
                Predicate::AllOf(&[&["bike"], &["electric", "india"]]),
            ]
        ),
        trigger: Trigger::Always,
        build: two_wheeler_charts,
    },
    Rule {
        name: "oil",
        predicate: Predicate::AnyOf(&["oil", "crude", "petroleum", "demand peak", "barrel"]),
        trigger: Trigger::Always,
        build: oil_charts,
    },
    Rule {
        name: "transportation",
        predicate: Predicate::AnyOf(&["ev", "electric vehicle", "transport", "automotive"]),
        trigger: Trigger::Always,
        build: transportation_charts,
    },
    Rule {
        name: "energy",
        predicate: Predicate::AnyOf(&["solar", "renewable", "energy", "swb"]),
        trigger: Trigger::Always,
        build: energy_charts,
    },
    Rule {
        name: "cost",
        predicate: Predicate::AnyOf(&["cost", "wright", "price"]),
        trigger: Trigger::Always,
        build: cost_charts,
    },
    Rule {
        name: "battery",
        predicate: Predicate::AnyOf(&["battery", "storage"]),
        trigger: Trigger::Always,
        build: battery_charts,
    },
    Rule {
        name: "generic-graph",
        predicate: Predicate::AnyOf(&["graph", "chart", "plot"]),
        trigger: Trigger::WhenNothingMatched,
        build: generic_adoption_charts,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static Rule {
        DEFAULT_RULES.iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_bike_needs_second_keyword() {
        let two_wheeler = rule("two-wheeler");
        assert!(!two_wheeler.predicate.matches("i like my bike"));
        assert!(two_wheeler.predicate.matches("electric bike sales"));
        assert!(two_wheeler.predicate.matches("bike market in india"));
        assert!(two_wheeler.predicate.matches("scooter"));
        assert!(two_wheeler.predicate.matches("two wheeler"));
    }

    #[test]
    fn test_keywords_are_plain_substrings() {
        // "ev" is not word-bounded, so "every" triggers the transportation rule.
        assert!(rule("transportation").predicate.matches("every day"));
        assert!(rule("oil").predicate.matches("boiling"));
        assert!(!rule("cost").predicate.matches("c o s t"));
    }

    #[test]
    fn test_only_fallback_rule_is_conditional() {
        let conditional: Vec<&str> = DEFAULT_RULES.iter()
            .filter(|r| r.trigger == Trigger::WhenNothingMatched)
            .map(|r| r.name)
            .collect();
        assert_eq!(conditional, ["generic-graph"]);
        assert_eq!(DEFAULT_RULES.last().map(|r| r.name), Some("generic-graph"));
    }

    #[test]
    fn test_builders_attach_citations() {
        for rule in DEFAULT_RULES {
            for chart in (rule.build)() {
                assert!(!chart.citations.is_empty(), "{} / {}", rule.name, chart.title);
                assert!(chart.citations.len() <= 3);
            }
        }
    }

    #[test]
    fn test_empty_predicates() {
        assert!(!Predicate::AnyOf(&[]).matches("anything"));
        assert!(Predicate::AllOf(&[]).matches("anything"));
        assert!(!Predicate::Either(&[]).matches("anything"));
    }
}
