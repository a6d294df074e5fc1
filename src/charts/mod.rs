pub mod citations;
pub mod generator;
pub mod rules;

use crate::models::chart::ChartDescriptor;
use self::rules::{ Rule, Trigger, DEFAULT_RULES };
use log::debug;

/// Maps a user query to the charts shown next to the assistant's answer.
///
/// Pure and stateless: the output depends only on the query text, so one
/// dispatcher can be shared freely across requests.
#[derive(Debug, Clone, Copy)]
pub struct ChartDispatcher {
    rules: &'static [Rule],
}

impl Default for ChartDispatcher {
    fn default() -> Self {
        Self { rules: DEFAULT_RULES }
    }
}

impl ChartDispatcher {
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub fn dispatch(&self, query: &str) -> Vec<ChartDescriptor> {
        let lowered = query.to_lowercase();
        let mut charts = Vec::new();

        for rule in self.rules {
            let armed = match rule.trigger {
                Trigger::Always => true,
                Trigger::WhenNothingMatched => charts.is_empty(),
            };
            if armed && rule.predicate.matches(&lowered) {
                debug!("Chart rule '{}' matched", rule.name);
                charts.extend((rule.build)());
            }
        }

        charts
    }
}

/// Runs the built-in rule table.
pub fn dispatch(query: &str) -> Vec<ChartDescriptor> {
    ChartDispatcher::default().dispatch(query)
}
