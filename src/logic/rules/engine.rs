use super::{Rule, INSIGHT_RULES};
use crate::models::{Crop, Insight, InsightCategory};
use chrono::NaiveDate;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = INSIGHT_RULES
            .iter()
            .map(|rule| Box::new(*rule) as Box<dyn Rule>)
            .collect();

        Self { rules }
    }

    /// Evaluate every growing crop against the rule table.
    ///
    /// Insights follow crop order, then rule order. Never returns an empty
    /// list: when nothing matches, a single "all clear" insight is emitted.
    pub fn evaluate(&self, crops: &[Crop], today: NaiveDate) -> Vec<Insight> {
        let mut insights: Vec<Insight> = crops
            .iter()
            .filter(|crop| crop.is_growing())
            .flat_map(|crop| {
                let age_days = crop.age_days(today);
                self.rules
                    .iter()
                    .filter_map(move |rule| rule.evaluate(crop, age_days))
            })
            .collect();

        if insights.is_empty() {
            insights.push(all_clear());
        }

        insights
    }

    /// `(id, name, description)` for every rule, in evaluation order
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str, String)> {
        self.rules
            .iter()
            .map(|r| (r.id(), r.name(), r.describe()))
            .collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn all_clear() -> Insight {
    Insight::new(
        InsightCategory::Info,
        "All Clear",
        "Your crops are on track. No immediate actions needed.",
    )
}
