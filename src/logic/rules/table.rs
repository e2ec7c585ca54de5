use super::{AgeWindow, Rule};
use crate::models::{Crop, Insight, InsightCategory};

const WHEAT_NAMES: &[&str] = &["wheat", "gandum"];

/// One row of the insight rule table.
///
/// `title` and `body` are templates; `{name}` and `{age}` are replaced with
/// the crop name and its age in days.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub id: &'static str,
    pub name: &'static str,
    /// Crop name keywords (substring, case-insensitive). `None` matches every crop.
    pub species: Option<&'static [&'static str]>,
    pub window: AgeWindow,
    pub category: InsightCategory,
    pub title: &'static str,
    pub body: &'static str,
}

/// Evaluated in this order for each crop.
pub const INSIGHT_RULES: &[InsightRule] = &[
    InsightRule {
        id: "wheat_crown_root",
        name: "Wheat crown-root stage",
        species: Some(WHEAT_NAMES),
        window: AgeWindow::Inclusive(20, 25),
        category: InsightCategory::Water,
        title: "{name}: Crown Root Initiation (Day {age})",
        body: "Critical stage for wheat. Crown roots are forming now, so apply the \
               first irrigation to support root establishment.",
    },
    InsightRule {
        id: "wheat_nitrogen",
        name: "Wheat nitrogen stage",
        species: Some(WHEAT_NAMES),
        window: AgeWindow::Exclusive(50, 60),
        category: InsightCategory::Fertilizer,
        title: "{name}: Nitrogen Top-Dressing (Day {age})",
        body: "Apply the second dose of urea now, before the booting stage begins.",
    },
    InsightRule {
        id: "early_weed_control",
        name: "Early-growth weed control",
        species: None,
        window: AgeWindow::Exclusive(10, 30),
        category: InsightCategory::Warning,
        title: "{name}: Weed Control Window",
        body: "{name} is {age} days old. Check the field for weeds and remove them \
               before they compete for water and nutrients.",
    },
    InsightRule {
        id: "harvest_readiness",
        name: "Harvest readiness",
        species: None,
        window: AgeWindow::After(120),
        category: InsightCategory::Harvest,
        title: "{name}: Harvest Readiness",
        body: "{name} has been in the field for {age} days. Check grain maturity \
               and plan the harvest.",
    },
];

impl InsightRule {
    pub fn matches(&self, crop: &Crop, age_days: i64) -> bool {
        let species_ok = match self.species {
            Some(keywords) => crop.name_matches_any(keywords),
            None => true,
        };
        species_ok && self.window.contains(age_days)
    }
}

impl Rule for InsightRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> String {
        let crops = match self.species {
            Some(keywords) => keywords.join("/"),
            None => "any crop".to_string(),
        };
        format!("{}, {} -> {}", crops, self.window.describe(), self.category)
    }

    fn evaluate(&self, crop: &Crop, age_days: i64) -> Option<Insight> {
        if !self.matches(crop, age_days) {
            return None;
        }

        Some(Insight::new(
            self.category,
            render(self.title, crop, age_days),
            render(self.body, crop, age_days),
        ))
    }
}

// Single pass, so placeholder text inside a crop name is left alone
fn render(template: &str, crop: &Crop, age_days: i64) -> String {
    let mut out = String::with_capacity(template.len() + crop.name.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{name}") {
            out.push_str(&crop.name);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{age}") {
            out.push_str(&age_days.to_string());
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropStatus;
    use chrono::NaiveDate;

    fn wheat() -> Crop {
        Crop::new(
            "Wheat A",
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            CropStatus::Growing,
        )
    }

    fn rule(id: &str) -> &'static InsightRule {
        INSIGHT_RULES.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn rule_ids_are_unique() {
        let mut ids: Vec<&str> = INSIGHT_RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), INSIGHT_RULES.len());
    }

    #[test]
    fn templates_interpolate_name_and_age() {
        let insight = rule("wheat_crown_root").evaluate(&wheat(), 22).unwrap();
        assert_eq!(insight.title, "Wheat A: Crown Root Initiation (Day 22)");
        assert_eq!(insight.category, InsightCategory::Water);

        let insight = rule("early_weed_control").evaluate(&wheat(), 22).unwrap();
        assert!(insight.body.starts_with("Wheat A is 22 days old."));
        assert!(!insight.body.contains('{'));
    }

    #[test]
    fn species_filter_excludes_other_crops() {
        let maize = Crop::new(
            "Maize",
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            CropStatus::Growing,
        );
        assert!(rule("wheat_crown_root").evaluate(&maize, 22).is_none());
        assert!(rule("wheat_nitrogen").evaluate(&maize, 55).is_none());
        assert!(rule("early_weed_control").evaluate(&maize, 22).is_some());
    }

    #[test]
    fn placeholders_in_crop_names_are_not_expanded() {
        let crop = Crop::new(
            "Wheat {age}",
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            CropStatus::Growing,
        );
        let insight = rule("wheat_crown_root").evaluate(&crop, 22).unwrap();
        assert_eq!(insight.title, "Wheat {age}: Crown Root Initiation (Day 22)");

        let insight = rule("early_weed_control").evaluate(&crop, 22).unwrap();
        assert!(insight.body.starts_with("Wheat {age} is 22 days old."));
    }
}
