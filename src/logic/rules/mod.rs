pub mod engine;
pub mod table;

pub use engine::RulesEngine;
pub use table::INSIGHT_RULES;

use crate::models::{Crop, Insight};

/// Trait for crop insight rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule for one growing crop.
    ///
    /// `age_days` is computed once by the engine so every rule sees the same
    /// value for a given crop.
    fn evaluate(&self, crop: &Crop, age_days: i64) -> Option<Insight>;

    /// Short summary of when the rule fires
    fn describe(&self) -> String;
}

/// Crop age range a rule applies to, with explicit bound inclusivity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeWindow {
    /// `min <= age <= max`
    Inclusive(i64, i64),
    /// `min < age < max`
    Exclusive(i64, i64),
    /// `age > min`
    After(i64),
}

impl AgeWindow {
    pub fn contains(&self, age_days: i64) -> bool {
        match *self {
            AgeWindow::Inclusive(min, max) => min <= age_days && age_days <= max,
            AgeWindow::Exclusive(min, max) => min < age_days && age_days < max,
            AgeWindow::After(min) => age_days > min,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            AgeWindow::Inclusive(min, max) => format!("{}-{} days", min, max),
            AgeWindow::Exclusive(min, max) => format!("{}-{} days (exclusive)", min, max),
            AgeWindow::After(min) => format!("over {} days", min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusive_window_bounds() {
        let w = AgeWindow::Inclusive(20, 25);
        assert!(!w.contains(19));
        assert!(w.contains(20));
        assert!(w.contains(25));
        assert!(!w.contains(26));
    }

    #[test]
    fn exclusive_window_bounds() {
        let w = AgeWindow::Exclusive(50, 60);
        assert!(!w.contains(50));
        assert!(w.contains(51));
        assert!(w.contains(59));
        assert!(!w.contains(60));
    }

    #[test]
    fn after_window_is_strict() {
        let w = AgeWindow::After(120);
        assert!(!w.contains(120));
        assert!(w.contains(121));
    }
}
