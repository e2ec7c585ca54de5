pub mod data_sync;
pub mod report;
pub mod rules;
pub mod weather_alert;

pub use data_sync::{RefreshOutcome, RefreshService};
pub use report::build_report;
pub use rules::RulesEngine;
