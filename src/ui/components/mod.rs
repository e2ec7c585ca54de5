pub mod distribution;
pub mod gauge;

pub use distribution::DistributionBar;
pub use gauge::temperature_gauge;
