pub mod crops;
pub mod dashboard;

pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
