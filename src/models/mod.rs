pub mod crop;
pub mod insight;
pub mod report;
pub mod weather;

pub use crop::*;
pub use insight::*;
pub use report::*;
pub use weather::*;
