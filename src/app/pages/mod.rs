pub mod performance;
pub mod prediction;
pub mod visualization;
