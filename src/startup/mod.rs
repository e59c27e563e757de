pub mod types;

pub use types::{DerivedMetrics, Recommendation, ScoredRecord, StartupRecord, StartupRow};
