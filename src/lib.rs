pub mod config;
pub mod error;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod startup;

pub use error::{RecordError, Rejection};
pub use pipeline::{process, process_ingested, process_records, BatchResult, BatchSummary};
pub use scoring::Rubric;
pub use startup::{DerivedMetrics, Recommendation, ScoredRecord, StartupRecord, StartupRow};
