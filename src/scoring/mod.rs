pub mod config;
pub mod engine;
pub mod factors;
pub mod metrics;
pub mod rank;
pub mod recommend;
pub mod rubric;
pub mod validation;
pub mod valuation;

pub use config::*;
pub use engine::{calculate_score, CheckContribution, ScoreBreakdown, ScoreResult};
pub use factors::Threshold;
pub use metrics::derive_metrics;
pub use rank::{assign_ranks, rank_by_score};
pub use recommend::{recommend, RecommendationBands};
pub use rubric::{CheckRule, Metric, Rubric, POINTS_PER_CHECK};
pub use validation::{compile_rubric, validate_scoring};
pub use valuation::{valuation, GrowthTier, Valuation, ValuationTable};
