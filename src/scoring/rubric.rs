use super::factors::Threshold;
use super::recommend::RecommendationBands;
use super::valuation::ValuationTable;
use crate::startup::{DerivedMetrics, StartupRecord};

/// Points awarded by every passing check.
pub const POINTS_PER_CHECK: u8 = 20;

/// Quantity a rubric check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    RunwayMonths,
    LtvCac,
    Growth,
    Margin,
    Mrr,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::RunwayMonths,
        Metric::LtvCac,
        Metric::Growth,
        Metric::Margin,
        Metric::Mrr,
    ];

    /// Config key, as used under `scoring.checks`
    pub fn key(&self) -> &'static str {
        match self {
            Metric::RunwayMonths => "runway_months",
            Metric::LtvCac => "ltv_cac",
            Metric::Growth => "growth",
            Metric::Margin => "margin",
            Metric::Mrr => "mrr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::RunwayMonths => "Runway",
            Metric::LtvCac => "LTV/CAC",
            Metric::Growth => "Growth",
            Metric::Margin => "Margin",
            Metric::Mrr => "MRR",
        }
    }

    pub fn observe(&self, record: &StartupRecord, metrics: &DerivedMetrics) -> f64 {
        match self {
            Metric::RunwayMonths => metrics.runway_months,
            Metric::LtvCac => metrics.ltv_cac,
            Metric::Growth => record.growth,
            Metric::Margin => metrics.margin,
            Metric::Mrr => metrics.mrr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckRule {
    pub metric: Metric,
    pub threshold: Threshold,
}

/// The complete, validated rule set the pipeline scores with.
///
/// Build one from a [`ScoringConfig`](super::ScoringConfig) with
/// [`compile_rubric`](super::compile_rubric), or use `Rubric::default()` for
/// the standard rules. A rubric is read-only and can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Rubric {
    pub checks: [CheckRule; 5],
    pub valuation: ValuationTable,
    pub bands: RecommendationBands,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            checks: [
                CheckRule {
                    metric: Metric::RunwayMonths,
                    threshold: Threshold::Above(12.0),
                },
                CheckRule {
                    metric: Metric::LtvCac,
                    threshold: Threshold::Above(3.0),
                },
                CheckRule {
                    metric: Metric::Growth,
                    threshold: Threshold::Above(7.0),
                },
                CheckRule {
                    metric: Metric::Margin,
                    threshold: Threshold::Above(0.0),
                },
                CheckRule {
                    metric: Metric::Mrr,
                    threshold: Threshold::Above(200_000.0),
                },
            ],
            valuation: ValuationTable::default(),
            bands: RecommendationBands::default(),
        }
    }
}
