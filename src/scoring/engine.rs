use super::rubric::{Metric, Rubric, POINTS_PER_CHECK};
use crate::startup::{DerivedMetrics, StartupRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct CheckContribution {
    pub metric: Metric,
    pub label: String,       // e.g. "Runway", "LTV/CAC"
    pub description: String, // e.g. "12.0 months, needs >12"
    pub passed: bool,
    pub before: u8, // Score before this check
    pub after: u8,  // Score after this check
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub checks: Vec<CheckContribution>,
}

impl ScoreBreakdown {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// One of 0, 20, 40, 60, 80, 100
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Run every rubric check against one startup and sum the points.
///
/// Checks are independent; each one is evaluated even after earlier ones
/// fail, so the breakdown always lists all five.
pub fn calculate_score(
    record: &StartupRecord,
    metrics: &DerivedMetrics,
    rubric: &Rubric,
) -> ScoreResult {
    let mut score = 0u8;
    let mut checks = Vec::with_capacity(rubric.checks.len());

    for rule in &rubric.checks {
        let before = score;
        let observed = rule.metric.observe(record, metrics);
        let passed = rule.threshold.matches(observed);
        if passed {
            score += POINTS_PER_CHECK;
        }

        checks.push(CheckContribution {
            metric: rule.metric,
            label: rule.metric.label().to_string(),
            description: format!(
                "{}, needs {}",
                describe_value(rule.metric, observed),
                rule.threshold
            ),
            passed,
            before,
            after: score,
        });
    }

    ScoreResult {
        score,
        breakdown: ScoreBreakdown { checks },
    }
}

fn describe_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::RunwayMonths => format!("{:.1} months", value),
        Metric::LtvCac => format!("{:.2}x", value),
        Metric::Growth => format!("{}%", value),
        Metric::Margin => format!("{:.1}%", value * 100.0),
        Metric::Mrr => format!("{:.0}/mo", value),
    }
}
