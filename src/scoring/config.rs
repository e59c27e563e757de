use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Restates the thresholds of the investability rubric. Every field is
/// optional; anything left out keeps the built-in rule.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   checks:
///     runway_months: ">12"
///     ltv_cac: ">3"
///     growth: ">7"
///     margin: ">0"
///     mrr: ">200000"
///   valuation:
///     tiers:
///       - { growth: ">15", multiple: 12 }
///       - { growth: ">8", multiple: 8 }
///     default_multiple: 5
///   recommendation:
///     invest: ">=80"
///     monitor: ">=55"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub checks: Option<ChecksConfig>,

    #[serde(default)]
    pub valuation: Option<ValuationConfig>,

    #[serde(default)]
    pub recommendation: Option<RecommendationConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            checks: Some(ChecksConfig::default()),
            valuation: Some(ValuationConfig::default()),
            recommendation: Some(RecommendationConfig::default()),
        }
    }
}

/// Pass conditions of the five rubric checks, each worth 20 points.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    /// Months of runway, e.g. ">12"
    #[serde(default)]
    pub runway_months: Option<String>,

    /// Lifetime value over acquisition cost, e.g. ">3"
    #[serde(default)]
    pub ltv_cac: Option<String>,

    /// Growth in percent, e.g. ">7"
    #[serde(default)]
    pub growth: Option<String>,

    /// (revenue - burn_rate) / revenue, e.g. ">0"
    #[serde(default)]
    pub margin: Option<String>,

    /// Monthly recurring revenue, e.g. ">200000"
    #[serde(default)]
    pub mrr: Option<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            runway_months: Some(">12".to_string()),
            ltv_cac: Some(">3".to_string()),
            growth: Some(">7".to_string()),
            margin: Some(">0".to_string()),
            mrr: Some(">200000".to_string()),
        }
    }
}

/// Revenue multiples by growth tier.
///
/// Tiers are tried in order and the first matching one wins; when none
/// matches, `default_multiple` applies.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationConfig {
    #[serde(default)]
    pub tiers: Option<Vec<ValuationTier>>,

    #[serde(default)]
    pub default_multiple: Option<f64>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            tiers: Some(vec![
                ValuationTier {
                    growth: ">15".to_string(),
                    multiple: 12.0,
                },
                ValuationTier {
                    growth: ">8".to_string(),
                    multiple: 8.0,
                },
            ]),
            default_multiple: Some(5.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ValuationTier {
    /// Growth condition (e.g., ">15")
    pub growth: String,

    /// ARR multiple applied when the condition matches
    pub multiple: f64,
}

/// Score bands for the INVEST and MONITOR decisions; anything else is REJECT.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecommendationConfig {
    #[serde(default)]
    pub invest: Option<String>,

    #[serde(default)]
    pub monitor: Option<String>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            invest: Some(">=80".to_string()),
            monitor: Some(">=55".to_string()),
        }
    }
}
