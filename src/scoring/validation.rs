use super::config::{ChecksConfig, RecommendationConfig, ScoringConfig, ValuationConfig};
use super::factors::Threshold;
use super::recommend::RecommendationBands;
use super::rubric::{Metric, Rubric};
use super::valuation::{GrowthTier, ValuationTable};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    compile_rubric(config).map(|_| ())
}

/// Turn a scoring config into the rubric the pipeline runs.
///
/// Fields absent from the config keep the standard rule. On failure every
/// problem is reported, each prefixed with its config path.
pub fn compile_rubric(config: &ScoringConfig) -> Result<Rubric, Vec<String>> {
    let mut errors = Vec::new();
    let mut rubric = Rubric::default();

    if let Some(ref checks) = config.checks {
        for rule in rubric.checks.iter_mut() {
            if let Some(expr) = check_expr(checks, rule.metric) {
                let path = format!("scoring.checks.{}", rule.metric.key());
                if let Some(threshold) = parse_threshold(&path, expr, &mut errors) {
                    rule.threshold = threshold;
                }
            }
        }
    }

    if let Some(ref valuation) = config.valuation {
        compile_valuation(valuation, &mut rubric.valuation, &mut errors);
    }

    if let Some(ref recommendation) = config.recommendation {
        compile_bands(recommendation, &mut rubric.bands, &mut errors);
    }

    if errors.is_empty() {
        Ok(rubric)
    } else {
        Err(errors)
    }
}

fn check_expr(checks: &ChecksConfig, metric: Metric) -> Option<&str> {
    match metric {
        Metric::RunwayMonths => checks.runway_months.as_deref(),
        Metric::LtvCac => checks.ltv_cac.as_deref(),
        Metric::Growth => checks.growth.as_deref(),
        Metric::Margin => checks.margin.as_deref(),
        Metric::Mrr => checks.mrr.as_deref(),
    }
}

fn compile_valuation(config: &ValuationConfig, table: &mut ValuationTable, errors: &mut Vec<String>) {
    if let Some(ref tiers) = config.tiers {
        let mut compiled = Vec::with_capacity(tiers.len());
        for (i, tier) in tiers.iter().enumerate() {
            let growth = parse_threshold(
                &format!("scoring.valuation.tiers[{}].growth", i),
                &tier.growth,
                errors,
            );
            let multiple_ok = check_multiple(
                &format!("scoring.valuation.tiers[{}].multiple", i),
                tier.multiple,
                errors,
            );
            if let (Some(growth), true) = (growth, multiple_ok) {
                compiled.push(GrowthTier {
                    growth,
                    multiple: tier.multiple,
                });
            }
        }
        table.tiers = compiled;
    }

    if let Some(multiple) = config.default_multiple {
        if check_multiple("scoring.valuation.default_multiple", multiple, errors) {
            table.default_multiple = multiple;
        }
    }
}

fn compile_bands(
    config: &RecommendationConfig,
    bands: &mut RecommendationBands,
    errors: &mut Vec<String>,
) {
    if let Some(ref invest) = config.invest {
        if let Some(threshold) = parse_threshold("scoring.recommendation.invest", invest, errors) {
            bands.invest = threshold;
        }
    }
    if let Some(ref monitor) = config.monitor {
        if let Some(threshold) = parse_threshold("scoring.recommendation.monitor", monitor, errors)
        {
            bands.monitor = threshold;
        }
    }
}

fn parse_threshold(path: &str, expr: &str, errors: &mut Vec<String>) -> Option<Threshold> {
    match Threshold::parse(expr) {
        Ok(threshold) => Some(threshold),
        Err(e) => {
            errors.push(format!("{}: invalid '{}' - {}", path, expr, e));
            None
        }
    }
}

fn check_multiple(path: &str, multiple: f64, errors: &mut Vec<String>) -> bool {
    if multiple.is_finite() && multiple > 0.0 {
        true
    } else {
        errors.push(format!("{}: must be a positive number, got {}", path, multiple));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ChecksConfig, ValuationTier};

    fn empty_checks() -> ChecksConfig {
        ChecksConfig {
            runway_months: None,
            ltv_cac: None,
            growth: None,
            margin: None,
            mrr: None,
        }
    }

    #[test]
    fn test_default_config_compiles_to_default_rubric() {
        let rubric = compile_rubric(&ScoringConfig::default()).unwrap();
        assert_eq!(rubric, Rubric::default());
    }

    #[test]
    fn test_empty_config() {
        let config = ScoringConfig {
            checks: None,
            valuation: None,
            recommendation: None,
        };
        assert_eq!(compile_rubric(&config).unwrap(), Rubric::default());
    }

    #[test]
    fn test_partial_checks_keep_other_defaults() {
        let config = ScoringConfig {
            checks: Some(ChecksConfig {
                runway_months: Some(">=18".to_string()),
                ..empty_checks()
            }),
            valuation: None,
            recommendation: None,
        };
        let rubric = compile_rubric(&config).unwrap();
        assert_eq!(rubric.checks[0].threshold, Threshold::AtLeast(18.0));
        assert_eq!(rubric.checks[1].threshold, Threshold::Above(3.0));
    }

    #[test]
    fn test_invalid_check_threshold() {
        let config = ScoringConfig {
            checks: Some(ChecksConfig {
                ltv_cac: Some("three".to_string()),
                ..empty_checks()
            }),
            valuation: None,
            recommendation: None,
        };
        let result = validate_scoring(&config);
        assert!(result.is_err());
        let errors = result.unwrap_err();
        assert!(errors[0].contains("scoring.checks.ltv_cac"));
    }

    #[test]
    fn test_invalid_tier() {
        let config = ScoringConfig {
            checks: None,
            valuation: Some(ValuationConfig {
                tiers: Some(vec![ValuationTier {
                    growth: "fast".to_string(),
                    multiple: 10.0,
                }]),
                default_multiple: None,
            }),
            recommendation: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.valuation.tiers[0].growth"));
    }

    #[test]
    fn test_non_positive_multiple() {
        let config = ScoringConfig {
            checks: None,
            valuation: Some(ValuationConfig {
                tiers: None,
                default_multiple: Some(0.0),
            }),
            recommendation: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.valuation.default_multiple"));
    }

    #[test]
    fn test_empty_tier_list_uses_default_multiple_only() {
        let config = ScoringConfig {
            checks: None,
            valuation: Some(ValuationConfig {
                tiers: Some(vec![]),
                default_multiple: Some(6.0),
            }),
            recommendation: None,
        };
        let rubric = compile_rubric(&config).unwrap();
        assert_eq!(rubric.valuation.multiple_for(50.0), 6.0);
    }

    #[test]
    fn test_invalid_band() {
        let config = ScoringConfig {
            checks: None,
            valuation: None,
            recommendation: Some(RecommendationConfig {
                invest: Some("80".to_string()),
                monitor: None,
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.recommendation.invest"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            checks: Some(ChecksConfig {
                growth: Some("bad".to_string()), // Error 1
                ..empty_checks()
            }),
            valuation: Some(ValuationConfig {
                tiers: Some(vec![ValuationTier {
                    growth: ">10".to_string(),
                    multiple: -2.0, // Error 2
                }]),
                default_multiple: None,
            }),
            recommendation: Some(RecommendationConfig {
                invest: None,
                monitor: Some("?".to_string()), // Error 3
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
