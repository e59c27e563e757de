use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output format used when --format is not given
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Directory report files are written to when --output is not given
    #[serde(default)]
    pub directory: Option<String>,
}

impl Config {
    /// Config with every section filled in, as written by `capnalyx init`
    pub fn with_defaults() -> Self {
        Self {
            scoring: Some(ScoringConfig::default()),
            report: Some(ReportConfig {
                format: Some(OutputFormat::Table),
                directory: None,
            }),
        }
    }

    pub fn scoring_or_default(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> Option<OutputFormat> {
        self.report.as_ref().and_then(|r| r.format)
    }

    /// Pick the output format: the command-line flag, then `report.format`,
    /// then the command's own fallback.
    pub fn resolve_format(
        &self,
        flag: Option<OutputFormat>,
        fallback: OutputFormat,
    ) -> OutputFormat {
        flag.or(self.default_format()).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_report_format(format: Option<OutputFormat>) -> Config {
        Config {
            scoring: None,
            report: Some(ReportConfig {
                format,
                directory: None,
            }),
        }
    }

    #[test]
    fn test_flag_wins_over_config() {
        let config = with_report_format(Some(OutputFormat::Json));
        assert_eq!(
            config.resolve_format(Some(OutputFormat::Tsv), OutputFormat::Csv),
            OutputFormat::Tsv
        );
    }

    #[test]
    fn test_config_format_used_without_flag() {
        let config = with_report_format(Some(OutputFormat::Json));
        assert_eq!(
            config.resolve_format(None, OutputFormat::Csv),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_fallback_when_neither_set() {
        assert_eq!(
            Config::default().resolve_format(None, OutputFormat::Csv),
            OutputFormat::Csv
        );
        assert_eq!(
            with_report_format(None).resolve_format(None, OutputFormat::Table),
            OutputFormat::Table
        );
    }
}
