use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::scoring::{ScoreResult, Valuation};

/// A startup row as handed over by an ingestion source.
///
/// Every field is raw text and may be absent; nothing is defaulted here.
/// Validation into a [`StartupRecord`] happens in the pipeline.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StartupRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cash: Option<String>,
    #[serde(default)]
    pub burn_rate: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub users: Option<String>,
    #[serde(default)]
    pub monthly_price: Option<String>,
    #[serde(default)]
    pub ltv: Option<String>,
    #[serde(default)]
    pub cac: Option<String>,
    #[serde(default)]
    pub growth: Option<String>,
}

impl StartupRow {
    /// Trimmed name, if the row has a non-blank one
    pub fn display_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

impl From<&StartupRecord> for StartupRow {
    fn from(record: &StartupRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            cash: Some(record.cash.to_string()),
            burn_rate: Some(record.burn_rate.to_string()),
            revenue: Some(record.revenue.to_string()),
            users: Some(record.users.to_string()),
            monthly_price: Some(record.monthly_price.to_string()),
            ltv: Some(record.ltv.to_string()),
            cac: Some(record.cac.to_string()),
            growth: Some(record.growth.to_string()),
        }
    }
}

/// Validated financial inputs for one startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupRecord {
    pub name: String,
    pub cash: f64,
    pub burn_rate: f64,
    pub revenue: f64,
    pub users: u64,
    pub monthly_price: f64,
    pub ltv: f64,
    pub cac: f64,
    /// Growth in percent, may be negative
    pub growth: f64,
}

impl TryFrom<StartupRow> for StartupRecord {
    type Error = RecordError;

    fn try_from(row: StartupRow) -> Result<Self, Self::Error> {
        let name = row
            .display_name()
            .ok_or(RecordError::MissingField { field: "name" })?;

        Ok(Self {
            name,
            cash: parse_amount("cash", row.cash, false)?,
            burn_rate: parse_amount("burn_rate", row.burn_rate, false)?,
            revenue: parse_amount("revenue", row.revenue, false)?,
            users: parse_count("users", row.users)?,
            monthly_price: parse_amount("monthly_price", row.monthly_price, false)?,
            ltv: parse_amount("ltv", row.ltv, false)?,
            cac: parse_amount("cac", row.cac, false)?,
            growth: parse_amount("growth", row.growth, true)?,
        })
    }
}

fn required(field: &'static str, raw: Option<String>) -> Result<String, RecordError> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(RecordError::MissingField { field }),
    }
}

fn parse_number(field: &'static str, raw: Option<String>) -> Result<(f64, String), RecordError> {
    let text = required(field, raw)?;
    // Allow "200_000" style grouping
    let value: f64 = text
        .replace('_', "")
        .parse()
        .map_err(|_| RecordError::InvalidValue {
            field,
            value: text.clone(),
            reason: "not a number",
        })?;
    if !value.is_finite() {
        return Err(RecordError::InvalidValue {
            field,
            value: text,
            reason: "must be finite",
        });
    }
    Ok((value, text))
}

fn parse_amount(
    field: &'static str,
    raw: Option<String>,
    allow_negative: bool,
) -> Result<f64, RecordError> {
    let (value, text) = parse_number(field, raw)?;
    if !allow_negative && value < 0.0 {
        return Err(RecordError::InvalidValue {
            field,
            value: text,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

fn parse_count(field: &'static str, raw: Option<String>) -> Result<u64, RecordError> {
    let (value, text) = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(RecordError::InvalidValue {
            field,
            value: text,
            reason: "must not be negative",
        });
    }
    if value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(RecordError::InvalidValue {
            field,
            value: text,
            reason: "must be a whole number",
        });
    }
    Ok(value as u64)
}

/// Unit economics derived from a [`StartupRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub runway_months: f64,
    pub ltv_cac: f64,
    pub margin: f64,
    pub mrr: f64,
    pub arr: f64,
    /// Net outflow beyond revenue; reported only, never scored
    pub burn: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Invest,
    Monitor,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Invest => "INVEST",
            Recommendation::Monitor => "MONITOR",
            Recommendation::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A startup after the whole pipeline ran over its batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: StartupRecord,
    pub metrics: DerivedMetrics,
    pub valuation: Valuation,
    pub score: ScoreResult,
    /// Dense rank within the batch, starting at 1
    pub rank: u32,
    pub recommendation: Recommendation,
}

impl ScoredRecord {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn investment_score(&self) -> u8 {
        self.score.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> StartupRow {
        StartupRow {
            name: Some(" Acme ".to_string()),
            cash: Some("1200000".to_string()),
            burn_rate: Some("100000".to_string()),
            revenue: Some("150000".to_string()),
            users: Some("2000".to_string()),
            monthly_price: Some("100".to_string()),
            ltv: Some("3000".to_string()),
            cac: Some("900".to_string()),
            growth: Some("-4.5".to_string()),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let record = StartupRecord::try_from(full_row()).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.cash, 1_200_000.0);
        assert_eq!(record.users, 2000);
        assert_eq!(record.growth, -4.5);
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut row = full_row();
        row.cac = Some("   ".to_string());
        let err = StartupRecord::try_from(row).unwrap_err();
        assert_eq!(err, RecordError::MissingField { field: "cac" });
    }

    #[test]
    fn test_absent_name_is_missing() {
        let mut row = full_row();
        row.name = None;
        let err = StartupRecord::try_from(row).unwrap_err();
        assert_eq!(err, RecordError::MissingField { field: "name" });
    }

    #[test]
    fn test_negative_cash_rejected() {
        let mut row = full_row();
        row.cash = Some("-1".to_string());
        let err = StartupRecord::try_from(row).unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { field: "cash", .. }));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut row = full_row();
        row.ltv = Some("lots".to_string());
        let err = StartupRecord::try_from(row).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidValue {
                field: "ltv",
                value: "lots".to_string(),
                reason: "not a number",
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut row = full_row();
        row.revenue = Some("inf".to_string());
        let err = StartupRecord::try_from(row).unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { field: "revenue", .. }));
    }

    #[test]
    fn test_users_accepts_integral_float() {
        let mut row = full_row();
        row.users = Some("2000.0".to_string());
        assert_eq!(StartupRecord::try_from(row).unwrap().users, 2000);
    }

    #[test]
    fn test_users_rejects_fraction() {
        let mut row = full_row();
        row.users = Some("20.5".to_string());
        let err = StartupRecord::try_from(row).unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { field: "users", .. }));
    }

    #[test]
    fn test_underscore_grouping_accepted() {
        let mut row = full_row();
        row.cash = Some("1_200_000".to_string());
        assert_eq!(StartupRecord::try_from(row).unwrap().cash, 1_200_000.0);
    }

    #[test]
    fn test_zero_divisors_pass_validation() {
        // Zero divisors are a metric-derivation concern, not a parse error
        let mut row = full_row();
        row.burn_rate = Some("0".to_string());
        assert!(StartupRecord::try_from(row).is_ok());
    }

    #[test]
    fn test_row_from_record_roundtrips() {
        let record = StartupRecord::try_from(full_row()).unwrap();
        let row = StartupRow::from(&record);
        assert_eq!(StartupRecord::try_from(row).unwrap(), record);
    }

    #[test]
    fn test_recommendation_display() {
        assert_eq!(Recommendation::Invest.to_string(), "INVEST");
        assert_eq!(Recommendation::Monitor.to_string(), "MONITOR");
        assert_eq!(Recommendation::Reject.to_string(), "REJECT");
    }
}
