use crate::error::RecordError;
use crate::startup::{DerivedMetrics, StartupRecord};

/// Derive unit economics for one startup.
///
/// Divisors are checked in the order runway, LTV/CAC, margin; the first zero
/// one is reported. Any metric that overflows to a non-finite value rejects
/// the record, so scoring only ever sees finite numbers.
pub fn derive_metrics(record: &StartupRecord) -> Result<DerivedMetrics, RecordError> {
    let runway_months = divide(record.cash, record.burn_rate, "burn_rate", "runway_months")?;
    let ltv_cac = divide(record.ltv, record.cac, "cac", "ltv_cac")?;
    let margin = divide(
        record.revenue - record.burn_rate,
        record.revenue,
        "revenue",
        "margin",
    )?;

    let mrr = finite(record.users as f64 * record.monthly_price, "mrr")?;
    let arr = finite(mrr * 12.0, "arr")?;

    Ok(DerivedMetrics {
        runway_months,
        ltv_cac,
        margin,
        mrr,
        arr,
        burn: record.burn_rate - record.revenue,
    })
}

fn divide(
    numerator: f64,
    divisor: f64,
    divisor_field: &'static str,
    metric: &'static str,
) -> Result<f64, RecordError> {
    if divisor == 0.0 {
        return Err(RecordError::DivisionByZero {
            field: divisor_field,
        });
    }
    finite(numerator / divisor, metric)
}

/// Reject infinities, e.g. from a subnormal divisor or a huge product.
pub(crate) fn finite(value: f64, field: &'static str) -> Result<f64, RecordError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::Overflow { field })
    }
}
