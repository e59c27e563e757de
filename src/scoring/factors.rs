use anyhow::{bail, Context, Result};
use std::fmt;

/// Comparison a rubric check applies to an observed metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Above(f64),
    AtLeast(f64),
    Below(f64),
    AtMost(f64),
    Between(f64, f64), // Inclusive range: N..M
}

impl Threshold {
    /// Parse ">12", ">=80", "<0", "<=5" or "10..20".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(Threshold::AtLeast(parse_value(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(Threshold::AtMost(parse_value(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(Threshold::Above(parse_value(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(Threshold::Below(parse_value(val)?))
        } else if let Some((low, high)) = s.split_once("..") {
            let low = parse_value(low)?;
            let high = parse_value(high)?;
            if low > high {
                bail!("Range start {} is above range end {}", low, high)
            }
            Ok(Threshold::Between(low, high))
        } else {
            bail!("Threshold must start with >, >=, < or <=, or be a N..M range: {}", s)
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            Threshold::Above(n) => value > *n,
            Threshold::AtLeast(n) => value >= *n,
            Threshold::Below(n) => value < *n,
            Threshold::AtMost(n) => value <= *n,
            Threshold::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Above(n) => write!(f, ">{}", n),
            Threshold::AtLeast(n) => write!(f, ">={}", n),
            Threshold::Below(n) => write!(f, "<{}", n),
            Threshold::AtMost(n) => write!(f, "<={}", n),
            Threshold::Between(low, high) => write!(f, "{}..{}", low, high),
        }
    }
}

fn parse_value(s: &str) -> Result<f64> {
    let s = s.trim();
    let value: f64 = s
        .replace('_', "")
        .parse()
        .with_context(|| format!("'{}' is not a number", s))?;
    if !value.is_finite() {
        bail!("'{}' is not a finite number", s)
    }
    Ok(value)
}
