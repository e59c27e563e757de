use serde::Serialize;
use thiserror::Error;

/// Why a single startup row was left out of the ranked result.
///
/// Record errors are local: the pipeline collects them next to the scored
/// records and keeps going with the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("'{field}' is zero, cannot divide by it")]
    DivisionByZero { field: &'static str },

    #[error("'{field}' is too large to represent")]
    Overflow { field: &'static str },

    #[error("malformed row: {message}")]
    Malformed { message: String },
}

/// A rejected input row together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    /// Zero-based position in the input batch
    pub index: usize,
    /// Line in the source file, when the row came from CSV
    pub line: Option<u64>,
    pub name: Option<String>,
    pub error: RecordError,
}

impl Rejection {
    /// Human-readable location, e.g. "line 4 (Acme)" or "row 2"
    pub fn location(&self) -> String {
        let place = match self.line {
            Some(line) => format!("line {}", line),
            None => format!("row {}", self.index + 1),
        };
        match &self.name {
            Some(name) => format!("{} ({})", place, name),
            None => place,
        }
    }
}
