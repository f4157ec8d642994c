//! Domain errors shared by the storage, aggregation and report layers.

use thiserror::Error;


/// Errors raised below the command layer.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("input closed before a value was entered")]
    InputClosed,

    #[error("no data available")]
    EmptyDataset,

    #[error("no data for {year}-{month:02}")]
    NoDataForMonth { year: i32, month: u32 },

    #[error("cannot average an empty selection of entries")]
    EmptySelection,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}


impl HealthError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        HealthError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}


pub type Result<T> = std::result::Result<T, HealthError>;
