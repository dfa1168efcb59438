use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to message, as shown next to each form input.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Invalid {field}: {details}")]
    InvalidField { field: String, details: String },

    #[error("Please fix the errors in the form.")]
    FormErrors(FieldErrors),

    #[error("{0}")]
    InvalidDuesInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
