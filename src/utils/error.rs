use thiserror::Error;

#[derive(Error, Debug)]
pub enum MensaError {
    /// A date, month or price text did not have the expected shape.
    /// Always fatal for the run.
    #[error("Unexpected {field} string: {value}")]
    FormatError { field: &'static str, value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Document error: {message}")]
    DocumentError { message: String },

    #[error("Query error in `{query}`: {message}")]
    QueryError { query: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl MensaError {
    pub fn format(field: &'static str, value: impl Into<String>) -> Self {
        MensaError::FormatError {
            field,
            value: value.into(),
        }
    }

    pub fn query(query: &str, message: impl std::fmt::Display) -> Self {
        MensaError::QueryError {
            query: query.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MensaError>;
