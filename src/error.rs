use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or validating the model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Faults raised by a predictor for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' expected {expected} value")]
    ColumnType {
        column: String,
        expected: &'static str,
    },
    #[error("Found unknown categories ['{value}'] in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },
    #[error("tree node {0} points outside the tree")]
    BrokenTree(usize),
    #[error("tree traversal did not reach a leaf")]
    Cycle,
    #[error("{0}")]
    Other(String),
}

/// Outcome of a failed evaluate call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    /// The model call itself faulted; carries the underlying message.
    #[error("{0}")]
    Failure(String),
    /// The model emitted a label the category table does not know.
    #[error("model returned unrecognized category '{0}'")]
    UnrecognizedCategory(String),
}

/// Raw input that cannot become part of a `PredictionRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u16,
        max: u16,
    },
    #[error("unknown country '{0}'")]
    UnknownCountry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },
}
