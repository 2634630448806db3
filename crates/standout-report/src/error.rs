//! Error types for report building and rendering.
//!
//! Errors fall in two classes. [`ConfigError`] is raised while a binder is set
//! up, before any record is processed, and is a hard failure. [`CellError`] is
//! a data error: it is confined to the one cell that produced it and never
//! escapes a row.

use std::fmt;

use thiserror::Error;

/// Setup-time errors: unknown names, duplicate registrations, bad config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A declarative field reference names a field the record does not have.
    #[error("record type '{record}' has no field named '{field}'")]
    UnknownField { field: String, record: &'static str },

    /// A column with the same title is already registered.
    #[error("column '{0}' is already registered")]
    DuplicateColumn(String),

    /// Column hints reference a title that no registered column has.
    #[error("no column titled '{0}'")]
    UnknownColumn(String),

    /// Configuration source could not be parsed.
    #[error("invalid report configuration: {0}")]
    Parse(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Per-cell data errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    /// The column's extraction function failed.
    #[error("{0}")]
    Extract(String),

    /// An adapter in the column's chain failed.
    #[error("adapter failed: {0}")]
    Adapter(String),

    /// Extraction or an adapter panicked.
    #[error("panicked: {0}")]
    Panic(String),

    /// The extracted value does not belong to the column's value family.
    #[error("unsupported value: {0}")]
    Unsupported(String),
}

impl CellError {
    /// Wraps any displayable extraction failure.
    pub fn extract(err: impl fmt::Display) -> Self {
        CellError::Extract(err.to_string())
    }

    /// Wraps any displayable adapter failure.
    pub fn adapter(err: impl fmt::Display) -> Self {
        CellError::Adapter(err.to_string())
    }
}

/// Errors returned by renderers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output sink rejected a write.
    #[error("failed to write to output: {0}")]
    Format(#[from] fmt::Error),

    /// The renderer was misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for setup operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
