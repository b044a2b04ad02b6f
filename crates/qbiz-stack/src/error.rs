//! Error types for stack assembly
//!
//! Provides error handling for:
//! - Input configuration (missing or invalid parameters, unreadable files)
//! - Field mapping table validation
//! - Graph wiring and policy assembly defects
//! - Template rendering

use crate::confluence::ContentCategory;
use qbiz_graph::GraphError;
use qbiz_iam::PolicyError;
use std::path::PathBuf;

/// Main stack error type
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// Input configuration is incomplete or invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Declaration wiring defect
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Policy assembly defect
    #[error("policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Field mapping table defect
    #[error("field mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Template could not be rendered
    #[error("template error: {0}")]
    Template(String),
}

impl StackError {
    /// Whether the caller can fix the error by supplying different input
    ///
    /// Everything except configuration errors is a defect in the
    /// assembling code.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Configuration errors, raised before any declaration exists
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required parameter absent or blank
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Setting outside its accepted range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration text could not be parsed
    #[error("invalid {format} configuration: {message}")]
    Parse {
        /// `toml` or `yaml`
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// Configuration file has an unknown extension
    #[error("unsupported configuration file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Configuration file could not be read
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create invalid value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Field mapping table violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// Two mappings in one category write the same index field
    #[error("{category} mappings target {field} more than once")]
    DuplicateTarget {
        /// Table the mapping belongs to
        category: ContentCategory,
        /// Index field of the mapping
        field: String,
    },

    /// Date mapping without a date pattern
    #[error("{category} mapping for {field} is date-typed but has no date format")]
    MissingDateFormat {
        /// Table the mapping belongs to
        category: ContentCategory,
        /// Index field of the mapping
        field: String,
    },

    /// Date pattern on a mapping that is not date-typed
    #[error("{category} mapping for {field} has a date format but is not date-typed")]
    UnexpectedDateFormat {
        /// Table the mapping belongs to
        category: ContentCategory,
        /// Index field of the mapping
        field: String,
    },
}
