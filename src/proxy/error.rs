//! Errors raised while turning a raw line into a proxy record

use thiserror::Error;

/// A line that does not have the shape of a proxy.
///
/// Every variant is a skip-and-log condition, never a fatal one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyParseError {
    #[error("malformed proxy line {line:?}: expected 2 or 4 colon-separated fields, found {found}")]
    FieldCount { line: String, found: usize },

    #[error("malformed proxy line {line:?}: invalid port {port:?}")]
    InvalidPort { line: String, port: String },

    #[error("malformed proxy line {line:?}: empty {field}")]
    EmptyField { line: String, field: &'static str },
}

impl ProxyParseError {
    /// The offending input line
    pub fn line(&self) -> &str {
        match self {
            ProxyParseError::FieldCount { line, .. }
            | ProxyParseError::InvalidPort { line, .. }
            | ProxyParseError::EmptyField { line, .. } => line,
        }
    }
}
