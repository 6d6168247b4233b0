//! Error types for component operations.

use ds_core::error::DsError;
use thiserror::Error;

/// Errors that can occur while building or monitoring components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// A parameter bound was violated at build time. No model is produced.
    #[error("Configuration error: {0}")]
    Configuration(DsError),

    /// A monitored runtime limit was exceeded at error severity.
    #[error("Limit exceeded: {what} = {value} (limit {limit})")]
    LimitExceeded {
        what: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    /// True for errors raised while validating parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ComponentError::Configuration(_))
    }
}

impl From<DsError> for ComponentError {
    fn from(e: DsError) -> Self {
        ComponentError::Configuration(e)
    }
}
