//! Error types for simulation operations.

use ds_components::ComponentError;
use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A monitored limit at error severity halted the run.
    #[error("Limit exceeded at t = {t} s: {what} = {value} (limit {limit})")]
    LimitExceeded {
        t: f64,
        what: &'static str,
        value: f64,
        limit: f64,
    },

    /// The fixed step is too coarse for the model's fastest mode.
    #[error("Step {dt} s exceeds the stable step {max_dt} s for stiffness {stiffness} 1/s")]
    StepTooLarge { dt: f64, max_dt: f64, stiffness: f64 },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Attach the simulation time to a component error.
    pub fn from_component(e: ComponentError, t: f64) -> Self {
        match e {
            ComponentError::LimitExceeded { what, value, limit } => SimError::LimitExceeded {
                t,
                what,
                value,
                limit,
            },
            other => other.into(),
        }
    }
}

impl From<ComponentError> for SimError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::Configuration(inner) => SimError::Configuration {
                message: inner.to_string(),
            },
            ComponentError::LimitExceeded { what, value, limit } => SimError::LimitExceeded {
                t: f64::NAN,
                what,
                value,
                limit,
            },
            ComponentError::NonPhysical { what } => SimError::NonPhysical { what },
            ComponentError::InvalidArg { what } => SimError::InvalidArg { what },
        }
    }
}

impl From<ds_core::error::DsError> for SimError {
    fn from(e: ds_core::error::DsError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}
