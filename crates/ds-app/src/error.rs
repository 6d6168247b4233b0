//! Error types for the ds-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read model file: {path}")]
    ModelFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Model validation failed: {0}")]
    Validation(String),

    /// Parameters rejected while building components.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The overspeed monitor at error severity halted the run.
    #[error("Overspeed at t = {t_s} s: {speed_rad_s} rad/s (limit {limit_rad_s} rad/s)")]
    Overspeed {
        t_s: f64,
        speed_rad_s: f64,
        limit_rad_s: f64,
    },

    /// `dt_s` is too coarse for the model's fastest mode, e.g. the brake
    /// law near standstill.
    #[error("Time step {dt_s} s is too large for this model (at most {max_dt_s} s)")]
    StepTooLarge { dt_s: f64, max_dt_s: f64 },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for ds-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ds_project::ProjectError> for AppError {
    fn from(err: ds_project::ProjectError) -> Self {
        match err {
            ds_project::ProjectError::Validation(inner) => AppError::Validation(inner.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ds_components::ComponentError> for AppError {
    fn from(err: ds_components::ComponentError) -> Self {
        if err.is_configuration() {
            AppError::Configuration(err.to_string())
        } else {
            AppError::Simulation(err.to_string())
        }
    }
}

impl From<ds_sim::SimError> for AppError {
    fn from(err: ds_sim::SimError) -> Self {
        match err {
            ds_sim::SimError::LimitExceeded { t, value, limit, .. } => AppError::Overspeed {
                t_s: t,
                speed_rad_s: value,
                limit_rad_s: limit,
            },
            ds_sim::SimError::Configuration { message } => AppError::Configuration(message),
            ds_sim::SimError::StepTooLarge { dt, max_dt, .. } => AppError::StepTooLarge {
                dt_s: dt,
                max_dt_s: max_dt,
            },
            other => AppError::Simulation(other.to_string()),
        }
    }
}

impl From<ds_results::ResultsError> for AppError {
    fn from(err: ds_results::ResultsError) -> Self {
        match err {
            ds_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            ds_results::ResultsError::UnknownChannel(name) => {
                AppError::InvalidInput(format!("Unknown channel: {}", name))
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
