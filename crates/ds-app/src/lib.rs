//! Shared application service layer for drivesim.
//!
//! Turns model files into transient models, executes and caches runs, and
//! extracts channel series from stored results.

pub mod compile;
pub mod error;
pub mod project_service;
pub mod query;
pub mod run_service;

// Re-export key types for convenience
pub use compile::{
    CompiledModel, build_motor, build_schedule, build_vehicle, compile_model, severity,
    sim_options,
};
pub use error::{AppError, AppResult};
pub use project_service::{load_model, save_model, validate_model};
pub use query::{RunSummary, extract_channel, get_run_summary, list_channels};
pub use run_service::{
    RunOptions, RunOutcome, RunRequest, RunResponse, ensure_run, execute, list_runs, load_run,
};
