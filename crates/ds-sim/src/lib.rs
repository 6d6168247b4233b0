//! Transient simulation for drivetrain models.
//!
//! Provides:
//! - The `TransientModel` trait and fixed-step RK4 / forward Euler integrators
//! - A runner with decimated recording and a per-step monitoring hook
//! - Time-varying command schedules
//! - Motor-only, vehicle-only and rigidly coupled drivetrain models

pub mod drivetrain;
pub mod error;
pub mod integrator;
pub mod model;
pub mod motor_model;
pub mod schedule;
pub mod sim;
pub mod vehicle_model;

// Re-exports for public API
pub use drivetrain::{Drivetrain, DrivetrainOutputs, DrivetrainState};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use motor_model::{MotorDriveModel, MotorOutputs};
pub use schedule::Schedule;
pub use sim::{IntegratorType, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
pub use vehicle_model::VehicleModel;
