//! ds-components: physical component library for drivetrain simulation.
//!
//! Provides models for:
//! - A motor-drive unit with torque/power limits, a first-order drive lag
//!   and an efficiency-calibrated loss model
//! - A longitudinal vehicle with brake force and mass dynamics
//! - An overspeed monitor with configurable severity
//!
//! All models are deterministic functions of state and parameters. Parameters
//! are validated once at construction; per-step evaluation never fails.
//!
//! # Example
//!
//! ```no_run
//! use ds_components::{IronLossLaw, MotorDriveUnit, MotorParameters};
//! use ds_core::units::{kg_m2, nm, percent, rad_s, s, unitless, w};
//!
//! let params = MotorParameters {
//!     trq_max: nm(300.0),
//!     spd_max: rad_s(1_200.0),
//!     power_max: w(80_000.0),
//!     response_time_const: s(0.02),
//!     efficiency: percent(92.0),
//!     spd_eff: rad_s(400.0),
//!     trq_eff: nm(100.0),
//!     iron_to_nominal_ratio: unitless(0.3),
//!     elec_loss_const: w(200.0),
//!     j_rotor: kg_m2(0.05),
//!     k_damp: 1e-3,
//!     initial_spd: rad_s(0.0),
//!     iron_loss_law: IronLossLaw::Constant,
//! };
//!
//! let motor = MotorDriveUnit::new("traction", params).unwrap();
//! let op = motor.operating_point(250.0, 250.0, 500.0);
//! println!("Delivered {} N·m, loss {} W", op.torque_nm, op.loss_w);
//! ```

pub mod common;
pub mod error;
pub mod monitor;
pub mod motor;
pub mod ports;
pub mod vehicle;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use monitor::{OverspeedMonitor, Severity};
pub use motor::{
    DerivedLossParameters, IronLossLaw, MotorDriveUnit, MotorOperatingPoint, MotorParameters,
    MotorState,
};
pub use ports::{ElectricalPort, RotationalPort};
pub use vehicle::{SimpleVehicle, VehicleOutputs, VehicleParameters, VehicleState};
