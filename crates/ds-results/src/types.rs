//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub model_name: String,
    pub timestamp: String,
    pub scenario: String,
    pub dt_s: f64,
    pub t_end_s: f64,
    pub steps: usize,
    /// Accepted steps at which the rotor was at or above `spd_max`
    #[serde(default)]
    pub overspeed_violations: usize,
    pub solver_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        run_id: RunId,
        model_name: &str,
        scenario: &str,
        dt_s: f64,
        t_end_s: f64,
        steps: usize,
        overspeed_violations: usize,
        solver_version: &str,
    ) -> Self {
        Self {
            run_id,
            model_name: model_name.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            scenario: scenario.to_string(),
            dt_s,
            t_end_s,
            steps,
            overspeed_violations,
            solver_version: solver_version.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor: Option<MotorSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorSnapshot {
    pub speed_rad_s: f64,
    pub torque_cmd_nm: f64,
    pub torque_nm: f64,
    pub mech_power_w: f64,
    pub loss_w: f64,
    pub elec_power_w: f64,
    pub current_a: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleSnapshot {
    pub v_mps: f64,
    pub v_kmh: f64,
    pub axle_spd_rad_s: f64,
    pub axle_trq_nm: f64,
    pub f_brake_n: f64,
    pub accel_mps2: f64,
}
