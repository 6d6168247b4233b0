//! Model file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelFile {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor: Option<MotorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleDef>,
    #[serde(default)]
    pub monitor: MonitorDef,
    pub scenario: ScenarioDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorDef {
    pub trq_max_nm: f64,
    pub spd_max_rad_s: f64,
    pub power_max_w: f64,
    pub response_time_const_s: f64,
    pub efficiency_pct: f64,
    pub spd_eff_rad_s: f64,
    pub trq_eff_nm: f64,
    pub iron_to_nominal_ratio: f64,
    pub elec_loss_const_w: f64,
    pub j_rotor_kg_m2: f64,
    #[serde(default)]
    pub k_damp_nm_s_per_rad: f64,
    #[serde(default)]
    pub initial_spd_rad_s: f64,
    #[serde(default)]
    pub iron_loss_law: IronLossLawDef,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IronLossLawDef {
    #[default]
    Constant,
    SpeedSquared,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleDef {
    pub tire_radius_m: f64,
    pub mass_kg: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonitorDef {
    #[serde(default)]
    pub overspeed: SeverityDef,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeverityDef {
    Ignore,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Motor alone against `load_torque`.
    Motor,
    /// Vehicle alone driven by `axle_torque`.
    Vehicle,
    /// Motor coupled to the vehicle through `gear_ratio`.
    Drivetrain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioDef {
    pub kind: ScenarioKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gear_ratio: Option<f64>,
    #[serde(default = "default_supply_voltage_v")]
    pub supply_voltage_v: f64,
    #[serde(default)]
    pub torque_command: SignalDef,
    #[serde(default)]
    pub brake_force: SignalDef,
    #[serde(default)]
    pub load_torque: SignalDef,
    #[serde(default)]
    pub axle_torque: SignalDef,
    #[serde(default)]
    pub initial_speed_mps: f64,
    pub dt_s: f64,
    pub t_end_s: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    #[serde(default)]
    pub integrator: IntegratorDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SignalDef {
    Constant { value: f64 },
    Step { time_s: f64, before: f64, after: f64 },
    Table { points: Vec<[f64; 2]> },
}

impl Default for SignalDef {
    fn default() -> Self {
        SignalDef::Constant { value: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Rk4,
    ForwardEuler,
}

fn default_supply_voltage_v() -> f64 {
    400.0
}

fn default_record_every() -> usize {
    10
}
