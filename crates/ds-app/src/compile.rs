//! Compile a model file into a runnable transient model.

use ds_components::{
    ElectricalPort, IronLossLaw, MotorDriveUnit, MotorParameters, Severity, SimpleVehicle,
    VehicleParameters,
};
use ds_core::units::{kg, kg_m2, m, nm, percent, rad_s, s, unitless, w};
use ds_project::schema::{
    IntegratorDef, IronLossLawDef, ModelFile, MotorDef, ScenarioDef, ScenarioKind, SeverityDef,
    SignalDef, VehicleDef,
};
use ds_sim::{
    Drivetrain, IntegratorType, MotorDriveModel, Schedule, SimOptions, TransientModel,
    VehicleModel,
};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// A model file resolved into one of the three transient models.
pub enum CompiledModel {
    Motor(MotorDriveModel),
    Vehicle(VehicleModel),
    Drivetrain(Drivetrain),
}

impl CompiledModel {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            CompiledModel::Motor(_) => ScenarioKind::Motor,
            CompiledModel::Vehicle(_) => ScenarioKind::Vehicle,
            CompiledModel::Drivetrain(_) => ScenarioKind::Drivetrain,
        }
    }

    /// Fastest decay rate of the compiled model (1/s).
    pub fn stiffness(&self) -> f64 {
        match self {
            CompiledModel::Motor(m) => m.stiffness(),
            CompiledModel::Vehicle(m) => m.stiffness(),
            CompiledModel::Drivetrain(m) => m.stiffness(),
        }
    }
}

pub fn build_motor(name: &str, def: &MotorDef) -> AppResult<MotorDriveUnit> {
    let params = MotorParameters {
        trq_max: nm(def.trq_max_nm),
        spd_max: rad_s(def.spd_max_rad_s),
        power_max: w(def.power_max_w),
        response_time_const: s(def.response_time_const_s),
        efficiency: percent(def.efficiency_pct),
        spd_eff: rad_s(def.spd_eff_rad_s),
        trq_eff: nm(def.trq_eff_nm),
        iron_to_nominal_ratio: unitless(def.iron_to_nominal_ratio),
        elec_loss_const: w(def.elec_loss_const_w),
        j_rotor: kg_m2(def.j_rotor_kg_m2),
        k_damp: def.k_damp_nm_s_per_rad,
        initial_spd: rad_s(def.initial_spd_rad_s),
        iron_loss_law: match def.iron_loss_law {
            IronLossLawDef::Constant => IronLossLaw::Constant,
            IronLossLawDef::SpeedSquared => IronLossLaw::SpeedSquared,
        },
    };
    Ok(MotorDriveUnit::new(name, params)?)
}

pub fn build_vehicle(name: &str, def: &VehicleDef) -> AppResult<SimpleVehicle> {
    let params = VehicleParameters {
        tire_radius: m(def.tire_radius_m),
        mass: kg(def.mass_kg),
    };
    Ok(SimpleVehicle::new(name, params)?)
}

pub fn build_schedule(def: &SignalDef) -> AppResult<Schedule> {
    let schedule = match def {
        SignalDef::Constant { value } => Schedule::constant(*value),
        SignalDef::Step {
            time_s,
            before,
            after,
        } => Schedule::step(*time_s, *before, *after),
        SignalDef::Table { points } => {
            Schedule::table(points.iter().map(|p| (p[0], p[1])).collect())?
        }
    };
    Ok(schedule)
}

pub fn severity(def: SeverityDef) -> Severity {
    match def {
        SeverityDef::Ignore => Severity::Ignore,
        SeverityDef::Warn => Severity::Warn,
        SeverityDef::Error => Severity::Error,
    }
}

/// Runner options for a scenario. `max_steps` is sized so `t_end_s` is reached.
pub fn sim_options(scenario: &ScenarioDef) -> SimOptions {
    let needed = (scenario.t_end_s / scenario.dt_s).ceil();
    let max_steps = if needed.is_finite() && needed >= 1.0 {
        needed as usize + 1
    } else {
        1
    };

    SimOptions {
        dt: scenario.dt_s,
        t_end: scenario.t_end_s,
        max_steps,
        record_every: scenario.record_every,
        integrator: match scenario.integrator {
            IntegratorDef::Rk4 => IntegratorType::RK4,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        },
    }
}

fn require<'a, T>(section: Option<&'a T>, what: &str) -> AppResult<&'a T> {
    section.ok_or_else(|| AppError::Validation(format!("missing section: {}", what)))
}

/// Build the transient model for a model file.
///
/// # Errors
/// Configuration errors from the components, and [`AppError::StepTooLarge`]
/// when `dt_s` would let a stiff mode (brake near standstill, drive lag)
/// change sign or blow up under the chosen integrator.
pub fn compile_model(model: &ModelFile) -> AppResult<CompiledModel> {
    let scenario = &model.scenario;
    let severity = severity(model.monitor.overspeed);
    let supply = ElectricalPort::grounded(scenario.supply_voltage_v);

    let compiled = match scenario.kind {
        ScenarioKind::Motor => {
            let motor = build_motor(&model.name, require(model.motor.as_ref(), "motor")?)?;
            CompiledModel::Motor(MotorDriveModel::new(
                motor,
                build_schedule(&scenario.torque_command)?,
                build_schedule(&scenario.load_torque)?,
                supply,
                severity,
            )?)
        }
        ScenarioKind::Vehicle => {
            let vehicle = build_vehicle(&model.name, require(model.vehicle.as_ref(), "vehicle")?)?;
            CompiledModel::Vehicle(VehicleModel::new(
                vehicle,
                build_schedule(&scenario.axle_torque)?,
                build_schedule(&scenario.brake_force)?,
                scenario.initial_speed_mps,
            )?)
        }
        ScenarioKind::Drivetrain => {
            let motor = build_motor(&model.name, require(model.motor.as_ref(), "motor")?)?;
            let vehicle = build_vehicle(&model.name, require(model.vehicle.as_ref(), "vehicle")?)?;
            let gear_ratio = *require(scenario.gear_ratio.as_ref(), "scenario.gear_ratio")?;
            CompiledModel::Drivetrain(Drivetrain::new(
                motor,
                vehicle,
                gear_ratio,
                build_schedule(&scenario.torque_command)?,
                build_schedule(&scenario.brake_force)?,
                supply,
                severity,
            )?)
        }
    };

    let stiffness = compiled.stiffness();
    sim_options(scenario).check_step_size(stiffness)?;

    debug!(model = %model.name, kind = ?scenario.kind, stiffness, "model compiled");
    Ok(compiled)
}
