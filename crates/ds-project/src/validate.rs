//! Model file validation logic.
//!
//! Structural checks only: versions, required sections, finite numbers and
//! scenario consistency. Physical parameter bounds are enforced when the
//! components are built.

use crate::schema::{ModelFile, MotorDef, ScenarioDef, ScenarioKind, SignalDef, VehicleDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing section: {section} (required by {context})")]
    MissingSection { section: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_model_file(file: &ModelFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    if let Some(motor) = &file.motor {
        validate_motor(motor)?;
    }
    if let Some(vehicle) = &file.vehicle {
        validate_vehicle(vehicle)?;
    }

    validate_scenario(file, &file.scenario)
}

fn validate_motor(motor: &MotorDef) -> Result<(), ValidationError> {
    let fields = [
        ("motor.trq_max_nm", motor.trq_max_nm),
        ("motor.spd_max_rad_s", motor.spd_max_rad_s),
        ("motor.power_max_w", motor.power_max_w),
        ("motor.response_time_const_s", motor.response_time_const_s),
        ("motor.efficiency_pct", motor.efficiency_pct),
        ("motor.spd_eff_rad_s", motor.spd_eff_rad_s),
        ("motor.trq_eff_nm", motor.trq_eff_nm),
        ("motor.iron_to_nominal_ratio", motor.iron_to_nominal_ratio),
        ("motor.elec_loss_const_w", motor.elec_loss_const_w),
        ("motor.j_rotor_kg_m2", motor.j_rotor_kg_m2),
        ("motor.k_damp_nm_s_per_rad", motor.k_damp_nm_s_per_rad),
        ("motor.initial_spd_rad_s", motor.initial_spd_rad_s),
    ];
    for (field, value) in fields {
        finite(field, value)?;
    }
    Ok(())
}

fn validate_vehicle(vehicle: &VehicleDef) -> Result<(), ValidationError> {
    finite("vehicle.tire_radius_m", vehicle.tire_radius_m)?;
    finite("vehicle.mass_kg", vehicle.mass_kg)
}

fn validate_scenario(file: &ModelFile, scenario: &ScenarioDef) -> Result<(), ValidationError> {
    let kind = format!("{:?} scenario", scenario.kind).to_lowercase();
    let needs_motor = matches!(
        scenario.kind,
        ScenarioKind::Motor | ScenarioKind::Drivetrain
    );
    let needs_vehicle = matches!(
        scenario.kind,
        ScenarioKind::Vehicle | ScenarioKind::Drivetrain
    );

    if needs_motor && file.motor.is_none() {
        return Err(ValidationError::MissingSection {
            section: "motor".to_string(),
            context: kind,
        });
    }
    if needs_vehicle && file.vehicle.is_none() {
        return Err(ValidationError::MissingSection {
            section: "vehicle".to_string(),
            context: kind,
        });
    }

    if scenario.kind == ScenarioKind::Drivetrain {
        match scenario.gear_ratio {
            None => {
                return Err(ValidationError::MissingSection {
                    section: "scenario.gear_ratio".to_string(),
                    context: kind,
                });
            }
            Some(ratio) if !ratio.is_finite() || ratio <= 0.0 => {
                return Err(invalid("scenario.gear_ratio", ratio, "must be positive"));
            }
            Some(_) => {}
        }
    }

    if !scenario.dt_s.is_finite() || scenario.dt_s <= 0.0 {
        return Err(invalid("scenario.dt_s", scenario.dt_s, "must be positive"));
    }
    if !scenario.t_end_s.is_finite() || scenario.t_end_s < 0.0 {
        return Err(invalid(
            "scenario.t_end_s",
            scenario.t_end_s,
            "must be non-negative",
        ));
    }
    if scenario.record_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "scenario.record_every".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    finite("scenario.supply_voltage_v", scenario.supply_voltage_v)?;
    finite("scenario.initial_speed_mps", scenario.initial_speed_mps)?;

    validate_signal("scenario.torque_command", &scenario.torque_command)?;
    validate_signal("scenario.brake_force", &scenario.brake_force)?;
    validate_signal("scenario.load_torque", &scenario.load_torque)?;
    validate_signal("scenario.axle_torque", &scenario.axle_torque)
}

fn validate_signal(field: &str, signal: &SignalDef) -> Result<(), ValidationError> {
    match signal {
        SignalDef::Constant { value } => finite(field, *value),
        SignalDef::Step {
            time_s,
            before,
            after,
        } => {
            finite(field, *time_s)?;
            finite(field, *before)?;
            finite(field, *after)
        }
        SignalDef::Table { points } => {
            if points.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    value: "[]".to_string(),
                    reason: "table needs at least one point".to_string(),
                });
            }
            for [t, v] in points {
                finite(field, *t)?;
                finite(field, *v)?;
            }
            for pair in points.windows(2) {
                if pair[1][0] <= pair[0][0] {
                    return Err(invalid(field, pair[1][0], "table times must increase"));
                }
            }
            Ok(())
        }
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
