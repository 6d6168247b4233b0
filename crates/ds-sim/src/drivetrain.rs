//! Motor and vehicle coupled through an ideal gear.
//!
//! The motor output node and the vehicle axle node are joined by a rigid
//! gear with ratio `N = ω_rotor / ω_axle`. Because the coupling is rigid, the
//! shared node is resolved in closed form instead of by iteration:
//!
//! ```text
//! ω_r = N · v / R
//! (M + J · N² / R²) · dv/dt = N · (T_drive - k_damp · ω_r) / R - F_brake
//! T_axle = N · (T_drive - k_damp · ω_r - J · dω_r/dt)
//! ```
//!
//! The vehicle then sees `M · dv/dt = T_axle / R - F_brake`, the same law it
//! obeys on its own.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::schedule::Schedule;
use ds_components::{
    ElectricalPort, MotorDriveUnit, MotorOperatingPoint, OverspeedMonitor, Severity,
    SimpleVehicle, VehicleState,
};
use tracing::debug;

/// Continuous state of the coupled drivetrain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrivetrainState {
    /// Vehicle velocity (m/s)
    pub v_mps: f64,
    /// Lagged drive torque (N·m)
    pub lagged_torque_nm: f64,
}

/// Algebraic quantities of the coupled drivetrain at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrivetrainOutputs {
    pub motor: MotorOperatingPoint,
    /// Supply current (A)
    pub current_a: f64,
    /// Rotor speed (rad/s)
    pub rotor_spd_rad_s: f64,
    /// Axle speed (rad/s)
    pub axle_spd_rad_s: f64,
    /// Torque delivered into the axle node (N·m)
    pub axle_trq_nm: f64,
    /// Effective brake force (N)
    pub f_brake_n: f64,
    /// Vehicle acceleration (m/s²)
    pub accel_mps2: f64,
    /// Vehicle speed (km/h)
    pub v_kmh: f64,
}

/// Motor -> gear -> vehicle.
pub struct Drivetrain {
    motor: MotorDriveUnit,
    vehicle: SimpleVehicle,
    gear_ratio: f64,
    torque_cmd: Schedule,
    brake_force: Schedule,
    supply: ElectricalPort,
    monitor: OverspeedMonitor,
    x0: DrivetrainState,
}

impl Drivetrain {
    /// Couple a motor and a vehicle.
    ///
    /// The initial vehicle speed follows from the motor's `initial_spd`
    /// through the gear, so both components start on the kinematic constraint.
    ///
    /// # Errors
    /// Gear ratio must be finite and positive, schedules valid.
    pub fn new(
        motor: MotorDriveUnit,
        vehicle: SimpleVehicle,
        gear_ratio: f64,
        torque_cmd: Schedule,
        brake_force: Schedule,
        supply: ElectricalPort,
        severity: Severity,
    ) -> SimResult<Self> {
        if !gear_ratio.is_finite() || gear_ratio <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "gear ratio must be finite and positive",
            });
        }
        torque_cmd.validate()?;
        brake_force.validate()?;

        let v0 = motor.params().initial_spd.value * vehicle.radius_m() / gear_ratio;
        let monitor = OverspeedMonitor::for_motor(&motor, severity);

        debug!(
            motor = motor.name(),
            vehicle = vehicle.name(),
            gear_ratio,
            v0_mps = v0,
            "drivetrain assembled"
        );

        Ok(Self {
            motor,
            vehicle,
            gear_ratio,
            torque_cmd,
            brake_force,
            supply,
            monitor,
            x0: DrivetrainState {
                v_mps: v0,
                lagged_torque_nm: 0.0,
            },
        })
    }

    pub fn motor(&self) -> &MotorDriveUnit {
        &self.motor
    }

    pub fn vehicle(&self) -> &SimpleVehicle {
        &self.vehicle
    }

    pub fn gear_ratio(&self) -> f64 {
        self.gear_ratio
    }

    pub fn monitor(&self) -> &OverspeedMonitor {
        &self.monitor
    }

    /// Rotor speed implied by a vehicle velocity (rad/s).
    pub fn rotor_speed(&self, v_mps: f64) -> f64 {
        self.gear_ratio * self.vehicle.axle_speed(v_mps)
    }

    /// Vehicle mass plus rotor inertia reflected through gear and tire (kg).
    pub fn effective_mass(&self) -> f64 {
        let n_over_r = self.gear_ratio / self.vehicle.radius_m();
        self.vehicle.mass_kg() + self.motor.params().j_rotor.value * n_over_r * n_over_r
    }

    /// Resolve the shared node at time `t`.
    pub fn outputs(&self, t: f64, x: &DrivetrainState) -> DrivetrainOutputs {
        let n = self.gear_ratio;
        let r = self.vehicle.radius_m();
        let j = self.motor.params().j_rotor.value;

        let axle_spd = self.vehicle.axle_speed(x.v_mps);
        let rotor_spd = n * axle_spd;

        let op = self.motor.operating_point(
            self.torque_cmd.value_at(t),
            x.lagged_torque_nm,
            rotor_spd,
        );
        let shaft_trq = op.torque_nm + self.motor.damping_torque(rotor_spd);
        let f_brake = self
            .vehicle
            .brake_force(self.brake_force.value_at(t), axle_spd);

        let accel = (n * shaft_trq / r - f_brake) / self.effective_mass();
        let rotor_accel = n * accel / r;
        let axle_trq = n * (shaft_trq - j * rotor_accel);

        DrivetrainOutputs {
            motor: op,
            current_a: self.motor.supply_current(&op, self.supply),
            rotor_spd_rad_s: rotor_spd,
            axle_spd_rad_s: axle_spd,
            axle_trq_nm: axle_trq,
            f_brake_n: f_brake,
            accel_mps2: accel,
            v_kmh: self.vehicle.speed_kmh(&VehicleState { v_mps: x.v_mps }),
        }
    }
}

impl TransientModel for Drivetrain {
    type State = DrivetrainState;

    fn initial_state(&self) -> DrivetrainState {
        self.x0
    }

    fn rhs(&mut self, t: f64, x: &DrivetrainState) -> SimResult<DrivetrainState> {
        let out = self.outputs(t, x);
        let lag_rate = self.motor.torque_lag_rate(
            self.torque_cmd.value_at(t),
            x.lagged_torque_nm,
            out.rotor_spd_rad_s,
        );

        Ok(DrivetrainState {
            v_mps: out.accel_mps2,
            lagged_torque_nm: lag_rate,
        })
    }

    fn add(&self, a: &DrivetrainState, b: &DrivetrainState) -> DrivetrainState {
        DrivetrainState {
            v_mps: a.v_mps + b.v_mps,
            lagged_torque_nm: a.lagged_torque_nm + b.lagged_torque_nm,
        }
    }

    fn scale(&self, a: &DrivetrainState, scale: f64) -> DrivetrainState {
        DrivetrainState {
            v_mps: a.v_mps * scale,
            lagged_torque_nm: a.lagged_torque_nm * scale,
        }
    }

    fn stiffness(&self) -> f64 {
        let m_eff = self.effective_mass();
        let n_over_r = self.gear_ratio / self.vehicle.radius_m();
        let brake = self
            .vehicle
            .brake_stiffness(self.brake_force.max_value(), m_eff);
        let damping = self.motor.params().k_damp * n_over_r * n_over_r / m_eff;
        let lag = 1.0 / self.motor.params().response_time_const.value;
        (brake + damping).max(lag)
    }

    fn check_step(&mut self, t: f64, x: &DrivetrainState) -> SimResult<()> {
        if !x.v_mps.is_finite() || !x.lagged_torque_nm.is_finite() {
            return Err(SimError::NonPhysical {
                what: "drivetrain state is not finite",
            });
        }
        let rotor_spd = self.rotor_speed(x.v_mps);
        self.monitor
            .check(t, rotor_spd)
            .map(|_| ())
            .map_err(|e| SimError::from_component(e, t))
    }
}
