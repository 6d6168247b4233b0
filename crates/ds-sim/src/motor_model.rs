//! Motor-drive unit driven against a prescribed load torque.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::schedule::Schedule;
use ds_components::{
    ElectricalPort, MotorDriveUnit, MotorOperatingPoint, MotorState, OverspeedMonitor,
    RotationalPort, Severity,
};

/// Boundary values of the drive at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorOutputs {
    pub op: MotorOperatingPoint,
    /// Current drawn from the supply (A)
    pub current_a: f64,
    /// Output node (R relative to C)
    pub port: RotationalPort,
}

/// Transient model of a motor-drive unit with free boundary signals.
///
/// State: rotor speed and lagged drive torque. `TrqCmd` and the load torque
/// on the output node come from schedules, the supply from a fixed voltage
/// pair.
pub struct MotorDriveModel {
    motor: MotorDriveUnit,
    torque_cmd: Schedule,
    load_torque: Schedule,
    supply: ElectricalPort,
    monitor: OverspeedMonitor,
}

impl MotorDriveModel {
    pub fn new(
        motor: MotorDriveUnit,
        torque_cmd: Schedule,
        load_torque: Schedule,
        supply: ElectricalPort,
        severity: Severity,
    ) -> SimResult<Self> {
        torque_cmd.validate()?;
        load_torque.validate()?;
        if !supply.voltage().is_finite() {
            return Err(SimError::InvalidArg {
                what: "supply voltage must be finite",
            });
        }
        let monitor = OverspeedMonitor::for_motor(&motor, severity);

        Ok(Self {
            motor,
            torque_cmd,
            load_torque,
            supply,
            monitor,
        })
    }

    pub fn motor(&self) -> &MotorDriveUnit {
        &self.motor
    }

    pub fn monitor(&self) -> &OverspeedMonitor {
        &self.monitor
    }

    /// Evaluate the boundary values for a recorded state.
    pub fn outputs(&self, t: f64, x: &MotorState) -> MotorOutputs {
        let op = self.motor.operating_point(
            self.torque_cmd.value_at(t),
            x.lagged_torque_nm,
            x.speed_rad_s,
        );

        MotorOutputs {
            op,
            current_a: self.motor.supply_current(&op, self.supply),
            port: self.motor.output_port(&op),
        }
    }
}

impl TransientModel for MotorDriveModel {
    type State = MotorState;

    fn initial_state(&self) -> MotorState {
        self.motor.initial_state()
    }

    fn rhs(&mut self, t: f64, x: &MotorState) -> SimResult<MotorState> {
        Ok(self.motor.derivative(
            x,
            self.torque_cmd.value_at(t),
            self.load_torque.value_at(t),
        ))
    }

    fn add(&self, a: &MotorState, b: &MotorState) -> MotorState {
        MotorState {
            speed_rad_s: a.speed_rad_s + b.speed_rad_s,
            lagged_torque_nm: a.lagged_torque_nm + b.lagged_torque_nm,
        }
    }

    fn scale(&self, a: &MotorState, scale: f64) -> MotorState {
        MotorState {
            speed_rad_s: a.speed_rad_s * scale,
            lagged_torque_nm: a.lagged_torque_nm * scale,
        }
    }

    fn stiffness(&self) -> f64 {
        let params = self.motor.params();
        let lag = 1.0 / params.response_time_const.value;
        let damping = params.k_damp / params.j_rotor.value;
        lag.max(damping)
    }

    fn check_step(&mut self, t: f64, x: &MotorState) -> SimResult<()> {
        if !x.speed_rad_s.is_finite() || !x.lagged_torque_nm.is_finite() {
            return Err(SimError::NonPhysical {
                what: "motor state is not finite",
            });
        }
        self.monitor
            .check(t, x.speed_rad_s)
            .map(|_| ())
            .map_err(|e| SimError::from_component(e, t))
    }
}
