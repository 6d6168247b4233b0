//! Vehicle driven by a prescribed axle torque.

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use crate::schedule::Schedule;
use ds_components::{SimpleVehicle, VehicleOutputs, VehicleState};

/// Transient model of a vehicle whose axle node torque is a free boundary signal.
pub struct VehicleModel {
    vehicle: SimpleVehicle,
    axle_torque: Schedule,
    brake_force: Schedule,
    x0: VehicleState,
}

impl VehicleModel {
    pub fn new(
        vehicle: SimpleVehicle,
        axle_torque: Schedule,
        brake_force: Schedule,
        v0_mps: f64,
    ) -> SimResult<Self> {
        axle_torque.validate()?;
        brake_force.validate()?;
        let x0 = vehicle.initial_state(v0_mps)?;

        Ok(Self {
            vehicle,
            axle_torque,
            brake_force,
            x0,
        })
    }

    pub fn vehicle(&self) -> &SimpleVehicle {
        &self.vehicle
    }

    pub fn outputs(&self, t: f64, x: &VehicleState) -> VehicleOutputs {
        self.vehicle
            .evaluate(x, self.axle_torque.value_at(t), self.brake_force.value_at(t))
    }
}

impl TransientModel for VehicleModel {
    type State = VehicleState;

    fn initial_state(&self) -> VehicleState {
        self.x0
    }

    fn rhs(&mut self, t: f64, x: &VehicleState) -> SimResult<VehicleState> {
        Ok(self.vehicle.derivative(
            x,
            self.axle_torque.value_at(t),
            self.brake_force.value_at(t),
        ))
    }

    fn add(&self, a: &VehicleState, b: &VehicleState) -> VehicleState {
        VehicleState {
            v_mps: a.v_mps + b.v_mps,
        }
    }

    fn scale(&self, a: &VehicleState, scale: f64) -> VehicleState {
        VehicleState {
            v_mps: a.v_mps * scale,
        }
    }

    fn stiffness(&self) -> f64 {
        self.vehicle
            .brake_stiffness(self.brake_force.max_value(), self.vehicle.mass_kg())
    }

    fn check_step(&mut self, _t: f64, x: &VehicleState) -> SimResult<()> {
        if x.v_mps.is_finite() {
            Ok(())
        } else {
            Err(SimError::NonPhysical {
                what: "vehicle speed is not finite",
            })
        }
    }
}
