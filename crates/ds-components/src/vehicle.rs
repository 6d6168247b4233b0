//! Longitudinal vehicle with brake force and lumped mass.

use crate::common::finite_or_zero;
use crate::error::{ComponentError, ComponentResult};
use crate::ports::RotationalPort;
use ds_core::numeric::ensure_positive;
use ds_core::units::{Length, Mass, constants, mps, to_kmh};

/// Vehicle parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleParameters {
    /// Tire rolling radius
    pub tire_radius: Length,
    /// Vehicle mass
    pub mass: Mass,
}

/// State of the vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleState {
    /// Longitudinal velocity (m/s)
    pub v_mps: f64,
}

/// Algebraic quantities at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleOutputs {
    /// Axle angular velocity `v / R` (rad/s)
    pub axle_spd_rad_s: f64,
    /// Torque delivered by the axle node (N·m)
    pub axle_trq_nm: f64,
    /// Torque the vehicle exerts back onto the axle node (N·m)
    pub reaction_trq_nm: f64,
    /// Effective brake force (N)
    pub f_brake_n: f64,
    /// Longitudinal acceleration (m/s²)
    pub accel_mps2: f64,
    /// Vehicle speed at the output port (km/h)
    pub v_kmh: f64,
}

/// Vehicle driven through a single axle node.
///
/// ```text
/// F_brake = max(0, BrkF) · tanh(ω_axle / ω_b)
/// ω_axle  = v / R
/// M · dv/dt = T_axle / R - F_brake
/// ```
///
/// `ω_b` is 0.1 rpm. The tanh law makes the brake force vanish smoothly at
/// standstill and oppose the direction of rotation otherwise, so a stopped
/// vehicle is never pushed backwards by its brakes.
#[derive(Clone, Debug)]
pub struct SimpleVehicle {
    name: String,
    params: VehicleParameters,
    brake_width_rad_s: f64,
}

impl SimpleVehicle {
    /// Create a new vehicle.
    ///
    /// # Errors
    /// Returns [`ComponentError::Configuration`] unless radius and mass are
    /// finite and positive.
    pub fn new(name: impl Into<String>, params: VehicleParameters) -> ComponentResult<Self> {
        ensure_positive(params.tire_radius.value, "tire_radius")?;
        ensure_positive(params.mass.value, "mass")?;

        Ok(Self {
            name: name.into(),
            params,
            brake_width_rad_s: constants::brake_speed_width().value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &VehicleParameters {
        &self.params
    }

    pub fn radius_m(&self) -> f64 {
        self.params.tire_radius.value
    }

    pub fn mass_kg(&self) -> f64 {
        self.params.mass.value
    }

    /// Axle speed for a vehicle velocity (rad/s).
    pub fn axle_speed(&self, v_mps: f64) -> f64 {
        v_mps / self.radius_m()
    }

    /// Effective brake force for a commanded force and axle speed (N).
    pub fn brake_force(&self, brk_f_n: f64, axle_spd_rad_s: f64) -> f64 {
        let commanded = finite_or_zero(brk_f_n).max(0.0);
        commanded * (axle_spd_rad_s / self.brake_width_rad_s).tanh()
    }

    /// Decay rate of the speed near standstill under a brake command (1/s).
    ///
    /// Slope of the tanh law at zero speed, `BrkF / (m · R · ω_b)`, for a
    /// moving mass `mass_kg` (the vehicle alone or with reflected inertia).
    pub fn brake_stiffness(&self, brk_f_n: f64, mass_kg: f64) -> f64 {
        let commanded = finite_or_zero(brk_f_n).max(0.0);
        commanded / (mass_kg * self.radius_m() * self.brake_width_rad_s)
    }

    /// Longitudinal acceleration (m/s²).
    pub fn acceleration(&self, axle_trq_nm: f64, f_brake_n: f64) -> f64 {
        (axle_trq_nm / self.radius_m() - f_brake_n) / self.mass_kg()
    }

    /// Evaluate all algebraic quantities, in dependency order.
    pub fn evaluate(&self, state: &VehicleState, axle_trq_nm: f64, brk_f_n: f64) -> VehicleOutputs {
        let axle_trq = finite_or_zero(axle_trq_nm);
        let axle_spd = self.axle_speed(state.v_mps);
        let f_brake = self.brake_force(brk_f_n, axle_spd);

        VehicleOutputs {
            axle_spd_rad_s: axle_spd,
            axle_trq_nm: axle_trq,
            reaction_trq_nm: self.axle_port(state, axle_trq).reaction().torque_nm,
            f_brake_n: f_brake,
            accel_mps2: self.acceleration(axle_trq, f_brake),
            v_kmh: self.speed_kmh(state),
        }
    }

    /// State derivative for a given axle torque and brake command.
    pub fn derivative(&self, state: &VehicleState, axle_trq_nm: f64, brk_f_n: f64) -> VehicleState {
        VehicleState {
            v_mps: self.evaluate(state, axle_trq_nm, brk_f_n).accel_mps2,
        }
    }

    /// Output port value `V_out` (km/h).
    pub fn speed_kmh(&self, state: &VehicleState) -> f64 {
        to_kmh(mps(state.v_mps))
    }

    /// Axle node value as seen by the component driving it.
    pub fn axle_port(&self, state: &VehicleState, axle_trq_nm: f64) -> RotationalPort {
        RotationalPort::new(self.axle_speed(state.v_mps), axle_trq_nm)
    }

    /// Reject a non-finite initial velocity.
    pub fn initial_state(&self, v0_mps: f64) -> ComponentResult<VehicleState> {
        if !v0_mps.is_finite() {
            return Err(ComponentError::InvalidArg {
                what: "initial vehicle speed must be finite",
            });
        }
        Ok(VehicleState { v_mps: v0_mps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::units::{kg, m};

    fn car() -> SimpleVehicle {
        SimpleVehicle::new(
            "car",
            VehicleParameters {
                tire_radius: m(0.3),
                mass: kg(1_500.0),
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let bad_r = VehicleParameters {
            tire_radius: m(0.0),
            mass: kg(1_500.0),
        };
        assert!(SimpleVehicle::new("v", bad_r).unwrap_err().is_configuration());

        let bad_m = VehicleParameters {
            tire_radius: m(0.3),
            mass: kg(-1.0),
        };
        assert!(SimpleVehicle::new("v", bad_m).is_err());
    }

    #[test]
    fn brake_zero_at_standstill() {
        let v = car();
        assert_eq!(v.brake_force(5_000.0, 0.0), 0.0);
    }

    #[test]
    fn brake_zero_for_non_positive_command() {
        let v = car();
        assert_eq!(v.brake_force(0.0, 50.0), 0.0);
        assert_eq!(v.brake_force(-1_000.0, 50.0), 0.0);
    }

    #[test]
    fn brake_saturates_above_width() {
        let v = car();
        // 10 rpm is a hundred widths away
        let spd = 10.0 * 2.0 * std::f64::consts::PI / 60.0;
        assert!((v.brake_force(2_000.0, spd) - 2_000.0).abs() < 1e-6);
        // Opposes reverse motion
        assert!((v.brake_force(2_000.0, -spd) + 2_000.0).abs() < 1e-6);
    }

    #[test]
    fn brake_negligible_well_below_width() {
        let v = car();
        let width = constants::brake_speed_width().value;
        let f = v.brake_force(1_000.0, width * 1e-3);
        assert!(f < 1.01);
        assert!(f > 0.0);
    }

    #[test]
    fn evaluate_dependency_order() {
        let v = car();
        let state = VehicleState { v_mps: 15.0 };
        let out = v.evaluate(&state, 600.0, 1_000.0);
        assert!((out.axle_spd_rad_s - 50.0).abs() < 1e-12);
        assert_eq!(out.reaction_trq_nm, -600.0);
        assert!((out.f_brake_n - 1_000.0).abs() < 1e-6);
        // (600/0.3 - 1000) / 1500
        assert!((out.accel_mps2 - 1_000.0 / 1_500.0).abs() < 1e-6);
        assert!((out.v_kmh - 54.0).abs() < 1e-9);
    }

    #[test]
    fn derivative_matches_evaluate() {
        let v = car();
        let state = VehicleState { v_mps: 3.0 };
        let d = v.derivative(&state, 300.0, 0.0);
        assert!((d.v_mps - (300.0 / 0.3) / 1_500.0).abs() < 1e-12);
    }

    #[test]
    fn axle_port_kinematics() {
        let v = car();
        let port = v.axle_port(&VehicleState { v_mps: 6.0 }, 120.0);
        assert!((port.speed_rad_s - 20.0).abs() < 1e-12);
        assert_eq!(port.torque_nm, 120.0);
    }

    #[test]
    fn initial_state_rejects_nan() {
        assert!(car().initial_state(f64::NAN).is_err());
        assert_eq!(car().initial_state(2.0).unwrap().v_mps, 2.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use ds_core::units::{kg, m};
    use proptest::prelude::*;

    fn car() -> SimpleVehicle {
        SimpleVehicle::new(
            "car",
            VehicleParameters {
                tire_radius: m(0.3),
                mass: kg(1_500.0),
            },
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn brake_monotone_in_command(
            a in 0.0f64..1e5,
            b in 0.0f64..1e5,
            spd in 0.0f64..500.0,
        ) {
            let v = car();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(v.brake_force(lo, spd) <= v.brake_force(hi, spd));
        }

        #[test]
        fn brake_off_for_non_positive_command(cmd in -1e5f64..=0.0, spd in -500.0f64..500.0) {
            prop_assert_eq!(car().brake_force(cmd, spd), 0.0);
        }

        #[test]
        fn brake_never_exceeds_command(cmd in 0.0f64..1e5, spd in -500.0f64..500.0) {
            prop_assert!(car().brake_force(cmd, spd).abs() <= cmd);
        }
    }
}
