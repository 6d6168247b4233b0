//! Motor-drive unit: torque/power envelope, drive lag, losses and rotor dynamics.

use crate::common::finite_or_zero;
use crate::error::{ComponentError, ComponentResult};
use crate::ports::{ElectricalPort, RotationalPort};
use ds_core::error::DsError;
use ds_core::numeric::{ensure_finite, ensure_non_negative, ensure_open_interval, ensure_positive};
use ds_core::units::{AngularVelocity, Inertia, Power, Ratio, Time, Torque};

/// How iron loss varies away from the efficiency test point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IronLossLaw {
    /// Iron loss is the test-point value at every operating point.
    #[default]
    Constant,
    /// Iron loss scales with `(speed / spd_eff)²`.
    SpeedSquared,
}

/// Motor and drive parameters.
///
/// Validated once by [`MotorDriveUnit::new`]; an instance that fails
/// validation never becomes a usable model.
#[derive(Clone, Debug, PartialEq)]
pub struct MotorParameters {
    /// Maximum torque magnitude
    pub trq_max: Torque,
    /// Maximum rotor speed, monitored by the overspeed check
    pub spd_max: AngularVelocity,
    /// Maximum mechanical power magnitude
    pub power_max: Power,
    /// Drive torque response time constant
    pub response_time_const: Time,
    /// Efficiency at the test point, in (0, 100) percent
    pub efficiency: Ratio,
    /// Test point speed
    pub spd_eff: AngularVelocity,
    /// Test point torque
    pub trq_eff: Torque,
    /// Fraction of the nominal test point loss attributed to iron, in (0, 1)
    pub iron_to_nominal_ratio: Ratio,
    /// Speed and torque independent electrical loss
    pub elec_loss_const: Power,
    /// Rotor inertia
    pub j_rotor: Inertia,
    /// Rotor viscous damping (N·m·s/rad), may be zero
    pub k_damp: f64,
    /// Rotor speed at t = 0
    pub initial_spd: AngularVelocity,
    /// Speed dependence of the iron loss
    pub iron_loss_law: IronLossLaw,
}

impl MotorParameters {
    /// Check every parameter bound.
    pub fn validate(&self) -> Result<(), DsError> {
        let trq_max = ensure_positive(self.trq_max.value, "trq_max")?;
        let spd_max = ensure_positive(self.spd_max.value, "spd_max")?;
        let power_max = ensure_positive(self.power_max.value, "power_max")?;
        ensure_positive(self.response_time_const.value, "response_time_const")?;
        ensure_open_interval(
            self.efficiency.value,
            0.0,
            1.0,
            "efficiency",
            "(0 %, 100 %)",
        )?;
        let spd_eff = ensure_positive(self.spd_eff.value, "spd_eff")?;
        let trq_eff = ensure_positive(self.trq_eff.value, "trq_eff")?;
        ensure_open_interval(
            self.iron_to_nominal_ratio.value,
            0.0,
            1.0,
            "iron_to_nominal_ratio",
            "(0, 1)",
        )?;
        ensure_positive(self.elec_loss_const.value, "elec_loss_const")?;
        ensure_positive(self.j_rotor.value, "j_rotor")?;
        ensure_non_negative(self.k_damp, "k_damp")?;
        ensure_non_negative(self.initial_spd.value, "initial_spd")?;

        if trq_max * spd_max < power_max {
            return Err(DsError::Invariant {
                what: "trq_max * spd_max must be >= power_max",
            });
        }
        if spd_eff > spd_max {
            return Err(DsError::Invariant {
                what: "spd_eff must not exceed spd_max",
            });
        }
        if trq_eff > trq_max {
            return Err(DsError::Invariant {
                what: "trq_eff must not exceed trq_max",
            });
        }
        if trq_eff * spd_eff > power_max {
            return Err(DsError::Invariant {
                what: "efficiency test point lies outside the power envelope",
            });
        }
        Ok(())
    }
}

/// Loss figures at the efficiency test point, derived once from [`MotorParameters`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedLossParameters {
    /// Mechanical power at the test point (W)
    pub mechpow_eff: f64,
    /// Total loss at the test point (W)
    pub total_loss_eff: f64,
    /// Test point loss excluding the constant electrical term (W)
    pub nominal_losses_eff: f64,
    /// Iron share of the nominal loss (W)
    pub iron_loss_eff: f64,
    /// Copper loss coefficient, loss = coeff · torque² (W/(N·m)²)
    pub copper_coeff: f64,
}

impl DerivedLossParameters {
    /// Derive the loss split that reproduces the rated efficiency exactly.
    pub fn derive(params: &MotorParameters) -> Result<Self, DsError> {
        let trq_eff = params.trq_eff.value;
        let mechpow_eff = trq_eff * params.spd_eff.value;
        let total_loss_eff = mechpow_eff * (1.0 / params.efficiency.value - 1.0);
        let nominal_losses_eff = total_loss_eff - params.elec_loss_const.value;

        if nominal_losses_eff <= 0.0 {
            return Err(DsError::Invariant {
                what: "elec_loss_const must be below the total loss at the efficiency test point",
            });
        }

        let iron_loss_eff = params.iron_to_nominal_ratio.value * nominal_losses_eff;
        let copper_coeff = (nominal_losses_eff - iron_loss_eff) / (trq_eff * trq_eff);

        ensure_finite(total_loss_eff, "total_loss_eff")?;
        ensure_finite(copper_coeff, "copper_coeff")?;

        Ok(Self {
            mechpow_eff,
            total_loss_eff,
            nominal_losses_eff,
            iron_loss_eff,
            copper_coeff,
        })
    }
}

/// Continuous state of the drive unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotorState {
    /// Rotor angular velocity (rad/s)
    pub speed_rad_s: f64,
    /// Drive torque after the first-order response lag (N·m)
    pub lagged_torque_nm: f64,
}

/// Everything the drive produces at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorOperatingPoint {
    /// Rotor speed the point was evaluated at (rad/s)
    pub speed_rad_s: f64,
    /// Torque command after the torque and power clamps (N·m)
    pub torque_cmd_nm: f64,
    /// Torque delivered to the rotor (N·m)
    pub torque_nm: f64,
    /// Delivered mechanical power (W)
    pub mech_power_w: f64,
    /// Total loss (W), always positive
    pub loss_w: f64,
    /// Power drawn from the supply (W), negative when regenerating
    pub elec_power_w: f64,
}

/// Motor-drive unit.
///
/// ## Torque envelope
///
/// ```text
/// T_avail(ω) = min(trq_max, power_max / |ω|)
/// ```
///
/// Constant torque below the corner speed `power_max / trq_max`, constant
/// power above it.
///
/// ## Drive lag
///
/// ```text
/// τ_resp · dT_lag/dt = T_cmd,clamped - T_lag
/// ```
///
/// The delivered torque is `T_lag` re-clamped to the envelope at the current
/// speed, so `|T·ω| <= power_max` holds at every instant.
///
/// ## Losses
///
/// ```text
/// P_loss = P_iron + P_const + k_cu · T²
/// ```
///
/// with `P_iron` and `k_cu` derived so that the efficiency at
/// `(spd_eff, trq_eff)` equals the rated value.
///
/// ## Rotor
///
/// ```text
/// J · dω/dt = T - k_damp · ω - T_load
/// ```
#[derive(Clone, Debug)]
pub struct MotorDriveUnit {
    name: String,
    params: MotorParameters,
    derived: DerivedLossParameters,
}

impl MotorDriveUnit {
    /// Validate parameters and derive the loss model.
    ///
    /// # Errors
    /// Returns [`ComponentError::Configuration`] if any bound is violated.
    pub fn new(name: impl Into<String>, params: MotorParameters) -> ComponentResult<Self> {
        params.validate().map_err(ComponentError::Configuration)?;
        let derived =
            DerivedLossParameters::derive(&params).map_err(ComponentError::Configuration)?;

        Ok(Self {
            name: name.into(),
            params,
            derived,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &MotorParameters {
        &self.params
    }

    pub fn derived(&self) -> &DerivedLossParameters {
        &self.derived
    }

    /// Speed above which the power limit governs (rad/s).
    pub fn corner_speed(&self) -> f64 {
        self.params.power_max.value / self.params.trq_max.value
    }

    /// Largest torque magnitude the drive can deliver at `speed_rad_s`.
    pub fn available_torque(&self, speed_rad_s: f64) -> f64 {
        let trq_max = self.params.trq_max.value;
        let speed = speed_rad_s.abs();
        if speed <= self.corner_speed() {
            trq_max
        } else {
            (self.params.power_max.value / speed).min(trq_max)
        }
    }

    /// Clamp a torque command to the torque and power envelope.
    ///
    /// Non-finite commands are treated as zero.
    pub fn limit_torque(&self, torque_cmd_nm: f64, speed_rad_s: f64) -> f64 {
        let limit = self.available_torque(speed_rad_s);
        finite_or_zero(torque_cmd_nm).clamp(-limit, limit)
    }

    /// Total loss power at an operating point (W).
    pub fn losses(&self, torque_nm: f64, speed_rad_s: f64) -> f64 {
        let iron = match self.params.iron_loss_law {
            IronLossLaw::Constant => self.derived.iron_loss_eff,
            IronLossLaw::SpeedSquared => {
                let x = speed_rad_s / self.params.spd_eff.value;
                self.derived.iron_loss_eff * x * x
            }
        };
        iron + self.params.elec_loss_const.value + self.derived.copper_coeff * torque_nm * torque_nm
    }

    /// Motoring efficiency `P_mech / (P_mech + P_loss)`.
    ///
    /// `None` when the point is not motoring (zero or negative mechanical power).
    pub fn efficiency(&self, torque_nm: f64, speed_rad_s: f64) -> Option<f64> {
        let mech = torque_nm * speed_rad_s;
        if mech <= 0.0 {
            return None;
        }
        Some(mech / (mech + self.losses(torque_nm, speed_rad_s)))
    }

    /// Time derivative of the lagged drive torque.
    pub fn torque_lag_rate(
        &self,
        torque_cmd_nm: f64,
        lagged_torque_nm: f64,
        speed_rad_s: f64,
    ) -> f64 {
        let target = self.limit_torque(torque_cmd_nm, speed_rad_s);
        (target - lagged_torque_nm) / self.params.response_time_const.value
    }

    /// Torque reaching the rotor for a given lag state.
    pub fn delivered_torque(&self, lagged_torque_nm: f64, speed_rad_s: f64) -> f64 {
        self.limit_torque(lagged_torque_nm, speed_rad_s)
    }

    /// Rotor viscous damping torque (N·m), opposing motion.
    pub fn damping_torque(&self, speed_rad_s: f64) -> f64 {
        -self.params.k_damp * speed_rad_s
    }

    /// Angular acceleration of the rotor (rad/s²).
    pub fn rotor_acceleration(
        &self,
        delivered_nm: f64,
        speed_rad_s: f64,
        load_torque_nm: f64,
    ) -> f64 {
        let net = delivered_nm + self.damping_torque(speed_rad_s) - load_torque_nm;
        net / self.params.j_rotor.value
    }

    /// Evaluate the drive at one instant.
    pub fn operating_point(
        &self,
        torque_cmd_nm: f64,
        lagged_torque_nm: f64,
        speed_rad_s: f64,
    ) -> MotorOperatingPoint {
        let torque_cmd = self.limit_torque(torque_cmd_nm, speed_rad_s);
        let torque = self.delivered_torque(lagged_torque_nm, speed_rad_s);
        let mech_power = RotationalPort::new(speed_rad_s, torque).power_w();
        let loss = self.losses(torque, speed_rad_s);

        MotorOperatingPoint {
            speed_rad_s,
            torque_cmd_nm: torque_cmd,
            torque_nm: torque,
            mech_power_w: mech_power,
            loss_w: loss,
            elec_power_w: mech_power + loss,
        }
    }

    /// Supply current for an operating point (A).
    pub fn supply_current(&self, op: &MotorOperatingPoint, supply: ElectricalPort) -> f64 {
        supply.current_for_power(op.elec_power_w)
    }

    /// Output node value for an operating point.
    pub fn output_port(&self, op: &MotorOperatingPoint) -> RotationalPort {
        RotationalPort::new(op.speed_rad_s, op.torque_nm)
    }

    pub fn initial_state(&self) -> MotorState {
        MotorState {
            speed_rad_s: self.params.initial_spd.value,
            lagged_torque_nm: 0.0,
        }
    }

    /// State derivative for a given command and external load torque.
    pub fn derivative(
        &self,
        state: &MotorState,
        torque_cmd_nm: f64,
        load_torque_nm: f64,
    ) -> MotorState {
        let speed = state.speed_rad_s;
        let delivered = self.delivered_torque(state.lagged_torque_nm, speed);

        MotorState {
            speed_rad_s: self.rotor_acceleration(delivered, speed, finite_or_zero(load_torque_nm)),
            lagged_torque_nm: self.torque_lag_rate(torque_cmd_nm, state.lagged_torque_nm, speed),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::tests::traction_params;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clamped_torque_never_exceeds_trq_max(
            cmd in -1e5f64..1e5,
            speed in -1_500.0f64..1_500.0,
        ) {
            let m = MotorDriveUnit::new("m", traction_params()).unwrap();
            prop_assert!(m.limit_torque(cmd, speed).abs() <= 300.0);
        }

        #[test]
        fn delivered_power_within_power_max(lag in -1e4f64..1e4, speed in 1e-3f64..1_500.0) {
            let m = MotorDriveUnit::new("m", traction_params()).unwrap();
            let t = m.delivered_torque(lag, speed);
            prop_assert!((t * speed).abs() <= 80_000.0 * (1.0 + 1e-12));
        }

        #[test]
        fn losses_are_positive(t in -300.0f64..300.0, speed in -1_200.0f64..1_200.0) {
            let m = MotorDriveUnit::new("m", traction_params()).unwrap();
            prop_assert!(m.losses(t, speed) > 0.0);
        }

        #[test]
        fn rated_efficiency_reproduced(
            eff in 50.0f64..99.0,
            ratio in 0.05f64..0.95,
        ) {
            let mut p = traction_params();
            p.efficiency = ds_core::units::percent(eff);
            p.iron_to_nominal_ratio = ds_core::units::unitless(ratio);
            p.elec_loss_const = ds_core::units::w(10.0);
            let m = MotorDriveUnit::new("m", p).unwrap();
            let eta = m.efficiency(100.0, 400.0).unwrap();
            prop_assert!((eta - eff / 100.0).abs() < 1e-9);
        }
    }
}
