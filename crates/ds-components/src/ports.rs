//! Node values exchanged with connected components.
//!
//! A node carries a conjugate pair (an across and a through variable). The
//! models here only read and produce these pairs; resolving shared nodes
//! between components is the job of whoever composes them.

use crate::common::{EPSILON_VOLTAGE, regularize};

/// Rotational node: angular velocity (across) and torque (through).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationalPort {
    /// Angular velocity of the node (rad/s)
    pub speed_rad_s: f64,
    /// Torque transmitted through the node (N·m)
    pub torque_nm: f64,
}

impl RotationalPort {
    pub fn new(speed_rad_s: f64, torque_nm: f64) -> Self {
        Self {
            speed_rad_s,
            torque_nm,
        }
    }

    /// Mechanical power flowing through the node (W).
    pub fn power_w(&self) -> f64 {
        self.speed_rad_s * self.torque_nm
    }

    /// The same node seen from the other side of the connection.
    pub fn reaction(&self) -> Self {
        Self {
            speed_rad_s: self.speed_rad_s,
            torque_nm: -self.torque_nm,
        }
    }
}

/// Electrical supply node pair (`Vplus`, `Vminus`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectricalPort {
    /// Potential of the positive terminal (V)
    pub v_plus: f64,
    /// Potential of the negative terminal (V)
    pub v_minus: f64,
}

impl ElectricalPort {
    pub fn new(v_plus: f64, v_minus: f64) -> Self {
        Self { v_plus, v_minus }
    }

    /// Supply with the negative terminal grounded.
    pub fn grounded(voltage: f64) -> Self {
        Self::new(voltage, 0.0)
    }

    /// Terminal voltage `Vplus - Vminus` (V).
    pub fn voltage(&self) -> f64 {
        self.v_plus - self.v_minus
    }

    /// Current drawn into `Vplus` for a given electrical power (A).
    ///
    /// Positive power (motoring) draws positive current. The voltage is kept
    /// at least [`EPSILON_VOLTAGE`] away from zero.
    pub fn current_for_power(&self, power_w: f64) -> f64 {
        power_w / regularize(self.voltage(), EPSILON_VOLTAGE)
    }
}
