//! Rotor overspeed monitoring.
//!
//! The check is an assertion on the trajectory, not a control action. It never
//! modifies state; at [`Severity::Error`] it turns the condition into an error
//! so the caller can halt.

use crate::error::{ComponentError, ComponentResult};
use crate::motor::MotorDriveUnit;
use tracing::warn;

/// How a runtime limit violation is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Suppressed.
    Ignore,
    /// Logged and counted, integration continues.
    #[default]
    Warn,
    /// Fatal.
    Error,
}

/// Overspeed check against the drive's `spd_max`.
#[derive(Clone, Debug)]
pub struct OverspeedMonitor {
    limit_rad_s: f64,
    severity: Severity,
    violations: usize,
}

impl OverspeedMonitor {
    pub fn new(limit_rad_s: f64, severity: Severity) -> Self {
        Self {
            limit_rad_s,
            severity,
            violations: 0,
        }
    }

    /// Monitor for a motor's configured maximum speed.
    pub fn for_motor(motor: &MotorDriveUnit, severity: Severity) -> Self {
        Self::new(motor.params().spd_max.value, severity)
    }

    pub fn limit_rad_s(&self) -> f64 {
        self.limit_rad_s
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Number of checks that found the rotor at or above the limit.
    pub fn violations(&self) -> usize {
        self.violations
    }

    /// Check one accepted step.
    ///
    /// Returns `Ok(true)` when the limit is reached at a non-fatal severity.
    ///
    /// # Errors
    /// [`ComponentError::LimitExceeded`] at [`Severity::Error`].
    pub fn check(&mut self, t: f64, speed_rad_s: f64) -> ComponentResult<bool> {
        if speed_rad_s.abs() < self.limit_rad_s {
            return Ok(false);
        }
        self.violations += 1;

        match self.severity {
            Severity::Ignore => Ok(true),
            Severity::Warn => {
                // First crossing, then every 1000th
                if self.violations == 1 || self.violations % 1000 == 0 {
                    warn!(
                        t,
                        speed_rad_s,
                        limit_rad_s = self.limit_rad_s,
                        count = self.violations,
                        "rotor speed at or above spd_max"
                    );
                }
                Ok(true)
            }
            Severity::Error => Err(ComponentError::LimitExceeded {
                what: "rotor speed",
                value: speed_rad_s,
                limit: self.limit_rad_s,
            }),
        }
    }
}
