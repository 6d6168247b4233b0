//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// This function should:
    /// 1) Extract dynamic states from x
    /// 2) Evaluate command schedules and algebraic relations at t
    /// 3) Return time derivatives
    ///
    /// Called several times per step by multi-stage integrators, so it must
    /// not have observable side effects.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;

    /// Inspect an accepted step.
    ///
    /// Runtime assertions (e.g. overspeed) live here. Returning an error halts
    /// the run. Default: no checks.
    fn check_step(&mut self, _t: f64, _x: &Self::State) -> SimResult<()> {
        Ok(())
    }

    /// Largest decay rate of the linearized dynamics (1/s).
    ///
    /// Used by [`SimOptions::check_step_size`](crate::SimOptions::check_step_size)
    /// to reject steps the explicit integrators cannot take. Default: 0.
    fn stiffness(&self) -> f64 {
        0.0
    }
}
