//! Simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use tracing::debug;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

impl IntegratorType {
    /// Largest `stiffness · dt` for which a decaying mode decays without
    /// changing sign.
    ///
    /// Forward Euler: `1 - z` stays non-negative up to `z = 1`. RK4: the
    /// stability polynomial stays in `(0, 1]` on the real axis down to
    /// `z ≈ -2.785`.
    pub fn stable_step_limit(self) -> f64 {
        match self {
            IntegratorType::RK4 => 2.785,
            IntegratorType::ForwardEuler => 1.0,
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }

    /// Reject a step too coarse for a mode decaying at `stiffness` (1/s).
    pub fn check_step_size(&self, stiffness: f64) -> SimResult<()> {
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Ok(());
        }
        let max_dt = self.integrator.stable_step_limit() / stiffness;
        if self.dt > max_dt {
            return Err(SimError::StepTooLarge {
                dt: self.dt,
                max_dt,
                stiffness,
            });
        }
        Ok(())
    }

    /// Number of steps needed to reach `t_end`, capped at `max_steps`.
    pub fn step_count(&self) -> usize {
        // Tolerate round-off in t_end / dt so 1.0 / 0.1 is 10 steps, not 11
        let n = (self.t_end / self.dt - 1e-9).ceil().max(0.0) as usize;
        n.min(self.max_steps)
    }
}

/// Progress snapshot passed to the observer.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    pub step: usize,
    pub total_steps: usize,
    pub t: f64,
}

impl SimProgress {
    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            1.0
        } else {
            self.step as f64 / self.total_steps as f64
        }
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Final recorded time and state.
    pub fn last(&self) -> Option<(f64, &S)> {
        self.t.last().copied().zip(self.x.last())
    }
}

/// Run a transient simulation.
pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, opts, |_| {})
}

/// Run a transient simulation, reporting progress at every recorded step.
///
/// After each accepted step the model's `check_step` runs; an error there
/// stops the run and is returned as-is.
pub fn run_sim_with_progress<M, F>(
    model: &mut M,
    opts: &SimOptions,
    mut on_progress: F,
) -> SimResult<SimRecord<M::State>>
where
    M: TransientModel,
    F: FnMut(SimProgress),
{
    opts.validate()?;

    let total_steps = opts.step_count();
    debug!(
        dt = opts.dt,
        t_end = opts.t_end,
        total_steps,
        integrator = ?opts.integrator,
        "transient run started"
    );

    let mut t = 0.0;
    let mut x = model.initial_state();
    model.check_step(t, &x)?;

    let mut t_record = vec![t];
    let mut x_record = vec![x.clone()];

    let mut step = 0;
    while step < total_steps {
        // Integrate one step using selected integrator
        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, &x, opts.dt)?,
        };
        step += 1;
        t = step as f64 * opts.dt;

        model.check_step(t, &x)?;

        // Record if decimation matches
        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.clone());
            on_progress(SimProgress {
                step,
                total_steps,
                t,
            });
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x);
        on_progress(SimProgress {
            step,
            total_steps,
            t,
        });
    }

    debug!(steps = step, t_final = t, records = t_record.len(), "transient run finished");

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp {
        slope: f64,
        halt_above: Option<f64>,
    }

    impl TransientModel for Ramp {
        type State = f64;

        fn initial_state(&self) -> f64 {
            0.0
        }

        fn rhs(&mut self, _t: f64, _x: &f64) -> SimResult<f64> {
            Ok(self.slope)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }

        fn check_step(&mut self, _t: f64, x: &f64) -> SimResult<()> {
            match self.halt_above {
                Some(limit) if *x > limit => Err(SimError::NonPhysical { what: "ramp" }),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 1e-3);
        assert_eq!(opts.t_end, 1.0);
        assert_eq!(opts.max_steps, 100_000);
        assert_eq!(opts.record_every, 10);
        assert_eq!(opts.integrator, IntegratorType::RK4);
    }

    #[test]
    fn sim_options_invalid() {
        let mut model = Ramp {
            slope: 1.0,
            halt_above: None,
        };
        for opts in [
            SimOptions {
                dt: 0.0,
                ..SimOptions::default()
            },
            SimOptions {
                t_end: -1.0,
                ..SimOptions::default()
            },
            SimOptions {
                max_steps: 0,
                ..SimOptions::default()
            },
            SimOptions {
                record_every: 0,
                ..SimOptions::default()
            },
        ] {
            assert!(run_sim(&mut model, &opts).is_err());
        }
    }

    #[test]
    fn step_count_tolerates_round_off() {
        let opts = SimOptions {
            dt: 0.1,
            t_end: 1.0,
            ..SimOptions::default()
        };
        assert_eq!(opts.step_count(), 10);
        let capped = SimOptions {
            max_steps: 3,
            ..opts
        };
        assert_eq!(capped.step_count(), 3);
    }

    #[test]
    fn step_size_check_uses_integrator_limit() {
        let euler = SimOptions {
            dt: 0.01,
            integrator: IntegratorType::ForwardEuler,
            ..SimOptions::default()
        };
        // Non-stiff models are never limited
        assert!(euler.check_step_size(0.0).is_ok());
        assert!(euler.check_step_size(90.0).is_ok());
        assert!(euler.check_step_size(200.0).is_err());

        let rk4 = SimOptions {
            integrator: IntegratorType::RK4,
            ..euler
        };
        assert!(rk4.check_step_size(200.0).is_ok());
        match rk4.check_step_size(300.0) {
            Err(SimError::StepTooLarge { max_dt, .. }) => {
                assert!((max_dt - 2.785 / 300.0).abs() < 1e-15);
            }
            other => panic!("expected StepTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn records_decimated_and_final() {
        let mut model = Ramp {
            slope: 2.0,
            halt_above: None,
        };
        let opts = SimOptions {
            dt: 0.1,
            t_end: 1.05,
            record_every: 4,
            ..SimOptions::default()
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        // 11 steps: t = 0, 0.4, 0.8, 1.1
        assert_eq!(rec.len(), 4);
        let (t_last, x_last) = rec.last().unwrap();
        assert!((t_last - 1.1).abs() < 1e-12);
        assert!((x_last - 2.2).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_records_initial_state_only() {
        let mut model = Ramp {
            slope: 1.0,
            halt_above: None,
        };
        let opts = SimOptions {
            t_end: 0.0,
            ..SimOptions::default()
        };
        let rec = run_sim(&mut model, &opts).unwrap();
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn check_step_error_halts() {
        let mut model = Ramp {
            slope: 1.0,
            halt_above: Some(0.5),
        };
        let opts = SimOptions {
            dt: 0.1,
            t_end: 2.0,
            ..SimOptions::default()
        };
        assert!(matches!(
            run_sim(&mut model, &opts),
            Err(SimError::NonPhysical { .. })
        ));
    }

    #[test]
    fn progress_reported_per_record() {
        let mut model = Ramp {
            slope: 1.0,
            halt_above: None,
        };
        let opts = SimOptions {
            dt: 0.01,
            t_end: 1.0,
            record_every: 10,
            ..SimOptions::default()
        };
        let mut seen = Vec::new();
        run_sim_with_progress(&mut model, &opts, |p| seen.push(p)).unwrap();
        assert_eq!(seen.len(), 10);
        assert_eq!(seen.last().unwrap().step, 100);
        assert!((seen.last().unwrap().fraction() - 1.0).abs() < 1e-12);
    }
}
