//! Time-varying command signals.

use crate::error::{SimError, SimResult};

/// Scalar signal as a function of simulation time.
#[derive(Clone, Debug, PartialEq)]
pub enum Schedule {
    /// Same value at every time.
    Constant(f64),
    /// `before` for `t < time_s`, `after` from `time_s` on.
    Step { time_s: f64, before: f64, after: f64 },
    /// Piecewise-linear through `(t, value)` points, held flat outside.
    Table(Vec<(f64, f64)>),
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Constant(0.0)
    }
}

impl Schedule {
    pub fn constant(value: f64) -> Self {
        Schedule::Constant(value)
    }

    pub fn step(time_s: f64, before: f64, after: f64) -> Self {
        Schedule::Step {
            time_s,
            before,
            after,
        }
    }

    /// Build a table schedule.
    ///
    /// # Errors
    /// Points must be non-empty, finite and strictly increasing in time.
    pub fn table(points: Vec<(f64, f64)>) -> SimResult<Self> {
        let schedule = Schedule::Table(points);
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> SimResult<()> {
        match self {
            Schedule::Constant(v) => finite(*v),
            Schedule::Step {
                time_s,
                before,
                after,
            } => {
                finite(*time_s)?;
                finite(*before)?;
                finite(*after)
            }
            Schedule::Table(points) => {
                if points.is_empty() {
                    return Err(SimError::InvalidArg {
                        what: "schedule table must have at least one point",
                    });
                }
                for (t, v) in points {
                    finite(*t)?;
                    finite(*v)?;
                }
                if points.windows(2).any(|w| w[1].0 <= w[0].0) {
                    return Err(SimError::InvalidArg {
                        what: "schedule table times must be strictly increasing",
                    });
                }
                Ok(())
            }
        }
    }

    /// Largest value the signal takes.
    pub fn max_value(&self) -> f64 {
        match self {
            Schedule::Constant(v) => *v,
            Schedule::Step { before, after, .. } => before.max(*after),
            Schedule::Table(points) => points
                .iter()
                .map(|p| p.1)
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Signal value at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            Schedule::Constant(v) => *v,
            Schedule::Step {
                time_s,
                before,
                after,
            } => {
                if t < *time_s {
                    *before
                } else {
                    *after
                }
            }
            Schedule::Table(points) => interpolate(points, t),
        }
    }
}

fn finite(v: f64) -> SimResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidArg {
            what: "schedule values must be finite",
        })
    }
}

fn interpolate(points: &[(f64, f64)], t: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }
    // First index whose time is > t; t is strictly inside the table here
    let hi = points.partition_point(|p| p.0 <= t);
    let (t0, v0) = points[hi - 1];
    let (t1, v1) = points[hi];
    v0 + (v1 - v0) * (t - t0) / (t1 - t0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_everywhere() {
        let s = Schedule::constant(3.5);
        assert_eq!(s.value_at(-1.0), 3.5);
        assert_eq!(s.value_at(1e6), 3.5);
    }

    #[test]
    fn step_switches_at_time() {
        let s = Schedule::step(2.0, 0.0, 100.0);
        assert_eq!(s.value_at(1.999), 0.0);
        assert_eq!(s.value_at(2.0), 100.0);
        assert_eq!(s.value_at(5.0), 100.0);
    }

    #[test]
    fn table_interpolates_and_holds() {
        let s = Schedule::table(vec![(0.0, 0.0), (1.0, 10.0), (3.0, 0.0)]).unwrap();
        assert_eq!(s.value_at(-1.0), 0.0);
        assert!((s.value_at(0.5) - 5.0).abs() < 1e-12);
        assert_eq!(s.value_at(1.0), 10.0);
        assert!((s.value_at(2.0) - 5.0).abs() < 1e-12);
        assert_eq!(s.value_at(10.0), 0.0);
    }

    #[test]
    fn single_point_table_is_constant() {
        let s = Schedule::table(vec![(1.0, 7.0)]).unwrap();
        assert_eq!(s.value_at(0.0), 7.0);
        assert_eq!(s.value_at(2.0), 7.0);
    }

    #[test]
    fn table_rejects_bad_points() {
        assert!(Schedule::table(vec![]).is_err());
        assert!(Schedule::table(vec![(0.0, 1.0), (0.0, 2.0)]).is_err());
        assert!(Schedule::table(vec![(1.0, 1.0), (0.5, 2.0)]).is_err());
        assert!(Schedule::table(vec![(0.0, f64::NAN)]).is_err());
    }
}
