//! Uniform time grid of a polymerization run.
//!
//! The number of intervals is `N = round(t_end/dt)` (at least 1) and the grid spacing is
//! `t_end/N`, so the last node is exactly `t_end`. When `t_end` is a multiple of `dt` the
//! spacing equals `dt`; otherwise the requested step is stretched or shrunk by less than
//! half a step over the whole horizon.
use super::polymerization_error::PolymerizationError;
use nalgebra::DVector;

/// Largest number of intervals whose N+1 node buffer of f64 fits in `isize::MAX` bytes.
pub const MAX_INTERVALS: usize = isize::MAX as usize / std::mem::size_of::<f64>() - 1;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    t_end: f64,
    /// requested step
    dt: f64,
    /// number of intervals
    n_steps: usize,
}

impl TimeGrid {
    pub fn new(t_end: f64, dt: f64) -> Result<Self, PolymerizationError> {
        if !t_end.is_finite() || t_end <= 0.0 {
            return Err(PolymerizationError::invalid(
                "t_end",
                t_end,
                "simulated duration must be positive and finite",
            ));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PolymerizationError::invalid(
                "dt",
                dt,
                "step size must be positive and finite",
            ));
        }
        let ratio = (t_end / dt).round();
        if ratio >= MAX_INTERVALS as f64 {
            return Err(PolymerizationError::invalid(
                "dt",
                dt,
                &format!(
                    "t_end/dt = {:e} intervals, more than the {} a run can store",
                    ratio, MAX_INTERVALS
                ),
            ));
        }
        let n_steps = (ratio as usize).max(1);
        Ok(Self { t_end, dt, n_steps })
    }

    /// number of intervals N; the grid has N+1 nodes
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn len(&self) -> usize {
        self.n_steps + 1
    }

    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    pub fn requested_dt(&self) -> f64 {
        self.dt
    }

    /// grid spacing actually used by the integrator
    pub fn step(&self) -> f64 {
        self.t_end / self.n_steps as f64
    }

    /// time of node i, computed from the index, never accumulated
    pub fn at(&self, i: usize) -> f64 {
        if i >= self.n_steps {
            self.t_end
        } else {
            i as f64 * self.step()
        }
    }

    pub fn nodes(&self) -> DVector<f64> {
        DVector::from_fn(self.len(), |i, _| self.at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_multiple() {
        let grid = TimeGrid::new(20000.0, 1.0).unwrap();
        assert_eq!(grid.n_steps(), 20000);
        assert_eq!(grid.len(), 20001);
        assert_eq!(grid.step(), 1.0);
        let t = grid.nodes();
        assert_eq!(t[0], 0.0);
        assert_eq!(t[1], 1.0);
        assert_eq!(t[20000], 20000.0);
    }

    #[test]
    fn test_fractional_remainder_still_ends_at_t_end() {
        // 10/3 = 3.33 -> 3 intervals of 10/3
        let grid = TimeGrid::new(10.0, 3.0).unwrap();
        assert_eq!(grid.n_steps(), 3);
        assert_relative_eq!(grid.step(), 10.0 / 3.0, epsilon = 1e-12);
        assert_eq!(grid.nodes()[3], 10.0);

        // 10/4 = 2.5 rounds away from zero -> 3 intervals
        let grid = TimeGrid::new(10.0, 4.0).unwrap();
        assert_eq!(grid.n_steps(), 3);
        assert_eq!(*grid.nodes().as_slice().last().unwrap(), 10.0);
    }

    #[test]
    fn test_step_larger_than_horizon() {
        let grid = TimeGrid::new(1.0, 10.0).unwrap();
        assert_eq!(grid.n_steps(), 1);
        assert_eq!(grid.nodes().as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_nodes_are_uniform_and_increasing() {
        let grid = TimeGrid::new(1.0, 0.1).unwrap();
        let t = grid.nodes();
        assert_eq!(t.len(), 11);
        for i in 1..t.len() {
            assert!(t[i] > t[i - 1]);
            assert_relative_eq!(t[i] - t[i - 1], 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_unstorable_step_count() {
        for (t_end, dt) in [(1e19, 1.0), (1.0, 1e-300), (f64::MAX, 1e-10)] {
            match TimeGrid::new(t_end, dt) {
                Err(PolymerizationError::InvalidArgument { parameter, value, .. }) => {
                    assert_eq!(parameter, "dt");
                    assert_eq!(value, dt);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        let grid = TimeGrid::new(1e9, 1.0).unwrap();
        assert_eq!(grid.n_steps(), 1_000_000_000);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        for (t_end, dt) in [
            (0.0, 1.0),
            (-5.0, 1.0),
            (10.0, 0.0),
            (10.0, -1.0),
            (f64::NAN, 1.0),
            (10.0, f64::INFINITY),
        ] {
            assert!(matches!(
                TimeGrid::new(t_end, dt),
                Err(PolymerizationError::InvalidArgument { .. })
            ));
        }
    }
}
