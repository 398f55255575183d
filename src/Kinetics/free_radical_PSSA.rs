//! # Free-Radical Bulk Polymerization under the Pseudo-Steady-State Assumption
//!
//! Time-stepping integrator for a batch reactor. The radical pool is assumed to reach
//! its steady-state value instantly and hold it for the whole run, so the only explicit
//! state variable is the monomer concentration.
//!
//! ## Mathematical Background
//!
//! ```text
//! R_rad = sqrt(f*kd*I0/kt)                  (PSSA, computed once)
//! Rp    = kp * M * R_rad
//! dM/dt = -Rp
//! X     = (M0 - M)/M0
//! Mn    = MW_m * X * M0 / R_rad
//! ```
//!
//! `dM/dt` is advanced with explicit (forward) Euler. After every update the monomer
//! concentration passes through [`floor_clamp`]: when `Rp*dt` overshoots `M` the value is
//! truncated to zero instead of going negative. The clamp is lossy and never an error;
//! every engagement is counted in [`ClampReport`].
//!
//! ## Key Methods
//! - **Pure function**: [`simulate`] and [`simulate_with_options`]
//! - **Workflow**: `PSSAIntegrator::new()` → `set_problem()` → `set_params()` →
//!   `check_task()` → `solve()` → `get_result()`
//!
//! ## Example Usage
//!
//! ```rust
//! use RadPoly::Kinetics::free_radical_PSSA::simulate;
//! use RadPoly::Kinetics::polymerization_params::PolymerizationParams;
//!
//! let params = PolymerizationParams::default();
//! let result = simulate(&params, 20000.0, 1.0).unwrap();
//! assert_eq!(result.len(), 20001);
//! assert!(result.final_conversion() > 0.0);
//! ```
use super::polymerization_error::PolymerizationError;
use super::polymerization_params::PolymerizationParams;
use super::time_grid::TimeGrid;
use log::{debug, info, warn};
use nalgebra::DVector;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

/// fraction of clamped steps above which the step size is reported as too large
pub const CLAMP_WARNING_FRACTION: f64 = 0.01;

/// What to do with divisions by zero (kt = 0, M0 = 0, R_rad = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DivisionPolicy {
    /// fail before the first step
    #[default]
    Strict,
    /// let IEEE NaN/Inf flow into the output series
    Permissive,
}

/// Record of the floor clamp engagements of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClampReport {
    /// number of steps where the Euler update went below zero
    pub count: usize,
    /// first index where the clamp engaged
    pub first_index: Option<usize>,
}

impl ClampReport {
    pub fn engaged(&self) -> bool {
        self.count > 0
    }

    fn record(&mut self, i: usize) {
        self.count += 1;
        if self.first_index.is_none() {
            self.first_index = Some(i);
        }
    }
}

/// Run options beyond the seven physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    pub policy: DivisionPolicy,
    /// stop once conversion reaches this value, in (0, 1]
    pub stop_conversion: Option<f64>,
    /// reject runs with more intervals than this
    pub max_steps: Option<usize>,
}

impl SimulationOptions {
    pub fn validate(&self, grid: &TimeGrid) -> Result<(), PolymerizationError> {
        if let Some(x_stop) = self.stop_conversion {
            if !(x_stop > 0.0 && x_stop <= 1.0) {
                return Err(PolymerizationError::invalid(
                    "stop_conversion",
                    x_stop,
                    "conversion threshold must lie in (0, 1]",
                ));
            }
        }
        if let Some(max_steps) = self.max_steps {
            if grid.n_steps() > max_steps {
                return Err(PolymerizationError::invalid(
                    "dt",
                    grid.requested_dt(),
                    &format!(
                        "{} steps requested, the limit is {}",
                        grid.n_steps(),
                        max_steps
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Output series of a run, indexed in lockstep.
#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct PolymerizationResult {
    /// time [s]
    pub time: DVector<f64>,
    /// monomer concentration [mol/L]
    pub monomer: DVector<f64>,
    /// conversion [-]
    pub conversion: DVector<f64>,
    /// number-average molecular weight [g/mol]
    pub Mn: DVector<f64>,
    /// steady-state radical concentration used for the whole run [mol/L]
    pub radical_concentration: f64,
    /// effective step [s]
    pub dt: f64,
    pub clamp: ClampReport,
    /// true if a conversion threshold cut the run short
    pub stopped_early: bool,
}

#[allow(non_snake_case)]
impl PolymerizationResult {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn final_conversion(&self) -> f64 {
        self.conversion[self.len() - 1]
    }

    pub fn final_Mn(&self) -> f64 {
        self.Mn[self.len() - 1]
    }

    pub fn time_in_minutes(&self) -> DVector<f64> {
        &self.time / 60.0
    }

    pub fn Mn_in_kg_per_mol(&self) -> DVector<f64> {
        &self.Mn / 1000.0
    }

    /// first index where conversion reaches `x`
    pub fn index_of_conversion(&self, x: f64) -> Option<usize> {
        self.conversion.iter().position(|&xi| xi >= x)
    }

    /// Table of `rows` evenly spaced samples, always including the first and last node.
    pub fn pretty_print(&self, rows: usize) {
        let mut table = Table::new();
        table.add_row(row!["t, min", "[M], mol/L", "X", "Mn, kg/mol"]);
        for i in sample_indices(self.len(), rows) {
            table.add_row(row![
                format!("{:.2}", self.time[i] / 60.0),
                format!("{:.5}", self.monomer[i]),
                format!("{:.5}", self.conversion[i]),
                format!("{:.3}", self.Mn[i] / 1000.0)
            ]);
        }
        table.printstd();
    }
}

/// Indices of `rows` evenly spaced samples out of `len` nodes.
pub fn sample_indices(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let rows = rows.clamp(2, len.max(2));
    if len <= rows {
        return (0..len).collect();
    }
    let last = len - 1;
    let mut indices: Vec<usize> = (0..rows).map(|k| k * last / (rows - 1)).collect();
    indices.dedup();
    indices
}

/// Floor clamp of the monomer concentration after an Euler update: `max(m, 0)`.
///
/// Changing or removing it changes the trajectory whenever `Rp*dt > M`.
#[inline]
pub fn floor_clamp(m: f64) -> f64 {
    m.max(0.0)
}

/// Simulates the run with default options (strict divisions, no early stop).
pub fn simulate(
    params: &PolymerizationParams,
    t_end: f64,
    dt: f64,
) -> Result<PolymerizationResult, PolymerizationError> {
    simulate_with_options(params, t_end, dt, &SimulationOptions::default())
}

#[allow(non_snake_case)]
pub fn simulate_with_options(
    params: &PolymerizationParams,
    t_end: f64,
    dt: f64,
    options: &SimulationOptions,
) -> Result<PolymerizationResult, PolymerizationError> {
    let grid = TimeGrid::new(t_end, dt)?;
    params.validate()?;
    options.validate(&grid)?;
    if options.policy == DivisionPolicy::Strict {
        params.check_divisions()?;
    }

    let R_rad = params.radical_concentration();
    let h = grid.step();
    let n = grid.n_steps();
    let M0 = params.M0;
    info!(
        "PSSA run: {} steps, dt = {} s, R_rad = {:e} mol/L",
        n, h, R_rad
    );

    let time = grid.nodes();
    let mut M = DVector::<f64>::zeros(grid.len());
    let mut X = DVector::<f64>::zeros(grid.len());
    let mut Mn = DVector::<f64>::zeros(grid.len());
    M[0] = M0;

    let mut clamp = ClampReport::default();
    let mut last = n;
    let mut stopped_early = false;
    for i in 1..=n {
        let Rp = params.kp * M[i - 1] * R_rad;
        let M_euler = M[i - 1] - Rp * h;
        if M_euler < 0.0 {
            if !clamp.engaged() {
                warn!(
                    "monomer overshoot clamped to zero at step {} (t = {} s): Rp*dt = {:e} > M = {:e}",
                    i,
                    time[i],
                    Rp * h,
                    M[i - 1]
                );
            }
            clamp.record(i);
        }
        M[i] = floor_clamp(M_euler);
        X[i] = (M0 - M[i]) / M0;
        Mn[i] = params.MW_m * X[i] * M0 / R_rad;

        if let Some(x_stop) = options.stop_conversion {
            if X[i] >= x_stop {
                info!("conversion {} reached at step {} (t = {} s)", X[i], i, time[i]);
                last = i;
                stopped_early = i < n;
                break;
            }
        }
    }

    if clamp.count as f64 > CLAMP_WARNING_FRACTION * last as f64 {
        warn!(
            "floor clamp engaged in {} of {} steps: dt = {} s is too large for these kinetics",
            clamp.count, last, h
        );
    }
    debug!("final conversion {}", X[last]);

    let keep = last + 1;
    Ok(PolymerizationResult {
        time: time.rows(0, keep).into_owned(),
        monomer: M.rows(0, keep).into_owned(),
        conversion: X.rows(0, keep).into_owned(),
        Mn: Mn.rows(0, keep).into_owned(),
        radical_concentration: R_rad,
        dt: h,
        clamp,
        stopped_early,
    })
}

/// Set-up / check / solve wrapper around [`simulate_with_options`].
///
/// # Usage Pattern
/// 1. `new()` - Create instance with a division policy
/// 2. `set_problem()` - Set time horizon and step
/// 3. `set_params()` - Set physical constants
/// 4. `check_task()` - Validate configuration
/// 5. `solve()` - Run the integrator
/// 6. `get_result()` or `pretty_print()` - Output results
#[derive(Debug, Clone)]
pub struct PSSAIntegrator {
    params: Option<PolymerizationParams>,
    /// final integration time [s]
    t_end: f64,
    /// requested step [s]
    dt: f64,
    options: SimulationOptions,
    result: Option<PolymerizationResult>,
}

impl PSSAIntegrator {
    pub fn new(policy: DivisionPolicy) -> Self {
        Self {
            params: None,
            t_end: 0.0,
            dt: 0.0,
            options: SimulationOptions {
                policy,
                ..Default::default()
            },
            result: None,
        }
    }

    /// Sets the time horizon and the requested step.
    ///
    /// # Returns
    /// * `Err(PolymerizationError::InvalidArgument)` - if either value is not positive
    pub fn set_problem(&mut self, t_end: f64, dt: f64) -> Result<(), PolymerizationError> {
        TimeGrid::new(t_end, dt)?;
        self.t_end = t_end;
        self.dt = dt;
        self.result = None;
        Ok(())
    }

    pub fn set_params(&mut self, params: PolymerizationParams) -> Result<(), PolymerizationError> {
        params.validate()?;
        self.params = Some(params);
        self.result = None;
        Ok(())
    }

    pub fn set_stop_conversion(&mut self, stop_conversion: Option<f64>) {
        self.options.stop_conversion = stop_conversion;
        self.result = None;
    }

    pub fn set_max_steps(&mut self, max_steps: Option<usize>) {
        self.options.max_steps = max_steps;
        self.result = None;
    }

    pub fn set_options(&mut self, options: SimulationOptions) {
        self.options = options;
        self.result = None;
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Validates that all required parameters are properly set.
    pub fn check_task(&self) -> Result<(), PolymerizationError> {
        let grid = TimeGrid::new(self.t_end, self.dt)?;
        let params = self.params.as_ref().ok_or_else(|| {
            PolymerizationError::invalid("params", f64::NAN, "kinetic parameters not set")
        })?;
        params.validate()?;
        self.options.validate(&grid)?;
        if self.options.policy == DivisionPolicy::Strict {
            params.check_divisions()?;
        }
        Ok(())
    }

    pub fn solve(&mut self) -> Result<(), PolymerizationError> {
        self.check_task()?;
        let params = self.params.as_ref().ok_or(PolymerizationError::NotSolved)?;
        let result = simulate_with_options(params, self.t_end, self.dt, &self.options)?;
        info!("task solved!");
        self.result = Some(result);
        Ok(())
    }

    pub fn get_result(&self) -> Result<&PolymerizationResult, PolymerizationError> {
        self.result.as_ref().ok_or(PolymerizationError::NotSolved)
    }

    pub fn pretty_print(&self, rows: usize) -> Result<(), PolymerizationError> {
        let result = self.get_result()?;
        if let Some(params) = &self.params {
            params.pretty_print();
        }
        result.pretty_print(rows);
        Ok(())
    }
}
