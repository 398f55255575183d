//! # Parameter Sweep
//!
//! Batch of independent PSSA runs over several parameter sets sharing one time horizon.
//! A single run is strictly sequential (step i needs step i-1), so the parallelism is
//! across runs only: each case is handed to a `rayon` worker with nothing shared but
//! read-only inputs. Results come back in input order, each with its own `Result`, so one
//! failing case does not abort the others.
//!
//! ```rust
//! use RadPoly::Kinetics::parameter_sweep::ParameterSweep;
//! use RadPoly::Kinetics::polymerization_params::PolymerizationParams;
//!
//! let mut sweep = ParameterSweep::new(20000.0, 10.0);
//! for i0 in [0.01, 0.05, 0.1] {
//!     let params = PolymerizationParams { I0: i0, ..Default::default() };
//!     sweep.add_case(&format!("I0 = {}", i0), params);
//! }
//! let outcomes = sweep.run();
//! assert_eq!(outcomes.len(), 3);
//! ```
use super::free_radical_PSSA::{PolymerizationResult, SimulationOptions, simulate_with_options};
use super::polymerization_error::PolymerizationError;
use super::polymerization_params::PolymerizationParams;
use log::info;
use prettytable::{Table, row};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct SweepCase {
    pub label: String,
    pub params: PolymerizationParams,
}

#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub label: String,
    pub params: PolymerizationParams,
    /// requested step size [s]; the step actually used is `result.dt`
    pub dt: f64,
    pub result: Result<PolymerizationResult, PolymerizationError>,
}

#[derive(Debug, Clone)]
pub struct ParameterSweep {
    pub cases: Vec<SweepCase>,
    pub t_end: f64,
    pub dt: f64,
    pub options: SimulationOptions,
}

impl ParameterSweep {
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self {
            cases: Vec::new(),
            t_end,
            dt,
            options: SimulationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn add_case(&mut self, label: &str, params: PolymerizationParams) {
        self.cases.push(SweepCase {
            label: label.to_string(),
            params,
        });
    }

    /// Runs every case in parallel; output order matches `cases`.
    pub fn run(&self) -> Vec<SweepOutcome> {
        info!(
            "running {} independent cases, t_end = {} s, dt = {} s",
            self.cases.len(),
            self.t_end,
            self.dt
        );
        self.cases
            .par_iter()
            .map(|case| SweepOutcome {
                label: case.label.clone(),
                params: case.params,
                dt: self.dt,
                result: simulate_with_options(&case.params, self.t_end, self.dt, &self.options),
            })
            .collect()
    }

    /// Same parameters, several step sizes: the stability sensitivity study.
    pub fn run_step_sizes(
        params: &PolymerizationParams,
        t_end: f64,
        step_sizes: &[f64],
        options: &SimulationOptions,
    ) -> Vec<SweepOutcome> {
        step_sizes
            .par_iter()
            .map(|&dt| SweepOutcome {
                label: format!("dt = {} s", dt),
                params: *params,
                dt,
                result: simulate_with_options(params, t_end, dt, options),
            })
            .collect()
    }
}

pub fn pretty_print_outcomes(outcomes: &[SweepOutcome]) {
    let mut table = Table::new();
    table.add_row(row![
        "Case",
        "R_rad, mol/L",
        "final X",
        "final Mn, kg/mol",
        "clamped steps",
        "status"
    ]);
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => table.add_row(row![
                outcome.label,
                format!("{:e}", result.radical_concentration),
                format!("{:.5}", result.final_conversion()),
                format!("{:.3}", result.final_Mn() / 1000.0),
                result.clamp.count,
                "ok"
            ]),
            Err(e) => table.add_row(row![outcome.label, "-", "-", "-", "-", e]),
        };
    }
    table.printstd();
}
