//! # Task File Loader
//!
//! Reads a polymerization task from a JSON file:
//!
//! ```json
//! {
//!   "params": {"M0": 5.0, "I0": 0.05, "f": 0.6, "kd": 2.5e-5, "kp": 341.0,
//!              "kt": 1.5e7, "MW_m": 100.12},
//!   "t_end": 20000.0,
//!   "dt": 1.0,
//!   "policy": "Strict",
//!   "stop_conversion": null,
//!   "max_steps": null
//! }
//! ```
//! Every field may be omitted; missing values fall back to the bulk MMA reference run.
use crate::Kinetics::free_radical_PSSA::{DivisionPolicy, PSSAIntegrator, SimulationOptions};
use crate::Kinetics::polymerization_error::PolymerizationError;
use crate::Kinetics::polymerization_params::PolymerizationParams;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolymerizationTask {
    pub params: PolymerizationParams,
    /// simulated duration [s]
    pub t_end: f64,
    /// requested step [s]
    pub dt: f64,
    pub policy: DivisionPolicy,
    pub stop_conversion: Option<f64>,
    pub max_steps: Option<usize>,
}

impl Default for PolymerizationTask {
    fn default() -> Self {
        Self {
            params: PolymerizationParams::default(),
            t_end: 20000.0,
            dt: 1.0,
            policy: DivisionPolicy::Strict,
            stop_conversion: None,
            max_steps: None,
        }
    }
}

impl PolymerizationTask {
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn load(file_name: &str) -> Result<Self, PolymerizationError> {
        if !Path::new(file_name).exists() {
            return Err(PolymerizationError::task_file(file_name, "file does not exist"));
        }
        let content = fs::read_to_string(file_name)
            .map_err(|e| PolymerizationError::task_file(file_name, e))?;
        let task =
            Self::from_json_str(&content).map_err(|e| PolymerizationError::task_file(file_name, e))?;
        info!(
            "task loaded from '{}': t_end = {} s, dt = {} s, policy {:?}",
            file_name, task.t_end, task.dt, task.policy
        );
        Ok(task)
    }

    pub fn options(&self) -> SimulationOptions {
        SimulationOptions {
            policy: self.policy,
            stop_conversion: self.stop_conversion,
            max_steps: self.max_steps,
        }
    }

    /// Integrator configured from the task; nothing is solved yet.
    pub fn build_integrator(&self) -> Result<PSSAIntegrator, PolymerizationError> {
        let mut integrator = PSSAIntegrator::new(self.policy);
        integrator.set_problem(self.t_end, self.dt)?;
        integrator.set_params(self.params)?;
        integrator.set_options(self.options());
        integrator.check_task()?;
        Ok(integrator)
    }
}
