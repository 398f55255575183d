use crate::Kinetics::diagnostics::diagnose;
use crate::Kinetics::free_radical_PSSA::{DivisionPolicy, PSSAIntegrator, SimulationOptions};
use crate::Kinetics::parameter_sweep::{ParameterSweep, pretty_print_outcomes};
use crate::Kinetics::polymerization_error::PolymerizationError;
use crate::Kinetics::polymerization_params::PolymerizationParams;
use crate::Utils::task_loader::PolymerizationTask;
use std::io::{self, Write};

/// rows of the trajectory table printed after a run
const TABLE_ROWS: usize = 11;

/// Solves a configured integrator and prints the trajectory, the diagnostics table and
/// every advisory warning.
pub fn solve_and_report(integrator: &mut PSSAIntegrator) -> Result<(), PolymerizationError> {
    println!("Solving...");
    integrator.solve()?;
    integrator.pretty_print(TABLE_ROWS)?;
    let report = diagnose(integrator.get_result()?);
    report.pretty_print();
    for w in report.warnings() {
        println!("{}", w);
    }
    Ok(())
}

/// Non-interactive entry point: `radpoly task.json`
pub fn run_task_file(file_name: &str) -> Result<(), PolymerizationError> {
    let task = PolymerizationTask::load(file_name)?;
    let mut integrator = task.build_integrator()?;
    solve_and_report(&mut integrator)
}

pub fn run_reference() -> Result<(), PolymerizationError> {
    let mut integrator = PolymerizationTask::default().build_integrator()?;
    solve_and_report(&mut integrator)
}

pub fn run_manual_input() -> Result<(), String> {
    let defaults = PolymerizationParams::default();
    println!("\nEnter problem parameters (empty line keeps the value in brackets):");
    let params = PolymerizationParams::new(
        prompt_f64("M0 (initial monomer, mol/L)", defaults.M0)?,
        prompt_f64("I0 (initial initiator, mol/L)", defaults.I0)?,
        prompt_f64("f (initiator efficiency)", defaults.f)?,
        prompt_f64("kd (decomposition rate constant, 1/s)", defaults.kd)?,
        prompt_f64("kp (propagation rate constant, L/mol/s)", defaults.kp)?,
        prompt_f64("kt (termination rate constant, L/mol/s)", defaults.kt)?,
        prompt_f64("MW_m (monomer molar mass, g/mol)", defaults.MW_m)?,
    );
    let t_end = prompt_f64("t_end (final time, s)", 20000.0)?;
    let dt = prompt_f64("dt (step, s)", 1.0)?;
    let policy = choose_policy()?;

    let mut integrator = PSSAIntegrator::new(policy);
    integrator
        .set_problem(t_end, dt)
        .map_err(|e| e.to_string())?;
    integrator.set_params(params).map_err(|e| e.to_string())?;
    solve_and_report(&mut integrator).map_err(|e| e.to_string())
}

pub fn run_task_file_prompt() -> Result<(), String> {
    print!("Task file path: ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let path = read_line()?;
    run_task_file(path.trim()).map_err(|e| e.to_string())
}

pub fn run_step_size_study() -> Result<(), String> {
    let t_end = prompt_f64("t_end (final time, s)", 20000.0)?;
    let outcomes = ParameterSweep::run_step_sizes(
        &PolymerizationParams::default(),
        t_end,
        &[1.0, 10.0, 100.0, 1000.0],
        &SimulationOptions::default(),
    );
    pretty_print_outcomes(&outcomes);
    Ok(())
}

fn choose_policy() -> Result<DivisionPolicy, String> {
    println!("\nDivision by zero handling:");
    println!("1. Strict (fail before stepping)");
    println!("2. Permissive (NaN/Inf in the output)");
    print!("Enter choice (1-2) [1]: ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    match read_line()?.trim() {
        "" | "1" => Ok(DivisionPolicy::Strict),
        "2" => Ok(DivisionPolicy::Permissive),
        _ => Err("Invalid policy choice".to_string()),
    }
}

fn prompt_f64(label: &str, default: f64) -> Result<f64, String> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush().map_err(|e| e.to_string())?;
    parse_or_default(&read_line()?, default).map_err(|_| format!("Invalid {} format", label))
}

fn parse_or_default(input: &str, default: f64) -> Result<f64, std::num::ParseFloatError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default)
    } else {
        trimmed.parse()
    }
}

pub(crate) fn read_line() -> Result<String, String> {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| format!("Failed to read input: {}", e))?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_or_default() {
        assert_eq!(parse_or_default("", 3.0), Ok(3.0));
        assert_eq!(parse_or_default("  \n", 3.0), Ok(3.0));
        assert_eq!(parse_or_default("2.5e-5\n", 3.0), Ok(2.5e-5));
        assert!(parse_or_default("abc", 3.0).is_err());
    }

    #[test]
    fn test_run_task_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"t_end": 600.0, "dt": 1.0}"#).unwrap();
        assert!(run_task_file(file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_run_task_file_reports_errors() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"params": {"kt": 0.0}}"#).unwrap();
        assert!(matches!(
            run_task_file(file.path().to_str().unwrap()),
            Err(PolymerizationError::DivisionByZero { .. })
        ));
        assert!(matches!(
            run_task_file("missing_task.json"),
            Err(PolymerizationError::TaskFile { .. })
        ));
    }

    #[test]
    fn test_run_reference() {
        assert!(run_reference().is_ok());
    }
}
