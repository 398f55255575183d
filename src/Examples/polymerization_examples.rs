use crate::Kinetics::diagnostics::diagnose;
use crate::Kinetics::free_radical_PSSA::{
    DivisionPolicy, PSSAIntegrator, SimulationOptions, simulate, simulate_with_options,
};
use crate::Kinetics::parameter_sweep::{ParameterSweep, pretty_print_outcomes};
use crate::Kinetics::polymerization_params::PolymerizationParams;

pub fn poly_examples(polytask: usize) {
    match polytask {
        0 => {
            // REFERENCE RUN: bulk MMA, 0.05 mol/L initiator, 20000 s with dt = 1 s
            let mut integrator = PSSAIntegrator::new(DivisionPolicy::Strict);
            integrator.set_problem(20000.0, 1.0).unwrap();
            integrator
                .set_params(PolymerizationParams::default())
                .unwrap();
            integrator.solve().unwrap();
            integrator.pretty_print(11).unwrap();
            let result = integrator.get_result().unwrap();
            println!("R_rad = {:e} mol/L", result.radical_concentration);
            println!("M[1] = {}, X[1] = {:e}", result.monomer[1], result.conversion[1]);
            diagnose(result).pretty_print();
        }
        1 => {
            // STEP SIZE SENSITIVITY: same kinetics, coarser and coarser Euler steps
            let outcomes = ParameterSweep::run_step_sizes(
                &PolymerizationParams::default(),
                20000.0,
                &[1.0, 10.0, 100.0, 1000.0, 5000.0, 20000.0],
                &SimulationOptions::default(),
            );
            pretty_print_outcomes(&outcomes);
        }
        2 => {
            // INITIATOR SWEEP: more initiator, faster polymerization, shorter chains
            let mut sweep = ParameterSweep::new(20000.0, 1.0);
            for i0 in [0.005, 0.01, 0.02, 0.05, 0.1, 0.2] {
                let params = PolymerizationParams {
                    I0: i0,
                    ..Default::default()
                };
                sweep.add_case(&format!("I0 = {} mol/L", i0), params);
            }
            pretty_print_outcomes(&sweep.run());
        }
        3 => {
            // NO INITIATION: strict mode refuses, permissive mode shows NaN Mn
            let params = PolymerizationParams {
                I0: 0.0,
                ..Default::default()
            };
            match simulate(&params, 1000.0, 1.0) {
                Ok(_) => println!("unexpected success"),
                Err(e) => println!("strict mode: {}", e),
            }
            let options = SimulationOptions {
                policy: DivisionPolicy::Permissive,
                ..Default::default()
            };
            let result = simulate_with_options(&params, 1000.0, 1.0, &options).unwrap();
            let report = diagnose(&result);
            for w in report.warnings() {
                println!("{}", w);
            }
        }
        4 => {
            // EARLY STOP at 50% conversion
            let options = SimulationOptions {
                stop_conversion: Some(0.5),
                ..Default::default()
            };
            let result =
                simulate_with_options(&PolymerizationParams::default(), 20000.0, 1.0, &options)
                    .unwrap();
            println!(
                "X = {} reached at t = {} min",
                result.final_conversion(),
                result.time[result.len() - 1] / 60.0
            );
            result.pretty_print(6);
        }
        _ => println!("no such example"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_examples_run() {
        for task in 0..=5 {
            poly_examples(task);
        }
    }
}
