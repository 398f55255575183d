/// eng
/// Time-stepping integrator of free-radical bulk polymerization in a batch reactor under the
/// pseudo-steady-state assumption. The radical concentration R_rad = sqrt(f*kd*I0/kt) is
/// computed once; the monomer balance dM/dt = -kp*M*R_rad is advanced with explicit Euler
/// followed by a floor clamp at zero; conversion and number-average molecular weight are
/// derived from the monomer concentration at every step:
/// 1) X = (M0 - M)/M0
/// 2) Mn = MW_m*X*M0/R_rad
///
/// Divisions by zero (kt = 0, M0 = 0, no initiation) fail before the first step in the
/// default strict mode; the permissive mode lets NaN/Inf into the output for the
/// diagnostics module to report.
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use RadPoly::Kinetics::free_radical_PSSA::{PSSAIntegrator, DivisionPolicy};
/// use RadPoly::Kinetics::polymerization_params::PolymerizationParams;
/// let mut integrator = PSSAIntegrator::new(DivisionPolicy::Strict);
/// integrator.set_problem(20000.0, 1.0).unwrap();
/// integrator.set_params(PolymerizationParams::default()).unwrap();
/// integrator.solve().unwrap();
/// let result = integrator.get_result().unwrap();
/// println!("final conversion {}", result.final_conversion());
/// ```
#[allow(non_snake_case)]
pub mod free_radical_PSSA;
/// physical constants of a run and their validation
pub mod polymerization_params;
/// error types
pub mod polymerization_error;
/// uniform time grid; N = round(t_end/dt), spacing t_end/N
pub mod time_grid;
/// post-run advisory checks: negative monomer, NaN/Inf Mn, clamp frequency
///
/// # Examples
/// ```
/// use RadPoly::Kinetics::diagnostics::diagnose;
/// use RadPoly::Kinetics::free_radical_PSSA::simulate;
/// use RadPoly::Kinetics::polymerization_params::PolymerizationParams;
/// let result = simulate(&PolymerizationParams::default(), 1000.0, 1.0).unwrap();
/// let report = diagnose(&result);
/// assert!(report.is_clean());
/// ```
pub mod diagnostics;
/// independent runs over many parameter sets, in parallel across runs
pub mod parameter_sweep;
