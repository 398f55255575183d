//! Post-run advisory checks of a polymerization trajectory.
//!
//! Nothing here fails a run: every finding is logged with `warn!` and collected in a
//! [`DiagnosticsReport`] for the caller to print.
use super::free_radical_PSSA::{CLAMP_WARNING_FRACTION, PolymerizationResult};
use log::{info, warn};
use prettytable::{Table, row};

#[derive(Debug, Clone, PartialEq, Default)]
#[allow(non_snake_case)]
pub struct DiagnosticsReport {
    /// indices with monomer concentration below zero
    pub negative_monomer: Vec<usize>,
    /// indices with NaN molecular weight
    pub nan_Mn: Vec<usize>,
    /// indices with infinite molecular weight
    pub infinite_Mn: Vec<usize>,
    pub clamped_steps: usize,
    pub first_clamped_index: Option<usize>,
    /// clamped steps divided by the number of steps taken
    pub clamp_fraction: f64,
}

#[allow(non_snake_case)]
impl DiagnosticsReport {
    pub fn is_clean(&self) -> bool {
        self.negative_monomer.is_empty()
            && self.nan_Mn.is_empty()
            && self.infinite_Mn.is_empty()
            && !self.step_too_large()
    }

    /// clamp engaged often enough to call the step size too large
    pub fn step_too_large(&self) -> bool {
        self.clamp_fraction > CLAMP_WARNING_FRACTION
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.negative_monomer.is_empty() {
            warnings.push(format!(
                "Warning: Negative monomer concentration detected at {} points (first at index {}).",
                self.negative_monomer.len(),
                self.negative_monomer[0]
            ));
        }
        if !self.nan_Mn.is_empty() {
            warnings.push(format!(
                "Warning: Mn contains NaN values at {} points (first at index {}).",
                self.nan_Mn.len(),
                self.nan_Mn[0]
            ));
        }
        if !self.infinite_Mn.is_empty() {
            warnings.push(format!(
                "Warning: Mn contains infinite values at {} points (first at index {}).",
                self.infinite_Mn.len(),
                self.infinite_Mn[0]
            ));
        }
        if self.step_too_large() {
            warnings.push(format!(
                "Warning: monomer clamped to zero in {:.1}% of steps (first at index {}); reduce dt.",
                100.0 * self.clamp_fraction,
                self.first_clamped_index.unwrap_or(0)
            ));
        }
        warnings
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Check", "Points", "First index"]);
        table.add_row(row![
            "negative [M]",
            self.negative_monomer.len(),
            first_or_dash(&self.negative_monomer)
        ]);
        table.add_row(row!["NaN Mn", self.nan_Mn.len(), first_or_dash(&self.nan_Mn)]);
        table.add_row(row![
            "infinite Mn",
            self.infinite_Mn.len(),
            first_or_dash(&self.infinite_Mn)
        ]);
        table.add_row(row![
            "clamped steps",
            self.clamped_steps,
            self.first_clamped_index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".to_string())
        ]);
        table.printstd();
    }
}

fn first_or_dash(indices: &[usize]) -> String {
    indices
        .first()
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Scans the output series and logs every finding.
#[allow(non_snake_case)]
pub fn diagnose(result: &PolymerizationResult) -> DiagnosticsReport {
    let negative_monomer: Vec<usize> = result
        .monomer
        .iter()
        .enumerate()
        .filter(|(_, m)| **m < 0.0)
        .map(|(i, _)| i)
        .collect();
    let nan_Mn: Vec<usize> = result
        .Mn
        .iter()
        .enumerate()
        .filter(|(_, mn)| mn.is_nan())
        .map(|(i, _)| i)
        .collect();
    let infinite_Mn: Vec<usize> = result
        .Mn
        .iter()
        .enumerate()
        .filter(|(_, mn)| mn.is_infinite())
        .map(|(i, _)| i)
        .collect();
    let steps = result.len().saturating_sub(1).max(1);
    let report = DiagnosticsReport {
        negative_monomer,
        nan_Mn,
        infinite_Mn,
        clamped_steps: result.clamp.count,
        first_clamped_index: result.clamp.first_index,
        clamp_fraction: result.clamp.count as f64 / steps as f64,
    };

    let warnings = report.warnings();
    if warnings.is_empty() {
        info!("diagnostics: trajectory is clean");
    }
    for w in &warnings {
        warn!("{}", w);
    }
    report
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::Kinetics::free_radical_PSSA::{
        DivisionPolicy, SimulationOptions, simulate, simulate_with_options,
    };
    use crate::Kinetics::polymerization_params::PolymerizationParams;

    #[test]
    fn test_clean_run() {
        let result = simulate(&PolymerizationParams::default(), 20000.0, 1.0).unwrap();
        let report = diagnose(&result);
        assert!(report.is_clean());
        assert!(report.warnings().is_empty());
        assert_eq!(report.clamped_steps, 0);
        assert_eq!(report.clamp_fraction, 0.0);
    }

    #[test]
    fn test_nan_Mn_flagged_in_permissive_mode() {
        let options = SimulationOptions {
            policy: DivisionPolicy::Permissive,
            ..Default::default()
        };
        let params = PolymerizationParams {
            I0: 0.0,
            ..Default::default()
        };
        let result = simulate_with_options(&params, 10.0, 1.0, &options).unwrap();
        let report = diagnose(&result);
        assert!(!report.is_clean());
        assert_eq!(report.nan_Mn.len(), 10);
        assert_eq!(report.nan_Mn[0], 1);
        assert!(report.negative_monomer.is_empty());
        let warnings = report.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NaN"));
    }

    #[test]
    fn test_frequent_clamping_flagged() {
        let params = PolymerizationParams {
            kp: 3.41e6,
            ..Default::default()
        };
        // 5 steps, 1 clamped: 20 %
        let result = simulate(&params, 10.0, 2.0).unwrap();
        let report = diagnose(&result);
        assert!(report.step_too_large());
        assert_eq!(report.first_clamped_index, Some(1));
        assert!((report.clamp_fraction - 0.2).abs() < 1e-12);
        assert!(report.warnings().iter().any(|w| w.contains("reduce dt")));
    }

    #[test]
    fn test_negative_monomer_flagged() {
        let mut result = simulate(&PolymerizationParams::default(), 10.0, 1.0).unwrap();
        result.monomer[3] = -1e-3;
        let report = diagnose(&result);
        assert_eq!(report.negative_monomer, vec![3]);
        assert!(report.warnings()[0].contains("Negative monomer"));
    }

    #[test]
    fn test_infinite_Mn_flagged() {
        let mut result = simulate(&PolymerizationParams::default(), 10.0, 1.0).unwrap();
        result.Mn[2] = f64::INFINITY;
        let report = diagnose(&result);
        assert_eq!(report.infinite_Mn, vec![2]);
        assert!(report.nan_Mn.is_empty());
    }
}
