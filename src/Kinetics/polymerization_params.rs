//! # Polymerization Parameters
//!
//! Immutable record of the physical and rate constants of a free-radical bulk
//! polymerization run. Validation is eager: every check runs before the integrator
//! allocates a single buffer.
//!
//! | Field  | Meaning                                   | Units        | Range    |
//! |--------|-------------------------------------------|--------------|----------|
//! | `M0`   | initial monomer concentration             | mol/L        | > 0      |
//! | `I0`   | initial initiator concentration           | mol/L        | ≥ 0      |
//! | `f`    | initiator efficiency                      | -            | [0, 1]   |
//! | `kd`   | initiator decomposition rate constant     | 1/s          | ≥ 0      |
//! | `kp`   | propagation rate constant                 | L/(mol·s)    | > 0      |
//! | `kt`   | termination rate constant                 | L/(mol·s)    | > 0      |
//! | `MW_m` | monomer molar mass                        | g/mol        | > 0      |
//!
//! The default values describe bulk methyl methacrylate (MMA).
use super::polymerization_error::PolymerizationError;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
#[serde(default)]
pub struct PolymerizationParams {
    /// initial monomer concentration [mol/L]
    pub M0: f64,
    /// initial initiator concentration [mol/L]
    pub I0: f64,
    /// initiator efficiency [-]
    pub f: f64,
    /// decomposition rate constant [1/s]
    pub kd: f64,
    /// propagation rate constant [L/(mol·s)]
    pub kp: f64,
    /// termination rate constant [L/(mol·s)]
    pub kt: f64,
    /// monomer molar mass [g/mol]
    pub MW_m: f64,
}

impl Default for PolymerizationParams {
    /// bulk MMA initiated at 0.05 mol/L
    fn default() -> Self {
        Self {
            M0: 5.0,
            I0: 0.05,
            f: 0.6,
            kd: 2.5e-5,
            kp: 341.0,
            kt: 1.5e7,
            MW_m: 100.12,
        }
    }
}

#[allow(non_snake_case)]
impl PolymerizationParams {
    pub fn new(M0: f64, I0: f64, f: f64, kd: f64, kp: f64, kt: f64, MW_m: f64) -> Self {
        Self {
            M0,
            I0,
            f,
            kd,
            kp,
            kt,
            MW_m,
        }
    }

    /// Checks ranges of all constants.
    ///
    /// `M0 == 0` and `kt == 0` pass here: they are not out of range, they make the run
    /// divide by zero, and that is reported by [`Self::check_divisions`].
    pub fn validate(&self) -> Result<(), PolymerizationError> {
        for (name, value) in self.as_named_values() {
            if !value.is_finite() {
                return Err(PolymerizationError::invalid(name, value, "must be finite"));
            }
        }
        if self.M0 < 0.0 {
            return Err(PolymerizationError::invalid(
                "M0",
                self.M0,
                "initial monomer concentration must be positive",
            ));
        }
        if self.I0 < 0.0 {
            return Err(PolymerizationError::invalid(
                "I0",
                self.I0,
                "initial initiator concentration must not be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.f) {
            return Err(PolymerizationError::invalid(
                "f",
                self.f,
                "initiator efficiency must lie in [0, 1]",
            ));
        }
        if self.kd < 0.0 {
            return Err(PolymerizationError::invalid(
                "kd",
                self.kd,
                "rate constant must not be negative",
            ));
        }
        if self.kp <= 0.0 {
            return Err(PolymerizationError::invalid(
                "kp",
                self.kp,
                "propagation rate constant must be positive",
            ));
        }
        if self.kt < 0.0 {
            return Err(PolymerizationError::invalid(
                "kt",
                self.kt,
                "rate constant must not be negative",
            ));
        }
        if self.MW_m <= 0.0 {
            return Err(PolymerizationError::invalid(
                "MW_m",
                self.MW_m,
                "monomer molar mass must be positive",
            ));
        }
        Ok(())
    }

    /// Detects every division by zero of the run before the first step.
    pub fn check_divisions(&self) -> Result<(), PolymerizationError> {
        if self.kt == 0.0 {
            return Err(PolymerizationError::division_by_zero(
                "R_rad = sqrt(f*kd*I0/kt)",
                "termination rate constant kt = 0",
            ));
        }
        if self.M0 == 0.0 {
            return Err(PolymerizationError::division_by_zero(
                "X = (M0 - M)/M0",
                "initial monomer concentration M0 = 0",
            ));
        }
        if self.radical_concentration() == 0.0 {
            return Err(PolymerizationError::division_by_zero(
                "Mn = MW_m*X*M0/R_rad",
                &format!(
                    "no initiation: f*kd*I0 = {} so R_rad = 0",
                    self.initiation_term()
                ),
            ));
        }
        if !self.radical_concentration().is_finite() {
            return Err(PolymerizationError::division_by_zero(
                "R_rad = sqrt(f*kd*I0/kt)",
                &format!(
                    "termination rate constant kt = {:e} is too small: f*kd*I0/kt overflows",
                    self.kt
                ),
            ));
        }
        if !self.chain_length_scale().is_finite() {
            return Err(PolymerizationError::division_by_zero(
                "Mn = MW_m*X*M0/R_rad",
                &format!(
                    "R_rad = {:e} is too small: MW_m*M0/R_rad overflows",
                    self.radical_concentration()
                ),
            ));
        }
        Ok(())
    }

    /// MW_m·M0/R_rad, the number-average molecular weight at full conversion [g/mol]
    pub fn chain_length_scale(&self) -> f64 {
        self.MW_m * self.M0 / self.radical_concentration()
    }

    /// f·kd·I0, the radical generation term of the steady-state balance
    pub fn initiation_term(&self) -> f64 {
        self.f * self.kd * self.I0
    }

    /// Steady-state radical concentration R_rad = sqrt(f·kd·I0/kt) [mol/L]
    pub fn radical_concentration(&self) -> f64 {
        (self.initiation_term() / self.kt).sqrt()
    }

    fn as_named_values(&self) -> [(&'static str, f64); 7] {
        [
            ("M0", self.M0),
            ("I0", self.I0),
            ("f", self.f),
            ("kd", self.kd),
            ("kp", self.kp),
            ("kt", self.kt),
            ("MW_m", self.MW_m),
        ]
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value", "Units"]);
        table.add_row(row!["M0", self.M0, "mol/L"]);
        table.add_row(row!["I0", self.I0, "mol/L"]);
        table.add_row(row!["f", self.f, "-"]);
        table.add_row(row!["kd", self.kd, "1/s"]);
        table.add_row(row!["kp", self.kp, "L/(mol*s)"]);
        table.add_row(row!["kt", self.kt, "L/(mol*s)"]);
        table.add_row(row!["MW_m", self.MW_m, "g/mol"]);
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_valid() {
        let params = PolymerizationParams::default();
        assert!(params.validate().is_ok());
        assert!(params.check_divisions().is_ok());
    }

    #[test]
    fn test_radical_concentration() {
        let params = PolymerizationParams::default();
        let expected = (0.6_f64 * 2.5e-5 * 0.05 / 1.5e7).sqrt();
        assert_relative_eq!(params.radical_concentration(), expected, epsilon = 1e-20);
        assert_relative_eq!(params.radical_concentration(), 2.2361e-7, max_relative = 1e-4);
    }

    #[test]
    fn test_range_validation() {
        let base = PolymerizationParams::default();
        let cases = [
            PolymerizationParams { M0: -1.0, ..base },
            PolymerizationParams { I0: -0.1, ..base },
            PolymerizationParams { f: 1.5, ..base },
            PolymerizationParams { f: -0.1, ..base },
            PolymerizationParams { kd: -1e-5, ..base },
            PolymerizationParams { kp: 0.0, ..base },
            PolymerizationParams { kt: -1.0, ..base },
            PolymerizationParams { MW_m: 0.0, ..base },
            PolymerizationParams { kp: f64::NAN, ..base },
            PolymerizationParams { kt: f64::INFINITY, ..base },
        ];
        for params in cases {
            let r = params.validate();
            assert!(
                matches!(r, Err(PolymerizationError::InvalidArgument { .. })),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_validation_names_parameter() {
        let params = PolymerizationParams {
            f: 2.0,
            ..Default::default()
        };
        match params.validate() {
            Err(PolymerizationError::InvalidArgument { parameter, value, .. }) => {
                assert_eq!(parameter, "f");
                assert_eq!(value, 2.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zero_denominators_are_division_errors() {
        let base = PolymerizationParams::default();
        let kt_zero = PolymerizationParams { kt: 0.0, ..base };
        assert!(kt_zero.validate().is_ok());
        assert!(matches!(
            kt_zero.check_divisions(),
            Err(PolymerizationError::DivisionByZero { .. })
        ));

        let m0_zero = PolymerizationParams { M0: 0.0, ..base };
        assert!(m0_zero.validate().is_ok());
        assert!(matches!(
            m0_zero.check_divisions(),
            Err(PolymerizationError::DivisionByZero { .. })
        ));

        for params in [
            PolymerizationParams { I0: 0.0, ..base },
            PolymerizationParams { f: 0.0, ..base },
            PolymerizationParams { kd: 0.0, ..base },
        ] {
            assert_eq!(params.radical_concentration(), 0.0);
            match params.check_divisions() {
                Err(PolymerizationError::DivisionByZero { quantity, .. }) => {
                    assert!(quantity.contains("Mn"))
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_overflowing_divisions_are_division_errors() {
        let base = PolymerizationParams::default();
        let tiny_kt = PolymerizationParams { kt: 1e-320, ..base };
        assert!(tiny_kt.validate().is_ok());
        assert!(tiny_kt.radical_concentration().is_infinite());
        match tiny_kt.check_divisions() {
            Err(PolymerizationError::DivisionByZero { quantity, cause }) => {
                assert!(quantity.contains("R_rad"));
                assert!(cause.contains("kt"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let huge_mass = PolymerizationParams {
            MW_m: 1e300,
            M0: 1e10,
            ..base
        };
        assert!(huge_mass.validate().is_ok());
        match huge_mass.check_divisions() {
            Err(PolymerizationError::DivisionByZero { quantity, .. }) => {
                assert!(quantity.contains("Mn"))
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_relative_eq!(
            base.chain_length_scale(),
            100.12 * 5.0 / base.radical_concentration(),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let params: PolymerizationParams =
            serde_json::from_str(r#"{"M0": 8.0, "kt": 2.0e7}"#).unwrap();
        assert_eq!(params.M0, 8.0);
        assert_eq!(params.kt, 2.0e7);
        assert_eq!(params.kp, 341.0);
        assert_eq!(params.MW_m, 100.12);
    }
}
