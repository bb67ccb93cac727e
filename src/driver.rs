// src/driver.rs
//
// Driver descriptors and per-drive arguments. A driver carries the knobs
// fixed at construction time (evolver choice, stopping criteria); the run
// struct carries the arguments of one `drive` call.

use std::path::PathBuf;

use crate::calculator::DriveError;

/// Evolver selection. Calculators reject pairings that make no sense
/// (a minimisation evolver on a time driver and vice versa).
#[derive(Debug, Clone, PartialEq)]
pub enum Evolver {
    RungeKutta { method: String },
    Euler { start_dm: f64 },
    Theta { fixed_timestep: f64 },
    ThermHeun,
    ThermSpinXfer,
    ConjugateGradient { method: String },
}

impl Evolver {
    pub fn rkf54s() -> Self {
        Evolver::RungeKutta {
            method: "rkf54s".to_owned(),
        }
    }

    pub fn cg() -> Self {
        Evolver::ConjugateGradient {
            method: "Polak-Ribiere".to_owned(),
        }
    }

    /// Usable by time-evolution drivers.
    pub fn is_time_evolver(&self) -> bool {
        !matches!(self, Evolver::ConjugateGradient { .. })
    }

    /// Usable by energy-minimisation drivers.
    pub fn is_min_evolver(&self) -> bool {
        matches!(self, Evolver::ConjugateGradient { .. })
    }

    /// Handles finite temperature.
    pub fn is_thermal(&self) -> bool {
        matches!(
            self,
            Evolver::Theta { .. } | Evolver::ThermHeun | Evolver::ThermSpinXfer
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Evolver::RungeKutta { .. } => "RungeKutta",
            Evolver::Euler { .. } => "Euler",
            Evolver::Theta { .. } => "Theta",
            Evolver::ThermHeun => "ThermHeun",
            Evolver::ThermSpinXfer => "ThermSpinXfer",
            Evolver::ConjugateGradient { .. } => "ConjugateGradient",
        }
    }
}

/// Magnetisation snapshot encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OvfFormat {
    #[default]
    Bin8,
    Bin4,
    Text,
}

impl OvfFormat {
    pub fn parse(s: &str) -> Result<Self, DriveError> {
        Ok(match s {
            "bin8" => OvfFormat::Bin8,
            "bin4" => OvfFormat::Bin4,
            "txt" => OvfFormat::Text,
            other => {
                return Err(DriveError::InvalidValue(format!(
                    "unknown output format '{other}'"
                )))
            }
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeDriver {
    pub evolver: Option<Evolver>,
    /// Early-stop once max |dm/dt| (rad/s) falls below this value.
    pub stopping_dm_dt: Option<f64>,
}

impl TimeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evolver(evolver: Evolver) -> Self {
        Self {
            evolver: Some(evolver),
            ..Self::default()
        }
    }
}

/// Arguments of one time drive: total time `t` split into `n` equal
/// stages, one table row and one snapshot per stage.
#[derive(Debug, Clone)]
pub struct TimeRun {
    pub t: f64,
    pub n: usize,
    pub save: bool,
    pub overwrite: bool,
    pub format: OvfFormat,
    pub n_threads: Option<usize>,
    /// Base directory override; the calculator's working directory
    /// otherwise.
    pub dirname: Option<PathBuf>,
}

impl TimeRun {
    pub fn new(t: f64, n: usize) -> Self {
        Self {
            t,
            n,
            save: true,
            overwrite: false,
            format: OvfFormat::default(),
            n_threads: None,
            dirname: None,
        }
    }

    pub fn validate(&self) -> Result<(), DriveError> {
        if !(self.t > 0.0) {
            return Err(DriveError::InvalidValue(format!(
                "run time must be positive, got {}",
                self.t
            )));
        }
        if self.n == 0 {
            return Err(DriveError::InvalidValue(
                "step count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinDriver {
    pub evolver: Option<Evolver>,
    /// Stop once max |m x H x m| (A/m) falls below this value. The built-in
    /// backend treats it as an upper bound and may converge further.
    pub stopping_mxhxm: Option<f64>,
}

impl MinDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evolver(evolver: Evolver) -> Self {
        Self {
            evolver: Some(evolver),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinRun {
    pub save: bool,
    pub overwrite: bool,
    pub format: OvfFormat,
    /// Record one table row per minimiser iteration instead of only the
    /// final state.
    pub output_step: bool,
    /// Subregions whose magnetisation is held fixed.
    pub fixed_subregions: Vec<String>,
    pub dirname: Option<PathBuf>,
}

impl Default for MinRun {
    fn default() -> Self {
        Self {
            save: true,
            overwrite: false,
            format: OvfFormat::default(),
            output_step: false,
            fixed_subregions: Vec::new(),
            dirname: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RelaxDriver;

#[derive(Debug, Clone)]
pub struct RelaxRun {
    pub save: bool,
    pub overwrite: bool,
    pub format: OvfFormat,
    pub dirname: Option<PathBuf>,
}

impl Default for RelaxRun {
    fn default() -> Self {
        Self {
            save: true,
            overwrite: false,
            format: OvfFormat::default(),
            dirname: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HysteresisDriver {
    pub evolver: Option<Evolver>,
}

/// One leg of a hysteresis sweep: `n` applied-field values from `from` to
/// `to` inclusive.
#[derive(Debug, Clone, Copy)]
pub struct HysteresisStep {
    pub from: [f64; 3],
    pub to: [f64; 3],
    pub n: usize,
}

#[derive(Debug, Clone)]
pub struct HysteresisRun {
    pub steps: Vec<HysteresisStep>,
    pub save: bool,
    pub overwrite: bool,
    pub format: OvfFormat,
    pub dirname: Option<PathBuf>,
}

impl HysteresisRun {
    /// Symmetric loop `hmin -> hmax -> hmin` with `n` field values per leg.
    pub fn symmetric(hmin: [f64; 3], hmax: [f64; 3], n: usize) -> Self {
        Self::stepped(vec![
            HysteresisStep {
                from: hmin,
                to: hmax,
                n,
            },
            HysteresisStep {
                from: hmax,
                to: hmin,
                n,
            },
        ])
    }

    pub fn stepped(steps: Vec<HysteresisStep>) -> Self {
        Self {
            steps,
            save: true,
            overwrite: false,
            format: OvfFormat::default(),
            dirname: None,
        }
    }

    pub fn validate(&self) -> Result<(), DriveError> {
        if self.steps.is_empty() {
            return Err(DriveError::InvalidValue(
                "hysteresis run needs at least one sweep".to_owned(),
            ));
        }
        for s in &self.steps {
            if s.n < 2 {
                return Err(DriveError::InvalidValue(format!(
                    "hysteresis sweep needs at least 2 field values, got {}",
                    s.n
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(OvfFormat::parse("bin8").unwrap(), OvfFormat::Bin8);
        assert_eq!(OvfFormat::parse("bin4").unwrap(), OvfFormat::Bin4);
        assert_eq!(OvfFormat::parse("txt").unwrap(), OvfFormat::Text);
        assert!(OvfFormat::parse("unknown").is_err());
    }

    #[test]
    fn run_validation() {
        assert!(TimeRun::new(-0.1e-9, 10).validate().is_err());
        assert!(TimeRun::new(0.1e-9, 0).validate().is_err());
        assert!(TimeRun::new(0.1e-9, 10).validate().is_ok());
    }

    #[test]
    fn evolver_pairing_classes() {
        assert!(Evolver::rkf54s().is_time_evolver());
        assert!(!Evolver::rkf54s().is_min_evolver());
        assert!(Evolver::cg().is_min_evolver());
        assert!(!Evolver::cg().is_time_evolver());
        assert!(Evolver::ThermHeun.is_thermal());
    }
}
