// src/calculator.rs
//
// The backend contract under test. A calculator owns a working directory,
// provides drivers for time evolution, energy minimisation, relaxation and
// hysteresis sweeps, computes derived quantities, and manages the on-disk
// drive artifacts.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::driver::{
    HysteresisDriver, HysteresisRun, MinDriver, MinRun, RelaxDriver, RelaxRun, TimeDriver, TimeRun,
};
use crate::field::{ScalarField, VectorField};
use crate::system::System;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("system's energy is not defined")]
    EnergyNotDefined,
    #[error("system's dynamics is not defined")]
    DynamicsNotDefined,
    #[error("system's magnetisation is not set")]
    MagnetisationNotSet,
    #[error("{driver} cannot use a {evolver} evolver")]
    EvolverMismatch {
        driver: &'static str,
        evolver: &'static str,
    },
    #[error("finite temperature requires a thermal evolver")]
    ThermalEvolverRequired,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("drive directory already exists: {0}")]
    DriveExists(PathBuf),
    #[error("drive failed: {0}")]
    Failed(String),
    #[error("not supported by this calculator: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Derived quantity selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeQuantity {
    Energy,
    EnergyDensity,
    EffectiveField,
}

/// What to compute: a quantity of one named energy term, or of the whole
/// energy equation (`term: None`).
#[derive(Debug, Clone, Copy)]
pub struct ComputeTarget<'a> {
    pub quantity: ComputeQuantity,
    pub term: Option<&'a str>,
}

impl<'a> ComputeTarget<'a> {
    pub fn total(quantity: ComputeQuantity) -> Self {
        Self {
            quantity,
            term: None,
        }
    }

    pub fn term(quantity: ComputeQuantity, name: &'a str) -> Self {
        Self {
            quantity,
            term: Some(name),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Computed {
    Scalar(f64),
    Density(ScalarField),
    Field(VectorField),
}

impl Computed {
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Computed::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

pub trait Calculator {
    /// Advance the system in time.
    fn drive_time(
        &self,
        system: &mut System,
        driver: &TimeDriver,
        run: &TimeRun,
    ) -> Result<(), DriveError>;

    /// Minimise the system's energy.
    fn drive_min(
        &self,
        system: &mut System,
        driver: &MinDriver,
        run: &MinRun,
    ) -> Result<(), DriveError>;

    /// Relax the system by damped time evolution. Calculators without a
    /// relax driver return `Unsupported`.
    fn drive_relax(
        &self,
        system: &mut System,
        driver: &RelaxDriver,
        run: &RelaxRun,
    ) -> Result<(), DriveError>;

    /// Sweep the applied field, minimising at every field value.
    fn drive_hysteresis(
        &self,
        system: &mut System,
        driver: &HysteresisDriver,
        run: &HysteresisRun,
    ) -> Result<(), DriveError>;

    /// Compute a derived quantity of the current state.
    fn compute(&self, system: &System, target: ComputeTarget<'_>) -> Result<Computed, DriveError>;

    /// Remove everything the calculator wrote for this system. Fails if
    /// there is nothing to remove.
    fn delete(&self, system: &System) -> Result<(), DriveError>;

    /// Write the input script and a `job.sh` for a time drive and hand the
    /// job script to `command`. Returns the job script path.
    fn schedule(
        &self,
        system: &System,
        command: &str,
        resources: &str,
        dirname: &Path,
        driver: &TimeDriver,
        run: &TimeRun,
    ) -> Result<PathBuf, DriveError>;

    /// Whether `drive_relax` is available.
    fn supports_relax(&self) -> bool {
        false
    }

    /// DMI crystal classes the backend can drive. Drives with an
    /// unsupported class fail with `InvalidValue`.
    fn supports_crystal_class(&self, _class: crate::energy::CrystalClass) -> bool {
        true
    }

    /// File extension of the backend's input script.
    fn script_extension(&self) -> &'static str;

    /// Directory drive artifacts are written under (unless a run overrides
    /// it with `dirname`).
    fn workdir(&self) -> &Path;
}
