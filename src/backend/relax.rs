// src/backend/relax.rs
//
// Relaxation controller:
//  - Phase 1: energy descent until the energy stops improving (checked
//    every few descent iterations).
//  - Phase 2: torque descent down to the minimiser threshold.
//
// Precession is suppressed throughout (damping-only updates), so this
// behaves like the relax mode of the GPU solvers: energy-first, then
// torque.

use crate::calculator::DriveError;
use crate::energy::Energy;

use super::eff_field::{total_energy, FieldContext, SolverState};
use super::minimize::{minimize, MinimizeReport, MinimizeSettings};

#[derive(Debug, Clone)]
pub struct RelaxSettings {
    /// Descent iterations between energy checks.
    pub energy_stride: usize,
    /// Relative energy tolerance for the phase-1 noise floor.
    pub rel_energy_tol: f64,
    pub minimize: MinimizeSettings,
}

impl Default for RelaxSettings {
    fn default() -> Self {
        Self {
            energy_stride: 3,
            rel_energy_tol: 1e-12,
            minimize: MinimizeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RelaxReport {
    pub phase1_iters: usize,
    pub phase2: MinimizeReport,
}

/// Reject configurations the relax mode cannot handle.
pub fn validate(energy: &Energy) -> Result<(), DriveError> {
    if energy.is_empty() {
        return Err(DriveError::EnergyNotDefined);
    }
    if energy.has_dmi() && !energy.has_exchange() {
        return Err(DriveError::Failed(
            "relaxation with DMI requires an exchange term".to_owned(),
        ));
    }
    Ok(())
}

pub fn relax(
    ctx: &FieldContext<'_>,
    state: &mut SolverState,
    settings: &RelaxSettings,
) -> Result<RelaxReport, DriveError> {
    validate(ctx.energy)?;

    // Phase 1: short descent bursts until the energy noise floor.
    let mut phase1_iters = 0usize;
    let burst = MinimizeSettings {
        max_iters: settings.energy_stride.max(1),
        // never converge inside a burst; phase 2 owns convergence
        torque_rel: 0.0,
        ..settings.minimize.clone()
    };

    let mut e0 = total_energy(ctx, state, 0.0)?;
    loop {
        let rep = minimize(ctx, state, 0.0, &burst, |_, _, _| {})?;
        phase1_iters += rep.iters;

        let e1 = total_energy(ctx, state, 0.0)?;
        let tol = settings.rel_energy_tol * e0.abs().max(1e-30);
        if e1 < e0 - tol && phase1_iters < settings.minimize.max_iters {
            e0 = e1;
            continue;
        }
        break; // energy noise floor (or phase-1 budget spent)
    }

    // Phase 2: torque descent.
    let phase2 = minimize(ctx, state, 0.0, &settings.minimize, |_, _, _| {})?;

    Ok(RelaxReport {
        phase1_iters,
        phase2,
    })
}
