// src/backend/eff_field.rs
//
// Solver state and effective-field assembly for the built-in backend.
// The solver works on unit orientations plus a per-cell saturation
// magnitude; B_eff is the effective induction in Tesla.

use crate::calculator::DriveError;
use crate::consts::MU0;
use crate::energy::{self, Energy, EnergyTerm};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::system::System;
use crate::vec3;

/// Mutable solver view of a system's magnetisation.
pub struct SolverState {
    pub mesh: Mesh,
    /// Unit orientations; vacuum cells are zero.
    pub m: Vec<[f64; 3]>,
    /// Saturation magnetisation per cell (A/m).
    pub ms: Vec<f64>,
    /// Cells excluded from updates.
    pub fixed: Vec<bool>,
}

impl SolverState {
    pub fn from_system(system: &System, fixed_subregions: &[String]) -> Result<Self, DriveError> {
        let field = system.m.as_ref().ok_or(DriveError::MagnetisationNotSet)?;
        let mesh = field.mesh.clone();
        let n = mesh.n_cells();

        let mut m = Vec::with_capacity(n);
        let mut ms = Vec::with_capacity(n);
        for v in &field.data {
            let norm = vec3::norm(*v);
            ms.push(norm);
            m.push(vec3::normalize(*v));
        }

        let mut fixed = vec![false; n];
        for name in fixed_subregions {
            let cells = mesh.cells_in(name);
            if cells.is_empty() {
                return Err(DriveError::InvalidValue(format!(
                    "unknown fixed subregion '{name}'"
                )));
            }
            for idx in cells {
                fixed[idx] = true;
            }
        }

        Ok(Self { mesh, m, ms, fixed })
    }

    /// Write the state back as a full magnetisation field.
    pub fn to_field(&self) -> VectorField {
        VectorField {
            mesh: self.mesh.clone(),
            data: self
                .m
                .iter()
                .zip(&self.ms)
                .map(|(m, ms)| vec3::scale(*m, *ms))
                .collect(),
        }
    }

    /// Mean unit orientation.
    pub fn orientation_mean(&self) -> [f64; 3] {
        let mut acc = [0.0; 3];
        for v in &self.m {
            acc = vec3::add(acc, *v);
        }
        vec3::scale(acc, 1.0 / self.m.len().max(1) as f64)
    }
}

/// Everything needed to evaluate fields and energies during one drive.
pub struct FieldContext<'a> {
    pub energy: &'a Energy,
    /// Additional applied field (A/m), used by the hysteresis driver.
    pub h_extra: Option<[f64; 3]>,
    /// Parallelise the expensive kernels over the current rayon pool.
    pub parallel: bool,
}

impl<'a> FieldContext<'a> {
    pub fn new(energy: &'a Energy) -> Self {
        Self {
            energy,
            h_extra: None,
            parallel: true,
        }
    }
}

fn add_term_field(
    term: &EnergyTerm,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    t: f64,
    parallel: bool,
    b: &mut [[f64; 3]],
) -> Result<(), DriveError> {
    match term {
        EnergyTerm::Exchange(e) => energy::exchange::add_field(e, mesh, m, ms, b),
        EnergyTerm::Zeeman(z) => energy::zeeman::add_field(z, mesh, ms, t, b),
        EnergyTerm::Demag(d) => energy::demag::add_field(d, mesh, m, ms, b, parallel),
        EnergyTerm::Dmi(d) => energy::dmi::add_field(d, mesh, m, ms, b),
        EnergyTerm::UniaxialAnisotropy(a) => {
            energy::anisotropy::add_uniaxial_field(a, mesh, m, ms, b)
        }
        EnergyTerm::CubicAnisotropy(a) => energy::anisotropy::add_cubic_field(a, mesh, m, ms, b),
        EnergyTerm::Rkky(r) => energy::rkky::add_field(r, mesh, m, ms, b)?,
    }
    Ok(())
}

fn add_term_density(
    term: &EnergyTerm,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    t: f64,
    parallel: bool,
    out: &mut [f64],
) -> Result<(), DriveError> {
    match term {
        EnergyTerm::Exchange(e) => energy::exchange::add_density(e, mesh, m, ms, out),
        EnergyTerm::Zeeman(z) => energy::zeeman::add_density(z, mesh, m, ms, t, out),
        EnergyTerm::Demag(d) => energy::demag::add_density(d, mesh, m, ms, out, parallel),
        EnergyTerm::Dmi(d) => energy::dmi::add_density(d, mesh, m, ms, out),
        EnergyTerm::UniaxialAnisotropy(a) => {
            energy::anisotropy::add_uniaxial_density(a, mesh, m, ms, out)
        }
        EnergyTerm::CubicAnisotropy(a) => {
            energy::anisotropy::add_cubic_density(a, mesh, m, ms, out)
        }
        EnergyTerm::Rkky(r) => energy::rkky::add_density(r, mesh, m, ms, out)?,
    }
    Ok(())
}

/// Assemble B_eff (Tesla) for the current state at time `t`.
pub fn build_b_eff(
    ctx: &FieldContext<'_>,
    state: &SolverState,
    t: f64,
    b: &mut Vec<[f64; 3]>,
) -> Result<(), DriveError> {
    b.clear();
    b.resize(state.mesh.n_cells(), [0.0; 3]);
    for term in ctx.energy.iter() {
        add_term_field(term, &state.mesh, &state.m, &state.ms, t, ctx.parallel, b)?;
    }
    if let Some(h) = ctx.h_extra {
        for (cell, ms) in b.iter_mut().zip(&state.ms) {
            if *ms == 0.0 {
                continue;
            }
            for e in 0..3 {
                cell[e] += MU0 * h[e];
            }
        }
    }
    Ok(())
}

/// Energy density (J/m^3) of the full equation, or of a single term.
pub fn energy_density(
    ctx: &FieldContext<'_>,
    state: &SolverState,
    t: f64,
    term: Option<&EnergyTerm>,
) -> Result<Vec<f64>, DriveError> {
    let mut out = vec![0.0; state.mesh.n_cells()];
    match term {
        Some(term) => {
            add_term_density(term, &state.mesh, &state.m, &state.ms, t, ctx.parallel, &mut out)?
        }
        None => {
            for term in ctx.energy.iter() {
                add_term_density(
                    term,
                    &state.mesh,
                    &state.m,
                    &state.ms,
                    t,
                    ctx.parallel,
                    &mut out,
                )?;
            }
            if let Some(h) = ctx.h_extra {
                for (idx, w) in out.iter_mut().enumerate() {
                    if state.ms[idx] == 0.0 {
                        continue;
                    }
                    let mdoth = vec3::dot(state.m[idx], h);
                    *w += -MU0 * state.ms[idx] * mdoth;
                }
            }
        }
    }
    Ok(out)
}

/// Total energy (J).
pub fn total_energy(
    ctx: &FieldContext<'_>,
    state: &SolverState,
    t: f64,
) -> Result<f64, DriveError> {
    let density = energy_density(ctx, state, t, None)?;
    Ok(density.iter().sum::<f64>() * state.mesh.cell_volume())
}

/// Effective field of a single term (Tesla), for derived-quantity queries.
pub fn term_field(
    ctx: &FieldContext<'_>,
    state: &SolverState,
    t: f64,
    term: &EnergyTerm,
) -> Result<Vec<[f64; 3]>, DriveError> {
    let mut b = vec![[0.0; 3]; state.mesh.n_cells()];
    add_term_field(term, &state.mesh, &state.m, &state.ms, t, ctx.parallel, &mut b)?;
    Ok(b)
}

/// max_i |m_i x B_i| over non-fixed cells.
pub fn max_torque(state: &SolverState, b: &[[f64; 3]]) -> f64 {
    let mut tmax = 0.0_f64;
    for idx in 0..state.m.len() {
        if state.fixed[idx] || state.ms[idx] == 0.0 {
            continue;
        }
        let t = vec3::cross(state.m[idx], b[idx]);
        let mag = vec3::norm(t);
        if mag > tmax {
            tmax = mag;
        }
    }
    tmax
}

/// max_i |B_i|, the field scale used to normalise step sizes and
/// convergence thresholds.
pub fn max_field(b: &[[f64; 3]]) -> f64 {
    b.iter().map(|v| vec3::norm(*v)).fold(0.0, f64::max)
}
