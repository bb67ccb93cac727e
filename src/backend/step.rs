// src/backend/step.rs
//
// Time integration for the built-in backend: per-cell resolution of the
// dynamics terms, the LLG right-hand side (precession, damping, Zhang-Li
// and Slonczewski torques, optional thermal field), and a fixed-step RK4
// stage integrator with a stability-scaled internal step.

use crate::calculator::DriveError;
use crate::consts::{E_CHARGE, GAMMA0, HBAR, KB, MU0};
use crate::dynamics::{Dynamics, DynamicsTerm};
use crate::field::XorShift64;
use crate::param::TimeProfile;
use crate::vec3::{cross, dot, normalize, scale};

use super::eff_field::{build_b_eff, max_field, FieldContext, SolverState};

/// Dynamics terms resolved to per-cell coefficient arrays. Parameters do
/// not change during a drive, so this is done once.
pub struct DynCoeffs {
    pub gamma0: Vec<f64>,
    pub alpha: Vec<f64>,
    pub has_precession: bool,
    pub zhangli: Option<ZlCoeffs>,
    pub slonczewski: Option<SlCoeffs>,
}

pub struct ZlCoeffs {
    /// Drift velocity per cell (m/s).
    pub u: Vec<[f64; 3]>,
    pub beta: f64,
    pub profile: Option<TimeProfile>,
}

pub struct SlCoeffs {
    /// Torque prefactor a_j per cell (Tesla).
    pub aj: Vec<f64>,
    pub mp: Vec<[f64; 3]>,
    pub p: Vec<f64>,
    pub lambda: Vec<f64>,
    pub eps_prime: Vec<f64>,
    pub profile: Option<TimeProfile>,
}

impl DynCoeffs {
    pub fn resolve(dynamics: &Dynamics, state: &SolverState) -> Result<Self, DriveError> {
        if dynamics.is_empty() {
            return Err(DriveError::DynamicsNotDefined);
        }
        let mesh = &state.mesh;
        let n = mesh.n_cells();

        let has_precession = dynamics.precession().is_some();
        let gamma0: Vec<f64> = match dynamics.precession() {
            Some(p) => (0..n).map(|i| p.gamma0.at(mesh, i)).collect(),
            None => vec![GAMMA0; n],
        };
        let alpha: Vec<f64> = match dynamics.damping() {
            Some(d) => (0..n).map(|i| d.alpha.at(mesh, i)).collect(),
            None => vec![0.0; n],
        };

        let mut zhangli = None;
        let mut slonczewski = None;
        for term in dynamics.iter() {
            match term {
                DynamicsTerm::ZhangLi(z) => {
                    zhangli = Some(ZlCoeffs {
                        u: (0..n).map(|i| z.u.at(mesh, i)).collect(),
                        beta: z.beta,
                        profile: z.profile,
                    });
                }
                DynamicsTerm::Slonczewski(s) => {
                    // free-layer thickness taken as the cell height
                    let d = mesh.cell[2];
                    let aj: Vec<f64> = (0..n)
                        .map(|i| {
                            let ms = state.ms[i];
                            if ms == 0.0 {
                                0.0
                            } else {
                                HBAR * s.j.at(mesh, i) / (2.0 * E_CHARGE * ms * d)
                            }
                        })
                        .collect();
                    slonczewski = Some(SlCoeffs {
                        aj,
                        mp: (0..n).map(|i| normalize(s.mp.at(mesh, i))).collect(),
                        p: (0..n).map(|i| s.p.at(mesh, i)).collect(),
                        lambda: (0..n).map(|i| s.lambda.at(mesh, i)).collect(),
                        eps_prime: (0..n).map(|i| s.eps_prime.at(mesh, i)).collect(),
                        profile: s.profile,
                    });
                }
                DynamicsTerm::Precession(_) | DynamicsTerm::Damping(_) => {}
            }
        }

        Ok(Self {
            gamma0,
            alpha,
            has_precession,
            zhangli,
            slonczewski,
        })
    }

    /// Largest precession rate per unit field (rad / s T).
    pub fn max_gamma_b(&self) -> f64 {
        self.gamma0
            .iter()
            .zip(&self.alpha)
            .map(|(g, a)| g / MU0 * (1.0 + a.abs()))
            .fold(0.0, f64::max)
    }

    /// Largest advection speed of the current-driven terms (m/s).
    pub fn max_drift(&self) -> f64 {
        self.zhangli
            .as_ref()
            .map(|z| {
                z.u.iter()
                    .map(|u| dot(*u, *u).sqrt())
                    .fold(0.0, f64::max)
            })
            .unwrap_or(0.0)
    }
}

/// (u . grad) m by central differences, one-sided at open boundaries.
fn advect(state: &SolverState, idx: usize, u: [f64; 3]) -> [f64; 3] {
    let mesh = &state.mesh;
    let mut g = [0.0; 3];
    for axis in 0..3 {
        if u[axis] == 0.0 {
            continue;
        }
        let up = mesh.neighbor(idx, axis, 1).filter(|&n| state.ms[n] != 0.0);
        let dn = mesh.neighbor(idx, axis, -1).filter(|&n| state.ms[n] != 0.0);
        let inv = 1.0 / mesh.cell[axis];
        let d = match (dn, up) {
            (Some(a), Some(b)) => {
                let half = 0.5 * inv;
                [
                    (state.m[b][0] - state.m[a][0]) * half,
                    (state.m[b][1] - state.m[a][1]) * half,
                    (state.m[b][2] - state.m[a][2]) * half,
                ]
            }
            (None, Some(b)) => [
                (state.m[b][0] - state.m[idx][0]) * inv,
                (state.m[b][1] - state.m[idx][1]) * inv,
                (state.m[b][2] - state.m[idx][2]) * inv,
            ],
            (Some(a), None) => [
                (state.m[idx][0] - state.m[a][0]) * inv,
                (state.m[idx][1] - state.m[a][1]) * inv,
                (state.m[idx][2] - state.m[a][2]) * inv,
            ],
            (None, None) => [0.0; 3],
        };
        for e in 0..3 {
            g[e] += u[axis] * d[e];
        }
    }
    g
}

/// LLG right-hand side dm/dt (1/s) for every cell.
pub fn rhs(
    state: &SolverState,
    coeffs: &DynCoeffs,
    b: &[[f64; 3]],
    t: f64,
    out: &mut [[f64; 3]],
) {
    for idx in 0..state.m.len() {
        out[idx] = [0.0; 3];
        if state.fixed[idx] || state.ms[idx] == 0.0 {
            continue;
        }
        let m = state.m[idx];
        let alpha = coeffs.alpha[idx];
        let gamma0 = coeffs.gamma0[idx];
        let gll = gamma0 / ((1.0 + alpha * alpha) * MU0);

        let mxb = cross(m, b[idx]);

        if coeffs.has_precession {
            for e in 0..3 {
                out[idx][e] -= gll * mxb[e];
            }
        }
        if alpha != 0.0 {
            let mxmxb = cross(m, mxb);
            for e in 0..3 {
                out[idx][e] -= alpha * gll * mxmxb[e];
            }
        }

        if let Some(zl) = &coeffs.zhangli {
            let f = zl.profile.map_or(1.0, |p| p.factor(t));
            if f != 0.0 {
                let u = scale(zl.u[idx], f);
                if u != [0.0; 3] {
                    let g = advect(state, idx, u);
                    let mxg = cross(m, g);
                    let mxmxg = cross(m, mxg);
                    let denom = 1.0 + alpha * alpha;
                    let c1 = (1.0 + alpha * zl.beta) / denom;
                    let c2 = (zl.beta - alpha) / denom;
                    for e in 0..3 {
                        out[idx][e] += c1 * mxmxg[e] + c2 * mxg[e];
                    }
                }
            }
        }

        if let Some(sl) = &coeffs.slonczewski {
            let f = sl.profile.map_or(1.0, |p| p.factor(t));
            let aj = sl.aj[idx] * f;
            if aj != 0.0 {
                let mp = sl.mp[idx];
                let lambda2 = sl.lambda[idx] * sl.lambda[idx];
                let eps = sl.p[idx] * lambda2
                    / ((lambda2 + 1.0) + (lambda2 - 1.0) * dot(m, mp));
                let mxmp = cross(m, mp);
                let mxmxmp = cross(m, mxmp);
                for e in 0..3 {
                    out[idx][e] -= gll * aj * (eps * mxmxmp[e] + sl.eps_prime[idx] * mxmp[e]);
                }
            }
        }
    }
}

/// How one internal step advances the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMethod {
    Rk4,
    Euler,
    /// Euler-Heun with a stochastic thermal field.
    Heun { temperature: f64, seed: u64 },
}

/// Thermal induction amplitude per component,
/// sigma = sqrt(2 alpha k_B T / (gamma_B Ms V dt)).
fn thermal_sigma(alpha: f64, gamma0: f64, ms: f64, vol: f64, temperature: f64, dt: f64) -> f64 {
    if temperature <= 0.0 || ms == 0.0 || alpha == 0.0 {
        return 0.0;
    }
    let gamma_b = gamma0 / MU0;
    (2.0 * alpha * KB * temperature / (gamma_b * ms * vol * dt)).sqrt()
}

pub struct StageReport {
    /// max |dm/dt| (rad/s) at the end of the stage.
    pub max_dmdt: f64,
    pub steps: usize,
}

/// Integrate from `t0` to `t1` with an internal step bounded by the
/// precession and advection rates. Returns the terminal |dm/dt| so
/// callers can implement `stopping_dm_dt`.
#[allow(clippy::too_many_arguments)]
pub fn integrate_stage(
    ctx: &FieldContext<'_>,
    state: &mut SolverState,
    coeffs: &DynCoeffs,
    t0: f64,
    t1: f64,
    method: StepMethod,
    dt_fixed: Option<f64>,
    scratch: &mut StageScratch,
) -> Result<StageReport, DriveError> {
    let span = t1 - t0;
    build_b_eff(ctx, state, t0, &mut scratch.b)?;

    // phase per internal step, in radians
    let safety = 0.01;
    let bmax = max_field(&scratch.b);
    let rate = coeffs.max_gamma_b() * bmax
        + coeffs.max_drift() / state.mesh.cell.iter().cloned().fold(f64::INFINITY, f64::min)
        + 1.0;
    let dt = match dt_fixed {
        Some(dt) => dt.min(span),
        None => (safety / rate).min(span),
    };
    let steps = (span / dt).ceil().max(1.0) as usize;
    let dt = span / steps as f64;

    let n = state.m.len();
    scratch.resize(n);
    let vol = state.mesh.cell_volume();

    for step in 0..steps {
        let t = t0 + step as f64 * dt;
        match method {
            StepMethod::Rk4 => {
                // k1 reuses the field from the end of the previous step
                rhs(state, coeffs, &scratch.b, t, &mut scratch.k1);

                let m0 = state.m.clone();
                half_step(state, &m0, &scratch.k1, 0.5 * dt);
                build_b_eff(ctx, state, t + 0.5 * dt, &mut scratch.b)?;
                rhs(state, coeffs, &scratch.b, t + 0.5 * dt, &mut scratch.k2);

                half_step(state, &m0, &scratch.k2, 0.5 * dt);
                build_b_eff(ctx, state, t + 0.5 * dt, &mut scratch.b)?;
                rhs(state, coeffs, &scratch.b, t + 0.5 * dt, &mut scratch.k3);

                half_step(state, &m0, &scratch.k3, dt);
                build_b_eff(ctx, state, t + dt, &mut scratch.b)?;
                rhs(state, coeffs, &scratch.b, t + dt, &mut scratch.k4);

                for idx in 0..n {
                    if state.fixed[idx] || state.ms[idx] == 0.0 {
                        state.m[idx] = m0[idx];
                        continue;
                    }
                    let mut dv = [0.0; 3];
                    for e in 0..3 {
                        dv[e] = dt / 6.0
                            * (scratch.k1[idx][e]
                                + 2.0 * scratch.k2[idx][e]
                                + 2.0 * scratch.k3[idx][e]
                                + scratch.k4[idx][e]);
                    }
                    if dv == [0.0; 3] {
                        // torque-free cells stay bit-identical
                        state.m[idx] = m0[idx];
                        continue;
                    }
                    state.m[idx] = normalize([
                        m0[idx][0] + dv[0],
                        m0[idx][1] + dv[1],
                        m0[idx][2] + dv[2],
                    ]);
                }
                build_b_eff(ctx, state, t + dt, &mut scratch.b)?;
            }
            StepMethod::Euler => {
                rhs(state, coeffs, &scratch.b, t, &mut scratch.k1);
                euler_update(state, &scratch.k1, dt);
                build_b_eff(ctx, state, t + dt, &mut scratch.b)?;
            }
            StepMethod::Heun { temperature, seed } => {
                // predictor with a frozen thermal field, corrector averages
                let rng_base = seed
                    .wrapping_add(step as u64)
                    .wrapping_mul(0x9e37_79b9_7f4a_7c15);
                add_thermal_field(
                    state, coeffs, temperature, vol, dt, rng_base, &mut scratch.b,
                );
                rhs(state, coeffs, &scratch.b, t, &mut scratch.k1);
                let m0 = state.m.clone();
                euler_update(state, &scratch.k1, dt);

                build_b_eff(ctx, state, t + dt, &mut scratch.b)?;
                add_thermal_field(
                    state, coeffs, temperature, vol, dt, rng_base, &mut scratch.b,
                );
                rhs(state, coeffs, &scratch.b, t + dt, &mut scratch.k2);

                for idx in 0..n {
                    if state.fixed[idx] || state.ms[idx] == 0.0 {
                        state.m[idx] = m0[idx];
                        continue;
                    }
                    let mut dv = [0.0; 3];
                    for e in 0..3 {
                        dv[e] = 0.5 * dt * (scratch.k1[idx][e] + scratch.k2[idx][e]);
                    }
                    if dv == [0.0; 3] {
                        state.m[idx] = m0[idx];
                        continue;
                    }
                    state.m[idx] = normalize([
                        m0[idx][0] + dv[0],
                        m0[idx][1] + dv[1],
                        m0[idx][2] + dv[2],
                    ]);
                }
                build_b_eff(ctx, state, t + dt, &mut scratch.b)?;
            }
        }
    }

    rhs(state, coeffs, &scratch.b, t1, &mut scratch.k1);
    let max_dmdt = scratch
        .k1
        .iter()
        .map(|v| dot(*v, *v).sqrt())
        .fold(0.0, f64::max);

    Ok(StageReport { max_dmdt, steps })
}

fn half_step(state: &mut SolverState, m0: &[[f64; 3]], k: &[[f64; 3]], dt: f64) {
    for idx in 0..state.m.len() {
        if state.fixed[idx] || state.ms[idx] == 0.0 {
            continue;
        }
        if k[idx] == [0.0; 3] {
            state.m[idx] = m0[idx];
            continue;
        }
        let mut v = m0[idx];
        for e in 0..3 {
            v[e] += dt * k[idx][e];
        }
        state.m[idx] = normalize(v);
    }
}

fn euler_update(state: &mut SolverState, k: &[[f64; 3]], dt: f64) {
    for idx in 0..state.m.len() {
        if state.fixed[idx] || state.ms[idx] == 0.0 || k[idx] == [0.0; 3] {
            continue;
        }
        let mut v = state.m[idx];
        for e in 0..3 {
            v[e] += dt * k[idx][e];
        }
        state.m[idx] = normalize(v);
    }
}

/// Add a per-cell stochastic induction with the Brown amplitude. Uniform
/// deviates scaled to unit variance are good enough at smoke-test level.
fn add_thermal_field(
    state: &SolverState,
    coeffs: &DynCoeffs,
    temperature: f64,
    vol: f64,
    dt: f64,
    seed: u64,
    b: &mut [[f64; 3]],
) {
    const SQRT3: f64 = 1.732_050_807_568_877_2;
    let mut rng = XorShift64::new(seed);
    for idx in 0..state.m.len() {
        let sigma = thermal_sigma(
            coeffs.alpha[idx],
            coeffs.gamma0[idx],
            state.ms[idx],
            vol,
            temperature,
            dt,
        );
        for e in 0..3 {
            let eta = (rng.next_f64() * 2.0 - 1.0) * SQRT3;
            b[idx][e] += sigma * eta;
        }
    }
}

/// Reusable integration buffers, one allocation per drive.
#[derive(Default)]
pub struct StageScratch {
    pub b: Vec<[f64; 3]>,
    pub k1: Vec<[f64; 3]>,
    pub k2: Vec<[f64; 3]>,
    pub k3: Vec<[f64; 3]>,
    pub k4: Vec<[f64; 3]>,
}

impl StageScratch {
    fn resize(&mut self, n: usize) {
        self.k1.resize(n, [0.0; 3]);
        self.k2.resize(n, [0.0; 3]);
        self.k3.resize(n, [0.0; 3]);
        self.k4.resize(n, [0.0; 3]);
    }
}
