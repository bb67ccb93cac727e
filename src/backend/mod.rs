// src/backend/mod.rs
//
// Built-in reference calculator: a small CPU LLG backend implementing the
// full `Calculator` contract. It exists so the conformance cases can run
// without an external solver installation; production backends wrap the
// big simulators instead.

pub mod eff_field;
pub mod minimize;
pub mod output;
pub mod relax;
pub mod step;

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Map;

use crate::calculator::{
    Calculator, Computed, ComputeQuantity, ComputeTarget, DriveError,
};
use crate::consts::MU0;
use crate::driver::{
    Evolver, HysteresisDriver, HysteresisRun, MinDriver, MinRun, RelaxDriver, RelaxRun,
    TimeDriver, TimeRun,
};
use crate::energy::EnergyTerm;
use crate::field::ScalarField;
use crate::system::System;
use crate::table::Table;
use crate::vec3;

use self::eff_field::{
    build_b_eff, energy_density, term_field, total_energy, FieldContext, SolverState,
};
use self::minimize::{minimize, MinimizeSettings};
use self::output::{write_job_script, DriveOutput};
use self::step::{integrate_stage, DynCoeffs, StageScratch, StepMethod};

pub struct LlgCalculator {
    workdir: PathBuf,
}

impl LlgCalculator {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    fn base_dir<'a>(&'a self, dirname: Option<&'a PathBuf>) -> &'a Path {
        dirname.map_or(self.workdir.as_path(), PathBuf::as_path)
    }

    fn check_time_evolver(
        &self,
        driver: &TimeDriver,
        temperature: f64,
    ) -> Result<(StepMethod, Option<f64>), DriveError> {
        let seed = 0x6d61_6774;
        let (method, dt_fixed) = match &driver.evolver {
            None | Some(Evolver::RungeKutta { .. }) => (StepMethod::Rk4, None),
            Some(Evolver::Euler { .. }) => (StepMethod::Euler, None),
            Some(Evolver::Theta { fixed_timestep }) => (
                StepMethod::Heun { temperature, seed },
                Some(*fixed_timestep),
            ),
            Some(Evolver::ThermHeun) | Some(Evolver::ThermSpinXfer) => {
                (StepMethod::Heun { temperature, seed }, None)
            }
            Some(ev @ Evolver::ConjugateGradient { .. }) => {
                return Err(DriveError::EvolverMismatch {
                    driver: "TimeDriver",
                    evolver: ev.kind_name(),
                })
            }
        };
        if temperature > 0.0 && !matches!(method, StepMethod::Heun { .. }) {
            return Err(DriveError::ThermalEvolverRequired);
        }
        Ok((method, dt_fixed))
    }

    fn time_drive_inner(
        &self,
        system: &mut System,
        driver: &TimeDriver,
        run: &TimeRun,
    ) -> Result<(), DriveError> {
        let (method, dt_fixed) = self.check_time_evolver(driver, system.temperature)?;

        let mut state = SolverState::from_system(system, &[])?;
        let coeffs = DynCoeffs::resolve(&system.dynamics, &state)?;
        let ctx = FieldContext::new(&system.energy);

        let mut out = DriveOutput::prepare(
            self.base_dir(run.dirname.as_ref()),
            system,
            run.save,
            run.overwrite,
            run.format,
        )?;
        out.snapshot(&state.to_field(), 0.0)?;

        let mut table = time_table(&system.energy, "t");
        let stage = run.t / run.n as f64;
        let mut scratch = StageScratch::default();
        let mut converged = false;

        log::debug!(
            "time drive '{}': t={:.3e} s in {} stages",
            system.name,
            run.t,
            run.n
        );

        for k in 1..=run.n {
            let t0 = (k - 1) as f64 * stage;
            let t1 = k as f64 * stage;
            if !converged {
                let rep =
                    integrate_stage(&ctx, &mut state, &coeffs, t0, t1, method, dt_fixed, &mut scratch)?;
                if let Some(stop) = driver.stopping_dm_dt {
                    if rep.max_dmdt < stop {
                        log::debug!("dm/dt below {stop:.3e} rad/s after stage {k}");
                        converged = true;
                    }
                }
            }
            out.snapshot(&state.to_field(), t1)?;
            push_time_row(&mut table, &ctx, &state, t1)?;
        }

        let mut args = Map::new();
        args.insert("t".to_owned(), run.t.into());
        args.insert("n".to_owned(), run.n.into());
        out.finish(system, "TimeDriver", &args, &table)?;

        system.m = Some(state.to_field());
        system.table = Some(table);
        system.drive_number += 1;
        Ok(())
    }
}

/// Table layout shared by the time-like drivers: the x column, average
/// orientation, energy, and one induction triplet per time-dependent
/// applied-field term.
fn time_table(energy: &crate::energy::Energy, x: &str) -> Table {
    let mut columns = vec![
        x.to_owned(),
        "mx".to_owned(),
        "my".to_owned(),
        "mz".to_owned(),
        "E".to_owned(),
    ];
    for term in energy.iter() {
        if let EnergyTerm::Zeeman(z) = term {
            if z.profile.is_some() {
                for c in ["Bx", "By", "Bz"] {
                    columns.push(format!("{c}_{}", z.name));
                }
            }
        }
    }
    Table::new(x, columns)
}

fn push_time_row(
    table: &mut Table,
    ctx: &FieldContext<'_>,
    state: &SolverState,
    t: f64,
) -> Result<(), DriveError> {
    let o = state.orientation_mean();
    let e = total_energy(ctx, state, t)?;
    let mut row = vec![t, o[0], o[1], o[2], e];
    for term in ctx.energy.iter() {
        if let EnergyTerm::Zeeman(z) = term {
            if z.profile.is_some() {
                let h = z.h.mean(&state.mesh);
                let f = z.factor(t);
                for c in 0..3 {
                    row.push(MU0 * h[c] * f);
                }
            }
        }
    }
    table.push_row(row);
    Ok(())
}

fn min_table() -> Table {
    Table::new(
        "iteration",
        vec![
            "iteration".to_owned(),
            "mx".to_owned(),
            "my".to_owned(),
            "mz".to_owned(),
            "E".to_owned(),
        ],
    )
}

fn push_min_row(
    table: &mut Table,
    ctx: &FieldContext<'_>,
    state: &SolverState,
    iteration: usize,
) -> Result<(), DriveError> {
    let o = state.orientation_mean();
    let e = total_energy(ctx, state, 0.0)?;
    table.push_row(vec![iteration as f64, o[0], o[1], o[2], e]);
    Ok(())
}

impl Calculator for LlgCalculator {
    fn drive_time(
        &self,
        system: &mut System,
        driver: &TimeDriver,
        run: &TimeRun,
    ) -> Result<(), DriveError> {
        run.validate()?;
        // dynamics first: an empty equation of motion is reported even when
        // the energy is missing too
        if system.dynamics.is_empty() {
            return Err(DriveError::DynamicsNotDefined);
        }
        if system.energy.is_empty() {
            return Err(DriveError::EnergyNotDefined);
        }

        match run.n_threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n.max(1))
                    .build()
                    .map_err(|e| DriveError::Failed(e.to_string()))?;
                pool.install(|| self.time_drive_inner(system, driver, run))
            }
            None => self.time_drive_inner(system, driver, run),
        }
    }

    fn drive_min(
        &self,
        system: &mut System,
        driver: &MinDriver,
        run: &MinRun,
    ) -> Result<(), DriveError> {
        if system.energy.is_empty() {
            return Err(DriveError::EnergyNotDefined);
        }
        if let Some(ev) = &driver.evolver {
            if !ev.is_min_evolver() {
                return Err(DriveError::EvolverMismatch {
                    driver: "MinDriver",
                    evolver: ev.kind_name(),
                });
            }
        }

        let mut state = SolverState::from_system(system, &run.fixed_subregions)?;
        let ctx = FieldContext::new(&system.energy);

        let mut out = DriveOutput::prepare(
            self.base_dir(run.dirname.as_ref()),
            system,
            run.save,
            run.overwrite,
            run.format,
        )?;
        out.snapshot(&state.to_field(), 0.0)?;

        let settings = MinimizeSettings {
            stopping_mxhxm: driver.stopping_mxhxm,
            ..MinimizeSettings::default()
        };

        let mut table = min_table();
        let report = if run.output_step {
            let mut rows: Result<(), DriveError> = Ok(());
            let report = minimize(&ctx, &mut state, 0.0, &settings, |it, state, _| {
                if rows.is_ok() {
                    rows = push_min_row(&mut table, &ctx, state, it);
                }
            })?;
            rows?;
            report
        } else {
            minimize(&ctx, &mut state, 0.0, &settings, |_, _, _| {})?
        };
        push_min_row(&mut table, &ctx, &state, report.iters)?;
        log::debug!(
            "min drive '{}': {} iterations, final torque {:.3e} T",
            system.name,
            report.iters,
            report.final_torque
        );

        out.snapshot(&state.to_field(), 0.0)?;
        let args = Map::new();
        out.finish(system, "MinDriver", &args, &table)?;

        system.m = Some(state.to_field());
        system.table = Some(table);
        system.drive_number += 1;
        Ok(())
    }

    fn drive_relax(
        &self,
        system: &mut System,
        _driver: &RelaxDriver,
        run: &RelaxRun,
    ) -> Result<(), DriveError> {
        relax::validate(&system.energy)?;

        let mut state = SolverState::from_system(system, &[])?;
        let ctx = FieldContext::new(&system.energy);

        let mut out = DriveOutput::prepare(
            self.base_dir(run.dirname.as_ref()),
            system,
            run.save,
            run.overwrite,
            run.format,
        )?;
        out.snapshot(&state.to_field(), 0.0)?;

        let report = relax::relax(&ctx, &mut state, &relax::RelaxSettings::default())?;
        log::debug!(
            "relax drive '{}': {} energy-descent iterations, {} torque iterations",
            system.name,
            report.phase1_iters,
            report.phase2.iters
        );

        let mut table = time_table(&system.energy, "t");
        push_time_row(&mut table, &ctx, &state, 0.0)?;

        out.snapshot(&state.to_field(), 0.0)?;
        let args = Map::new();
        out.finish(system, "RelaxDriver", &args, &table)?;

        system.m = Some(state.to_field());
        system.table = Some(table);
        system.drive_number += 1;
        Ok(())
    }

    fn drive_hysteresis(
        &self,
        system: &mut System,
        driver: &HysteresisDriver,
        run: &HysteresisRun,
    ) -> Result<(), DriveError> {
        run.validate()?;
        if system.energy.is_empty() {
            return Err(DriveError::EnergyNotDefined);
        }
        if let Some(ev) = &driver.evolver {
            if !ev.is_min_evolver() {
                return Err(DriveError::EvolverMismatch {
                    driver: "HysteresisDriver",
                    evolver: ev.kind_name(),
                });
            }
        }

        let mut state = SolverState::from_system(system, &[])?;
        let mut ctx = FieldContext::new(&system.energy);

        let mut out = DriveOutput::prepare(
            self.base_dir(run.dirname.as_ref()),
            system,
            run.save,
            run.overwrite,
            run.format,
        )?;
        out.snapshot(&state.to_field(), 0.0)?;

        let mut table = Table::new(
            "B_hysteresis",
            vec![
                "B_hysteresis".to_owned(),
                "mx".to_owned(),
                "my".to_owned(),
                "mz".to_owned(),
                "E".to_owned(),
            ],
        );

        // sweep coordinate measured along the first leg
        let axis = vec3::normalize(vec3::sub(run.steps[0].to, run.steps[0].from));
        let settings = MinimizeSettings::default();
        let mut last: Option<[f64; 3]> = None;

        for step in &run.steps {
            for i in 0..step.n {
                let frac = i as f64 / (step.n - 1) as f64;
                let h = [
                    step.from[0] + frac * (step.to[0] - step.from[0]),
                    step.from[1] + frac * (step.to[1] - step.from[1]),
                    step.from[2] + frac * (step.to[2] - step.from[2]),
                ];
                if last == Some(h) {
                    continue; // legs share their junction field value
                }
                ctx.h_extra = Some(h);
                minimize(&ctx, &mut state, 0.0, &settings, |_, _, _| {})?;

                let o = state.orientation_mean();
                let e = total_energy(&ctx, &state, 0.0)?;
                table.push_row(vec![MU0 * vec3::dot(h, axis), o[0], o[1], o[2], e]);
                out.snapshot(&state.to_field(), 0.0)?;
                last = Some(h);
            }
        }
        ctx.h_extra = None;

        let mut args = Map::new();
        args.insert("n_steps".to_owned(), table.n_rows().into());
        out.finish(system, "HysteresisDriver", &args, &table)?;

        system.m = Some(state.to_field());
        system.table = Some(table);
        system.drive_number += 1;
        Ok(())
    }

    fn compute(&self, system: &System, target: ComputeTarget<'_>) -> Result<Computed, DriveError> {
        if system.energy.is_empty() {
            return Err(DriveError::EnergyNotDefined);
        }
        let state = SolverState::from_system(system, &[])?;
        let ctx = FieldContext::new(&system.energy);

        let term = match target.term {
            None => None,
            Some(name) => Some(system.energy.get(name).ok_or_else(|| {
                DriveError::InvalidValue(format!("unknown energy term '{name}'"))
            })?),
        };

        Ok(match target.quantity {
            ComputeQuantity::Energy => {
                let density = energy_density(&ctx, &state, 0.0, term)?;
                Computed::Scalar(density.iter().sum::<f64>() * state.mesh.cell_volume())
            }
            ComputeQuantity::EnergyDensity => {
                let density = energy_density(&ctx, &state, 0.0, term)?;
                Computed::Density(ScalarField {
                    mesh: state.mesh.clone(),
                    data: density,
                })
            }
            ComputeQuantity::EffectiveField => {
                let b = match term {
                    Some(term) => term_field(&ctx, &state, 0.0, term)?,
                    None => {
                        let mut b = Vec::new();
                        build_b_eff(&ctx, &state, 0.0, &mut b)?;
                        b
                    }
                };
                Computed::Field(crate::field::VectorField {
                    mesh: state.mesh.clone(),
                    data: b,
                })
            }
        })
    }

    fn delete(&self, system: &System) -> Result<(), DriveError> {
        let dir = self.workdir.join(&system.name);
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    fn schedule(
        &self,
        system: &System,
        command: &str,
        resources: &str,
        dirname: &Path,
        driver: &TimeDriver,
        run: &TimeRun,
    ) -> Result<PathBuf, DriveError> {
        run.validate()?;
        if system.dynamics.is_empty() {
            return Err(DriveError::DynamicsNotDefined);
        }
        if system.energy.is_empty() {
            return Err(DriveError::EnergyNotDefined);
        }
        self.check_time_evolver(driver, system.temperature)?;

        let dir = dirname
            .join(&system.name)
            .join(format!("drive-{}", system.drive_number));
        std::fs::create_dir_all(&dir)?;

        let out = DriveOutput::prepare(dirname, system, false, false, run.format)?;
        let mut args = Map::new();
        args.insert("t".to_owned(), run.t.into());
        args.insert("n".to_owned(), run.n.into());
        let script = out.write_script(&dir, system, "TimeDriver", &args)?;
        let job = write_job_script(&dir, resources, &script)?;

        let status = Command::new(command).arg(&job).status()?;
        if !status.success() {
            return Err(DriveError::Failed(format!(
                "submission command '{command}' exited with {status}"
            )));
        }
        Ok(job)
    }

    fn supports_relax(&self) -> bool {
        true
    }

    fn script_extension(&self) -> &'static str {
        "json"
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}
