// src/backend/output.rs
//
// On-disk drive artifacts: drive directories, the JSON input script, the
// info.json drive record, magnetisation snapshots and the table file.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::calculator::DriveError;
use crate::driver::OvfFormat;
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::ovf::{write_ovf, OvfMeta};
use crate::system::System;
use crate::table::Table;

/// Geometry section of the backend's input script.
#[derive(Serialize)]
struct GeometryConfig {
    nx: usize,
    ny: usize,
    nz: usize,
    dx: f64,
    dy: f64,
    dz: f64,
}

impl GeometryConfig {
    fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            nx: mesh.n[0],
            ny: mesh.n[1],
            nz: mesh.n[2],
            dx: mesh.cell[0],
            dy: mesh.cell[1],
            dz: mesh.cell[2],
        }
    }
}

#[derive(Serialize)]
struct ScriptConfig<'a> {
    system: &'a str,
    driver: &'a str,
    geometry: GeometryConfig,
    energy_terms: Vec<&'a str>,
    dynamics_terms: Vec<&'a str>,
    args: &'a Map<String, Value>,
}

/// Output sink of one drive. When saving is off, only the drive counter
/// bookkeeping happens.
pub struct DriveOutput {
    pub dir: Option<PathBuf>,
    pub format: OvfFormat,
    name: String,
    snapshots: usize,
}

impl DriveOutput {
    /// Resolve and create `<base>/<name>/drive-<k>`, honouring the
    /// overwrite flag.
    pub fn prepare(
        base: &Path,
        system: &System,
        save: bool,
        overwrite: bool,
        format: OvfFormat,
    ) -> Result<Self, DriveError> {
        if !save {
            return Ok(Self {
                dir: None,
                format,
                name: system.name.clone(),
                snapshots: 0,
            });
        }
        let dir = base
            .join(&system.name)
            .join(format!("drive-{}", system.drive_number));
        if dir.exists() {
            if overwrite {
                std::fs::remove_dir_all(&dir)?;
            } else {
                return Err(DriveError::DriveExists(dir));
            }
        }
        create_dir_all(&dir)?;
        Ok(Self {
            dir: Some(dir),
            format,
            name: system.name.clone(),
            snapshots: 0,
        })
    }

    /// Write the next snapshot (`m0.omf`, `m1.omf`, ...).
    pub fn snapshot(&mut self, m: &VectorField, t: f64) -> Result<(), DriveError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let path = dir.join(format!("m{}.omf", self.snapshots));
        let meta = OvfMeta::magnetization().with_total_sim_time(t);
        write_ovf(&path, m, &meta, self.format)?;
        self.snapshots += 1;
        Ok(())
    }

    /// Write info.json, the input script and the table file.
    pub fn finish(
        &self,
        system: &System,
        driver_name: &str,
        args: &Map<String, Value>,
        table: &Table,
    ) -> Result<(), DriveError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        write_info_json(dir, system.drive_number, driver_name, args)?;
        self.write_script(dir, system, driver_name, args)?;
        table.write_odt(&dir.join(format!("{}.odt", self.name)), &self.name)?;
        Ok(())
    }

    pub fn write_script(
        &self,
        dir: &Path,
        system: &System,
        driver_name: &str,
        args: &Map<String, Value>,
    ) -> Result<PathBuf, DriveError> {
        let mesh = &system
            .m
            .as_ref()
            .ok_or(DriveError::MagnetisationNotSet)?
            .mesh;
        let config = ScriptConfig {
            system: &system.name,
            driver: driver_name,
            geometry: GeometryConfig::from_mesh(mesh),
            energy_terms: system.energy.iter().map(|t| t.name()).collect(),
            dynamics_terms: system.dynamics.iter().map(|t| t.name()).collect(),
            args,
        };
        let path = dir.join(format!("{}.json", self.name));
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &config)?;
        Ok(path)
    }
}

fn write_info_json(
    dir: &Path,
    drive_number: usize,
    driver_name: &str,
    args: &Map<String, Value>,
) -> Result<(), DriveError> {
    let now = jiff::Zoned::now();
    let mut info = Map::new();
    info.insert("drive_number".to_owned(), drive_number.into());
    info.insert(
        "date".to_owned(),
        now.strftime("%Y-%m-%d").to_string().into(),
    );
    info.insert(
        "time".to_owned(),
        now.strftime("%H:%M:%S").to_string().into(),
    );
    info.insert("driver".to_owned(), driver_name.into());
    for (k, v) in args {
        info.insert(k.clone(), v.clone());
    }

    let file = File::create(dir.join("info.json"))?;
    serde_json::to_writer_pretty(file, &Value::Object(info))?;
    Ok(())
}

/// Write `job.sh` next to the input script: shebang, resource request
/// comments, and the drive script reference the submission system hands
/// to the backend runner.
pub fn write_job_script(
    dir: &Path,
    resources: &str,
    script: &Path,
) -> Result<PathBuf, DriveError> {
    let path = dir.join("job.sh");
    let mut f = File::create(&path)?;
    writeln!(f, "#!/bin/sh")?;
    for line in resources.lines() {
        writeln!(f, "#{line}")?;
    }
    writeln!(f)?;
    writeln!(f, "# drive input script")?;
    writeln!(f, "echo {}", script.display())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::macrospin;

    #[test]
    fn prepare_respects_overwrite() {
        let base = std::env::temp_dir().join("magtest-output-unit");
        std::fs::remove_dir_all(&base).ok();
        let system = macrospin();

        let out =
            DriveOutput::prepare(&base, &system, true, false, OvfFormat::Bin8).unwrap();
        assert!(out.dir.as_ref().unwrap().ends_with("macrospin/drive-0"));

        // same drive number again: refused without overwrite
        let again = DriveOutput::prepare(&base, &system, false, false, OvfFormat::Bin8);
        assert!(again.unwrap().dir.is_none());
        let clash = DriveOutput::prepare(&base, &system, true, false, OvfFormat::Bin8);
        assert!(matches!(clash, Err(DriveError::DriveExists(_))));
        assert!(
            DriveOutput::prepare(&base, &system, true, true, OvfFormat::Bin8).is_ok()
        );

        std::fs::remove_dir_all(&base).ok();
    }
}
