// src/suite/artifacts.rs
//
// Drive-artifact cases: the info.json record, output-format selection,
// per-iteration table output, the save/overwrite/delete lifecycle,
// consecutive drives and custom base directories.

use std::path::Path;

use crate::calculator::{Calculator, DriveError};
use crate::consts::GAMMA0;
use crate::driver::{MinDriver, MinRun, OvfFormat, TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Precession};
use crate::energy::{EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::{macrospin, System};

fn read_info(dir: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join("info.json")).expect("info.json readable");
    serde_json::from_str(&text).expect("info.json is valid JSON")
}

fn date_like(s: &str) -> bool {
    // YYYY-MM-DD
    s.len() == 10 && s.as_bytes()[4] == b'-' && s.as_bytes()[7] == b'-'
}

fn time_like(s: &str) -> bool {
    // HH:MM:SS
    s.len() == 8 && s.as_bytes()[2] == b':' && s.as_bytes()[5] == b':'
}

pub fn test_info_file(calc: &impl Calculator) {
    let name = "info_file";
    let l = 30e-9;
    let region = Region::new([0.0; 3], [l, l, l]);
    let mesh =
        Mesh::with_cell(region, [10e-9, 15e-9, 5e-9]).expect("static mesh is valid");

    let mut system = System::new(name);
    system.energy = EnergyTerm::Exchange(Exchange::new(1.3e-11))
        + EnergyTerm::Zeeman(Zeeman::new([1e6, 0.0, 2e5]));
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(0.02));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.25, 0.1]).set_norm(8e5));

    // first (0) drive
    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(25e-12, 10))
        .expect("time drive failed");

    let dir = calc.workdir().join(name).join("drive-0");
    assert!(dir.exists());
    let info = read_info(&dir);
    assert_eq!(info["drive_number"], 0);
    assert!(date_like(info["date"].as_str().expect("date present")));
    assert!(time_like(info["time"].as_str().expect("time present")));
    assert_eq!(info["driver"], "TimeDriver");
    assert_eq!(info["t"], 25e-12);
    assert_eq!(info["n"], 10);

    // second (1) drive
    calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default())
        .expect("min drive failed");

    let dir = calc.workdir().join(name).join("drive-1");
    assert!(dir.exists());
    let info = read_info(&dir);
    assert_eq!(info["drive_number"], 1);
    assert!(date_like(info["date"].as_str().expect("date present")));
    assert!(time_like(info["time"].as_str().expect("time present")));
    assert_eq!(info["driver"], "MinDriver");

    calc.delete(&system).expect("delete failed");
}

pub fn test_format(calc: &impl Calculator) {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [2, 2, 2]).expect("static mesh is valid");

    let mut system = System::new("output_format");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.1, 1.0]).set_norm(1e6));

    let md = MinDriver::new();
    for format in ["bin8", "bin4", "txt"] {
        let run = MinRun {
            format: OvfFormat::parse(format).expect("known format"),
            ..MinRun::default()
        };
        calc.drive_min(&mut system, &md, &run).expect("min drive failed");
    }
    assert!(matches!(
        OvfFormat::parse("unknown"),
        Err(DriveError::InvalidValue(_))
    ));

    calc.delete(&system).expect("delete failed");
}

pub fn test_outputstep(calc: &impl Calculator) {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [2, 2, 2]).expect("static mesh is valid");

    let mut system = System::new("output_step");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.1, 1.0]).set_norm(1e6));

    let run = MinRun {
        output_step: true,
        ..MinRun::default()
    };
    calc.drive_min(&mut system, &MinDriver::new(), &run)
        .expect("min drive failed");

    assert!(calc.workdir().join("output_step").join("drive-0").exists());
    assert!(system.table.as_ref().expect("table recorded").n_rows() > 1);

    calc.delete(&system).expect("delete failed");
}

pub fn test_save_delete(calc: &impl Calculator) {
    let mut system = macrospin();
    let td = TimeDriver::new();
    let base = calc.workdir().join(&system.name);

    let run = TimeRun {
        overwrite: true,
        ..TimeRun::new(1e-12, 5)
    };
    calc.drive_time(&mut system, &td, &run).expect("time drive failed");
    assert!(base.join("drive-0").exists());

    // re-driving over an existing drive directory without overwrite fails
    system.drive_number = 0;
    let result = calc.drive_time(&mut system, &td, &TimeRun::new(1e-12, 5));
    assert!(matches!(result, Err(DriveError::DriveExists(_))));
    assert!(base.join("drive-0").exists());
    assert!(!base.join("drive-1").exists());

    // unsaved drives advance the counter without touching the disk
    system.drive_number = 0;
    let run = TimeRun {
        save: false,
        ..TimeRun::new(1e-12, 5)
    };
    calc.drive_time(&mut system, &td, &run).expect("time drive failed");
    assert!(base.join("drive-0").exists());
    assert!(!base.join("drive-1").exists());

    let run = TimeRun {
        overwrite: true,
        ..TimeRun::new(1e-12, 5)
    };
    calc.drive_time(&mut system, &td, &run).expect("time drive failed");
    assert!(base.join("drive-0").exists());
    assert!(base.join("drive-1").exists());

    calc.delete(&system).expect("delete failed");
    assert!(!base.exists());

    let result = calc.delete(&system);
    assert!(
        matches!(result, Err(DriveError::Io(_))),
        "deleting a deleted system must fail"
    );
}

pub fn test_multiple_drives(calc: &impl Calculator) {
    let mut system = macrospin();
    let td = TimeDriver::new();

    for expected in 0..3usize {
        assert_eq!(system.drive_number, expected);
        calc.drive_time(&mut system, &td, &TimeRun::new(1e-12, 2))
            .expect("time drive failed");
    }
    assert_eq!(system.drive_number, 3);

    let base = calc.workdir().join(&system.name);
    for k in 0..3 {
        assert!(base.join(format!("drive-{k}")).exists());
    }

    calc.delete(&system).expect("delete failed");
}

pub fn test_dirname(calc: &impl Calculator) {
    let mut system = macrospin();
    let custom = calc.workdir().join("custom-output");

    let run = TimeRun {
        dirname: Some(custom.clone()),
        ..TimeRun::new(1e-12, 2)
    };
    calc.drive_time(&mut system, &TimeDriver::new(), &run)
        .expect("time drive failed");

    assert!(custom.join(&system.name).join("drive-0").exists());
    // the default location stays untouched
    assert!(!calc.workdir().join(&system.name).exists());
}
