// src/suite/mindriver.rs
//
// Min-driver cases: default and conjugate-gradient evolvers, stopping
// criterion, output files, pairing rejection and missing energy.

use crate::calculator::{Calculator, DriveError};
use crate::driver::{Evolver, MinDriver, MinRun};
use crate::energy::{Energy, EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::{macrospin, System};

use super::util::{assert_close, m_at};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    Mesh::with_n(region, [5, 5, 5]).expect("static mesh is valid")
}

fn fresh_system(name: &str) -> System {
    let mut system = System::new(name);
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.m = Some(VectorField::uniform(mesh(), [0.0, 1.0, 0.0]).set_norm(MS));
    system
}

pub fn test_noevolver_nodriver(calc: &impl Calculator) {
    let mut system = fresh_system("mindriver_noevolver_nodriver");
    calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default())
        .expect("min drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-2);
    assert_eq!(system.table.as_ref().expect("table recorded").x, "iteration");

    calc.delete(&system).expect("delete failed");
}

pub fn test_evolver_nodriver(calc: &impl Calculator) {
    let mut system = fresh_system("mindriver_evolver_nodriver");
    let md = MinDriver::with_evolver(Evolver::cg());
    calc.drive_min(&mut system, &md, &MinRun::default())
        .expect("min drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_noevolver_driver(calc: &impl Calculator) {
    let mut system = fresh_system("mindriver_noevolver_driver");
    let md = MinDriver {
        stopping_mxhxm: Some(0.1),
        ..MinDriver::default()
    };
    calc.drive_min(&mut system, &md, &MinRun::default())
        .expect("min drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_evolver_driver(calc: &impl Calculator) {
    let mut system = fresh_system("mindriver_evolver_driver");
    let md = MinDriver {
        evolver: Some(Evolver::cg()),
        stopping_mxhxm: Some(0.1),
    };
    calc.drive_min(&mut system, &md, &MinRun::default())
        .expect("min drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_output_files(calc: &impl Calculator) {
    let name = "mindriver_output_files";
    let mut system = fresh_system(name);
    let run = MinRun {
        overwrite: true,
        ..MinRun::default()
    };
    calc.drive_min(&mut system, &MinDriver::new(), &run)
        .expect("min drive failed");

    let dir = calc.workdir().join(name).join("drive-0");
    assert!(dir.exists());
    assert!(dir
        .join(format!("{name}.{}", calc.script_extension()))
        .is_file());
    assert!(dir.join("m0.omf").is_file());

    let omf_count = std::fs::read_dir(&dir)
        .expect("drive dir readable")
        .filter(|e| {
            e.as_ref()
                .is_ok_and(|e| e.path().extension().is_some_and(|x| x == "omf"))
        })
        .count();
    assert_eq!(omf_count, 2, "initial and final snapshot");

    let odt_count = std::fs::read_dir(&dir)
        .expect("drive dir readable")
        .filter(|e| {
            e.as_ref()
                .is_ok_and(|e| e.path().extension().is_some_and(|x| x == "odt"))
        })
        .count();
    assert_eq!(odt_count, 1);

    calc.delete(&system).expect("delete failed");
}

pub fn test_wrong_evolver(calc: &impl Calculator) {
    let mut system = macrospin();
    let md = MinDriver::with_evolver(Evolver::rkf54s());

    let result = calc.drive_min(&mut system, &md, &MinRun::default());
    assert!(
        matches!(result, Err(DriveError::EvolverMismatch { .. })),
        "a time evolver on the min driver must be rejected"
    );
}

pub fn test_check_for_energy(calc: &impl Calculator) {
    let mut system = macrospin();
    system.energy = Energy::new();

    let result = calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default());
    assert!(matches!(result, Err(DriveError::EnergyNotDefined)));
}
