// src/suite/timedriver.rs
//
// Time-driver cases: evolver selection and pairing, finite temperature,
// stopping criteria, missing energy/dynamics, and the output-file
// contract of a saved drive.

use crate::calculator::{Calculator, DriveError};
use crate::consts::GAMMA0;
use crate::driver::{Evolver, TimeDriver, TimeRun};
use crate::dynamics::{Damping, Dynamics, DynamicsTerm, Precession};
use crate::energy::{Energy, EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::{macrospin, System};

use super::util::{assert_close, m_at};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    Mesh::with_n(region, [2, 2, 2]).expect("static mesh is valid")
}

fn energy() -> Energy {
    EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]))
}

fn dynamics() -> Dynamics {
    DynamicsTerm::Precession(Precession::new(GAMMA0)) + DynamicsTerm::Damping(Damping::new(1.0))
}

fn fresh_system(name: &str) -> System {
    let mut system = System::new(name);
    system.energy = energy();
    system.dynamics = dynamics();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));
    system
}

pub fn test_noevolver_nodriver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_noevolver_nodriver");
    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 10.0);
    assert_eq!(system.table.as_ref().expect("table recorded").x, "t");

    calc.delete(&system).expect("delete failed");
}

pub fn test_rungekutta_evolver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_rungekutta_evolver");
    let td = TimeDriver::with_evolver(Evolver::rkf54s());
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_euler_evolver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_euler_evolver");
    let td = TimeDriver::with_evolver(Evolver::Euler { start_dm: 0.02 });
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_theta_evolver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_theta_evolver");
    system.temperature = 10.0;
    let td = TimeDriver::with_evolver(Evolver::Theta {
        fixed_timestep: 2e-13,
    });
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    // smoke: a thermal drive completes
    calc.delete(&system).expect("delete failed");
}

pub fn test_therm_heun_evolver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_therm_heun_evolver");
    system.temperature = 10.0;
    let td = TimeDriver::with_evolver(Evolver::ThermHeun);
    calc.drive_time(&mut system, &td, &TimeRun::new(1e-11, 1))
        .expect("time drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_noevolver_finite_temperature(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_finite_temperature");
    system.temperature = 10.0;
    let result = calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 50));
    assert!(
        matches!(result, Err(DriveError::ThermalEvolverRequired)),
        "finite temperature without a thermal evolver must be rejected"
    );
}

pub fn test_noevolver_driver(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_noevolver_driver");
    let td = TimeDriver {
        stopping_dm_dt: Some(0.01),
        ..TimeDriver::default()
    };
    calc.drive_time(&mut system, &td, &TimeRun::new(0.3e-9, 50))
        .expect("time drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_noprecession(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_noprecession");
    system.dynamics = DynamicsTerm::Damping(Damping::new(1.0)).into();
    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 10.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_nodamping(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_nodamping");
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0)).into();
    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    // without damping the tilt never decays
    let value = m_at(&system, mesh().region.center());
    let d = ((value[0]).powi(2) + (value[1]).powi(2) + (value[2] - MS).powi(2)).sqrt();
    assert!(d > 1e3, "undamped magnetisation must keep precessing, distance {d}");

    calc.delete(&system).expect("delete failed");
}

pub fn test_output_files(calc: &impl Calculator) {
    let name = "timedriver_output_files";
    let mut system = fresh_system(name);
    let run = TimeRun {
        overwrite: true,
        ..TimeRun::new(0.2e-9, 50)
    };
    calc.drive_time(&mut system, &TimeDriver::new(), &run)
        .expect("time drive failed");

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
    assert_eq!(omf_count, 51, "one initial plus one snapshot per stage");

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

pub fn test_drive_exception(calc: &impl Calculator) {
    let mut system = fresh_system("timedriver_exception");
    let td = TimeDriver::new();

    let result = calc.drive_time(&mut system, &td, &TimeRun::new(-0.1e-9, 10));
    assert!(matches!(result, Err(DriveError::InvalidValue(_))));

    let result = calc.drive_time(&mut system, &td, &TimeRun::new(0.1e-9, 0));
    assert!(matches!(result, Err(DriveError::InvalidValue(_))));
}

pub fn test_wrong_evolver(calc: &impl Calculator) {
    let mut system = macrospin();
    let td = TimeDriver::with_evolver(Evolver::cg());

    let result = calc.drive_time(&mut system, &td, &TimeRun::new(1e-12, 1));
    assert!(
        matches!(result, Err(DriveError::EvolverMismatch { .. })),
        "a minimisation evolver on the time driver must be rejected"
    );
}

pub fn test_check_for_energy_and_dynamics(calc: &impl Calculator) {
    let mut system = macrospin();
    system.energy = Energy::new();
    let td = TimeDriver::new();

    let result = calc.drive_time(&mut system, &td, &TimeRun::new(1e-12, 1));
    assert!(matches!(result, Err(DriveError::EnergyNotDefined)));

    system.dynamics = Dynamics::new();
    let result = calc.drive_time(&mut system, &td, &TimeRun::new(1e-12, 1));
    assert!(matches!(result, Err(DriveError::DynamicsNotDefined)));
}
