// src/suite/hysteresis.rs
//
// Hysteresis-driver cases: symmetric and stepped loops. A sweep with n
// field values per leg records n rows per leg, consecutive legs sharing
// the junction row.

use crate::calculator::{Calculator, DriveError};
use crate::driver::{HysteresisDriver, HysteresisRun, HysteresisStep};
use crate::energy::{Energy, EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::{macrospin, System};

use super::util::{assert_close, m_at};

const MS: f64 = 1e6;

fn fresh_system() -> System {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [5, 5, 5]).expect("static mesh is valid");

    let mut system = System::new("hysteresisdriver_noevolver_nodriver");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.m = Some(VectorField::uniform(mesh, [0.0, 1.0, 0.0]).set_norm(MS));
    system
}

pub fn test_simple_hysteresis_loop(calc: &impl Calculator) {
    let mut system = fresh_system();
    let run = HysteresisRun::symmetric([0.0, 0.0, -1e6], [0.0, 0.0, 1e6], 3);
    calc.drive_hysteresis(&mut system, &HysteresisDriver::default(), &run)
        .expect("hysteresis drive failed");

    let center = system.m().mesh.region.center();
    assert_close(m_at(&system, center), [0.0, 0.0, MS], 1e-3);

    let table = system.table.as_ref().expect("table recorded");
    assert_eq!(table.n_rows(), 5);
    assert_eq!(table.x, "B_hysteresis");

    calc.delete(&system).expect("delete failed");
}

pub fn test_stepped_hysteresis_loop(calc: &impl Calculator) {
    let mut system = fresh_system();
    let run = HysteresisRun::stepped(vec![
        HysteresisStep {
            from: [0.0, 0.0, -1e6],
            to: [0.0, 0.0, 1e6],
            n: 3,
        },
        HysteresisStep {
            from: [0.0, 0.0, 1e6],
            to: [0.0, 0.0, -1e6],
            n: 5,
        },
    ]);
    calc.drive_hysteresis(&mut system, &HysteresisDriver::default(), &run)
        .expect("hysteresis drive failed");

    let center = system.m().mesh.region.center();
    assert_close(m_at(&system, center), [0.0, 0.0, MS], 1e-3);

    let table = system.table.as_ref().expect("table recorded");
    assert_eq!(table.n_rows(), 7);
    assert_eq!(table.x, "B_hysteresis");

    calc.delete(&system).expect("delete failed");
}

pub fn test_hysteresis_check_for_energy(calc: &impl Calculator) {
    let mut system = macrospin();
    system.energy = Energy::new();

    let run = HysteresisRun::symmetric([0.0, 0.0, -1e6], [0.0, 0.0, 1e6], 3);
    let result = calc.drive_hysteresis(&mut system, &HysteresisDriver::default(), &run);
    assert!(matches!(result, Err(DriveError::EnergyNotDefined)));
}
