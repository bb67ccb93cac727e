// src/suite/demag.rs
//
// Demagnetisation cases: plain term, asymptotic-radius knob, and
// periodic boundaries in one, two and three dimensions. The multi-axis
// periodic variants are rejected by backends without a relax driver
// (mirroring the solver they wrap); everything else is a smoke drive.

use crate::calculator::{Calculator, DriveError};
use crate::driver::{MinDriver, MinRun};
use crate::energy::{Demag, EnergyTerm};
use crate::field::VectorField;
use crate::mesh::{Mesh, Pbc};
use crate::region::Region;
use crate::system::System;

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-5e-9, 0.0, 0.0], [5e-9, 5e-9, 1e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

pub fn test_demag(calc: &impl Calculator) {
    let mut system = System::new("demag");
    system.energy = EnergyTerm::Demag(Demag::new()).into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));

    calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default())
        .expect("min drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_demag_asymptotic_radius(calc: &impl Calculator) {
    let mut system = System::new("demag_asymptotic_radius");
    system.energy = EnergyTerm::Demag(Demag::new().with_asymptotic_radius(6.0)).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.0, 1.0]).set_norm(MS));

    calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default())
        .expect("min drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_demag_pbc(calc: &impl Calculator) {
    for (axes, n_periodic) in [("x", 1), ("xy", 2), ("xyz", 3)] {
        let mut system = System::new("demag_pbc");
        system.energy = EnergyTerm::Demag(Demag::new()).into();
        let mesh = mesh().pbc(Pbc::parse(axes).expect("valid axes"));
        system.m = Some(VectorField::uniform(mesh, [0.0, 0.0, 1.0]).set_norm(MS));

        let result = calc.drive_min(&mut system, &MinDriver::new(), &MinRun::default());
        if n_periodic > 1 && !calc.supports_relax() {
            assert!(
                matches!(result, Err(DriveError::InvalidValue(_))),
                "{axes}: multi-axis periodic demag must be rejected"
            );
        } else {
            result.expect("min drive failed");
            calc.delete(&system).expect("delete failed");
        }
    }
}
