// src/suite/relaxdriver.rs
//
// Relax-driver cases. Calculators without a relax driver report
// `Unsupported` and the cases pass vacuously, mirroring how the original
// suites skip on missing capability.

use crate::calculator::{Calculator, DriveError};
use crate::driver::{RelaxDriver, RelaxRun};
use crate::dynamics::{Damping, DynamicsTerm};
use crate::energy::{Energy, EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::{macrospin, System};

use super::util::{assert_close, m_at};

const MS: f64 = 1e6;

pub fn test_relaxdriver(calc: &impl Calculator) {
    if !calc.supports_relax() {
        return;
    }

    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [5, 5, 5]).expect("static mesh is valid");

    let mut system = System::new("relaxdriver");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.dynamics = DynamicsTerm::Damping(Damping::new(0.5)).into();
    system.m = Some(VectorField::uniform(mesh, [0.0, 1.0, 0.0]).set_norm(MS));

    calc.drive_relax(&mut system, &RelaxDriver, &RelaxRun::default())
        .expect("relax drive failed");

    assert_close(m_at(&system, region.center()), [0.0, 0.0, MS], 1e-2);
    assert_eq!(system.table.as_ref().expect("table recorded").x, "t");

    calc.delete(&system).expect("delete failed");
}

pub fn test_relax_check_for_energy(calc: &impl Calculator) {
    if !calc.supports_relax() {
        return;
    }

    let mut system = macrospin();
    system.energy = Energy::new();

    let result = calc.drive_relax(&mut system, &RelaxDriver, &RelaxRun::default());
    assert!(matches!(result, Err(DriveError::EnergyNotDefined)));
}
