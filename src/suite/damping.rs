// src/suite/damping.rs
//
// Damping cases: scalar, per-subregion and field-valued alpha. Without
// precession the equation of motion is pure damping, so alpha = 0 cells
// must not move at all and alpha != 0 cells align with the field.

use crate::calculator::Calculator;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm};
use crate::energy::{EnergyTerm, Zeeman};
use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, assert_parallel, m_at};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 5e-9, 3e-9]);
    Mesh::with_n(region, [10, 10, 10]).expect("static mesh is valid")
}

fn mesh_with_subregions() -> Mesh {
    mesh().subregions([
        ("r1", Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 0.0, 3e-9])),
        ("r2", Region::new([-5e-9, 0.0, -3e-9], [5e-9, 5e-9, 3e-9])),
    ])
}

fn drive(calc: &impl Calculator, system: &mut System) {
    calc.drive_time(system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");
}

pub fn test_scalar(calc: &impl Calculator) {
    let mut system = System::new("damping_scalar");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Damping(Damping::new(0.0)).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    // alpha is zero, nothing may change
    let value = m_at(&system, mesh().region.center());
    assert_parallel(value, [0.0, 0.1 * MS, MS], 1.0);

    calc.delete(&system).expect("delete failed");
}

pub fn test_dict(calc: &impl Calculator) {
    let alpha = Param::regions([("r1", 0.0), ("r2", 1.0)]);

    let mut system = System::new("damping_dict");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Damping(Damping::new(alpha)).into();
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    // alpha = 0 region: unchanged
    assert_parallel(m_at(&system, [1e-9, -4e-9, 3e-9]), [0.0, 0.1 * MS, MS], 1.0);
    // alpha != 0 region: aligned
    assert_close(m_at(&system, [1e-9, 4e-9, 3e-9]), [0.0, 0.0, MS], 1e-3);

    calc.delete(&system).expect("delete failed");
}

pub fn test_field(calc: &impl Calculator) {
    let alpha = ScalarField::from_fn(mesh(), |p| if p[1] <= 0.0 { 0.0 } else { 1.0 });

    let mut system = System::new("damping_field");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Damping(Damping::new(alpha)).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    assert_parallel(m_at(&system, [1e-9, -4e-9, 3e-9]), [0.0, 0.1 * MS, MS], 1.0);
    assert_close(m_at(&system, [1e-9, 4e-9, 3e-9]), [0.0, 0.0, MS], 1e-3);

    calc.delete(&system).expect("delete failed");
}
