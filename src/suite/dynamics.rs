// src/suite/dynamics.rs
//
// Combined precession + damping cases with scalar, per-subregion and
// field-valued gamma0 and alpha. Cells with gamma0 = 0 and alpha = 0
// freeze; damped cells align with the applied field; undamped cells keep
// precessing.

use crate::calculator::Calculator;
use crate::consts::GAMMA0;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Precession};
use crate::energy::{EnergyTerm, Zeeman};
use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;
use crate::vec3;

use super::util::{assert_parallel, m_at};

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

/// |m/Ms - z| for alignment checks at tight tolerance.
fn misalignment(value: [f64; 3]) -> f64 {
    vec3::norm(vec3::sub(vec3::scale(value, 1.0 / MS), [0.0, 0.0, 1.0]))
}

pub fn test_scalar_scalar(calc: &impl Calculator) {
    let mut system = System::new("dynamics_scalar_scalar");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(1.0));
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    let value = m_at(&system, mesh().region.center());
    assert!(
        misalignment(value) < 1e-5,
        "strongly damped state should be aligned, got {value:?}"
    );

    calc.delete(&system).expect("delete failed");
}

pub fn test_scalar_dict(calc: &impl Calculator) {
    let alpha = Param::regions([("r1", 0.0), ("r2", 1.0)]);

    let mut system = System::new("dynamics_scalar_dict");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(alpha));
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    // alpha = 0 region: still precessing, not aligned with z
    let value = m_at(&system, [1e-9, -4e-9, 3e-9]);
    assert!(
        vec3::norm(vec3::cross(value, [0.0, 0.0, MS])) > 1.0,
        "undamped region must keep precessing, got {value:?}"
    );

    // alpha != 0 region: aligned
    let value = m_at(&system, [1e-9, 4e-9, 3e-9]);
    assert!(misalignment(value) < 1e-5, "damped region not aligned: {value:?}");

    calc.delete(&system).expect("delete failed");
}

pub fn test_field_field(calc: &impl Calculator) {
    let alpha = ScalarField::from_fn(mesh(), |p| if p[1] <= 0.0 { 0.0 } else { 1.0 });
    let gamma0 = ScalarField::from_fn(mesh(), |p| if p[1] <= 0.0 { 0.0 } else { GAMMA0 });

    let mut system = System::new("dynamics_field_field");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Precession(Precession::new(gamma0))
        + DynamicsTerm::Damping(Damping::new(alpha));
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    // gamma0 = 0 and alpha = 0: frozen
    assert_parallel(m_at(&system, [1e-9, -4e-9, 3e-9]), [0.0, 0.1 * MS, MS], 1.0);

    // both non-zero: aligned
    let value = m_at(&system, [1e-9, 4e-9, 3e-9]);
    assert!(misalignment(value) < 1e-5, "damped region not aligned: {value:?}");

    calc.delete(&system).expect("delete failed");
}
