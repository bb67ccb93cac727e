// src/suite/anisotropy.rs
//
// Anisotropy cases: uniaxial with scalar/dict/field constants and
// vector/field axes, the higher-order constant, and cubic anisotropy.
// Magnetisation settles along the local easy axis; zero-K cells must not
// move at all.

use crate::calculator::Calculator;
use crate::energy::{CubicAnisotropy, EnergyTerm, UniaxialAnisotropy};
use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, assert_parallel, m_at, minimize};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-7e-9, -5e-9, -4e-9], [7e-9, 5e-9, 4e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

fn mesh_with_subregions() -> Mesh {
    mesh().subregions([
        ("r1", Region::new([-7e-9, -5e-9, -4e-9], [0.0, 5e-9, 4e-9])),
        ("r2", Region::new([0.0, -5e-9, -4e-9], [7e-9, 5e-9, 4e-9])),
    ])
}

pub fn test_scalar_vector(calc: &impl Calculator) {
    let mut system = System::new("uniaxialanisotropy_scalar_vector");
    system.energy =
        EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(1e5, [0.0, 0.0, 1.0])).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.3, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);
}

pub fn test_field_vector(calc: &impl Calculator) {
    let k = ScalarField::from_fn(mesh(), |p| if p[0] <= 0.0 { 0.0 } else { 1e5 });

    let mut system = System::new("uniaxialanisotropy_field_vector");
    system.energy =
        EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(k, [0.0, 0.0, 1.0])).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.3, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    // K = 0 half: untouched
    assert_parallel(
        m_at(&system, [-2e-9, -2e-9, -2e-9]),
        [0.0, 0.3 * MS, MS],
        1.0,
    );
    assert_close(m_at(&system, [2e-9, 2e-9, 2e-9]), [0.0, 0.0, MS], 1e-3);
}

pub fn test_scalar_field(calc: &impl Calculator) {
    let u = VectorField::from_fn(mesh(), |p| {
        if p[0] <= 0.0 {
            [1.0, 0.0, 0.0]
        } else {
            [0.0, 1.0, 0.0]
        }
    });

    let mut system = System::new("uniaxialanisotropy_scalar_field");
    system.energy = EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(1e5, u)).into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 0.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, [-2e-9, -2e-9, -2e-9]), [MS, 0.0, 0.0], 1e-3);
    assert_close(m_at(&system, [2e-9, 2e-9, 2e-9]), [0.0, MS, 0.0], 1e-3);
}

pub fn test_field_field(calc: &impl Calculator) {
    let k = ScalarField::from_fn(mesh(), |p| {
        if (-2e-9..=2e-9).contains(&p[0]) {
            0.0
        } else {
            1e5
        }
    });
    let u = VectorField::from_fn(mesh(), |p| {
        if p[0] <= 0.0 {
            [1.0, 0.0, 0.0]
        } else {
            [0.0, 1.0, 0.0]
        }
    });

    let mut system = System::new("uniaxialanisotropy_field_field");
    system.energy = EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(k, u)).into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 0.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, [-3e-9, -3e-9, -3e-9]), [MS, 0.0, 0.0], 1e-3);
    assert_close(m_at(&system, [3e-9, 3e-9, 3e-9]), [0.0, MS, 0.0], 1e-3);
    // the K = 0 band keeps the initial direction
    assert_parallel(m_at(&system, [0.0; 3]), [MS, MS, 0.0], 1.0);
}

pub fn test_dict_vector(calc: &impl Calculator) {
    let k = Param::regions([("r1", 0.0), ("r2", 1e5)]);

    let mut system = System::new("uniaxialanisotropy_dict_vector");
    system.energy =
        EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(k, [0.0, 0.0, 1.0])).into();
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [0.0, 0.3, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_parallel(
        m_at(&system, [-2e-9, -2e-9, -2e-9]),
        [0.0, 0.3 * MS, MS],
        1.0,
    );
    assert_close(m_at(&system, [2e-9, 2e-9, 2e-9]), [0.0, 0.0, MS], 1e-3);
}

pub fn test_higher_order_scalar_vector(calc: &impl Calculator) {
    let mut system = System::new("uniaxialanisotropy_higher_order");
    system.energy = EnergyTerm::UniaxialAnisotropy(
        UniaxialAnisotropy::new(1e5, [0.0, 0.0, 1.0]).with_k2(2e3),
    )
    .into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.3, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);
}

pub fn test_cubic_scalar_vector(calc: &impl Calculator) {
    let mut system = System::new("cubicanisotropy_scalar_vector");
    system.energy = EnergyTerm::CubicAnisotropy(CubicAnisotropy::new(
        1e4,
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ))
    .into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 0.3, 0.1]).set_norm(MS));

    minimize(calc, &mut system);

    // closest cubic easy axis wins
    assert_close(m_at(&system, mesh().region.center()), [MS, 0.0, 0.0], 1e-3);
}
