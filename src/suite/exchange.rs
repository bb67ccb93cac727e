// src/suite/exchange.rs
//
// Exchange term cases: scalar, per-subregion (with interface entries) and
// field-valued A. A minimised random state must become uniform wherever
// exchange is active and stay rough where A = 0.

use crate::calculator::Calculator;
use crate::energy::{EnergyTerm, Exchange};
use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;
use crate::vec3;

use super::util::{m_at, minimize};

const MS: f64 = 1e6;

fn region() -> Region {
    Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 5e-9, 3e-9])
}

fn subregions() -> [(&'static str, Region); 2] {
    [
        ("r1", Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 0.0, 3e-9])),
        ("r2", Region::new([-5e-9, 0.0, -3e-9], [5e-9, 5e-9, 3e-9])),
    ]
}

fn mesh() -> Mesh {
    Mesh::with_n(region(), [10, 10, 6]).expect("static mesh is valid")
}

pub fn test_scalar(calc: &impl Calculator) {
    let mut system = System::new("exchange_scalar");
    system.energy = EnergyTerm::Exchange(Exchange::new(1e-12)).into();
    system.m = Some(VectorField::random(mesh(), 20).set_norm(MS));

    minimize(calc, &mut system);

    let avg = vec3::norm(system.m().mean());
    assert!(
        (avg - MS).abs() < 1e-3,
        "exchange should make a random state uniform, |<m>| = {avg}"
    );
}

pub fn test_dict(calc: &impl Calculator) {
    let a = Param::regions([("r1", 0.0), ("r2", 1e-12), ("r1:r2", 1e-12), ("default", 2e-12)]);

    let mut system = System::new("exchange_dict");
    system.energy = EnergyTerm::Exchange(Exchange::new(a)).into();
    system.m = Some(VectorField::random(mesh().subregions(subregions()), 21).set_norm(MS));

    minimize(calc, &mut system);

    // A = 0 region: neighbouring cells still differ
    let v1 = m_at(&system, [1e-9, -4e-9, 2e-9]);
    let v2 = m_at(&system, [1e-9, -2e-9, 2e-9]);
    assert!(
        vec3::norm(vec3::sub(v1, v2)) > 1.0,
        "A = 0 region must keep its rough state"
    );

    // A != 0 region: neighbouring cells agree
    let v1 = m_at(&system, [1e-9, 4e-9, 2e-9]);
    let v2 = m_at(&system, [1e-9, 2e-9, 2e-9]);
    assert!(
        vec3::norm(vec3::sub(v1, v2)) < 1.0,
        "A != 0 region must be smooth after minimisation"
    );
}

pub fn test_field(calc: &impl Calculator) {
    let mesh = mesh();
    // zero would poison the laplacian, so the "weak" side stays finite
    let a = ScalarField::from_fn(mesh.clone(), |p| if p[0] <= 0.0 { 1e-10 } else { 1e-12 });

    let mut system = System::new("exchange_field");
    system.energy = EnergyTerm::Exchange(Exchange::new(a)).into();
    system.m = Some(VectorField::random(mesh, 22).set_norm(MS));

    minimize(calc, &mut system);

    let avg = vec3::norm(system.m().mean());
    assert!((avg - MS).abs() < 1e-3, "|<m>| = {avg}");
}
