// src/suite/rkky.rs
//
// RKKY coupling across a spacer: negative sigma forces the facing layers
// antiparallel, positive sigma parallel.

use crate::calculator::Calculator;
use crate::energy::{EnergyTerm, Rkky};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::System;
use crate::vec3;

use super::util::minimize;

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 5e-9, 3e-9]);
    Mesh::with_n(region, [10, 10, 6])
        .expect("static mesh is valid")
        .subregions([
            ("r1", Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 0.0, 3e-9])),
            ("r2", Region::new([-5e-9, 0.0, -3e-9], [5e-9, 1e-9, 3e-9])),
            ("r3", Region::new([-5e-9, 1e-9, -3e-9], [5e-9, 5e-9, 3e-9])),
        ])
}

fn m_init(mesh: Mesh) -> VectorField {
    VectorField::from_fn(mesh, |p| {
        if p[1] <= 0.0 {
            [0.0, 0.2, 1.0]
        } else {
            [0.0, -0.5, -1.0]
        }
    })
    .set_norm(MS)
}

fn facing_orientations(system: &System) -> ([f64; 3], [f64; 3]) {
    let orientation = system.m().orientation();
    let m1 = orientation
        .value_at([0.0, -0.5e-9, 0.0])
        .expect("facing layer of r1");
    let m2 = orientation
        .value_at([0.0, 1.5e-9, 0.0])
        .expect("facing layer of r3");
    (m1, m2)
}

pub fn test_scalar(calc: &impl Calculator) {
    let mut system = System::new("rkky_scalar");
    system.energy = EnergyTerm::Rkky(Rkky::new(-1e4, 0.0, "r1", "r3")).into();
    system.m = Some(m_init(mesh()));

    minimize(calc, &mut system);

    // antiferromagnetic coupling
    let (m1, m2) = facing_orientations(&system);
    let d = vec3::dot(m1, m2);
    assert!((d + 1.0).abs() < 1e-3, "expected antiparallel layers, m1.m2 = {d}");

    // flip the coupling sign and minimise again from the same seed
    if let Some(EnergyTerm::Rkky(rkky)) = system.energy.get_mut("rkky") {
        rkky.sigma = 1e4;
        rkky.sigma2 = 0.0;
    } else {
        panic!("rkky term went missing");
    }
    system.m = Some(m_init(mesh()));

    minimize(calc, &mut system);

    // ferromagnetic coupling
    let (m1, m2) = facing_orientations(&system);
    let d = vec3::dot(m1, m2);
    assert!((d - 1.0).abs() < 1e-3, "expected parallel layers, m1.m2 = {d}");

    calc.delete(&system).expect("delete failed");
}
