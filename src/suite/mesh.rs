// src/suite/mesh.rs
//
// Mesh-shape cases: single and multi-subregion meshes with and without
// periodic boundaries, and pinned (fixed) subregions.

use crate::calculator::Calculator;
use crate::driver::{MinDriver, MinRun};
use crate::energy::{EnergyTerm, Zeeman};
use crate::field::VectorField;
use crate::mesh::{Mesh, Pbc};
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, m_at, minimize};

const MS: f64 = 1e6;

fn region() -> Region {
    Region::new([-7e-9, -5e-9, -4e-9], [7e-9, 5e-9, 4e-9])
}

fn base_mesh() -> Mesh {
    Mesh::with_cell(region(), [1e-9; 3]).expect("static mesh is valid")
}

fn three_subregions() -> [(&'static str, Region); 3] {
    [
        ("r1", Region::new([-7e-9, -5e-9, -4e-9], [7e-9, 0.0, 4e-9])),
        ("r2", Region::new([-7e-9, 0.0, -4e-9], [7e-9, 2e-9, 4e-9])),
        ("r3", Region::new([-7e-9, 2e-9, -4e-9], [7e-9, 5e-9, 4e-9])),
    ]
}

fn drive_and_check(calc: &impl Calculator, name: &str, mesh: Mesh) {
    let mut system = System::new(name);
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 5e6])).into();
    system.m = Some(VectorField::uniform(mesh, [1.0, 0.0, 0.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, region().center()), [0.0, 0.0, MS], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_single_nopbc(calc: &impl Calculator) {
    drive_and_check(calc, "mesh_single_nopbc", base_mesh());
}

pub fn test_multi_nopbc(calc: &impl Calculator) {
    drive_and_check(
        calc,
        "mesh_multi_nopbc",
        base_mesh().subregions(three_subregions()),
    );
}

pub fn test_single_pbc(calc: &impl Calculator) {
    drive_and_check(
        calc,
        "mesh_single_pbc",
        base_mesh().pbc(Pbc::parse("xyz").expect("valid axes")),
    );
}

pub fn test_multi_pbc(calc: &impl Calculator) {
    drive_and_check(
        calc,
        "mesh_multi_pbc",
        base_mesh()
            .pbc(Pbc::parse("xyz").expect("valid axes"))
            .subregions(three_subregions()),
    );
}

pub fn test_fixed_subregions(calc: &impl Calculator) {
    let region = Region::new([-10e-9, -5e-9, -3e-9], [10e-9, 5e-9, 3e-9]);
    let mesh = Mesh::with_cell(region, [1e-9; 3])
        .expect("static mesh is valid")
        .subregions([
            ("r1", Region::new([-10e-9, -5e-9, -3e-9], [10e-9, 0.0, 3e-9])),
            ("r2", Region::new([-10e-9, 0.0, -3e-9], [10e-9, 5e-9, 3e-9])),
        ]);

    let mut system = System::new("fixed_subregions");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e5])).into();
    system.m = Some(VectorField::uniform(mesh, [1.0, 0.0, 0.0]).set_norm(MS));

    let run = MinRun {
        fixed_subregions: vec!["r1".to_owned()],
        ..MinRun::default()
    };
    calc.drive_min(&mut system, &MinDriver::new(), &run)
        .expect("min drive failed");

    // pinned half keeps its direction, free half aligns with the field
    assert_close(system.m().region_mean("r1"), [MS, 0.0, 0.0], 1.0);
    assert_close(system.m().region_mean("r2"), [0.0, 0.0, MS], 1.0);

    calc.delete(&system).expect("delete failed");
}
