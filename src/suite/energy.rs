// src/suite/energy.rs
//
// Combined-term cases: several energy terms at once, minimised to the
// direction the dominant field selects.

use crate::calculator::Calculator;
use crate::energy::{
    CubicAnisotropy, Demag, Dmi, EnergyTerm, Exchange, UniaxialAnisotropy, Zeeman,
};
use crate::energy::CrystalClass;
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::param::Param;
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, m_at, minimize, settle};

fn mesh() -> Mesh {
    let region = Region::new([0.0; 3], [10e-9, 5e-9, 3e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

fn mesh_with_subregions() -> Mesh {
    mesh().subregions([
        ("r1", Region::new([0.0; 3], [5e-9, 5e-9, 3e-9])),
        ("r2", Region::new([5e-9, 0.0, 0.0], [10e-9, 5e-9, 3e-9])),
    ])
}

pub fn test_exchange_zeeman(calc: &impl Calculator) {
    let ms = 1e6;
    let mut system = System::new("energy_exchange_zeeman");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([1e6, 0.0, 0.0]));
    system.m = Some(VectorField::uniform(mesh(), [0.0, 1.0, 0.0]).set_norm(ms));

    settle(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [ms, 0.0, 0.0], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_exchange_uniaxialanisotropy(calc: &impl Calculator) {
    let ms = 1e6;
    let a = Param::regions([("r1", 1e-12), ("r2", 0.0)]);

    let mut system = System::new("exchange_uniaxialanisotropy");
    system.energy = EnergyTerm::Exchange(Exchange::new(a))
        + EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(1e5, [1.0, 0.0, 0.0]));
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [0.5, 1.0, 0.0]).set_norm(ms));

    settle(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [ms, 0.0, 0.0], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_exchange_cubicanisotropy(calc: &impl Calculator) {
    let ms = 1e6;
    let a = Param::regions([("r1", 1e-12), ("r2", 0.0)]);

    let mut system = System::new("exchange_cubicanisotropy");
    system.energy = EnergyTerm::Exchange(Exchange::new(a))
        + EnergyTerm::CubicAnisotropy(CubicAnisotropy::new(
            1e5,
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ));
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [1.0, 0.3, 0.0]).set_norm(ms));

    minimize(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [ms, 0.0, 0.0], 1e-3);
    calc.delete(&system).expect("delete failed");
}

pub fn test_exchange_dmi_zeeman(calc: &impl Calculator) {
    let ms = 1e6;
    let a = Param::regions([("r1", 1e-12), ("r2", 3e-12), ("r1:r2", 2e-12)]);
    // very weak DMI against a strong field: the minimum is uniform
    let d = Param::regions([("r1", 1e-9), ("r2", 0.0), ("r1:r2", 5e-9)]);
    let h = VectorField::uniform(mesh_with_subregions(), [1e10, 0.0, 0.0]);

    let mut system = System::new("exchange_dmi_zeeman");
    system.energy = EnergyTerm::Exchange(Exchange::new(a))
        + EnergyTerm::Dmi(Dmi::new(d, CrystalClass::CnvZ))
        + EnergyTerm::Zeeman(Zeeman::new(h));
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [1.0, 0.3, 0.0]).set_norm(ms));

    minimize(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [ms, 0.0, 0.0], 1.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_exchange_dmi_zeeman_uniaxialanisotropy_demag(calc: &impl Calculator) {
    let ms = 1e5;
    let a = Param::regions([("r1", 1e-12), ("r2", 3e-12), ("r1:r2", 2e-12)]);
    let d = Param::regions([("r1", 1e-9), ("r2", 0.0), ("r1:r2", 5e-9)]);
    let h = VectorField::uniform(mesh_with_subregions(), [1e12, 0.0, 0.0]);

    let mut system = System::new("exchange_dmi_zeeman_uniaxialanisotropy");
    system.energy = EnergyTerm::Exchange(Exchange::new(a))
        + EnergyTerm::Dmi(Dmi::new(d, CrystalClass::CnvZ))
        + EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(1e6, [1.0, 0.0, 0.0]))
        + EnergyTerm::Zeeman(Zeeman::new(h))
        + EnergyTerm::Demag(Demag::new());
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [1.0, 0.3, 0.0]).set_norm(ms));

    minimize(calc, &mut system);

    assert_close(m_at(&system, mesh().region.center()), [ms, 0.0, 0.0], 1.0);
    calc.delete(&system).expect("delete failed");
}

pub fn test_zeeman_zeeman(calc: &impl Calculator) {
    let ms = 1e6;
    let h1 = VectorField::from_fn(mesh(), |p| {
        if p[0] <= 0.0 {
            [1e6, 0.0, 0.0]
        } else {
            [0.0, 0.0, 1e6]
        }
    });
    let h2 = VectorField::uniform(mesh(), [0.0, 1e6, 0.0]);

    let mut system = System::new("multi_zeeman_field");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(h1).named("zeeman1"))
        + EnergyTerm::Zeeman(Zeeman::new(h2).named("zeeman2"));
    system.m = Some(VectorField::uniform(mesh(), [0.0, 1.0, 0.0]).set_norm(ms));

    minimize(calc, &mut system);

    calc.delete(&system).expect("delete failed");
}
