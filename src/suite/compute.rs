// src/suite/compute.rs
//
// Derived-quantity cases: per-term and total energy, energy density and
// effective field, across every term kind and DMI crystal class, with
// spin-transfer dynamics present, and rejection of unknown targets.

use crate::calculator::{Calculator, Computed, ComputeQuantity, ComputeTarget, DriveError};
use crate::dynamics::{DynamicsTerm, Slonczewski, ZhangLi};
use crate::energy::{
    CrystalClass, CubicAnisotropy, Demag, Dmi, EnergyTerm, Exchange, UniaxialAnisotropy, Zeeman,
};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::System;

fn fresh_system() -> System {
    let region = Region::new([0.0; 3], [10e-9, 2e-9, 2e-9]);
    let mesh = Mesh::with_cell(region, [2e-9; 3]).expect("static mesh is valid");

    let mut system = System::new("compute_tests");
    system.energy = EnergyTerm::Exchange(Exchange::new(1e-12))
        + EnergyTerm::Demag(Demag::new())
        + EnergyTerm::Zeeman(Zeeman::new([8e6, 0.0, 0.0]))
        + EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(1e4, [0.0, 0.0, 1.0]))
        + EnergyTerm::CubicAnisotropy(CubicAnisotropy::new(1e3, [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.0, 1.0]).set_norm(8e6));
    system
}

fn term_names(system: &System) -> Vec<String> {
    system.energy.iter().map(|t| t.name().to_owned()).collect()
}

pub fn test_energy(calc: &impl Calculator) {
    let system = fresh_system();
    for name in term_names(&system) {
        let computed = calc
            .compute(&system, ComputeTarget::term(ComputeQuantity::Energy, &name))
            .expect("term energy computed");
        assert!(
            computed.scalar().is_some_and(f64::is_finite),
            "term '{name}' energy should be a finite scalar"
        );
    }
    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::Energy))
        .expect("total energy computed");
    assert!(total.scalar().is_some_and(f64::is_finite));
}

pub fn test_energy_density(calc: &impl Calculator) {
    let system = fresh_system();
    let n = system.m().mesh.n_cells();
    for name in term_names(&system) {
        let computed = calc
            .compute(
                &system,
                ComputeTarget::term(ComputeQuantity::EnergyDensity, &name),
            )
            .expect("term density computed");
        match computed {
            Computed::Density(f) => assert_eq!(f.data.len(), n),
            other => panic!("expected a density field for '{name}', got {other:?}"),
        }
    }
    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::EnergyDensity))
        .expect("total density computed");
    assert!(matches!(total, Computed::Density(_)));
}

pub fn test_effective_field(calc: &impl Calculator) {
    let system = fresh_system();
    let n = system.m().mesh.n_cells();
    for name in term_names(&system) {
        let computed = calc
            .compute(
                &system,
                ComputeTarget::term(ComputeQuantity::EffectiveField, &name),
            )
            .expect("term field computed");
        match computed {
            Computed::Field(f) => assert_eq!(f.data.len(), n),
            other => panic!("expected an effective field for '{name}', got {other:?}"),
        }
    }
    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::EffectiveField))
        .expect("total field computed");
    assert!(matches!(total, Computed::Field(_)));
}

pub fn test_invalid_target(calc: &impl Calculator) {
    let system = fresh_system();
    let result = calc.compute(
        &system,
        ComputeTarget::term(ComputeQuantity::Energy, "no_such_term"),
    );
    assert!(matches!(result, Err(DriveError::InvalidValue(_))));
}

pub fn test_dmi(calc: &impl Calculator) {
    let mut system = fresh_system();
    system.energy += EnergyTerm::Dmi(Dmi::new(5e-3, CrystalClass::T));

    for class in [
        CrystalClass::T,
        CrystalClass::CnvX,
        CrystalClass::CnvY,
        CrystalClass::CnvZ,
        CrystalClass::D2dX,
        CrystalClass::D2dY,
        CrystalClass::D2dZ,
    ] {
        if let Some(EnergyTerm::Dmi(dmi)) = system.energy.get_mut("dmi") {
            dmi.crystal_class = class;
        }
        for quantity in [
            ComputeQuantity::Energy,
            ComputeQuantity::EnergyDensity,
            ComputeQuantity::EffectiveField,
        ] {
            calc.compute(&system, ComputeTarget::term(quantity, "dmi"))
                .expect("dmi quantity computed");
        }
    }

    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::Energy))
        .expect("total energy computed");
    assert!(total.scalar().is_some());
}

pub fn test_slonczewski(calc: &impl Calculator) {
    let mut system = fresh_system();
    system.dynamics = DynamicsTerm::Slonczewski(
        Slonczewski::new(7.5e12, [1.0, 0.0, 0.0], 0.4, 2.0),
    )
    .into();

    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::Energy))
        .expect("total energy computed");
    assert!(total.scalar().is_some());
}

pub fn test_zhang_li(calc: &impl Calculator) {
    let mut system = fresh_system();
    system.dynamics = DynamicsTerm::ZhangLi(ZhangLi::new(5e6, 0.01)).into();

    let total = calc
        .compute(&system, ComputeTarget::total(ComputeQuantity::Energy))
        .expect("total energy computed");
    assert!(total.scalar().is_some());
}
