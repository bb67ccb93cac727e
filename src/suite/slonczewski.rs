// src/suite/slonczewski.rs
//
// Slonczewski spin-transfer cases: scalar/dict/field parameter sets, time
// profiles, and finite temperature with a thermal spin-transfer evolver.
// These are smoke drives; the torque magnitudes are too backend-specific
// for sharper oracles.

use crate::calculator::Calculator;
use crate::driver::{Evolver, TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Slonczewski};
use crate::energy::{EnergyTerm, Zeeman};
use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;
use crate::param::{Param, TimeProfile, VectorParam};
use crate::region::Region;
use crate::system::System;

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 5e-9, 3e-9]);
    Mesh::with_n(region, [2, 2, 2]).expect("static mesh is valid")
}

fn mesh_with_subregions() -> Mesh {
    mesh().subregions([
        ("r1", Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 0.0, 3e-9])),
        ("r2", Region::new([-5e-9, 0.0, -3e-9], [5e-9, 5e-9, 3e-9])),
    ])
}

fn fresh_m(system: &mut System, mesh: Mesh) {
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.1, 1.0]).set_norm(MS));
}

fn sin_profile(t: f64) -> f64 {
    (t * 1e10).sin()
}

pub fn test_single_values(calc: &impl Calculator) {
    let term = || Slonczewski::new(1e12, [1.0, 0.0, 0.0], 0.4, 2.0).with_eps_prime(0.0);

    let mut system = System::new("slonczewski_scalar_values");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Slonczewski(term()).into();
    fresh_m(&mut system, mesh());

    let td = TimeDriver::new();
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 20))
        .expect("time drive failed");

    // removing the current needs a replacement term to keep the equation
    // of motion non-empty
    system.dynamics -= DynamicsTerm::Slonczewski(term());
    system.dynamics += DynamicsTerm::Damping(Damping::new(1.0));
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 20))
        .expect("time drive failed");

    // time profile
    system.dynamics = DynamicsTerm::Slonczewski(term().with_profile(TimeProfile::Custom {
        f: sin_profile,
        dt: 1e-13,
    }))
    .into();
    fresh_m(&mut system, mesh());
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-9, 50))
        .expect("time drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_single_values_finite_temperature(calc: &impl Calculator) {
    let term = || Slonczewski::new(1e12, [1.0, 0.0, 0.0], 0.4, 2.0).with_eps_prime(0.0);

    let mut system = System::new("slonczewski_finite_temperature");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Slonczewski(term()).into();
    system.temperature = 10.0;
    fresh_m(&mut system, mesh());

    let td = TimeDriver::with_evolver(Evolver::ThermSpinXfer);
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-11, 20))
        .expect("time drive failed");

    system.dynamics = DynamicsTerm::Slonczewski(term().with_profile(TimeProfile::Custom {
        f: sin_profile,
        dt: 1e-13,
    }))
    .into();
    fresh_m(&mut system, mesh());
    calc.drive_time(&mut system, &td, &TimeRun::new(0.2e-11, 50))
        .expect("time drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_dict_values(calc: &impl Calculator) {
    let j = Param::regions([("r1", 1e12), ("r2", 5e12)]);
    let mp = VectorParam::regions([("r1", [0.0, 0.0, 1.0]), ("r2", [0.0, 1.0, 0.0])]);
    let p = Param::regions([("r1", 0.4), ("r2", 0.35)]);
    let lambda = Param::regions([("r1", 2.0), ("r2", 1.5)]);
    let eps_prime = Param::regions([("r1", 0.0), ("r2", 1.0)]);

    let mut system = System::new("slonczewski_dict_values");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Slonczewski(
        Slonczewski::new(j, mp, p, lambda).with_eps_prime(eps_prime),
    )
    .into();
    fresh_m(&mut system, mesh_with_subregions());

    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 20))
        .expect("time drive failed");

    calc.delete(&system).expect("delete failed");
}

pub fn test_field_values(calc: &impl Calculator) {
    let j = ScalarField::uniform(mesh(), 0.5e12);
    let mp = VectorField::uniform(mesh(), [1.0, 0.0, 0.0]);
    let p = ScalarField::uniform(mesh(), 0.5);
    let lambda = ScalarField::uniform(mesh(), 2.0);
    let eps_prime = ScalarField::uniform(mesh(), 1.0);

    let mut system = System::new("slonczewski_field_values");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Slonczewski(
        Slonczewski::new(j, mp, p, lambda).with_eps_prime(eps_prime),
    )
    .into();
    fresh_m(&mut system, mesh());

    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.2e-9, 20))
        .expect("time drive failed");

    calc.delete(&system).expect("delete failed");
}
