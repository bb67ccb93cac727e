// src/suite/zhangli.rs
//
// Zhang-Li spin-transfer cases: scalar/dict/field drift velocities and
// time profiles (u = 0 must leave the state untouched), plus domain-wall
// motion in two orthogonal strips which must behave identically.

use crate::calculator::Calculator;
use crate::consts::GAMMA0;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Precession, ZhangLi};
use crate::energy::{EnergyTerm, Exchange, UniaxialAnisotropy, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::param::{TimeProfile, VectorParam};
use crate::region::Region;
use crate::system::System;

use super::util::{assert_parallel, assert_rel_eq, m_at, minimize};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-5e-9, -5e-9, -3e-9], [5e-9, 5e-9, 3e-9]);
    Mesh::with_cell(region, [1e-9, 1e-9, 3e-9]).expect("static mesh is valid")
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

fn sin_profile(t: f64) -> f64 {
    (t * 1e10).sin()
}

pub fn test_scalar_scalar(calc: &impl Calculator) {
    let mut system = System::new("zhangli_scalar_scalar");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e5])).into();
    system.dynamics = DynamicsTerm::ZhangLi(ZhangLi::new(0.0, 0.5)).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    // u is zero, nothing may change
    assert_parallel(m_at(&system, mesh().region.center()), [0.0, 0.1 * MS, MS], 1.0);

    // removing the term leaves an empty equation of motion, which is not
    // allowed, so damping takes its place
    system.dynamics -= DynamicsTerm::ZhangLi(ZhangLi::new(0.0, 0.5));
    system.dynamics += DynamicsTerm::Damping(Damping::new(1.0));

    drive(calc, &mut system);

    calc.delete(&system).expect("delete failed");
}

pub fn test_time_scalar_scalar(calc: &impl Calculator) {
    let mut system = System::new("zhangli_time_scalar_scalar");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e5])).into();
    system.dynamics = DynamicsTerm::ZhangLi(
        ZhangLi::new(0.0, 0.5).with_profile(TimeProfile::Custom {
            f: sin_profile,
            dt: 1e-13,
        }),
    )
    .into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    assert_parallel(m_at(&system, mesh().region.center()), [0.0, 0.1 * MS, MS], 1.0);

    calc.delete(&system).expect("delete failed");
}

pub fn test_dict_scalar(calc: &impl Calculator) {
    for (label, u) in [
        (
            "plain",
            VectorParam::regions([("r1", [0.0; 3]), ("r2", [1.0, 0.0, 0.0])]),
        ),
        // default entry of zero, only one subregion driven
        ("default", VectorParam::regions([("r2", [1.0, 0.0, 0.0])])),
    ] {
        let mut system = System::new("zhangli_dict_scalar");
        system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
        let term = match label {
            "plain" => ZhangLi::new(u, 0.5),
            _ => ZhangLi::new(u, 0.5).with_profile(TimeProfile::Custom {
                f: sin_profile,
                dt: 1e-13,
            }),
        };
        system.dynamics = DynamicsTerm::ZhangLi(term).into();
        system.m = Some(VectorField::uniform(mesh_with_subregions(), [0.0, 0.1, 1.0]).set_norm(MS));

        drive(calc, &mut system);

        // u = 0 region: unchanged
        assert_parallel(m_at(&system, [1e-9, -4e-9, 3e-9]), [0.0, 0.1 * MS, MS], 1.0);
        calc.delete(&system).expect("delete failed");
    }
}

pub fn test_field_scalar(calc: &impl Calculator) {
    let u = VectorField::from_fn(mesh(), |p| {
        if p[1] <= 0.0 {
            [0.0; 3]
        } else {
            [1.0, 0.0, 0.0]
        }
    });

    let mut system = System::new("zhangli_field_scalar");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::ZhangLi(ZhangLi::new(u, 0.5)).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 0.1, 1.0]).set_norm(MS));

    drive(calc, &mut system);

    assert_parallel(m_at(&system, [1e-9, -4e-9, 3e-9]), [0.0, 0.1 * MS, MS], 1.0);

    calc.delete(&system).expect("delete failed");
}

/// Domain wall in a strip oriented along x (respectively y), driven by a
/// current along the strip. The average out-of-plane component before and
/// after the drive must match between the two orientations. Chirality is
/// not controlled, so only m_z is compared.
pub fn test_vector_scalar(calc: &impl Calculator) {
    let ms = 5.8e5;
    let (pa, pb) = (200e-9, 20e-9);

    let wall_state = |mesh: Mesh, axis: usize| {
        VectorField::from_fn(mesh, move |p| {
            if p[axis] < 70e-9 {
                [0.1, 0.1, -1.0]
            } else {
                [0.1, 0.1, 1.0]
            }
        })
        .set_norm(ms)
    };

    let energy = || {
        EnergyTerm::Exchange(Exchange::new(15e-12))
            + EnergyTerm::UniaxialAnisotropy(UniaxialAnisotropy::new(0.5e6, [0.0, 0.0, 1.0]))
    };

    let mesh_x = Mesh::with_cell(Region::new([0.0; 3], [pa, pb, 5e-9]), [5e-9; 3])
        .expect("static mesh is valid");
    let mut system_x = System::new("strip_x");
    system_x.energy = energy();
    system_x.m = Some(wall_state(mesh_x, 0));
    minimize(calc, &mut system_x);

    let mesh_y = Mesh::with_cell(Region::new([0.0; 3], [pb, pa, 5e-9]), [5e-9; 3])
        .expect("static mesh is valid");
    let mut system_y = System::new("strip_y");
    system_y.energy = energy();
    system_y.m = Some(wall_state(mesh_y, 1));
    minimize(calc, &mut system_y);

    let mz_x = system_x.m().orientation().mean()[2];
    let mz_y = system_y.m().orientation().mean()[2];
    assert!(mz_x > 0.25, "wall sits at 70/200, mean mz = {mz_x}");
    assert_rel_eq(mz_x, mz_y, 1e-4);

    // drive both walls with equivalent currents along their strips
    system_x.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(0.3))
        + DynamicsTerm::ZhangLi(ZhangLi::new([200.0, 0.0, 0.0], 0.5));
    calc.drive_time(&mut system_x, &TimeDriver::new(), &TimeRun::new(0.4e-9, 1))
        .expect("time drive failed");

    system_y.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(0.3))
        + DynamicsTerm::ZhangLi(ZhangLi::new([0.0, 200.0, 0.0], 0.5));
    calc.drive_time(&mut system_y, &TimeDriver::new(), &TimeRun::new(0.4e-9, 1))
        .expect("time drive failed");

    let mz_x = system_x.m().orientation().mean()[2];
    let mz_y = system_y.m().orientation().mean()[2];
    assert!(mz_x < -0.25, "wall moved with the current, mean mz = {mz_x}");
    assert_rel_eq(mz_x, mz_y, 1e-4);

    calc.delete(&system_x).expect("delete failed");
    calc.delete(&system_y).expect("delete failed");
}
