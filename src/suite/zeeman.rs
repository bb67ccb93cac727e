// src/suite/zeeman.rs
//
// Applied-field cases: vector, per-subregion and field-valued H, plus the
// time-dependent profiles (sin, sinc, custom function, and two named
// terms with per-term table columns).

use crate::calculator::Calculator;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm};
use crate::energy::{EnergyTerm, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::param::{TimeProfile, VectorParam};
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, assert_rel_eq, m_at, minimize};

const MS: f64 = 1e6;

fn mesh() -> Mesh {
    let region = Region::new([-10e-9, -5e-9, -3e-9], [10e-9, 5e-9, 3e-9]);
    Mesh::with_cell(region, [1e-9; 3]).expect("static mesh is valid")
}

fn mesh_with_subregions() -> Mesh {
    mesh().subregions([
        ("r1", Region::new([-10e-9, -5e-9, -3e-9], [10e-9, 0.0, 3e-9])),
        ("r2", Region::new([-10e-9, 0.0, -3e-9], [10e-9, 5e-9, 3e-9])),
    ])
}

fn time_drive(calc: &impl Calculator, system: &mut System) {
    calc.drive_time(system, &TimeDriver::new(), &TimeRun::new(0.1e-9, 20))
        .expect("time drive failed");
}

pub fn test_vector(calc: &impl Calculator) {
    let mut system = System::new("zeeman_vector");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    let center = mesh().region.center();
    assert_close(m_at(&system, center), [0.0, 0.0, MS], 1e-3);
}

pub fn test_time_vector(calc: &impl Calculator) {
    let h = [0.0, 0.0, 1e6];

    let mut system = System::new("zeeman_vector");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(h)).into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));

    minimize(calc, &mut system);
    assert_close(m_at(&system, mesh().region.center()), [0.0, 0.0, MS], 1e-3);

    // a time drive with an empty equation of motion is rejected, so the
    // time-dependent variants carry damping
    system.dynamics = DynamicsTerm::Damping(Damping::new(1.0)).into();

    // sin
    system.energy = EnergyTerm::Zeeman(
        Zeeman::new(h).with_profile(TimeProfile::Sin { f: 1e9, t0: 1e-12 }),
    )
    .into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));
    time_drive(calc, &mut system);

    // sinc
    system.energy = EnergyTerm::Zeeman(
        Zeeman::new(h).with_profile(TimeProfile::Sinc { f: 1e9, t0: 0.0 }),
    )
    .into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));
    time_drive(calc, &mut system);

    // custom ramp-down
    fn ramp(t: f64) -> f64 {
        if t < 1e-10 {
            1.0
        } else if t < 5e-10 {
            (5e-10 - t) / 4e-10
        } else {
            0.0
        }
    }
    system.energy = EnergyTerm::Zeeman(
        Zeeman::new(h).with_profile(TimeProfile::Custom { f: ramp, dt: 1e-13 }),
    )
    .into();
    system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));
    time_drive(calc, &mut system);

    // two named terms: a cosine along x and a sine along y with the same
    // frequency and amplitude; their recorded excitation maxima agree
    const F: f64 = 10e9;
    fn cos_wave(t: f64) -> f64 {
        (2.0 * std::f64::consts::PI * F * t).cos()
    }
    fn sin_wave(t: f64) -> f64 {
        (2.0 * std::f64::consts::PI * F * t).sin()
    }

    for ydir_profile in [
        TimeProfile::Sin { f: F, t0: 0.0 },
        TimeProfile::Custom {
            f: sin_wave,
            dt: 5e-12,
        },
    ] {
        system.energy = EnergyTerm::Zeeman(
            Zeeman::new([1e6, 0.0, 0.0])
                .with_profile(TimeProfile::Custom {
                    f: cos_wave,
                    dt: 5e-12,
                })
                .named("xdir"),
        ) + EnergyTerm::Zeeman(Zeeman::new([0.0, 1e6, 0.0]).with_profile(ydir_profile).named("ydir"));
        system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));
        calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(0.1e-9, 100))
            .expect("time drive failed");

        let table = system.table.as_ref().expect("drive records a table");
        let bx_x = table.column("Bx_xdir").expect("column Bx_xdir");
        let by_x = table.column("By_xdir").expect("column By_xdir");
        let bx_y = table.column("Bx_ydir").expect("column Bx_ydir");
        let by_y = table.column("By_ydir").expect("column By_ydir");

        assert!(bx_x.iter().any(|v| v.abs() > 1e-9));
        assert!(by_x.iter().all(|v| v.abs() < 1e-12));
        assert!(bx_y.iter().all(|v| v.abs() < 1e-12));
        assert!(by_y.iter().any(|v| v.abs() > 1e-9));

        let max_x = bx_x.iter().cloned().fold(f64::MIN, f64::max);
        let max_y = by_y.iter().cloned().fold(f64::MIN, f64::max);
        assert_rel_eq(max_x, max_y, 1e-6);
    }

    calc.delete(&system).expect("delete failed");
}

pub fn test_dict(calc: &impl Calculator) {
    let h = VectorParam::regions([("r1", [1e5, 0.0, 0.0]), ("r2", [0.0, 0.0, 1e5])]);

    let mut system = System::new("zeeman_dict");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(h)).into();
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [1.0, 1.0, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(system.m().region_mean("r1"), [MS, 0.0, 0.0], 1.0);
    assert_close(system.m().region_mean("r2"), [0.0, 0.0, MS], 1.0);
}

pub fn test_time_dict(calc: &impl Calculator) {
    let h = || VectorParam::regions([("r1", [1e5, 0.0, 0.0]), ("r2", [0.0, 0.0, 1e5])]);

    let mut system = System::new("zeeman_dict");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(h())).into();
    system.dynamics = DynamicsTerm::Damping(Damping::new(1.0)).into();
    system.m = Some(VectorField::uniform(mesh_with_subregions(), [1.0, 1.0, 1.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(system.m().region_mean("r1"), [MS, 0.0, 0.0], 1.0);
    assert_close(system.m().region_mean("r2"), [0.0, 0.0, MS], 1.0);

    for profile in [
        TimeProfile::Sin { f: 1e9, t0: 1e-12 },
        TimeProfile::Sinc { f: 1e9, t0: 0.0 },
    ] {
        system.energy = EnergyTerm::Zeeman(Zeeman::new(h()).with_profile(profile)).into();
        system.m =
            Some(VectorField::uniform(mesh_with_subregions(), [1.0, 1.0, 1.0]).set_norm(MS));
        time_drive(calc, &mut system);
    }

    calc.delete(&system).expect("delete failed");
}

fn split_field(mesh: Mesh) -> VectorField {
    VectorField::from_fn(mesh, |p| {
        if p[0] <= 0.0 {
            [1e6, 0.0, 0.0]
        } else {
            [0.0, 0.0, 1e6]
        }
    })
}

pub fn test_field(calc: &impl Calculator) {
    let mut system = System::new("zeeman_field");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(split_field(mesh()))).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 1.0, 0.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, [-2e-9, -2e-9, -2e-9]), [MS, 0.0, 0.0], 1e-3);
    assert_close(m_at(&system, [2e-9, 2e-9, 2e-9]), [0.0, 0.0, MS], 1e-3);
}

pub fn test_time_field(calc: &impl Calculator) {
    let mut system = System::new("zeeman_field");
    system.energy = EnergyTerm::Zeeman(Zeeman::new(split_field(mesh()))).into();
    system.m = Some(VectorField::uniform(mesh(), [0.0, 1.0, 0.0]).set_norm(MS));

    minimize(calc, &mut system);

    assert_close(m_at(&system, [-2e-9, -2e-9, -2e-9]), [MS, 0.0, 0.0], 1e-3);
    assert_close(m_at(&system, [2e-9, 2e-9, 2e-9]), [0.0, 0.0, MS], 1e-3);

    system.dynamics = DynamicsTerm::Damping(Damping::new(1.0)).into();

    fn rot(t: f64) -> f64 {
        (2.0 * std::f64::consts::PI * 1e9 * t).cos()
    }
    for profile in [
        TimeProfile::Sin { f: 1e9, t0: 1e-12 },
        TimeProfile::Sinc { f: 1e9, t0: 0.0 },
        TimeProfile::Custom { f: rot, dt: 1e-13 },
    ] {
        system.energy =
            EnergyTerm::Zeeman(Zeeman::new(split_field(mesh())).with_profile(profile)).into();
        system.m = Some(VectorField::uniform(mesh(), [1.0, 1.0, 1.0]).set_norm(MS));
        time_drive(calc, &mut system);
    }

    calc.delete(&system).expect("delete failed");
}
