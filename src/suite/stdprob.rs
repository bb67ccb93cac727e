// src/suite/stdprob.rs
//
// Standard problem 5: a relaxed vortex in a 100 nm square driven by a
// Zhang-Li current. The average in-plane magnetisation oscillates as the
// vortex core gyrates towards its new equilibrium.
//
// This is by far the most expensive case (demagnetisation on a 20x20x2
// mesh over 8 ns) and is sensitive to the integrator settings; run it
// explicitly, the harness keeps it out of the default set.

use crate::calculator::Calculator;
use crate::consts::GAMMA0;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Precession, ZhangLi};
use crate::energy::{Demag, EnergyTerm, Exchange};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::System;

use super::util::minimize;

pub fn test_stdprob5(calc: &impl Calculator) {
    // geometry (m)
    let (lx, ly, lz) = (100e-9, 100e-9, 10e-9);

    // permalloy
    let ms = 8e5;
    let a = 1.3e-11;

    // dynamics parameters
    let alpha = 0.1;
    let ux = -72.35;
    let beta = 0.05;

    let region = Region::new([0.0; 3], [lx, ly, lz]);
    let mesh = Mesh::with_cell(region, [5e-9; 3]).expect("static mesh is valid");

    let mut system = System::new("stdprob5");
    system.energy = EnergyTerm::Exchange(Exchange::new(a)) + EnergyTerm::Demag(Demag::new());

    // vortex seed centred in the square, core along +z
    system.m = Some(
        VectorField::from_fn(mesh, |p| {
            let x = p[0] / 1e-9 - 50.0;
            let y = p[1] / 1e-9 - 50.0;
            [-y, x, 10.0]
        })
        .set_norm(ms),
    );

    minimize(calc, &mut system);

    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(alpha))
        + DynamicsTerm::ZhangLi(ZhangLi::new([ux, 0.0, 0.0], beta));

    calc.drive_time(&mut system, &TimeDriver::new(), &TimeRun::new(8e-9, 100))
        .expect("time drive failed");

    let table = system.table.as_ref().expect("table recorded");
    let mx = table.column("mx").expect("mx column");
    let min = mx.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = mx.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    assert!((-0.35..-0.30).contains(&min), "mx minimum out of range: {min}");
    assert!((-0.03..0.0).contains(&max), "mx maximum out of range: {max}");

    calc.delete(&system).expect("delete failed");
}
