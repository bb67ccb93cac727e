// src/suite/threads.rs
//
// Worker-thread pass-through: the same drive with one and two threads
// reaches the same physics.

use crate::calculator::Calculator;
use crate::consts::GAMMA0;
use crate::driver::{TimeDriver, TimeRun};
use crate::dynamics::{Damping, DynamicsTerm, Precession};
use crate::energy::{EnergyTerm, Exchange, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::system::System;

use super::util::{assert_close, m_at};

const MS: f64 = 1e6;

pub fn test_threads(calc: &impl Calculator) {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [2, 2, 2]).expect("static mesh is valid");

    let mut system = System::new("threads");
    system.energy =
        EnergyTerm::Exchange(Exchange::new(1e-12)) + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(1.0));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.1, 1.0]).set_norm(MS));

    for n_threads in [1, 2] {
        let run = TimeRun {
            n_threads: Some(n_threads),
            ..TimeRun::new(0.2e-9, 50)
        };
        calc.drive_time(&mut system, &TimeDriver::new(), &run)
            .expect("time drive failed");

        assert_close(m_at(&system, region.center()), [0.0, 0.0, MS], 1.0);
    }

    calc.delete(&system).expect("delete failed");
}
