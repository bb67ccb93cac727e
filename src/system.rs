// src/system.rs
//
// A `System` bundles everything a calculator needs to drive a problem:
// the magnetisation state, the energy equation, the dynamics equation, an
// optional temperature, and bookkeeping for consecutive drives.

use crate::consts::GAMMA0;
use crate::dynamics::{Damping, Dynamics, DynamicsTerm, Precession};
use crate::energy::{Energy, EnergyTerm, Zeeman};
use crate::field::VectorField;
use crate::mesh::Mesh;
use crate::region::Region;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct System {
    pub name: String,
    pub energy: Energy,
    pub dynamics: Dynamics,
    /// Magnetisation (A/m); must be set before driving.
    pub m: Option<VectorField>,
    /// Temperature (K). Non-zero temperatures require a thermal evolver.
    pub temperature: f64,
    /// Index of the next drive directory.
    pub drive_number: usize,
    /// Table recorded by the most recent drive.
    pub table: Option<Table>,
}

impl System {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            energy: Energy::new(),
            dynamics: Dynamics::new(),
            m: None,
            temperature: 0.0,
            drive_number: 0,
            table: None,
        }
    }

    /// Magnetisation accessor for assertion code. Panics if unset.
    pub fn m(&self) -> &VectorField {
        self.m.as_ref().expect("system magnetisation is not set")
    }
}

/// A single-cell example system: uniform field along +z, slightly tilted
/// initial magnetisation, standard precession + damping dynamics.
pub fn macrospin() -> System {
    let region = Region::new([0.0; 3], [5e-9, 5e-9, 5e-9]);
    let mesh = Mesh::with_n(region, [1, 1, 1]).expect("static macrospin mesh is valid");

    let mut system = System::new("macrospin");
    system.energy = EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6])).into();
    system.dynamics = DynamicsTerm::Precession(Precession::new(GAMMA0))
        + DynamicsTerm::Damping(Damping::new(0.1));
    system.m = Some(VectorField::uniform(mesh, [0.0, 0.1, 1.0]).set_norm(1e6));
    system
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macrospin_is_complete() {
        let s = macrospin();
        assert!(!s.energy.is_empty());
        assert!(!s.dynamics.is_empty());
        assert_eq!(s.m().mesh.n_cells(), 1);
        assert_eq!(s.drive_number, 0);
        let m = s.m().data[0];
        let norm = (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt();
        assert!((norm - 1e6).abs() < 1e-3);
    }
}
