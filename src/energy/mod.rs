// src/energy/mod.rs
//
// Energy terms and their container. Every term contributes to the
// effective induction B_eff (Tesla) and to the energy density (J/m^3);
// the per-term maths lives in the submodules.

pub mod anisotropy;
pub mod demag;
pub mod dmi;
pub mod exchange;
pub mod rkky;
pub mod zeeman;

use std::ops::{Add, AddAssign, SubAssign};

pub use anisotropy::{CubicAnisotropy, UniaxialAnisotropy};
pub use demag::Demag;
pub use dmi::{CrystalClass, Dmi};
pub use exchange::Exchange;
pub use rkky::Rkky;
pub use zeeman::Zeeman;

#[derive(Debug, Clone)]
pub enum EnergyTerm {
    Exchange(Exchange),
    Zeeman(Zeeman),
    Demag(Demag),
    Dmi(Dmi),
    UniaxialAnisotropy(UniaxialAnisotropy),
    CubicAnisotropy(CubicAnisotropy),
    Rkky(Rkky),
}

impl EnergyTerm {
    /// Term instance name, used for table columns and term lookup.
    pub fn name(&self) -> &str {
        match self {
            EnergyTerm::Exchange(t) => &t.name,
            EnergyTerm::Zeeman(t) => &t.name,
            EnergyTerm::Demag(t) => &t.name,
            EnergyTerm::Dmi(t) => &t.name,
            EnergyTerm::UniaxialAnisotropy(t) => &t.name,
            EnergyTerm::CubicAnisotropy(t) => &t.name,
            EnergyTerm::Rkky(t) => &t.name,
        }
    }
}

/// Sum of energy terms. Composed with `+` / `+=`; `-=` removes terms by
/// name.
#[derive(Debug, Clone, Default)]
pub struct Energy {
    pub terms: Vec<EnergyTerm>,
}

impl Energy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnergyTerm> {
        self.terms.iter()
    }

    pub fn get(&self, name: &str) -> Option<&EnergyTerm> {
        self.terms.iter().find(|t| t.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EnergyTerm> {
        self.terms.iter_mut().find(|t| t.name() == name)
    }

    pub fn has_exchange(&self) -> bool {
        self.terms
            .iter()
            .any(|t| matches!(t, EnergyTerm::Exchange(_)))
    }

    pub fn has_dmi(&self) -> bool {
        self.terms.iter().any(|t| matches!(t, EnergyTerm::Dmi(_)))
    }
}

impl From<EnergyTerm> for Energy {
    fn from(term: EnergyTerm) -> Self {
        Self { terms: vec![term] }
    }
}

impl Add for EnergyTerm {
    type Output = Energy;

    fn add(self, rhs: EnergyTerm) -> Energy {
        Energy {
            terms: vec![self, rhs],
        }
    }
}

impl Add<EnergyTerm> for Energy {
    type Output = Energy;

    fn add(mut self, rhs: EnergyTerm) -> Energy {
        self.terms.push(rhs);
        self
    }
}

impl AddAssign<EnergyTerm> for Energy {
    fn add_assign(&mut self, rhs: EnergyTerm) {
        self.terms.push(rhs);
    }
}

impl SubAssign<EnergyTerm> for Energy {
    fn sub_assign(&mut self, rhs: EnergyTerm) {
        let name = rhs.name().to_owned();
        self.terms.retain(|t| t.name() != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Param;

    #[test]
    fn container_algebra() {
        let mut e = EnergyTerm::Exchange(Exchange::new(1e-12))
            + EnergyTerm::Zeeman(Zeeman::new([0.0, 0.0, 1e6]));
        assert_eq!(e.terms.len(), 2);
        assert!(e.has_exchange());
        assert!(e.get("zeeman").is_some());

        e -= EnergyTerm::Exchange(Exchange::new(0.0));
        assert!(!e.has_exchange());
        assert_eq!(e.terms.len(), 1);

        e += EnergyTerm::Dmi(Dmi::new(Param::Scalar(1e-3), CrystalClass::CnvZ));
        assert!(e.has_dmi());
    }
}
