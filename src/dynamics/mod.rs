// src/dynamics/mod.rs
//
// Dynamics terms and their container: the additive contributions to the
// equation-of-motion right-hand side.

pub mod damping;
pub mod precession;
pub mod slonczewski;
pub mod zhangli;

use std::ops::{Add, AddAssign, SubAssign};

pub use damping::Damping;
pub use precession::Precession;
pub use slonczewski::Slonczewski;
pub use zhangli::ZhangLi;

#[derive(Debug, Clone)]
pub enum DynamicsTerm {
    Precession(Precession),
    Damping(Damping),
    ZhangLi(ZhangLi),
    Slonczewski(Slonczewski),
}

impl DynamicsTerm {
    pub fn name(&self) -> &str {
        match self {
            DynamicsTerm::Precession(t) => &t.name,
            DynamicsTerm::Damping(t) => &t.name,
            DynamicsTerm::ZhangLi(t) => &t.name,
            DynamicsTerm::Slonczewski(t) => &t.name,
        }
    }
}

/// Sum of dynamics terms. Composed with `+` / `+=`; `-=` removes terms by
/// name.
#[derive(Debug, Clone, Default)]
pub struct Dynamics {
    pub terms: Vec<DynamicsTerm>,
}

impl Dynamics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DynamicsTerm> {
        self.terms.iter()
    }

    pub fn precession(&self) -> Option<&Precession> {
        self.terms.iter().find_map(|t| match t {
            DynamicsTerm::Precession(p) => Some(p),
            _ => None,
        })
    }

    pub fn damping(&self) -> Option<&Damping> {
        self.terms.iter().find_map(|t| match t {
            DynamicsTerm::Damping(d) => Some(d),
            _ => None,
        })
    }
}

impl From<DynamicsTerm> for Dynamics {
    fn from(term: DynamicsTerm) -> Self {
        Self { terms: vec![term] }
    }
}

impl Add for DynamicsTerm {
    type Output = Dynamics;

    fn add(self, rhs: DynamicsTerm) -> Dynamics {
        Dynamics {
            terms: vec![self, rhs],
        }
    }
}

impl Add<DynamicsTerm> for Dynamics {
    type Output = Dynamics;

    fn add(mut self, rhs: DynamicsTerm) -> Dynamics {
        self.terms.push(rhs);
        self
    }
}

impl AddAssign<DynamicsTerm> for Dynamics {
    fn add_assign(&mut self, rhs: DynamicsTerm) {
        self.terms.push(rhs);
    }
}

impl SubAssign<DynamicsTerm> for Dynamics {
    fn sub_assign(&mut self, rhs: DynamicsTerm) {
        let name = rhs.name().to_owned();
        self.terms.retain(|t| t.name() != name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_removal_by_name() {
        let mut d = DynamicsTerm::Precession(Precession::new(crate::consts::GAMMA0))
            + DynamicsTerm::Damping(Damping::new(0.1));
        d += DynamicsTerm::ZhangLi(ZhangLi::new(5e6, 0.01));
        assert_eq!(d.terms.len(), 3);

        d -= DynamicsTerm::ZhangLi(ZhangLi::new(0.0, 0.5));
        assert_eq!(d.terms.len(), 2);
        assert!(d.precession().is_some());
        assert!(d.damping().is_some());
    }
}
