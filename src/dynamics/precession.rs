// src/dynamics/precession.rs

use crate::param::Param;

/// Precession term of the LLG equation.
///
///   dm/dt = -gamma0 / ((1 + alpha^2) mu0) m x B_eff
#[derive(Debug, Clone)]
pub struct Precession {
    /// gamma0 = mu0 gamma_e (m / A s).
    pub gamma0: Param,
    pub name: String,
}

impl Precession {
    pub fn new(gamma0: impl Into<Param>) -> Self {
        Self {
            gamma0: gamma0.into(),
            name: "precession".to_owned(),
        }
    }
}
