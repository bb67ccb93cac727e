// src/dynamics/damping.rs

use crate::param::Param;

/// Gilbert damping term of the LLG equation.
///
///   dm/dt = -alpha gamma0 / ((1 + alpha^2) mu0) m x (m x B_eff)
#[derive(Debug, Clone)]
pub struct Damping {
    pub alpha: Param,
    pub name: String,
}

impl Damping {
    pub fn new(alpha: impl Into<Param>) -> Self {
        Self {
            alpha: alpha.into(),
            name: "damping".to_owned(),
        }
    }
}
