// src/dynamics/zhangli.rs
//
// Zhang-Li spin-transfer torque for in-plane current.
//
//   dm/dt = -(1 + alpha beta) / (1 + alpha^2) m x (m x (u . grad) m)
//           -(beta - alpha) / (1 + alpha^2) m x (u . grad) m
//
// u is the effective drift velocity (m/s); a plain number is a velocity
// along +x. The adiabatic limit (alpha = beta) advects the texture with
// velocity u.

use crate::param::{TimeProfile, VectorParam};

#[derive(Debug, Clone)]
pub struct ZhangLi {
    pub u: VectorParam,
    /// Non-adiabaticity.
    pub beta: f64,
    pub profile: Option<TimeProfile>,
    pub name: String,
}

impl ZhangLi {
    pub fn new(u: impl Into<VectorParam>, beta: f64) -> Self {
        Self {
            u: u.into(),
            beta,
            profile: None,
            name: "zhangli".to_owned(),
        }
    }

    pub fn with_profile(mut self, profile: TimeProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn factor(&self, t: f64) -> f64 {
        self.profile.map_or(1.0, |p| p.factor(t))
    }
}
