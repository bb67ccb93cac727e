// src/dynamics/slonczewski.rs
//
// Slonczewski spin-transfer torque for perpendicular current injection.
//
//   dm/dt = -gamma_LL a_j [eps m x (m x mp) + eps' m x mp]
//
//   a_j  = hbar |J| / (2 e Ms d)        (d: free-layer thickness, taken as
//                                        the cell height)
//   eps  = P Lambda^2 / ((Lambda^2 + 1) + (Lambda^2 - 1) (m . mp))

use crate::param::{Param, TimeProfile, VectorParam};

#[derive(Debug, Clone)]
pub struct Slonczewski {
    /// Current density J (A/m^2).
    pub j: Param,
    /// Fixed-layer polarisation direction.
    pub mp: VectorParam,
    /// Spin polarisation P.
    pub p: Param,
    /// Slonczewski Lambda parameter.
    pub lambda: Param,
    /// Secondary (field-like) torque strength.
    pub eps_prime: Param,
    pub profile: Option<TimeProfile>,
    pub name: String,
}

impl Slonczewski {
    pub fn new(
        j: impl Into<Param>,
        mp: impl Into<VectorParam>,
        p: impl Into<Param>,
        lambda: impl Into<Param>,
    ) -> Self {
        Self {
            j: j.into(),
            mp: mp.into(),
            p: p.into(),
            lambda: lambda.into(),
            eps_prime: Param::Scalar(0.0),
            profile: None,
            name: "slonczewski".to_owned(),
        }
    }

    pub fn with_eps_prime(mut self, eps_prime: impl Into<Param>) -> Self {
        self.eps_prime = eps_prime.into();
        self
    }

    pub fn with_profile(mut self, profile: TimeProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn factor(&self, t: f64) -> f64 {
        self.profile.map_or(1.0, |p| p.factor(t))
    }
}
