// src/energy/anisotropy.rs
//
// Magnetocrystalline anisotropy terms.
//
// Uniaxial, w = -K1 (m.u)^2 - K2 (m.u)^4:
//   B_ani = (2 K1 / Ms) (m.u) u + (4 K2 / Ms) (m.u)^3 u
//
// Cubic, w = K1 (a1^2 a2^2 + a2^2 a3^2 + a3^2 a1^2), a_i = m.u_i:
//   B_cub = -(2 K1 / Ms) [a1 (a2^2 + a3^2) u1 + a2 (a3^2 + a1^2) u2
//                         + a3 (a1^2 + a2^2) u3]

use crate::mesh::Mesh;
use crate::param::{Param, VectorParam};
use crate::vec3;

#[derive(Debug, Clone)]
pub struct UniaxialAnisotropy {
    pub k1: Param,
    pub k2: Param,
    pub u: VectorParam,
    pub name: String,
}

impl UniaxialAnisotropy {
    pub fn new(k1: impl Into<Param>, u: impl Into<VectorParam>) -> Self {
        Self {
            k1: k1.into(),
            k2: Param::Scalar(0.0),
            u: u.into(),
            name: "uniaxialanisotropy".to_owned(),
        }
    }

    pub fn with_k2(mut self, k2: impl Into<Param>) -> Self {
        self.k2 = k2.into();
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

pub fn add_uniaxial_field(
    term: &UniaxialAnisotropy,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    b_eff: &mut [[f64; 3]],
) {
    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let k1 = term.k1.at(mesh, idx);
        let k2 = term.k2.at(mesh, idx);
        if k1 == 0.0 && k2 == 0.0 {
            continue;
        }
        let u = vec3::normalize(term.u.at(mesh, idx));
        let mdotu = vec3::dot(m[idx], u);
        let coeff = (2.0 * k1 * mdotu + 4.0 * k2 * mdotu.powi(3)) / ms[idx];
        for e in 0..3 {
            b_eff[idx][e] += coeff * u[e];
        }
    }
}

pub fn add_uniaxial_density(
    term: &UniaxialAnisotropy,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    out: &mut [f64],
) {
    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let k1 = term.k1.at(mesh, idx);
        let k2 = term.k2.at(mesh, idx);
        let u = vec3::normalize(term.u.at(mesh, idx));
        let mdotu = vec3::dot(m[idx], u);
        out[idx] += -k1 * mdotu * mdotu - k2 * mdotu.powi(4);
    }
}

#[derive(Debug, Clone)]
pub struct CubicAnisotropy {
    pub k1: Param,
    pub u1: VectorParam,
    pub u2: VectorParam,
    pub name: String,
}

impl CubicAnisotropy {
    pub fn new(
        k1: impl Into<Param>,
        u1: impl Into<VectorParam>,
        u2: impl Into<VectorParam>,
    ) -> Self {
        Self {
            k1: k1.into(),
            u1: u1.into(),
            u2: u2.into(),
            name: "cubicanisotropy".to_owned(),
        }
    }
}

fn cubic_axes(term: &CubicAnisotropy, mesh: &Mesh, idx: usize) -> [[f64; 3]; 3] {
    let u1 = vec3::normalize(term.u1.at(mesh, idx));
    let u2 = vec3::normalize(term.u2.at(mesh, idx));
    let u3 = vec3::normalize(vec3::cross(u1, u2));
    [u1, u2, u3]
}

pub fn add_cubic_field(
    term: &CubicAnisotropy,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    b_eff: &mut [[f64; 3]],
) {
    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let k1 = term.k1.at(mesh, idx);
        if k1 == 0.0 {
            continue;
        }
        let axes = cubic_axes(term, mesh, idx);
        let a: Vec<f64> = axes.iter().map(|u| vec3::dot(m[idx], *u)).collect();
        let c = -2.0 * k1 / ms[idx];
        let factors = [
            a[0] * (a[1] * a[1] + a[2] * a[2]),
            a[1] * (a[2] * a[2] + a[0] * a[0]),
            a[2] * (a[0] * a[0] + a[1] * a[1]),
        ];
        for (u, f) in axes.iter().zip(factors) {
            for e in 0..3 {
                b_eff[idx][e] += c * f * u[e];
            }
        }
    }
}

pub fn add_cubic_density(
    term: &CubicAnisotropy,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    out: &mut [f64],
) {
    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let k1 = term.k1.at(mesh, idx);
        let axes = cubic_axes(term, mesh, idx);
        let a: Vec<f64> = axes.iter().map(|u| vec3::dot(m[idx], *u)).collect();
        out[idx] +=
            k1 * (a[0] * a[0] * a[1] * a[1] + a[1] * a[1] * a[2] * a[2] + a[2] * a[2] * a[0] * a[0]);
    }
}
