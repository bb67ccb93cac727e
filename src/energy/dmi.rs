// src/energy/dmi.rs
//
// Dzyaloshinskii-Moriya interaction.
//
// Bulk classes (T, O), w = D m . (curl m):
//   B_dmi = -(2 D / Ms) curl m
//
// Interfacial classes (Cnv_n, n the symmetry axis), for n = z:
//   w     = D [m_z (div m) - (m . grad) m_z]
//   B_dmi = (2 D / Ms) (d m_z/dx, d m_z/dy, -(d m_x/dx + d m_y/dy))
//
// D2d classes behave like the bulk form with the sign flipped on the two
// axes transverse to the symmetry axis.
//
// Derivatives use central differences in the interior and one-sided
// stencils at open boundaries.

use crate::calculator::DriveError;
use crate::mesh::Mesh;
use crate::param::Param;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrystalClass {
    CnvX,
    CnvY,
    CnvZ,
    T,
    O,
    D2dX,
    D2dY,
    D2dZ,
}

impl CrystalClass {
    /// Parse a crystal class name. `"Cnv"` and `"D2d"` are accepted as
    /// legacy aliases for the z variants.
    pub fn parse(s: &str) -> Result<Self, DriveError> {
        Ok(match s {
            "Cnv_x" => CrystalClass::CnvX,
            "Cnv_y" => CrystalClass::CnvY,
            "Cnv_z" | "Cnv" => CrystalClass::CnvZ,
            "T" => CrystalClass::T,
            "O" => CrystalClass::O,
            "D2d_x" => CrystalClass::D2dX,
            "D2d_y" => CrystalClass::D2dY,
            "D2d_z" | "D2d" => CrystalClass::D2dZ,
            other => {
                return Err(DriveError::InvalidValue(format!(
                    "unknown crystal class '{other}'"
                )))
            }
        })
    }

    /// Symmetry axis for the interfacial and D2d variants.
    fn axis(&self) -> usize {
        match self {
            CrystalClass::CnvX | CrystalClass::D2dX => 0,
            CrystalClass::CnvY | CrystalClass::D2dY => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dmi {
    pub d: Param,
    pub crystal_class: CrystalClass,
    pub name: String,
}

impl Dmi {
    pub fn new(d: impl Into<Param>, crystal_class: CrystalClass) -> Self {
        Self {
            d: d.into(),
            crystal_class,
            name: "dmi".to_owned(),
        }
    }
}

/// Central-difference derivative of component `e` of m along `axis`,
/// weighting each half-bond with the bond-resolved D so that D = 0
/// regions stay torque free.
fn ddm(
    term: &Dmi,
    mesh: &Mesh,
    m: &[[f64; 3]],
    ms: &[f64],
    idx: usize,
    axis: usize,
    e: usize,
) -> f64 {
    let inv_2d = 1.0 / (2.0 * mesh.cell[axis]);
    let mut acc = 0.0;
    for step in [-1isize, 1] {
        if let Some(nb) = mesh.neighbor(idx, axis, step) {
            if ms[nb] != 0.0 && term.d.bond(mesh, idx, nb) != 0.0 {
                acc += step as f64 * (m[nb][e] - m[idx][e]) * inv_2d;
            }
        }
    }
    acc
}

pub fn add_field(term: &Dmi, mesh: &Mesh, m: &[[f64; 3]], ms: &[f64], b_eff: &mut [[f64; 3]]) {
    let axis = term.crystal_class.axis();
    // the two in-plane axes for the interfacial / D2d forms
    let p = (axis + 1) % 3;
    let q = (axis + 2) % 3;

    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let d = term.d.at(mesh, idx);
        if d == 0.0 {
            continue;
        }
        let c = 2.0 * d / ms[idx];

        match term.crystal_class {
            CrystalClass::T | CrystalClass::O => {
                // B = -(2D/Ms) curl m
                let curl = [
                    ddm(term, mesh, m, ms, idx, 1, 2) - ddm(term, mesh, m, ms, idx, 2, 1),
                    ddm(term, mesh, m, ms, idx, 2, 0) - ddm(term, mesh, m, ms, idx, 0, 2),
                    ddm(term, mesh, m, ms, idx, 0, 1) - ddm(term, mesh, m, ms, idx, 1, 0),
                ];
                for e in 0..3 {
                    b_eff[idx][e] -= c * curl[e];
                }
            }
            CrystalClass::CnvX | CrystalClass::CnvY | CrystalClass::CnvZ => {
                b_eff[idx][p] += c * ddm(term, mesh, m, ms, idx, p, axis);
                b_eff[idx][q] += c * ddm(term, mesh, m, ms, idx, q, axis);
                b_eff[idx][axis] -= c
                    * (ddm(term, mesh, m, ms, idx, p, p) + ddm(term, mesh, m, ms, idx, q, q));
            }
            CrystalClass::D2dX | CrystalClass::D2dY | CrystalClass::D2dZ => {
                // curl-like with opposite handedness on the two transverse axes
                let mut curl = [0.0; 3];
                curl[axis] =
                    ddm(term, mesh, m, ms, idx, p, q) - ddm(term, mesh, m, ms, idx, q, p);
                curl[p] = ddm(term, mesh, m, ms, idx, q, axis)
                    - ddm(term, mesh, m, ms, idx, axis, q);
                curl[q] = ddm(term, mesh, m, ms, idx, axis, p)
                    - ddm(term, mesh, m, ms, idx, p, axis);
                b_eff[idx][axis] -= c * curl[axis];
                b_eff[idx][p] += c * curl[p];
                b_eff[idx][q] += c * curl[q];
            }
        }
    }
}

pub fn add_density(term: &Dmi, mesh: &Mesh, m: &[[f64; 3]], ms: &[f64], out: &mut [f64]) {
    let axis = term.crystal_class.axis();
    let p = (axis + 1) % 3;
    let q = (axis + 2) % 3;

    for idx in 0..mesh.n_cells() {
        if ms[idx] == 0.0 {
            continue;
        }
        let d = term.d.at(mesh, idx);
        if d == 0.0 {
            continue;
        }

        match term.crystal_class {
            CrystalClass::T | CrystalClass::O | CrystalClass::D2dX | CrystalClass::D2dY
            | CrystalClass::D2dZ => {
                let curl = [
                    ddm(term, mesh, m, ms, idx, 1, 2) - ddm(term, mesh, m, ms, idx, 2, 1),
                    ddm(term, mesh, m, ms, idx, 2, 0) - ddm(term, mesh, m, ms, idx, 0, 2),
                    ddm(term, mesh, m, ms, idx, 0, 1) - ddm(term, mesh, m, ms, idx, 1, 0),
                ];
                out[idx] +=
                    d * (m[idx][0] * curl[0] + m[idx][1] * curl[1] + m[idx][2] * curl[2]);
            }
            CrystalClass::CnvX | CrystalClass::CnvY | CrystalClass::CnvZ => {
                let div_inplane =
                    ddm(term, mesh, m, ms, idx, p, p) + ddm(term, mesh, m, ms, idx, q, q);
                let grad_mn = m[idx][p] * ddm(term, mesh, m, ms, idx, p, axis)
                    + m[idx][q] * ddm(term, mesh, m, ms, idx, q, axis);
                out[idx] += d * (m[idx][axis] * div_inplane - grad_mn);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crystal_class_names() {
        assert_eq!(CrystalClass::parse("Cnv").unwrap(), CrystalClass::CnvZ);
        assert_eq!(CrystalClass::parse("D2d").unwrap(), CrystalClass::D2dZ);
        assert_eq!(CrystalClass::parse("T").unwrap(), CrystalClass::T);
        assert!(CrystalClass::parse("Td").is_err());
    }
}
