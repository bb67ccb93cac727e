// src/param.rs
//
// Parameter kinds shared by energy and dynamics terms. Every material
// parameter can be given as a single value, as a per-subregion map, or as a
// cell-resolved field. Region maps may carry a "default" entry and "a:b"
// interface entries, used on bonds crossing a subregion boundary
// (exchange and DMI coupling).

use std::collections::BTreeMap;

use crate::field::{ScalarField, VectorField};
use crate::mesh::Mesh;

/// Scalar-valued parameter.
#[derive(Debug, Clone)]
pub enum Param {
    Scalar(f64),
    Regions(BTreeMap<String, f64>),
    Field(ScalarField),
}

impl Param {
    pub fn regions<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Param::Regions(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Value in a given cell.
    pub fn at(&self, mesh: &Mesh, cell: usize) -> f64 {
        match self {
            Param::Scalar(v) => *v,
            Param::Regions(map) => {
                if let Some(name) = mesh.subregion_of(cell) {
                    if let Some(v) = map.get(name) {
                        return *v;
                    }
                }
                map.get("default").copied().unwrap_or(0.0)
            }
            Param::Field(f) => f.data[cell],
        }
    }

    /// Value on the bond between two neighbouring cells. Within one
    /// subregion this is the cell value; across a boundary the "a:b"
    /// interface entry wins, then "default", then the bond average.
    pub fn bond(&self, mesh: &Mesh, a: usize, b: usize) -> f64 {
        if let Param::Regions(map) = self {
            let ra = mesh.subregion_of(a);
            let rb = mesh.subregion_of(b);
            if ra != rb {
                if let (Some(ra), Some(rb)) = (ra, rb) {
                    let key = format!("{ra}:{rb}");
                    if let Some(v) = map.get(&key) {
                        return *v;
                    }
                    let key = format!("{rb}:{ra}");
                    if let Some(v) = map.get(&key) {
                        return *v;
                    }
                }
                if let Some(v) = map.get("default") {
                    return *v;
                }
            }
        }
        0.5 * (self.at(mesh, a) + self.at(mesh, b))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Scalar(v)
    }
}

impl From<ScalarField> for Param {
    fn from(f: ScalarField) -> Self {
        Param::Field(f)
    }
}

/// Vector-valued parameter.
#[derive(Debug, Clone)]
pub enum VectorParam {
    Vector([f64; 3]),
    Regions(BTreeMap<String, [f64; 3]>),
    Field(VectorField),
}

impl VectorParam {
    pub fn regions<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, [f64; 3])>,
        S: Into<String>,
    {
        VectorParam::Regions(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn at(&self, mesh: &Mesh, cell: usize) -> [f64; 3] {
        match self {
            VectorParam::Vector(v) => *v,
            VectorParam::Regions(map) => {
                if let Some(name) = mesh.subregion_of(cell) {
                    if let Some(v) = map.get(name) {
                        return *v;
                    }
                }
                map.get("default").copied().unwrap_or([0.0; 3])
            }
            VectorParam::Field(f) => f.data[cell],
        }
    }

    /// Mesh average, used for table columns of spatially varying
    /// excitations.
    pub fn mean(&self, mesh: &Mesh) -> [f64; 3] {
        match self {
            VectorParam::Vector(v) => *v,
            VectorParam::Field(f) => f.mean(),
            VectorParam::Regions(_) => {
                let n = mesh.n_cells();
                let mut acc = [0.0; 3];
                for cell in 0..n {
                    let v = self.at(mesh, cell);
                    acc[0] += v[0];
                    acc[1] += v[1];
                    acc[2] += v[2];
                }
                let inv = 1.0 / n.max(1) as f64;
                [acc[0] * inv, acc[1] * inv, acc[2] * inv]
            }
        }
    }
}

impl From<[f64; 3]> for VectorParam {
    fn from(v: [f64; 3]) -> Self {
        VectorParam::Vector(v)
    }
}

/// A plain number is interpreted as a velocity along +x (the convention
/// used by current-driven dynamics terms).
impl From<f64> for VectorParam {
    fn from(v: f64) -> Self {
        VectorParam::Vector([v, 0.0, 0.0])
    }
}

impl From<VectorField> for VectorParam {
    fn from(f: VectorField) -> Self {
        VectorParam::Field(f)
    }
}

/// Time dependence of an excitation term. The factor multiplies the
/// term's static amplitude.
#[derive(Debug, Clone, Copy)]
pub enum TimeProfile {
    /// sin(2 pi f (t - t0))
    Sin { f: f64, t0: f64 },
    /// sinc(2 pi f (t - t0)), with sinc(0) = 1
    Sinc { f: f64, t0: f64 },
    /// Arbitrary factor sampled every `dt`.
    Custom { f: fn(f64) -> f64, dt: f64 },
}

impl TimeProfile {
    pub fn factor(&self, t: f64) -> f64 {
        match self {
            TimeProfile::Sin { f, t0 } => (2.0 * std::f64::consts::PI * f * (t - t0)).sin(),
            TimeProfile::Sinc { f, t0 } => {
                let x = 2.0 * std::f64::consts::PI * f * (t - t0);
                if x.abs() < 1e-12 {
                    1.0
                } else {
                    x.sin() / x
                }
            }
            TimeProfile::Custom { f, .. } => f(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn two_region_mesh() -> Mesh {
        let region = Region::new([0.0; 3], [2e-9, 2e-9, 1e-9]);
        Mesh::with_cell(region, [1e-9; 3]).unwrap().subregions([
            ("r1", Region::new([0.0; 3], [2e-9, 1e-9, 1e-9])),
            ("r2", Region::new([0.0, 1e-9, 0.0], [2e-9, 2e-9, 1e-9])),
        ])
    }

    #[test]
    fn region_lookup_with_default() {
        let mesh = two_region_mesh();
        let p = Param::regions([("r2", 2.0), ("default", 5.0)]);
        // cell 0 is in r1 (no entry) -> default; cell 2 is in r2
        assert_eq!(p.at(&mesh, 0), 5.0);
        assert_eq!(p.at(&mesh, 2), 2.0);
    }

    #[test]
    fn interface_entry_wins_on_cross_bonds() {
        let mesh = two_region_mesh();
        let p = Param::regions([("r1", 1.0), ("r2", 3.0), ("r1:r2", 7.0)]);
        // cells 0 (r1) and 2 (r2) are y-neighbours
        assert_eq!(p.bond(&mesh, 0, 2), 7.0);
        assert_eq!(p.bond(&mesh, 0, 1), 1.0);
    }

    #[test]
    fn sinc_peak_is_one() {
        let p = TimeProfile::Sinc { f: 1e9, t0: 0.0 };
        assert!((p.factor(0.0) - 1.0).abs() < 1e-12);
        assert!(p.factor(1e-9).abs() < 1e-12);
    }
}
