// src/field.rs
//
// Cell-wise scalar and vector fields on a mesh.
//
// Magnetisation is stored as full vectors (A/m); `set_norm` rescales each
// cell to the saturation magnitude. Cells with |m| = 0 represent vacuum and
// are left untouched by `set_norm` and by the solvers.

use crate::mesh::Mesh;
use crate::vec3;

#[derive(Debug, Clone)]
pub struct ScalarField {
    pub mesh: Mesh,
    pub data: Vec<f64>,
}

impl ScalarField {
    pub fn uniform(mesh: Mesh, value: f64) -> Self {
        let n = mesh.n_cells();
        Self {
            mesh,
            data: vec![value; n],
        }
    }

    /// Build from a function of the cell-centre position.
    pub fn from_fn(mesh: Mesh, f: impl Fn([f64; 3]) -> f64) -> Self {
        let mut data = Vec::with_capacity(mesh.n_cells());
        for k in 0..mesh.n[2] {
            for j in 0..mesh.n[1] {
                for i in 0..mesh.n[0] {
                    data.push(f(mesh.cell_center(i, j, k)));
                }
            }
        }
        Self { mesh, data }
    }

    /// Value in the cell containing `p`. `None` outside the mesh.
    pub fn value_at(&self, p: [f64; 3]) -> Option<f64> {
        self.mesh.cell_at(p).map(|idx| self.data[idx])
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}

#[derive(Debug, Clone)]
pub struct VectorField {
    pub mesh: Mesh,
    pub data: Vec<[f64; 3]>,
}

impl VectorField {
    pub fn uniform(mesh: Mesh, value: [f64; 3]) -> Self {
        let n = mesh.n_cells();
        Self {
            mesh,
            data: vec![value; n],
        }
    }

    /// Build from a function of the cell-centre position.
    pub fn from_fn(mesh: Mesh, f: impl Fn([f64; 3]) -> [f64; 3]) -> Self {
        let mut data = Vec::with_capacity(mesh.n_cells());
        for k in 0..mesh.n[2] {
            for j in 0..mesh.n[1] {
                for i in 0..mesh.n[0] {
                    data.push(f(mesh.cell_center(i, j, k)));
                }
            }
        }
        Self { mesh, data }
    }

    /// Random directions (uniform-ish on the sphere) using a simple
    /// xorshift RNG, so states are reproducible across runs.
    pub fn random(mesh: Mesh, seed: u64) -> Self {
        let mut rng = XorShift64::new(seed);
        let n = mesh.n_cells();
        let mut data = Vec::with_capacity(n);
        for _ in 0..n {
            let x = rng.next_f64() * 2.0 - 1.0;
            let y = rng.next_f64() * 2.0 - 1.0;
            let z = rng.next_f64() * 2.0 - 1.0;
            data.push(vec3::normalize([x, y, z]));
        }
        Self { mesh, data }
    }

    /// Rescale every non-zero cell to magnitude `norm`.
    pub fn set_norm(mut self, norm: f64) -> Self {
        for v in &mut self.data {
            let n = vec3::norm(*v);
            if n > 0.0 {
                *v = vec3::scale(*v, norm / n);
            }
        }
        self
    }

    /// Value in the cell containing `p`. `None` outside the mesh.
    pub fn value_at(&self, p: [f64; 3]) -> Option<[f64; 3]> {
        self.mesh.cell_at(p).map(|idx| self.data[idx])
    }

    /// Volume average over all cells.
    pub fn mean(&self) -> [f64; 3] {
        let mut acc = [0.0; 3];
        for v in &self.data {
            acc = vec3::add(acc, *v);
        }
        let n = self.data.len().max(1) as f64;
        vec3::scale(acc, 1.0 / n)
    }

    /// Average over the cells of a named subregion.
    pub fn region_mean(&self, subregion: &str) -> [f64; 3] {
        let cells = self.mesh.cells_in(subregion);
        let mut acc = [0.0; 3];
        for &idx in &cells {
            acc = vec3::add(acc, self.data[idx]);
        }
        let n = cells.len().max(1) as f64;
        vec3::scale(acc, 1.0 / n)
    }

    /// Per-cell unit directions (vacuum cells stay zero).
    pub fn orientation(&self) -> VectorField {
        VectorField {
            mesh: self.mesh.clone(),
            data: self.data.iter().map(|&v| vec3::normalize(v)).collect(),
        }
    }
}

/// Minimal xorshift64* generator; good enough for seeding test states.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    fn mesh() -> Mesh {
        let region = Region::new([0.0; 3], [4e-9, 2e-9, 1e-9]);
        Mesh::with_cell(region, [1e-9; 3]).unwrap()
    }

    #[test]
    fn set_norm_rescales_and_keeps_vacuum() {
        let m = VectorField::from_fn(mesh(), |p| {
            if p[0] < 2e-9 {
                [0.0, 0.0, 2.0]
            } else {
                [0.0; 3]
            }
        })
        .set_norm(1e6);
        assert_eq!(m.data[0], [0.0, 0.0, 1e6]);
        assert_eq!(m.data[3], [0.0; 3]);
    }

    #[test]
    fn value_at_picks_containing_cell() {
        let f = VectorField::from_fn(mesh(), |p| [p[0], 0.0, 0.0]);
        let v = f.value_at([3.2e-9, 0.1e-9, 0.5e-9]).unwrap();
        assert!((v[0] - 3.5e-9).abs() < 1e-18);
        assert!(f.value_at([5e-9, 0.0, 0.0]).is_none());
    }

    #[test]
    fn random_is_reproducible_and_unit() {
        let a = VectorField::random(mesh(), 7);
        let b = VectorField::random(mesh(), 7);
        assert_eq!(a.data, b.data);
        for v in &a.data {
            assert!((vec3::norm(*v) - 1.0).abs() < 1e-12);
        }
    }
}
