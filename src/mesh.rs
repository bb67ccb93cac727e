// src/mesh.rs
//
// Finite-difference mesh over a cuboid region: cell discretisation,
// optional periodic boundaries and named subregions.

use std::collections::BTreeMap;

use crate::calculator::DriveError;
use crate::region::Region;

/// Periodic boundary flags per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pbc {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Pbc {
    /// Parse axis letters, e.g. `"x"`, `"xy"`, `"xyz"`.
    pub fn parse(s: &str) -> Result<Self, DriveError> {
        let mut pbc = Self::default();
        for c in s.chars() {
            match c {
                'x' => pbc.x = true,
                'y' => pbc.y = true,
                'z' => pbc.z = true,
                _ => {
                    return Err(DriveError::InvalidValue(format!(
                        "unknown periodic boundary axis '{c}'"
                    )))
                }
            }
        }
        Ok(pbc)
    }

    pub fn along(&self, axis: usize) -> bool {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

/// Finite-difference mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub region: Region,
    /// Number of cells along x, y, z.
    pub n: [usize; 3],
    /// Cell edge lengths (m).
    pub cell: [f64; 3],
    pub pbc: Pbc,
    pub subregions: BTreeMap<String, Region>,
}

impl Mesh {
    /// Discretise a region with a given cell size. The cell must tile the
    /// region edges within a small relative tolerance.
    pub fn with_cell(region: Region, cell: [f64; 3]) -> Result<Self, DriveError> {
        let edges = region.edges();
        let mut n = [0usize; 3];
        for d in 0..3 {
            if cell[d] <= 0.0 {
                return Err(DriveError::InvalidValue(format!(
                    "cell edge {} must be positive, got {}",
                    d, cell[d]
                )));
            }
            let ratio = edges[d] / cell[d];
            let rounded = ratio.round();
            if rounded < 1.0 || (ratio - rounded).abs() > 1e-9 * ratio.max(1.0) {
                return Err(DriveError::InvalidValue(format!(
                    "cell size {} does not tile region edge {} along axis {}",
                    cell[d], edges[d], d
                )));
            }
            n[d] = rounded as usize;
        }
        Ok(Self {
            region,
            n,
            cell,
            pbc: Pbc::default(),
            subregions: BTreeMap::new(),
        })
    }

    /// Discretise a region with a given number of cells per axis.
    pub fn with_n(region: Region, n: [usize; 3]) -> Result<Self, DriveError> {
        let edges = region.edges();
        let mut cell = [0.0; 3];
        for d in 0..3 {
            if n[d] == 0 {
                return Err(DriveError::InvalidValue(format!(
                    "cell count along axis {d} must be at least 1"
                )));
            }
            cell[d] = edges[d] / n[d] as f64;
        }
        Ok(Self {
            region,
            n,
            cell,
            pbc: Pbc::default(),
            subregions: BTreeMap::new(),
        })
    }

    pub fn pbc(mut self, pbc: Pbc) -> Self {
        self.pbc = pbc;
        self
    }

    pub fn subregions<I, S>(mut self, subregions: I) -> Self
    where
        I: IntoIterator<Item = (S, Region)>,
        S: Into<String>,
    {
        self.subregions = subregions
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        self
    }

    pub fn n_cells(&self) -> usize {
        self.n[0] * self.n[1] * self.n[2]
    }

    pub fn cell_volume(&self) -> f64 {
        self.cell[0] * self.cell[1] * self.cell[2]
    }

    /// Convert (i, j, k) indices to a flat index (x fastest, then y, then z).
    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.n[0] && j < self.n[1] && k < self.n[2]);
        (k * self.n[1] + j) * self.n[0] + i
    }

    /// Invert a flat index to (i, j, k).
    #[inline]
    pub fn coords(&self, idx: usize) -> [usize; 3] {
        let i = idx % self.n[0];
        let j = (idx / self.n[0]) % self.n[1];
        let k = idx / (self.n[0] * self.n[1]);
        [i, j, k]
    }

    /// Centre of cell (i, j, k) in metres.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        [
            self.region.p1[0] + (i as f64 + 0.5) * self.cell[0],
            self.region.p1[1] + (j as f64 + 0.5) * self.cell[1],
            self.region.p1[2] + (k as f64 + 0.5) * self.cell[2],
        ]
    }

    /// Flat index of the cell containing a point, if inside the mesh.
    /// Points on the upper faces resolve to the last cell.
    pub fn cell_at(&self, p: [f64; 3]) -> Option<usize> {
        let mut ijk = [0usize; 3];
        for d in 0..3 {
            let rel = (p[d] - self.region.p1[d]) / self.cell[d];
            if rel < 0.0 {
                return None;
            }
            let mut i = rel.floor() as usize;
            if i >= self.n[d] {
                let on_face = (p[d] - self.region.p2[d]).abs() <= 1e-9 * self.cell[d];
                if i == self.n[d] && on_face {
                    i = self.n[d] - 1;
                } else {
                    return None;
                }
            }
            ijk[d] = i;
        }
        Some(self.idx(ijk[0], ijk[1], ijk[2]))
    }

    /// Name of the subregion containing the given cell centre, if any.
    /// Subregions are assumed non-overlapping; the first (alphabetical)
    /// match wins.
    pub fn subregion_of(&self, cell: usize) -> Option<&str> {
        let [i, j, k] = self.coords(cell);
        let c = self.cell_center(i, j, k);
        self.subregions
            .iter()
            .find(|(_, r)| r.contains(c))
            .map(|(name, _)| name.as_str())
    }

    /// Flat indices of all cells whose centre lies in the named subregion.
    pub fn cells_in(&self, subregion: &str) -> Vec<usize> {
        let Some(region) = self.subregions.get(subregion) else {
            return Vec::new();
        };
        (0..self.n_cells())
            .filter(|&idx| {
                let [i, j, k] = self.coords(idx);
                region.contains(self.cell_center(i, j, k))
            })
            .collect()
    }

    /// Index of the neighbour of `idx` one cell away along `axis` in
    /// direction `step` (+1/-1), respecting periodic wrapping. `None` at an
    /// open boundary.
    #[inline]
    pub fn neighbor(&self, idx: usize, axis: usize, step: isize) -> Option<usize> {
        let mut ijk = self.coords(idx);
        let n = self.n[axis];
        let pos = ijk[axis] as isize + step;
        let wrapped = if pos < 0 || pos >= n as isize {
            if !self.pbc.along(axis) {
                return None;
            }
            pos.rem_euclid(n as isize) as usize
        } else {
            pos as usize
        };
        ijk[axis] = wrapped;
        Some(self.idx(ijk[0], ijk[1], ijk[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_2x3x4() -> Mesh {
        let region = Region::new([0.0; 3], [2e-9, 3e-9, 4e-9]);
        Mesh::with_cell(region, [1e-9, 1e-9, 1e-9]).unwrap()
    }

    #[test]
    fn indexing_is_consistent() {
        let m = mesh_2x3x4();
        assert_eq!(m.n, [2, 3, 4]);
        assert_eq!(m.n_cells(), 24);
        assert_eq!(m.idx(0, 0, 0), 0);
        assert_eq!(m.idx(1, 0, 0), 1);
        assert_eq!(m.idx(0, 1, 0), 2);
        assert_eq!(m.idx(0, 0, 1), 6);
        assert_eq!(m.coords(m.idx(1, 2, 3)), [1, 2, 3]);
    }

    #[test]
    fn cell_lookup_round_trips() {
        let m = mesh_2x3x4();
        let idx = m.idx(1, 2, 0);
        let c = m.cell_center(1, 2, 0);
        assert_eq!(m.cell_at(c), Some(idx));
        assert_eq!(m.cell_at([-1e-9, 0.0, 0.0]), None);
    }

    #[test]
    fn invalid_cell_size_is_rejected() {
        let region = Region::new([0.0; 3], [2e-9, 3e-9, 4e-9]);
        assert!(Mesh::with_cell(region, [0.7e-9, 1e-9, 1e-9]).is_err());
    }

    #[test]
    fn neighbor_respects_pbc() {
        let m = mesh_2x3x4();
        assert_eq!(m.neighbor(0, 0, -1), None);
        let p = mesh_2x3x4().pbc(Pbc::parse("x").unwrap());
        assert_eq!(p.neighbor(0, 0, -1), Some(1));
    }

    #[test]
    fn subregions_partition_cells() {
        let region = Region::new([0.0; 3], [2e-9, 2e-9, 1e-9]);
        let m = Mesh::with_cell(region, [1e-9; 3]).unwrap().subregions([
            ("lo", Region::new([0.0; 3], [2e-9, 1e-9, 1e-9])),
            ("hi", Region::new([0.0, 1e-9, 0.0], [2e-9, 2e-9, 1e-9])),
        ]);
        assert_eq!(m.cells_in("lo").len(), 2);
        assert_eq!(m.cells_in("hi").len(), 2);
        assert_eq!(m.subregion_of(0), Some("lo"));
        assert_eq!(m.subregion_of(3), Some("hi"));
    }
}
