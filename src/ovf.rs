// src/ovf.rs
//
// OVF 2.0 writers for rectangular meshes:
//  - text data
//  - binary4 (little-endian f32, check value 1234567.0)
//  - binary8 (little-endian f64, check value 123456789012345.0)

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::driver::OvfFormat;
use crate::field::VectorField;

#[derive(Clone, Debug, Default)]
pub struct OvfMeta {
    pub title: String,
    pub desc_lines: Vec<String>,
    pub valuelabels: [String; 3],
    pub valueunits: [String; 3],
}

impl OvfMeta {
    pub fn magnetization() -> Self {
        Self {
            title: "m".to_owned(),
            desc_lines: vec![],
            valuelabels: ["m_x".into(), "m_y".into(), "m_z".into()],
            valueunits: ["A/m".into(), "A/m".into(), "A/m".into()],
        }
    }

    /// Time metadata understood by the common viewers.
    pub fn with_total_sim_time(mut self, t_s: f64) -> Self {
        self.desc_lines
            .push(format!("Total simulation time:  {t_s:.16e}  s"));
        self
    }
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    Ok(())
}

fn write_header(
    w: &mut impl Write,
    m: &VectorField,
    meta: &OvfMeta,
    data_kind: &str,
) -> std::io::Result<()> {
    let mesh = &m.mesh;
    let [nx, ny, nz] = mesh.n;
    let [dx, dy, dz] = mesh.cell;
    let p1 = mesh.region.p1;
    let p2 = mesh.region.p2;

    writeln!(w, "# OOMMF OVF 2.0")?;
    writeln!(w, "# Segment count: 1")?;
    writeln!(w, "# Begin: Segment")?;
    writeln!(w, "# Begin: Header")?;
    writeln!(w, "# Title: {}", meta.title)?;
    for d in &meta.desc_lines {
        writeln!(w, "# Desc: {d}")?;
    }
    writeln!(w, "# meshunit: m")?;
    writeln!(w, "# meshtype: rectangular")?;

    writeln!(w, "# xmin: {:.16e}", p1[0])?;
    writeln!(w, "# ymin: {:.16e}", p1[1])?;
    writeln!(w, "# zmin: {:.16e}", p1[2])?;
    writeln!(w, "# xmax: {:.16e}", p2[0])?;
    writeln!(w, "# ymax: {:.16e}", p2[1])?;
    writeln!(w, "# zmax: {:.16e}", p2[2])?;

    writeln!(w, "# xbase: {:.16e}", p1[0] + 0.5 * dx)?;
    writeln!(w, "# ybase: {:.16e}", p1[1] + 0.5 * dy)?;
    writeln!(w, "# zbase: {:.16e}", p1[2] + 0.5 * dz)?;
    writeln!(w, "# xstepsize: {dx:.16e}")?;
    writeln!(w, "# ystepsize: {dy:.16e}")?;
    writeln!(w, "# zstepsize: {dz:.16e}")?;
    writeln!(w, "# xnodes: {nx}")?;
    writeln!(w, "# ynodes: {ny}")?;
    writeln!(w, "# znodes: {nz}")?;

    writeln!(w, "# valuedim: 3")?;
    writeln!(
        w,
        "# valuelabels: {} {} {}",
        meta.valuelabels[0], meta.valuelabels[1], meta.valuelabels[2]
    )?;
    writeln!(
        w,
        "# valueunits: {} {} {}",
        meta.valueunits[0], meta.valueunits[1], meta.valueunits[2]
    )?;

    writeln!(w, "# End: Header")?;
    writeln!(w, "# Begin: Data {data_kind}")?;
    Ok(())
}

fn write_footer(w: &mut impl Write, data_kind: &str) -> std::io::Result<()> {
    writeln!(w, "# End: Data {data_kind}")?;
    writeln!(w, "# End: Segment")?;
    writeln!(w, "# End: File")?;
    Ok(())
}

/// Write a magnetisation snapshot in the requested encoding. Data order is
/// x fastest, then y, then z (the storage order of `VectorField`).
pub fn write_ovf(
    path: &Path,
    m: &VectorField,
    meta: &OvfMeta,
    format: OvfFormat,
) -> std::io::Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    match format {
        OvfFormat::Text => {
            write_header(&mut w, m, meta, "Text")?;
            for v in &m.data {
                writeln!(w, "{:.10e} {:.10e} {:.10e}", v[0], v[1], v[2])?;
            }
            write_footer(&mut w, "Text")?;
        }
        OvfFormat::Bin4 => {
            write_header(&mut w, m, meta, "Binary 4")?;
            let check: f32 = 1_234_567.0;
            w.write_all(&check.to_le_bytes())?;
            for v in &m.data {
                for e in 0..3 {
                    w.write_all(&(v[e] as f32).to_le_bytes())?;
                }
            }
            writeln!(w)?;
            write_footer(&mut w, "Binary 4")?;
        }
        OvfFormat::Bin8 => {
            write_header(&mut w, m, meta, "Binary 8")?;
            let check: f64 = 123_456_789_012_345.0;
            w.write_all(&check.to_le_bytes())?;
            for v in &m.data {
                for e in 0..3 {
                    w.write_all(&v[e].to_le_bytes())?;
                }
            }
            writeln!(w)?;
            write_footer(&mut w, "Binary 8")?;
        }
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use crate::region::Region;

    #[test]
    fn text_snapshot_has_header_and_rows() {
        let dir = std::env::temp_dir().join("magtest-ovf-unit");
        let path = dir.join("m0.omf");
        let mesh =
            Mesh::with_cell(Region::new([0.0; 3], [2e-9, 1e-9, 1e-9]), [1e-9; 3]).unwrap();
        let m = VectorField::uniform(mesh, [0.0, 0.0, 1e6]);

        write_ovf(&path, &m, &OvfMeta::magnetization(), OvfFormat::Text).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# OOMMF OVF 2.0"));
        assert!(text.contains("# xnodes: 2"));
        assert!(text.contains("# Begin: Data Text"));
        assert_eq!(
            text.lines()
                .filter(|l| !l.starts_with('#') && !l.is_empty())
                .count(),
            2
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
