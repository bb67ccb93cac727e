// src/table.rs
//
// Tabular drive output: one row per recorded step, one column per scalar.
// Written to disk in the ODT text format the viewers of the big solvers
// understand, and kept on the `System` for assertions.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Table {
    /// Name of the independent-variable column ("t", "iteration",
    /// "B_hysteresis").
    pub x: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new(x: impl Into<String>, columns: Vec<String>) -> Self {
        let x = x.into();
        debug_assert!(columns.first().map(String::as_str) == Some(x.as_str()));
        Self {
            x,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Values of a named column. `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[i]).collect())
    }

    /// Write in ODT text format.
    pub fn write_odt(&self, path: &Path, title: &str) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# ODT 1.0")?;
        writeln!(w, "# Table Start")?;
        writeln!(w, "# Title: {title}")?;
        write!(w, "# Columns:")?;
        for c in &self.columns {
            write!(w, " {c}")?;
        }
        writeln!(w)?;
        for row in &self.rows {
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    write!(w, " ")?;
                }
                write!(w, "{v:.12e}")?;
            }
            writeln!(w)?;
        }
        writeln!(w, "# Table End")?;
        w.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup() {
        let mut t = Table::new("t", vec!["t".into(), "mx".into()]);
        t.push_row(vec![0.0, 1.0]);
        t.push_row(vec![1e-12, 0.5]);
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.column("mx"), Some(vec![1.0, 0.5]));
        assert!(t.column("my").is_none());
    }
}
