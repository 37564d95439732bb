//! The pivot builder: reshapes grouped counts into a dense matrix indexed by
//! declared category order.
//!
//! Reshaping never drops or infers categories. Every label of the declared
//! row and column domains appears exactly once, in domain order, and every
//! (row, column) combination absent from the counts is filled with zero.
//! Counts whose key falls outside the declared domains are not surfaced,
//! mirroring a reindex onto the declared axes.

use crate::domain::CategoryDomain;
use crate::group::Counts;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dense matrix of counts with a one- or two-level row axis and a single
/// column axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    /// Axis names for the row label columns (one or two).
    row_axis: Vec<String>,
    /// Axis name for the columns.
    col_axis: String,
    /// Row keys in declared order; each has `row_axis.len()` labels.
    rows: Vec<Vec<String>>,
    /// Column labels in declared order.
    cols: Vec<String>,
    /// `cells[r][c]` = count for row `r`, column `c`.
    cells: Vec<Vec<u64>>,
}

impl PivotTable {
    /// Reshape counts keyed as `[row, col]` onto `rows` x `cols`.
    pub fn reshape(counts: &Counts, rows: &CategoryDomain, cols: &CategoryDomain) -> Self {
        let row_keys: Vec<Vec<String>> = rows.labels().iter().map(|r| vec![r.clone()]).collect();
        Self::build(counts, vec![rows.name().to_string()], row_keys, cols)
    }

    /// Reshape counts keyed as `[outer, inner, col]` onto the Cartesian
    /// product of `outer` x `inner` (outer varies slowest) by `cols`.
    pub fn reshape2(
        counts: &Counts,
        outer: &CategoryDomain,
        inner: &CategoryDomain,
        cols: &CategoryDomain,
    ) -> Self {
        let mut row_keys = Vec::with_capacity(outer.len() * inner.len());
        for o in outer.labels() {
            for i in inner.labels() {
                row_keys.push(vec![o.clone(), i.clone()]);
            }
        }
        Self::build(
            counts,
            vec![outer.name().to_string(), inner.name().to_string()],
            row_keys,
            cols,
        )
    }

    /// Reshape counts keyed as `[col]` into a single "Trips" row.
    pub fn reshape_flat(counts: &Counts, cols: &CategoryDomain) -> Self {
        let cells = vec![
            cols.labels()
                .iter()
                .map(|col| {
                    counts
                        .get(std::slice::from_ref(col))
                        .copied()
                        .unwrap_or(0)
                })
                .collect(),
        ];
        PivotTable {
            row_axis: vec![String::new()],
            col_axis: cols.name().to_string(),
            rows: vec![vec!["Trips".to_string()]],
            cols: cols.labels().to_vec(),
            cells,
        }
    }

    fn build(
        counts: &Counts,
        row_axis: Vec<String>,
        rows: Vec<Vec<String>>,
        cols: &CategoryDomain,
    ) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                cols.labels()
                    .iter()
                    .map(|col| {
                        let key: Vec<String> =
                            row.iter().cloned().chain([col.clone()]).collect();
                        counts.get(&key).copied().unwrap_or(0)
                    })
                    .collect()
            })
            .collect();
        PivotTable {
            row_axis,
            col_axis: cols.name().to_string(),
            rows,
            cols: cols.labels().to_vec(),
            cells,
        }
    }

    pub fn row_axis(&self) -> &[String] {
        &self.row_axis
    }

    pub fn col_axis(&self) -> &str {
        &self.col_axis
    }

    pub fn row_labels(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn col_labels(&self) -> &[String] {
        &self.cols
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols.len()
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col]
    }

    /// Count for the given row/column labels, if both are declared.
    pub fn get_by_label(&self, row: &[&str], col: &str) -> Option<u64> {
        let r = self.rows.iter().position(|labels| {
            labels.len() == row.len() && labels.iter().zip(row).all(|(a, b)| a == b)
        })?;
        let c = self.cols.iter().position(|l| l == col)?;
        Some(self.cells[r][c])
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

impl fmt::Display for PivotTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Width of each row-label column, then of each value column.
        let label_widths: Vec<usize> = self
            .row_axis
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .map(|r| r[i].len())
                    .chain([name.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let col_widths: Vec<usize> = self
            .cols
            .iter()
            .enumerate()
            .map(|(c, label)| {
                self.cells
                    .iter()
                    .map(|row| row[c].to_string().len())
                    .chain([label.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for (name, &w) in self.row_axis.iter().zip(&label_widths) {
            write!(f, "{name:<w$}  ")?;
        }
        for (label, &w) in self.cols.iter().zip(&col_widths) {
            write!(f, "{label:>w$}  ")?;
        }
        writeln!(f)?;
        for (labels, row) in self.rows.iter().zip(&self.cells) {
            for (label, &w) in labels.iter().zip(&label_widths) {
                write!(f, "{label:<w$}  ")?;
            }
            for (v, &w) in row.iter().zip(&col_widths) {
                write!(f, "{v:>w$}  ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
