//! # Per-orbit feature table
//!
//! A small, column-named numeric table whose row order is the crate's ground
//! truth for orbit identity: after loading, **row `i` describes orbit key `i`**.
//!
//! ## Overview
//! -----------------
//! [`FeatureTable`] wraps an `ndarray::Array2<f64>` (rows × columns) together
//! with its column labels, as read from the `orbit_features` / `orbit_labels`
//! datasets of an input file. It supports exactly the operations the pipeline
//! needs:
//!
//! * column lookup by name (missing name is a lookup error),
//! * dropping a set of rows and resetting the row index to contiguous 0-based
//!   (used to remove not-propagated orbits before re-indexing),
//! * appending a derived column and vertically stacking tables with identical
//!   schemas (folder-level concatenation).
//!
//! ## Invariant
//! -----------------
//! Any transformation that drops or reorders orbits must drop/reorder the
//! corresponding feature rows identically. [`FeatureTable::drop_rows`] returns a
//! brand-new table so the alignment step is explicit at the call site.
use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::orbitset_errors::OrbitsetError;

/// Named numeric columns over rows aligned 1:1 with re-indexed orbit keys.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl FeatureTable {
    /// Build a table from column labels and a `(rows, columns)` array.
    ///
    /// Arguments
    /// -----------------
    /// * `columns`: one label per data column, in order.
    /// * `data`: row-major feature matrix, one row per orbit.
    ///
    /// Return
    /// ----------
    /// * `Ok(FeatureTable)` when the label count matches the column count.
    /// * `Err(OrbitsetError::FeatureTableMismatch)` otherwise.
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self, OrbitsetError> {
        if columns.len() != data.ncols() {
            return Err(OrbitsetError::FeatureTableMismatch(format!(
                "{} labels for {} columns",
                columns.len(),
                data.ncols()
            )));
        }
        Ok(Self { columns, data })
    }

    /// Number of rows (orbits described by the table).
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Column labels, in storage order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Raw feature matrix (rows × columns).
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Borrow one column by name.
    ///
    /// Return
    /// ----------
    /// * `Ok(ArrayView1<f64>)` of length [`nrows`](Self::nrows).
    /// * `Err(OrbitsetError::MissingColumn)` if the name is unknown.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>, OrbitsetError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| OrbitsetError::MissingColumn(name.to_string()))?;
        Ok(self.data.column(idx))
    }

    /// Read one column as integer counts (e.g. `propagated_periods`).
    ///
    /// Values are truncated toward zero; negative entries become zero counts.
    pub fn column_as_usize(&self, name: &str) -> Result<Vec<usize>, OrbitsetError> {
        Ok(self
            .column(name)?
            .iter()
            .map(|&v| if v > 0.0 { v as usize } else { 0 })
            .collect())
    }

    /// Drop the given 0-based rows and reset the row index to contiguous 0-based.
    ///
    /// This is the explicit alignment step used when removing not-propagated
    /// orbits: the surviving rows keep their relative order, and row `i` of the
    /// result corresponds to re-indexed orbit key `i`. Indices outside the table
    /// are ignored.
    pub fn drop_rows(&self, rows: &[usize]) -> FeatureTable {
        let keep: Vec<usize> = (0..self.data.nrows())
            .filter(|i| !rows.contains(i))
            .collect();
        FeatureTable {
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), &keep),
        }
    }

    /// Return a copy of the table with one extra column appended on the right.
    ///
    /// Return
    /// ----------
    /// * `Err(OrbitsetError::FeatureTableMismatch)` if `values` is not one per row.
    pub fn with_column(
        &self,
        name: &str,
        values: Vec<f64>,
    ) -> Result<FeatureTable, OrbitsetError> {
        if values.len() != self.nrows() {
            return Err(OrbitsetError::FeatureTableMismatch(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.nrows()
            )));
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let mut data = self.data.clone();
        data.push_column(Array1::from(values).view())?;
        Ok(FeatureTable { columns, data })
    }

    /// Vertically stack tables sharing the same column schema.
    ///
    /// Used by the folder-level feature concatenation: each file contributes its
    /// rows in file order, and the result gets a fresh contiguous row index.
    ///
    /// Return
    /// ----------
    /// * `Err(OrbitsetError::FeatureTableMismatch)` on schema disagreement or an
    ///   empty input slice.
    pub fn vstack(tables: &[FeatureTable]) -> Result<FeatureTable, OrbitsetError> {
        let first = tables.first().ok_or_else(|| {
            OrbitsetError::FeatureTableMismatch("cannot stack zero tables".to_string())
        })?;
        let mut data = first.data.clone();
        for table in &tables[1..] {
            if table.columns != first.columns {
                return Err(OrbitsetError::FeatureTableMismatch(format!(
                    "column schema mismatch: {:?} vs {:?}",
                    table.columns, first.columns
                )));
            }
            data.append(Axis(0), table.data.view())?;
        }
        Ok(FeatureTable {
            columns: first.columns.clone(),
            data,
        })
    }
}

#[cfg(test)]
mod feature_table_tests {
    use super::*;
    use ndarray::array;

    fn sample() -> FeatureTable {
        FeatureTable::new(
            vec!["period".to_string(), "propagated_periods".to_string()],
            array![[2.5, 3.0], [1.0, 5.0], [4.0, 2.0], [0.5, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn column_lookup_by_name() {
        let table = sample();
        let period = table.column("period").unwrap();
        assert_eq!(period.to_vec(), vec![2.5, 1.0, 4.0, 0.5]);
        assert_eq!(
            table.column("absent").unwrap_err(),
            OrbitsetError::MissingColumn("absent".to_string())
        );
    }

    #[test]
    fn drop_rows_resets_index() {
        let table = sample().drop_rows(&[0, 2]);
        assert_eq!(table.nrows(), 2);
        // Survivors keep their relative order: old rows 1 and 3.
        assert_eq!(table.column("period").unwrap().to_vec(), vec![1.0, 0.5]);
    }

    #[test]
    fn drop_rows_ignores_out_of_range() {
        let table = sample().drop_rows(&[17]);
        assert_eq!(table.nrows(), 4);
    }

    #[test]
    fn usize_column_truncates() {
        let table = sample();
        assert_eq!(
            table.column_as_usize("propagated_periods").unwrap(),
            vec![3, 5, 2, 1]
        );
    }

    #[test]
    fn with_column_appends_on_the_right() {
        let table = sample()
            .with_column("original_index", vec![0.0, 1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(table.ncols(), 3);
        assert_eq!(
            table.column("original_index").unwrap().to_vec(),
            vec![0.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn vstack_requires_matching_schema() {
        let a = sample();
        let b = sample().drop_rows(&[0]);
        let stacked = FeatureTable::vstack(&[a.clone(), b]).unwrap();
        assert_eq!(stacked.nrows(), 7);

        let other = FeatureTable::new(vec!["x".to_string()], array![[1.0]]).unwrap();
        assert!(matches!(
            FeatureTable::vstack(&[a, other]),
            Err(OrbitsetError::FeatureTableMismatch(_))
        ));
    }
}
