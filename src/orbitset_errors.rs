use thiserror::Error;

use crate::constants::OrbitKey;

#[derive(Error, Debug)]
pub enum OrbitsetError {
    #[error("Required dataset '{0}' not found in HDF5 file")]
    MissingDataset(String),

    #[error("Column '{0}' not found in feature table")]
    MissingColumn(String),

    #[error("Key {0} is not found in propagated_periods")]
    MissingOrbitKey(OrbitKey),

    #[error("The number of propagated periods ({propagated}) for orbit {orbit} is less than the desired periods ({desired})")]
    InsufficientPeriods {
        orbit: OrbitKey,
        propagated: usize,
        desired: usize,
    },

    #[error("Invalid packing parameter: {0}")]
    InvalidPackingParameter(String),

    #[error("Cannot summarize an empty tensor: {0}")]
    EmptyTensor(String),

    #[error("{kind} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Orbit dataset '{name}' has shape ({rows}, {cols}); expected {expected} channel rows")]
    UnexpectedOrbitShape {
        name: String,
        rows: usize,
        cols: usize,
        expected: usize,
    },

    #[error("not_propagated_orbits entries are 1-based; found {0}")]
    InvalidNotPropagatedIndex(f64),

    #[error("Feature table construction mismatch: {0}")]
    FeatureTableMismatch(String),

    #[error("HDF5 error: {0}")]
    Hdf5Error(#[from] hdf5::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "plot")]
    #[error("Plot rendering error: {0}")]
    PlotError(String),
}

impl PartialEq for OrbitsetError {
    fn eq(&self, other: &Self) -> bool {
        use OrbitsetError::*;
        match (self, other) {
            (MissingDataset(a), MissingDataset(b)) => a == b,
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (MissingOrbitKey(a), MissingOrbitKey(b)) => a == b,
            (
                InsufficientPeriods {
                    orbit: o1,
                    propagated: p1,
                    desired: d1,
                },
                InsufficientPeriods {
                    orbit: o2,
                    propagated: p2,
                    desired: d2,
                },
            ) => o1 == o2 && p1 == p2 && d1 == d2,
            (InvalidPackingParameter(a), InvalidPackingParameter(b)) => a == b,
            (EmptyTensor(a), EmptyTensor(b)) => a == b,
            (
                IndexOutOfRange {
                    kind: k1,
                    index: i1,
                    len: l1,
                },
                IndexOutOfRange {
                    kind: k2,
                    index: i2,
                    len: l2,
                },
            ) => k1 == k2 && i1 == i2 && l1 == l2,
            (
                UnexpectedOrbitShape {
                    name: n1,
                    rows: r1,
                    cols: c1,
                    expected: e1,
                },
                UnexpectedOrbitShape {
                    name: n2,
                    rows: r2,
                    cols: c2,
                    expected: e2,
                },
            ) => n1 == n2 && r1 == r2 && c1 == c2 && e1 == e2,
            (InvalidNotPropagatedIndex(a), InvalidNotPropagatedIndex(b)) => a == b,
            (FeatureTableMismatch(a), FeatureTableMismatch(b)) => a == b,
            (ShapeError(a), ShapeError(b)) => a == b,

            // Wrapped foreign errors are not comparable: equal iff same variant
            (Hdf5Error(_), Hdf5Error(_)) => true,
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            #[cfg(feature = "plot")]
            (PlotError(a), PlotError(b)) => a == b,

            _ => false,
        }
    }
}
