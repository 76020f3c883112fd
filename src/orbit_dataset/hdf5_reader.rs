//! # HDF5 reader for orbital-simulation output
//!
//! Crate-private read path from an HDF5 container to the in-memory model:
//! the orbit map, the per-orbit feature table, and the system-constant map.
//!
//! ## Expected HDF5 layout
//! -----------------
//! The input file must contain the following top-level datasets:
//! - `not_propagated_orbits: (1, K) Float64` — **1-based** indices of orbits whose
//!   simulation did not complete; converted to 0-based on read.
//! - `system_features: (F, 1) Float64` + `system_labels: (F,) String` — one scalar
//!   constant per label, valid for the whole file.
//! - `orbit_features: (L, M) Float64` + `orbit_labels: (L,) String` — the feature
//!   matrix is stored column-per-orbit and transposed into an `(M, L)` table.
//! - Zero or more datasets whose names are **pure decimal-integer strings**, each
//!   holding one `(6, T)` orbit trajectory.
//!
//! ## Re-indexing
//! -----------------
//! Raw orbit datasets are keyed by arbitrary (non-contiguous) integer names. The
//! reader sorts the original numeric keys ascending and re-keys the map to
//! contiguous `0..N`. This step is deliberate and explicit: every downstream
//! consumer may rely on key `i` matching feature-table row `i` without knowing
//! the original file keys.
//!
//! ## Error handling
//! -----------------
//! A required dataset that is absent surfaces as
//! [`OrbitsetError::MissingDataset`] naming the dataset; malformed orbit shapes
//! surface as [`OrbitsetError::UnexpectedOrbitShape`]. Nothing is retried or
//! recovered. The HDF5 handle is closed on every exit path (RAII), including
//! early `?` returns.
use hdf5::types::VarLenUnicode;
use itertools::Itertools;
use ndarray::Array2;

use crate::constants::{OrbitSet, SystemConstants, STATE_DIM};
use crate::orbitset_errors::OrbitsetError;

/// Look up a dataset that the format requires, mapping absence to a clean
/// lookup error instead of an opaque HDF5 failure.
fn required_dataset(file: &hdf5::File, name: &str) -> Result<hdf5::Dataset, OrbitsetError> {
    file.dataset(name)
        .map_err(|_| OrbitsetError::MissingDataset(name.to_string()))
}

/// Read the flattened string payload of a label dataset.
fn read_labels(file: &hdf5::File, name: &str) -> Result<Vec<String>, OrbitsetError> {
    let labels = required_dataset(file, name)?.read_raw::<VarLenUnicode>()?;
    Ok(labels.iter().map(|label| label.as_str().to_string()).collect())
}

/// Read `not_propagated_orbits` and convert its 1-based entries to 0-based.
///
/// Return
/// ----------
/// * `Ok(Vec<usize>)` — 0-based indices, in file order.
/// * `Err(OrbitsetError::MissingDataset)` — dataset absent.
/// * `Err(OrbitsetError::InvalidNotPropagatedIndex)` — an entry below 1.
pub(crate) fn read_not_propagated(file: &hdf5::File) -> Result<Vec<usize>, OrbitsetError> {
    let raw = required_dataset(file, "not_propagated_orbits")?.read_raw::<f64>()?;
    raw.into_iter()
        .map(|index| {
            (index as usize)
                .checked_sub(1)
                .ok_or(OrbitsetError::InvalidNotPropagatedIndex(index))
        })
        .collect()
}

/// Read `system_features`/`system_labels` into the per-file constant map.
///
/// Labels and features are paired positionally, exactly as stored: label `i`
/// names the scalar in row `i` of the feature column. The two datasets must
/// agree in length; a disagreement is a malformed file, not a truncation.
pub(crate) fn read_system_constants(file: &hdf5::File) -> Result<SystemConstants, OrbitsetError> {
    let features = required_dataset(file, "system_features")?.read_raw::<f64>()?;
    let labels = read_labels(file, "system_labels")?;
    if labels.len() != features.len() {
        return Err(OrbitsetError::FeatureTableMismatch(format!(
            "{} system labels for {} system feature values",
            labels.len(),
            features.len()
        )));
    }
    Ok(labels.into_iter().zip(features).collect())
}

/// Read `orbit_features`/`orbit_labels` into a `(labels, rows × columns)` pair.
///
/// The on-disk matrix is `(L, M)` (one column per orbit); the returned array is
/// its transpose, one row per orbit, ready for
/// [`FeatureTable::new`](super::feature_table::FeatureTable::new).
pub(crate) fn read_orbit_features(
    file: &hdf5::File,
) -> Result<(Vec<String>, Array2<f64>), OrbitsetError> {
    let features = required_dataset(file, "orbit_features")?.read_2d::<f64>()?;
    let labels = read_labels(file, "orbit_labels")?;
    Ok((labels, features.reversed_axes().as_standard_layout().to_owned()))
}

/// Read every decimal-integer-named dataset as one orbit and re-index the set.
///
/// Orbits are re-keyed to contiguous `0..N` in ascending original-key order.
/// Each dataset must have exactly [`STATE_DIM`] channel rows.
pub(crate) fn read_orbits(file: &hdf5::File) -> Result<OrbitSet, OrbitsetError> {
    let orbit_names: Vec<(u64, String)> = file
        .member_names()?
        .into_iter()
        .filter(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|name| name.parse::<u64>().ok().map(|key| (key, name)))
        .sorted_by_key(|(key, _)| *key)
        .collect();

    let mut orbits = OrbitSet::default();
    for (new_key, (_, name)) in orbit_names.into_iter().enumerate() {
        let trajectory = file.dataset(&name)?.read_2d::<f64>()?;
        if trajectory.nrows() != STATE_DIM {
            return Err(OrbitsetError::UnexpectedOrbitShape {
                name,
                rows: trajectory.nrows(),
                cols: trajectory.ncols(),
                expected: STATE_DIM,
            });
        }
        orbits.insert(new_key, trajectory);
    }
    Ok(orbits)
}
