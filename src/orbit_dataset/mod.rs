//! # Orbit datasets: ingestion, alignment, and packing pipelines
//!
//! High-level facilities to **load** orbital-simulation output from HDF5 files
//! and to **reshape** it into fixed-size tensors. The central type is
//! [`OrbitDataset`], which bundles the three aligned products of one file:
//!
//! * the orbit map ([`OrbitSet`]) — re-indexed `(6, T)` trajectories,
//! * the per-orbit [`FeatureTable`] — row `i` describes orbit key `i`,
//! * the [`SystemConstants`] map — one scalar per label, constant per file.
//!
//! Modules
//! -----------------
//! * [`feature_table`] – Column-named numeric table aligned with orbit keys.
//! * *(crate-private)* `hdf5_reader` – Dataset lookup, label decoding, and the
//!   explicit ascending re-index of decimal-named orbit datasets.
//!
//! Alignment invariant
//! -----------------
//! Orbits flagged in `not_propagated_orbits` are dropped from the feature table
//! **before** re-indexing, so the surviving rows line up 1:1 with the contiguous
//! orbit keys. Every transformation downstream preserves this alignment: the
//! packer emits rows in ascending key order, and segment IDs record the source
//! orbit of every tensor row.
//!
//! Packing pipelines
//! -----------------
//! Processing behavior is selected by an explicit [`PackingParams`] value passed
//! by the caller; input file names carry no behavior.
//!
//! * [`OrbitDataset::pack`] – policy dispatch via [`PackingParams`],
//! * [`OrbitDataset::padded_with_time`] – elapsed-time channel + pad-to-fixed,
//! * [`OrbitDataset::fixed_step_segments`] – fixed-length segmentation,
//! * [`OrbitDataset::first_period_segments`] – first-period extraction, then
//!   segmentation.
//!
//! Quick-start
//! -----------------
//! ```rust,no_run
//! use camino::Utf8Path;
//! use orbitset::{OrbitDataset, PackingParams, PackingPolicy};
//!
//! # fn run() -> Result<(), orbitset::OrbitsetError> {
//! let dataset = OrbitDataset::from_hdf5(Utf8Path::new("em_dt_dataset.h5"))?;
//! let params = PackingParams::builder()
//!     .policy(PackingPolicy::FixedSegments)
//!     .segment_length(100)
//!     .build()?;
//! let packed = dataset.pack(&params)?;
//! assert_eq!(packed.tensor.dim().0, packed.segment_ids.len());
//! # Ok(()) }
//! ```
use camino::Utf8Path;
use itertools::Itertools;

use crate::constants::{OrbitSet, PropagatedPeriods, SystemConstants};
use crate::orbitset_errors::OrbitsetError;
use crate::processing::packing::{pack, pad_to_fixed, segment_fixed_length, PackedOrbits};
use crate::processing::periods::extract_periods;
use crate::processing::{FillValue, PackingParams};
use crate::PackedTensor;

pub mod feature_table;
pub(crate) mod hdf5_reader;

use feature_table::FeatureTable;

use self::packing_support::add_time_channel_from_features;

/// The aligned contents of one simulation output file.
///
/// Produced by [`OrbitDataset::from_hdf5`]; all three members share the same
/// re-indexed orbit keys (orbit key `i` ↔ feature row `i`).
#[derive(Debug, Clone)]
pub struct OrbitDataset {
    /// Re-indexed orbit map; keys are contiguous `0..N`.
    pub orbits: OrbitSet,
    /// One feature row per surviving orbit, aligned with the keys.
    pub features: FeatureTable,
    /// Per-file scalar constants (e.g. gravitational parameters).
    pub constants: SystemConstants,
}

impl OrbitDataset {
    /// Load orbit data from an HDF5 file.
    ///
    /// Reads the not-propagated index list (1-based on disk, converted to
    /// 0-based), the system-constant map, the feature table (with the
    /// not-propagated rows dropped and the row index reset), and every
    /// decimal-named `(6, T)` orbit dataset re-indexed to contiguous keys.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: path to the HDF5 file.
    ///
    /// Return
    /// ----------
    /// * `Ok(OrbitDataset)` — fully-formed, aligned dataset.
    /// * `Err(OrbitsetError::MissingDataset)` — a required dataset is absent.
    /// * `Err(_)` — I/O, shape, or decoding failure; nothing partial is returned.
    pub fn from_hdf5(path: &Utf8Path) -> Result<Self, OrbitsetError> {
        let file = hdf5::File::open(path)?;
        let not_propagated = hdf5_reader::read_not_propagated(&file)?;
        let constants = hdf5_reader::read_system_constants(&file)?;
        let (labels, matrix) = hdf5_reader::read_orbit_features(&file)?;
        let features = FeatureTable::new(labels, matrix)?.drop_rows(&not_propagated);
        let orbits = hdf5_reader::read_orbits(&file)?;
        Ok(Self {
            orbits,
            features,
            constants,
        })
    }

    /// Load only the feature table from an HDF5 file.
    ///
    /// Same alignment rules as [`from_hdf5`](Self::from_hdf5) (not-propagated
    /// rows dropped, index reset), without materializing the orbit arrays.
    pub fn features_from_hdf5(path: &Utf8Path) -> Result<FeatureTable, OrbitsetError> {
        let file = hdf5::File::open(path)?;
        let not_propagated = hdf5_reader::read_not_propagated(&file)?;
        let (labels, matrix) = hdf5_reader::read_orbit_features(&file)?;
        Ok(FeatureTable::new(labels, matrix)?.drop_rows(&not_propagated))
    }

    /// Concatenate feature tables from every `.h5`/`.hdf5` file in a folder.
    ///
    /// Each file contributes its rows (after the usual not-propagated drop) with
    /// an extra `original_index` column preserving the per-file row index. The
    /// returned `Vec<String>` names, for every stacked row, the system the row
    /// came from: the file-name stem up to the first `_`.
    ///
    /// Files are visited in lexicographic name order so the stacking is
    /// deterministic regardless of directory enumeration order.
    ///
    /// Return
    /// ----------
    /// * `Ok((FeatureTable, Vec<String>))` — stacked table plus per-row system names.
    /// * `Err(OrbitsetError::FeatureTableMismatch)` — no HDF5 file found, or
    ///   schema disagreement between files.
    pub fn features_from_folder(
        folder: &Utf8Path,
    ) -> Result<(FeatureTable, Vec<String>), OrbitsetError> {
        let mut file_names: Vec<String> = std::fs::read_dir(folder)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(".h5") || name.ends_with(".hdf5"))
            .collect();
        file_names.sort();

        let mut tables = Vec::with_capacity(file_names.len());
        let mut systems = Vec::new();
        for file_name in &file_names {
            let table = Self::features_from_hdf5(&folder.join(file_name))?;
            let original_index: Vec<f64> = (0..table.nrows()).map(|i| i as f64).collect();
            let table = table.with_column("original_index", original_index)?;

            let stem = file_name
                .trim_end_matches(".hdf5")
                .trim_end_matches(".h5");
            let system = stem.split('_').next().unwrap_or(stem).to_string();
            systems.extend(std::iter::repeat(system).take(table.nrows()));
            tables.push(table);
        }
        let stacked = FeatureTable::vstack(&tables)?;
        Ok((stacked, systems))
    }

    /// Number of orbits in the set.
    pub fn number_of_orbits(&self) -> usize {
        self.orbits.len()
    }

    /// Total number of time samples across all orbits.
    pub fn total_samples(&self) -> usize {
        self.orbits.values().map(|orbit| orbit.ncols()).sum()
    }

    /// The `propagated_periods` feature column as a per-key map.
    ///
    /// Row `i` of the table describes orbit key `i`, so the map is simply the
    /// enumerated column.
    pub fn propagated_periods(&self) -> Result<PropagatedPeriods, OrbitsetError> {
        Ok(self
            .features
            .column_as_usize("propagated_periods")?
            .into_iter()
            .enumerate()
            .collect())
    }

    /// Pack the dataset according to an explicit [`PackingParams`] configuration.
    ///
    /// See [`pack`](crate::processing::packing::pack) for the policy semantics;
    /// the dataset's own feature table supplies the period metadata when a time
    /// channel is requested.
    pub fn pack(&self, params: &PackingParams) -> Result<PackedOrbits, OrbitsetError> {
        pack(&self.orbits, params, Some(&self.features))
    }

    /// Pad every orbit to `timesteps` samples with an elapsed-time channel appended.
    ///
    /// The time channel is derived from each orbit's `period` and
    /// `propagated_periods` features, so it carries elapsed simulation time
    /// rather than sample index. Channel order is `posx..velz, time`.
    pub fn padded_with_time(
        &self,
        timesteps: usize,
        fill: FillValue,
    ) -> Result<PackedTensor, OrbitsetError> {
        let with_time = add_time_channel_from_features(&self.orbits, &self.features)?;
        pad_to_fixed(&with_time, timesteps, fill)
    }

    /// Cut every orbit into consecutive windows of exactly `segment_length` samples.
    ///
    /// The remainder shorter than `segment_length` is dropped; an orbit shorter
    /// than one window contributes zero segments. Segment IDs record the source
    /// orbit key of every tensor row.
    pub fn fixed_step_segments(
        &self,
        segment_length: usize,
    ) -> Result<PackedOrbits, OrbitsetError> {
        let (tensor, segment_ids) = segment_fixed_length(&self.orbits, segment_length)?;
        Ok(PackedOrbits {
            tensor,
            segment_ids,
        })
    }

    /// Truncate every orbit to its first period, then segment to fixed length.
    ///
    /// Equivalent to [`extract_periods`] with `desired_periods = 1` followed by
    /// [`fixed_step_segments`](Self::fixed_step_segments).
    pub fn first_period_segments(
        &self,
        segment_length: usize,
    ) -> Result<PackedOrbits, OrbitsetError> {
        let first_period = extract_periods(&self.orbits, &self.propagated_periods()?, 1)?;
        let (tensor, segment_ids) = segment_fixed_length(&first_period, segment_length)?;
        Ok(PackedOrbits {
            tensor,
            segment_ids,
        })
    }

    /// Orbit keys in ascending order (the packer's row order).
    pub fn sorted_keys(&self) -> Vec<usize> {
        self.orbits.keys().copied().sorted().collect()
    }
}

pub(crate) mod packing_support {
    //! Bridge between the feature table and the packer's time-channel helper.
    use super::FeatureTable;
    use crate::constants::OrbitSet;
    use crate::orbitset_errors::OrbitsetError;
    use crate::processing::packing::add_time_channel;

    /// Pull `period` / `propagated_periods` out of the table and append the
    /// elapsed-time channel to every orbit.
    pub(crate) fn add_time_channel_from_features(
        orbits: &OrbitSet,
        features: &FeatureTable,
    ) -> Result<OrbitSet, OrbitsetError> {
        let periods: Vec<f64> = features.column("period")?.to_vec();
        let propagated = features.column_as_usize("propagated_periods")?;
        add_time_channel(orbits, &periods, &propagated)
    }
}
