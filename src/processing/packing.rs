//! # Tensor packing
//!
//! Convert a variable-length [`OrbitSet`] into one fixed-shape
//! `(N, C, T_fixed)` tensor, one row per orbit (padding) or per window
//! (segmentation).
//!
//! ## Row order and lineage
//! -----------------
//! Rows are always emitted in **ascending orbit-key order**, and every output
//! carries a segment-ID sequence mapping row → source orbit key. Under
//! [`PackingPolicy::PadToFixed`] the mapping is 1:1; under
//! [`PackingPolicy::FixedSegments`] one orbit can contribute several rows (or
//! none, when it is shorter than the window).
//!
//! ## Channel order
//! -----------------
//! The scalar-channel order `posx, posy, posz, velx, vely, velz[, time]` is
//! invariant across policies: channel 0 of every row is `posx`.
//!
//! ## See also
//! ------------
//! * [`PackingParams`] – typed configuration consumed by [`pack`].
//! * [`extract_periods`](crate::processing::periods::extract_periods) – upstream truncation.
use itertools::Itertools;
use ndarray::{s, Array2, Array3};

use crate::constants::{OrbitKey, OrbitSet, PackedTensor};
use crate::orbitset_errors::OrbitsetError;
use crate::processing::{FillValue, PackingParams, PackingPolicy};

/// A packed tensor plus the orbit lineage of every row.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedOrbits {
    /// `(N, C, T_fixed)` tensor; channel order `posx..velz[, time]`.
    pub tensor: PackedTensor,
    /// Source orbit key of row `i` of the tensor.
    pub segment_ids: Vec<OrbitKey>,
}

/// Orbit keys in ascending order; every packing routine emits rows in this order.
fn ordered_keys(orbits: &OrbitSet) -> Vec<OrbitKey> {
    orbits.keys().copied().sorted().collect()
}

/// Channel count shared by all orbits of the set.
///
/// The set must be non-empty and homogeneous; a mixed set (e.g. some orbits
/// carrying a time channel and some not) is a caller bug surfaced as an error.
fn channel_count(orbits: &OrbitSet) -> Result<usize, OrbitsetError> {
    let mut channels = None;
    for (&key, orbit) in orbits {
        match channels {
            None => channels = Some(orbit.nrows()),
            Some(c) if c != orbit.nrows() => {
                return Err(OrbitsetError::UnexpectedOrbitShape {
                    name: key.to_string(),
                    rows: orbit.nrows(),
                    cols: orbit.ncols(),
                    expected: c,
                })
            }
            Some(_) => {}
        }
    }
    channels.ok_or_else(|| OrbitsetError::EmptyTensor("orbit set is empty".to_string()))
}

/// Pad (or truncate) every orbit to exactly `timesteps` samples.
///
/// Orbits longer than `timesteps` are truncated; shorter orbits are right-padded
/// according to `fill`. One tensor row per orbit, ascending key order.
///
/// Arguments
/// -----------------
/// * `orbits`: the set to pack; must be non-empty with homogeneous channel counts.
/// * `timesteps`: fixed time-dimension length (`>= 1`).
/// * `fill`: zero fill or last-sample fill for the padded tail.
///
/// Return
/// ----------
/// * `Ok(PackedTensor)` of shape `(N, C, timesteps)`.
/// * `Err(OrbitsetError::EmptyTensor)` — empty set.
/// * `Err(OrbitsetError::InvalidPackingParameter)` — `timesteps == 0`.
pub fn pad_to_fixed(
    orbits: &OrbitSet,
    timesteps: usize,
    fill: FillValue,
) -> Result<PackedTensor, OrbitsetError> {
    if timesteps == 0 {
        return Err(OrbitsetError::InvalidPackingParameter(
            "timesteps must be >= 1".into(),
        ));
    }
    let channels = channel_count(orbits)?;
    let keys = ordered_keys(orbits);

    let mut tensor = Array3::<f64>::zeros((keys.len(), channels, timesteps));
    for (row, &key) in keys.iter().enumerate() {
        let orbit = &orbits[&key];
        let copied = orbit.ncols().min(timesteps);
        tensor
            .slice_mut(s![row, .., ..copied])
            .assign(&orbit.slice(s![.., ..copied]));
        if copied < timesteps && fill == FillValue::LastSample && copied > 0 {
            let last = orbit.column(copied - 1).to_owned();
            for t in copied..timesteps {
                tensor.slice_mut(s![row, .., t]).assign(&last);
            }
        }
        // FillValue::Zero: the zero-initialized tail already is the fill.
    }
    Ok(tensor)
}

/// Append an elapsed-simulation-time channel to every orbit.
///
/// Orbit `k` with `T` samples spans `propagated[k] × periods[k]` time units, so
/// sample `i` is stamped `i × span / (T - 1)`; a single-sample orbit gets time 0.
/// The result carries `C + 1` channels with `time` last, keys preserved.
///
/// Arguments
/// -----------------
/// * `orbits`: the set to annotate (pure; a new set is returned).
/// * `periods`: duration of one period, indexed by orbit key.
/// * `propagated`: full-period count, indexed by orbit key.
///
/// Return
/// ----------
/// * `Err(OrbitsetError::MissingOrbitKey)` — an orbit key has no metadata entry.
pub fn add_time_channel(
    orbits: &OrbitSet,
    periods: &[f64],
    propagated: &[usize],
) -> Result<OrbitSet, OrbitsetError> {
    let mut annotated = OrbitSet::default();
    for (&key, orbit) in orbits {
        if key >= periods.len() || key >= propagated.len() {
            return Err(OrbitsetError::MissingOrbitKey(key));
        }
        let samples = orbit.ncols();
        let span = propagated[key] as f64 * periods[key];

        let mut with_time = Array2::<f64>::zeros((orbit.nrows() + 1, samples));
        with_time
            .slice_mut(s![..orbit.nrows(), ..])
            .assign(orbit);
        if samples > 1 {
            let step = span / (samples - 1) as f64;
            for (t, value) in with_time.row_mut(orbit.nrows()).iter_mut().enumerate() {
                *value = t as f64 * step;
            }
        }
        annotated.insert(key, with_time);
    }
    Ok(annotated)
}

/// Cut every orbit into consecutive, non-overlapping windows of exactly
/// `segment_length` samples.
///
/// The trailing remainder shorter than `segment_length` is dropped; an orbit
/// with fewer samples than one window contributes zero segments (not an error).
/// Windows are emitted orbit-by-orbit in ascending key order, with the source
/// orbit key recorded at the matching position of the segment-ID sequence.
///
/// Return
/// ----------
/// * `Ok((PackedTensor, Vec<OrbitKey>))` — `(S, C, segment_length)` tensor plus
///   per-row lineage; `S = Σ floor(T_k / segment_length)`.
/// * `Err(OrbitsetError::EmptyTensor)` — empty set.
/// * `Err(OrbitsetError::InvalidPackingParameter)` — `segment_length == 0`.
pub fn segment_fixed_length(
    orbits: &OrbitSet,
    segment_length: usize,
) -> Result<(PackedTensor, Vec<OrbitKey>), OrbitsetError> {
    if segment_length == 0 {
        return Err(OrbitsetError::InvalidPackingParameter(
            "segment_length must be >= 1".into(),
        ));
    }
    let channels = channel_count(orbits)?;
    let keys = ordered_keys(orbits);

    let total_segments: usize = keys
        .iter()
        .map(|key| orbits[key].ncols() / segment_length)
        .sum();

    let mut tensor = Array3::<f64>::zeros((total_segments, channels, segment_length));
    let mut segment_ids = Vec::with_capacity(total_segments);
    let mut row = 0;
    for &key in &keys {
        let orbit = &orbits[&key];
        for window in 0..orbit.ncols() / segment_length {
            let start = window * segment_length;
            tensor
                .slice_mut(s![row, .., ..])
                .assign(&orbit.slice(s![.., start..start + segment_length]));
            segment_ids.push(key);
            row += 1;
        }
    }
    Ok((tensor, segment_ids))
}

/// Pack an orbit set according to an explicit [`PackingParams`] configuration.
///
/// Policy dispatch:
/// * [`PackingPolicy::PadToFixed`] – optional time channel (requires `features`
///   with `period` and `propagated_periods` columns), then
///   [`pad_to_fixed`]; segment IDs are the 1:1 ascending key order.
/// * [`PackingPolicy::FixedSegments`] – [`segment_fixed_length`].
///
/// Arguments
/// -----------------
/// * `orbits`: the set to pack.
/// * `params`: validated packing configuration.
/// * `features`: per-orbit metadata, required only when
///   `params.append_time_channel` is set.
///
/// Return
/// ----------
/// * `Ok(PackedOrbits)` — tensor plus per-row orbit lineage.
/// * `Err(OrbitsetError::InvalidPackingParameter)` — a time channel was
///   requested without a feature table.
pub fn pack(
    orbits: &OrbitSet,
    params: &PackingParams,
    features: Option<&crate::orbit_dataset::feature_table::FeatureTable>,
) -> Result<PackedOrbits, OrbitsetError> {
    match params.policy {
        PackingPolicy::PadToFixed => {
            let tensor = if params.append_time_channel {
                let features = features.ok_or_else(|| {
                    OrbitsetError::InvalidPackingParameter(
                        "append_time_channel requires a feature table".into(),
                    )
                })?;
                let periods: Vec<f64> = features.column("period")?.to_vec();
                let propagated = features.column_as_usize("propagated_periods")?;
                let with_time = add_time_channel(orbits, &periods, &propagated)?;
                pad_to_fixed(&with_time, params.timesteps, params.fill)?
            } else {
                pad_to_fixed(orbits, params.timesteps, params.fill)?
            };
            Ok(PackedOrbits {
                segment_ids: ordered_keys(orbits),
                tensor,
            })
        }
        PackingPolicy::FixedSegments => {
            let (tensor, segment_ids) = segment_fixed_length(orbits, params.segment_length)?;
            Ok(PackedOrbits {
                tensor,
                segment_ids,
            })
        }
    }
}
