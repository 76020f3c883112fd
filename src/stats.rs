//! # Per-channel summary statistics
//!
//! Summarize a packed `(N, C, T)` tensor channel by channel: for each scalar,
//! the `N × T` samples of all orbits and all time instants are flattened into
//! one population and reduced to min / mean / max and the 25th / 50th / 75th
//! percentiles.
//!
//! ## Conventions
//! -----------------
//! * Percentiles use linear interpolation between closest ranks, so for any
//!   non-empty population `min ≤ p25 ≤ median ≤ p75 ≤ max`.
//! * Channel names follow the fixed layout: the six state channels of
//!   [`SCALAR_CHANNELS`], then [`TIME_CHANNEL`] when a seventh channel is
//!   present, then `ch<i>` for anything beyond.
//! * Deterministic and side-effect free: the only output is the returned list.
//!
//! ## Example
//! -----------------
//! ```rust
//! use ndarray::Array3;
//! use orbitset::stats::overall_statistics;
//!
//! let tensor = Array3::from_shape_fn((4, 6, 50), |(n, c, t)| (n + c + t) as f64);
//! let stats = overall_statistics(&tensor).unwrap();
//! assert_eq!(stats[0].0, "posx");
//! for (_, s) in &stats {
//!     assert!(s.min <= s.p25 && s.p25 <= s.median && s.median <= s.p75 && s.p75 <= s.max);
//! }
//! ```
use std::fmt;

use ndarray::Array3;
use serde::Serialize;

use crate::constants::{SCALAR_CHANNELS, TIME_CHANNEL};
use crate::orbitset_errors::OrbitsetError;

/// Summary statistics for one scalar channel over all orbits and time samples.
///
/// Display
/// -----------------
/// * `format!("{}", stats)` – compact single-line summary, e.g.:
///   ```text
///   min=-1.000, p25=0.000, median=0.500, p75=1.000, max=2.000, mean=0.480
///   ```
/// * `format!("{:#}", stats)` – pretty multi-line table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
}

impl fmt::Display for ChannelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "min    : {:.6}", self.min)?;
            writeln!(f, "p25    : {:.6}", self.p25)?;
            writeln!(f, "median : {:.6}", self.median)?;
            writeln!(f, "p75    : {:.6}", self.p75)?;
            writeln!(f, "max    : {:.6}", self.max)?;
            write!(f, "mean   : {:.6}", self.mean)
        } else {
            write!(
                f,
                "min={:.3}, p25={:.3}, median={:.3}, p75={:.3}, max={:.3}, mean={:.3}",
                self.min, self.p25, self.median, self.p75, self.max, self.mean
            )
        }
    }
}

/// Linearly-interpolated percentile of an ascending-sorted, non-empty slice.
///
/// `q` is a quantile in `[0, 1]`; the virtual index is `q × (len - 1)` and the
/// value is interpolated between the two enclosing ranks.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (position - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Name of tensor channel `index` under the fixed channel layout.
pub(crate) fn channel_name(index: usize) -> String {
    if index < SCALAR_CHANNELS.len() {
        SCALAR_CHANNELS[index].to_string()
    } else if index == SCALAR_CHANNELS.len() {
        TIME_CHANNEL.to_string()
    } else {
        format!("ch{index}")
    }
}

/// Compute per-channel summary statistics over a packed `(N, C, T)` tensor.
///
/// For each channel, the `N × T` samples are flattened into one population and
/// reduced to `{min, mean, max, p25, median, p75}`. Channels are returned in
/// storage order, so iteration is deterministic.
///
/// Return
/// ----------
/// * `Ok(Vec<(name, ChannelStats)>)` — one entry per channel.
/// * `Err(OrbitsetError::EmptyTensor)` — any axis of the tensor is zero.
pub fn overall_statistics(
    tensor: &Array3<f64>,
) -> Result<Vec<(String, ChannelStats)>, OrbitsetError> {
    let (orbits, channels, samples) = tensor.dim();
    if orbits == 0 || channels == 0 || samples == 0 {
        return Err(OrbitsetError::EmptyTensor(format!(
            "tensor of shape ({orbits}, {channels}, {samples})"
        )));
    }

    let mut stats = Vec::with_capacity(channels);
    for channel in 0..channels {
        let mut values: Vec<f64> = tensor
            .index_axis(ndarray::Axis(1), channel)
            .iter()
            .copied()
            .collect();
        values.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        stats.push((
            channel_name(channel),
            ChannelStats {
                min: values[0],
                mean,
                max: values[values.len() - 1],
                p25: percentile(&values, 0.25),
                median: percentile(&values, 0.50),
                p75: percentile(&values, 0.75),
            },
        ));
    }
    Ok(stats)
}

#[cfg(test)]
mod stats_tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array3;

    #[test]
    fn known_population_exact_values() {
        // Channel 0 holds 0..=4 once each (N=1, T=5).
        let tensor =
            Array3::from_shape_fn((1, 6, 5), |(_, c, t)| if c == 0 { t as f64 } else { 0.0 });
        let stats = overall_statistics(&tensor).unwrap();
        let (name, posx) = &stats[0];
        assert_eq!(name, "posx");
        assert_relative_eq!(posx.min, 0.0);
        assert_relative_eq!(posx.max, 4.0);
        assert_relative_eq!(posx.mean, 2.0);
        assert_relative_eq!(posx.p25, 1.0);
        assert_relative_eq!(posx.median, 2.0);
        assert_relative_eq!(posx.p75, 3.0);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        // Population {0, 1, 2, 3}: p25 sits a quarter of the way into [0, 3].
        let sorted = [0.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(percentile(&sorted, 0.25), 0.75);
        assert_relative_eq!(percentile(&sorted, 0.5), 1.5);
    }

    #[test]
    fn ordering_property_holds() {
        let tensor = Array3::from_shape_fn((3, 6, 40), |(n, c, t)| {
            ((n * 7 + c * 13 + t * 29) % 83) as f64 - 41.0
        });
        for (_, s) in overall_statistics(&tensor).unwrap() {
            assert!(s.min <= s.p25);
            assert!(s.p25 <= s.median);
            assert!(s.median <= s.p75);
            assert!(s.p75 <= s.max);
        }
    }

    #[test]
    fn seven_channel_tensor_names_the_time_channel() {
        let tensor = Array3::zeros((2, 7, 4));
        let stats = overall_statistics(&tensor).unwrap();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[6].0, "time");
    }

    #[test]
    fn empty_tensor_is_an_error() {
        let tensor = Array3::zeros((0, 6, 10));
        assert!(matches!(
            overall_statistics(&tensor),
            Err(OrbitsetError::EmptyTensor(_))
        ));
    }
}
