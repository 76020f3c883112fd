//! # 3D orbit visualization
//!
//! Render packed `(N, C, T)` tensors as 3D trajectory plots:
//!
//! * [`html_export`] – self-contained interactive HTML (Plotly scene, data
//!   payload embedded as JSON); always available.
//! * [`static_plot`] – static bitmap rendering with `plotters`; compiled behind
//!   the `plot` cargo feature.
//! * [`histograms`] – per-channel value histograms (single tensor or two-tensor
//!   overlay); also behind the `plot` feature.
//!
//! Both backends share [`PlotSelection`]: which orbits to draw, which time
//! instants to highlight, and extra named points to mark. Selection is
//! validated **before** any output is produced — an out-of-range orbit index or
//! time instant is an invalid-parameter error and nothing is written.
use ndarray::Array3;

use crate::orbitset_errors::OrbitsetError;

#[cfg(feature = "plot")]
pub mod histograms;
pub mod html_export;
#[cfg(feature = "plot")]
pub mod static_plot;

/// Which rows and samples of a packed tensor to draw.
#[derive(Debug, Clone, Default)]
pub struct PlotSelection {
    /// Orbit rows to draw; `None` draws all rows.
    pub orbit_indices: Option<Vec<usize>>,
    /// Time instants to highlight on every drawn orbit.
    pub time_instants: Vec<usize>,
    /// Extra named points to mark, as `(name, [x, y, z])`.
    pub points: Vec<(String, [f64; 3])>,
    /// Whether to render a legend.
    pub show_legend: bool,
}

impl PlotSelection {
    /// Draw every orbit, no highlights, no extra points.
    pub fn all() -> Self {
        Self::default()
    }

    /// Validate the selection against a tensor and resolve the row list.
    ///
    /// Return
    /// ----------
    /// * `Ok(Vec<usize>)` — the concrete rows to draw.
    /// * `Err(OrbitsetError::IndexOutOfRange)` — an orbit index `>= N` or a
    ///   highlighted time instant `>= T`.
    pub(crate) fn resolve(&self, data: &Array3<f64>) -> Result<Vec<usize>, OrbitsetError> {
        let (num_orbits, _, num_samples) = data.dim();

        for &instant in &self.time_instants {
            if instant >= num_samples {
                return Err(OrbitsetError::IndexOutOfRange {
                    kind: "time instant",
                    index: instant,
                    len: num_samples,
                });
            }
        }

        let indices = match &self.orbit_indices {
            None => (0..num_orbits).collect(),
            Some(indices) => {
                for &index in indices {
                    if index >= num_orbits {
                        return Err(OrbitsetError::IndexOutOfRange {
                            kind: "orbit",
                            index,
                            len: num_orbits,
                        });
                    }
                }
                indices.clone()
            }
        };
        Ok(indices)
    }
}
