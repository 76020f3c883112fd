//! # Per-channel histograms (`plot` feature)
//!
//! Render the value distribution of every channel of a packed `(N, C, T)`
//! tensor as a grid of histograms, one subplot per channel. The comparison
//! variant overlays two tensors on shared bins, so shifted distributions are
//! visible at a glance.
use camino::Utf8Path;
use ndarray::{Array3, Axis};
use plotters::prelude::*;
use tracing::info;

use super::static_plot::ImageSize;
use crate::orbitset_errors::OrbitsetError;
use crate::stats::channel_name;

/// Subplots per grid row.
const GRID_COLUMNS: usize = 3;

fn channel_values(data: &Array3<f64>, channel: usize) -> Vec<f64> {
    data.index_axis(Axis(1), channel).iter().copied().collect()
}

/// Common value range of all series, widened when the data is constant.
fn value_range(series: &[&[f64]]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for values in series {
        for &value in *values {
            lo = lo.min(value);
            hi = hi.max(value);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

fn bin_counts(values: &[f64], lo: f64, bin_width: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    for &value in values {
        let bin = (((value - lo) / bin_width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    counts
}

fn check_inputs(data: &Array3<f64>, bins: usize) -> Result<(), OrbitsetError> {
    if bins == 0 {
        return Err(OrbitsetError::PlotError("bins must be >= 1".to_string()));
    }
    let (orbits, channels, samples) = data.dim();
    if orbits == 0 || channels == 0 || samples == 0 {
        return Err(OrbitsetError::EmptyTensor(format!(
            "tensor of shape ({orbits}, {channels}, {samples})"
        )));
    }
    Ok(())
}

/// One histogram subplot: shared bins, one translucent series per color.
fn draw_channel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    series: &[(RGBAColor, &[f64])],
    bins: usize,
) -> Result<(), OrbitsetError> {
    let values: Vec<&[f64]> = series.iter().map(|(_, v)| *v).collect();
    let (lo, hi) = value_range(&values);
    let bin_width = (hi - lo) / bins as f64;

    let counts: Vec<(RGBAColor, Vec<usize>)> = series
        .iter()
        .map(|(color, values)| (*color, bin_counts(values, lo, bin_width, bins)))
        .collect();
    let max_count = counts
        .iter()
        .flat_map(|(_, c)| c.iter().copied())
        .max()
        .unwrap_or(1)
        .max(1);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(20)
        .y_label_area_size(32)
        .build_cartesian_2d(lo..hi, 0.0..max_count as f64 * 1.05)
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    for (color, counts) in &counts {
        chart
            .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
                let x0 = lo + bin as f64 * bin_width;
                Rectangle::new([(x0, 0.0), (x0 + bin_width, count as f64)], color.filled())
            }))
            .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    }
    Ok(())
}

fn grid_rows(channels: usize) -> usize {
    channels.div_ceil(GRID_COLUMNS)
}

/// Render one histogram per channel of a packed tensor to a bitmap file.
///
/// The `N × T` samples of each channel are flattened into one population and
/// binned over that channel's own value range.
///
/// Return
/// ----------
/// * `Err(OrbitsetError::EmptyTensor)` — any tensor axis is zero.
/// * `Err(OrbitsetError::PlotError)` — `bins == 0` or a backend failure.
pub fn channel_histograms(
    data: &Array3<f64>,
    filename: &Utf8Path,
    bins: usize,
    size: ImageSize,
) -> Result<(), OrbitsetError> {
    check_inputs(data, bins)?;
    let channels = data.dim().1;

    let root = BitMapBackend::new(filename.as_std_path(), (size.width, size.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    let areas = root.split_evenly((grid_rows(channels), GRID_COLUMNS));
    for channel in 0..channels {
        let values = channel_values(data, channel);
        draw_channel(
            &areas[channel],
            &channel_name(channel),
            &[(BLUE.mix(0.6), &values)],
            bins,
        )?;
    }

    root.present()
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    info!(file = %filename, channels, bins, "channel histograms saved");
    Ok(())
}

/// Overlay the per-channel histograms of two packed tensors on shared bins.
///
/// Both tensors must carry the same channel count; the first is drawn in blue,
/// the second in red, both translucent.
///
/// Return
/// ----------
/// * `Err(OrbitsetError::EmptyTensor)` — any axis of either tensor is zero.
/// * `Err(OrbitsetError::PlotError)` — `bins == 0`, channel-count disagreement,
///   or a backend failure.
pub fn channel_histogram_comparison(
    first: &Array3<f64>,
    second: &Array3<f64>,
    filename: &Utf8Path,
    bins: usize,
    size: ImageSize,
) -> Result<(), OrbitsetError> {
    check_inputs(first, bins)?;
    check_inputs(second, bins)?;
    let channels = first.dim().1;
    if second.dim().1 != channels {
        return Err(OrbitsetError::PlotError(format!(
            "channel count mismatch: {} vs {}",
            channels,
            second.dim().1
        )));
    }

    let root = BitMapBackend::new(filename.as_std_path(), (size.width, size.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    let areas = root.split_evenly((grid_rows(channels), GRID_COLUMNS));
    for channel in 0..channels {
        let first_values = channel_values(first, channel);
        let second_values = channel_values(second, channel);
        draw_channel(
            &areas[channel],
            &channel_name(channel),
            &[
                (BLUE.mix(0.4), &first_values),
                (RED.mix(0.4), &second_values),
            ],
            bins,
        )?;
    }

    root.present()
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    info!(file = %filename, channels, bins, "channel histogram comparison saved");
    Ok(())
}

#[cfg(test)]
mod histogram_tests {
    use super::*;
    use ndarray::Array3;

    fn sample_tensor(offset: f64) -> Array3<f64> {
        Array3::from_shape_fn((3, 6, 20), |(n, c, t)| {
            offset + c as f64 * 10.0 + ((n * 20 + t) % 7) as f64
        })
    }

    #[test]
    fn renders_a_histogram_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("hist.png")).unwrap();
        channel_histograms(&sample_tensor(0.0), &path, 10, ImageSize::default()).unwrap();
        assert!(path.as_std_path().metadata().unwrap().len() > 0);
    }

    #[test]
    fn comparison_overlays_two_tensors() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("compare.png")).unwrap();
        channel_histogram_comparison(
            &sample_tensor(0.0),
            &sample_tensor(2.5),
            &path,
            10,
            ImageSize::default(),
        )
        .unwrap();
        assert!(path.as_std_path().exists());
    }

    #[test]
    fn zero_bins_and_empty_tensors_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("hist.png")).unwrap();
        let data = sample_tensor(0.0);
        assert!(matches!(
            channel_histograms(&data, &path, 0, ImageSize::default()),
            Err(OrbitsetError::PlotError(_))
        ));
        let empty = Array3::<f64>::zeros((0, 6, 10));
        assert!(matches!(
            channel_histograms(&empty, &path, 10, ImageSize::default()),
            Err(OrbitsetError::EmptyTensor(_))
        ));
        assert!(!path.as_std_path().exists());
    }

    #[test]
    fn mismatched_channel_counts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("compare.png")).unwrap();
        let seven = Array3::<f64>::zeros((2, 7, 10));
        let err = channel_histogram_comparison(
            &sample_tensor(0.0),
            &seven,
            &path,
            10,
            ImageSize::default(),
        )
        .unwrap_err();
        assert!(matches!(err, OrbitsetError::PlotError(_)));
    }
}
