//! # Static 3D rendering (`plot` feature)
//!
//! Bitmap rendering of selected orbits with `plotters`: one 3D line series per
//! orbit, red circles at highlighted time instants, and labeled circles for
//! extra named points. Axis ranges are fitted to the drawn position data.
use camino::Utf8Path;
use ndarray::Array3;
use plotters::prelude::*;
use tracing::info;

use super::PlotSelection;
use crate::orbitset_errors::OrbitsetError;

/// Output image size in pixels.
#[derive(Debug, Clone, Copy)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
        }
    }
}

/// Axis range of the drawn position data, symmetric padding included.
fn position_range(
    data: &Array3<f64>,
    rows: &[usize],
    channel: usize,
    extra: impl Iterator<Item = f64>,
) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &row in rows {
        for &value in data.slice(ndarray::s![row, channel, ..]) {
            lo = lo.min(value);
            hi = hi.max(value);
        }
    }
    for value in extra {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-9);
    (lo - pad, hi + pad)
}

/// Render a static 3D plot of the selected orbits to a bitmap file.
///
/// Arguments
/// -----------------
/// * `data`: packed `(N, C, T)` tensor; channels 0–2 are `posx..posz`.
/// * `selection`: rows to draw, instants to highlight, extra points.
/// * `filename`: output path (PNG/BMP per extension); overwritten when it exists.
/// * `size`: output resolution.
///
/// Return
/// ----------
/// * `Err(OrbitsetError::IndexOutOfRange)` — invalid selection; nothing is drawn.
/// * `Err(OrbitsetError::PlotError)` — backend failure during rendering.
pub fn static_orbit_plot(
    data: &Array3<f64>,
    selection: &PlotSelection,
    filename: &Utf8Path,
    size: ImageSize,
) -> Result<(), OrbitsetError> {
    let rows = selection.resolve(data)?;

    let x_range = position_range(data, &rows, 0, selection.points.iter().map(|(_, p)| p[0]));
    let y_range = position_range(data, &rows, 1, selection.points.iter().map(|(_, p)| p[1]));
    let z_range = position_range(data, &rows, 2, selection.points.iter().map(|(_, p)| p[2]));

    let root = BitMapBackend::new(filename.as_std_path(), (size.width, size.height))
        .into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("3D Orbits Static Visualization", ("sans-serif", 30))
        .margin(20)
        .build_cartesian_3d(
            x_range.0..x_range.1,
            y_range.0..y_range.1,
            z_range.0..z_range.1,
        )
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    chart
        .configure_axes()
        .draw()
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    for &row in &rows {
        let color = Palette99::pick(row).mix(0.7);
        let samples: Vec<(f64, f64, f64)> = (0..data.dim().2)
            .map(|t| (data[[row, 0, t]], data[[row, 1, t]], data[[row, 2, t]]))
            .collect();
        chart
            .draw_series(LineSeries::new(samples, color.stroke_width(1)))
            .map_err(|e| OrbitsetError::PlotError(e.to_string()))?
            .label(format!("Orbit {row}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart
            .draw_series(selection.time_instants.iter().map(|&instant| {
                Circle::new(
                    (
                        data[[row, 0, instant]],
                        data[[row, 1, instant]],
                        data[[row, 2, instant]],
                    ),
                    4,
                    RED.filled(),
                )
            }))
            .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    }

    chart
        .draw_series(selection.points.iter().map(|(_, coords)| {
            Circle::new((coords[0], coords[1], coords[2]), 5, BLACK.filled())
        }))
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;

    if selection.show_legend {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    }

    root.present()
        .map_err(|e| OrbitsetError::PlotError(e.to_string()))?;
    info!(file = %filename, orbits = rows.len(), "static plot saved");
    Ok(())
}
