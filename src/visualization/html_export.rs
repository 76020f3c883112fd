//! # Interactive HTML export
//!
//! Write a self-contained HTML file embedding a Plotly 3D scene of the selected
//! orbits. The trace payload is serialized with `serde_json` and inlined into
//! the page; only the Plotly runtime itself is referenced from its CDN, so the
//! artifact stays a single file.
use camino::Utf8Path;
use ndarray::Array3;
use serde_json::json;
use tracing::info;

use super::PlotSelection;
use crate::orbitset_errors::OrbitsetError;

/// Visualize orbits in 3D and save them as an interactive HTML file.
///
/// One line trace per selected orbit (position channels 0–2), red markers at
/// every highlighted time instant, and one marker trace per named point. Traces
/// share a legend group per orbit so toggling an orbit hides its highlights too.
///
/// Arguments
/// -----------------
/// * `data`: packed `(N, C, T)` tensor; channels 0–2 are `posx..posz`.
/// * `selection`: rows to draw, instants to highlight, extra points.
/// * `filename`: output path; overwritten when it exists.
///
/// Return
/// ----------
/// * `Err(OrbitsetError::IndexOutOfRange)` — invalid selection; no file is written.
/// * `Err(_)` — serialization or I/O failure.
pub fn export_dynamic_orbits_html(
    data: &Array3<f64>,
    selection: &PlotSelection,
    filename: &Utf8Path,
) -> Result<(), OrbitsetError> {
    let rows = selection.resolve(data)?;

    let mut traces = Vec::new();
    for &index in &rows {
        let x: Vec<f64> = data.slice(ndarray::s![index, 0, ..]).to_vec();
        let y: Vec<f64> = data.slice(ndarray::s![index, 1, ..]).to_vec();
        let z: Vec<f64> = data.slice(ndarray::s![index, 2, ..]).to_vec();
        traces.push(json!({
            "type": "scatter3d",
            "mode": "lines",
            "name": format!("Orbit {index}"),
            "legendgroup": format!("orbit{index}"),
            "showlegend": true,
            "x": x, "y": y, "z": z,
        }));

        for &instant in &selection.time_instants {
            traces.push(json!({
                "type": "scatter3d",
                "mode": "markers",
                "marker": {"size": 5, "color": "red"},
                "name": format!("Highlight {index} @ {instant}"),
                "legendgroup": format!("orbit{index}"),
                "showlegend": false,
                "x": [data[[index, 0, instant]]],
                "y": [data[[index, 1, instant]]],
                "z": [data[[index, 2, instant]]],
            }));
        }
    }

    for (name, coords) in &selection.points {
        traces.push(json!({
            "type": "scatter3d",
            "mode": "markers",
            "marker": {"size": 5},
            "name": name,
            "x": [coords[0]], "y": [coords[1]], "z": [coords[2]],
        }));
    }

    let layout = json!({
        "title": "3D Orbits Visualization",
        "scene": {
            "xaxis": {"title": "X"},
            "yaxis": {"title": "Y"},
            "zaxis": {"title": "Z"},
        },
        "width": 800,
        "height": 600,
        "legend": {"title": {"text": "Orbits Legend"}},
        "showlegend": selection.show_legend,
        "clickmode": "event+select",
    });

    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n\
         <script src=\"https://cdn.plot.ly/plotly-2.27.0.min.js\"></script>\n\
         </head>\n<body>\n<div id=\"orbits\"></div>\n<script>\n\
         Plotly.newPlot(\"orbits\", {traces}, {layout});\n\
         </script>\n</body>\n</html>\n",
        traces = serde_json::to_string(&traces)?,
        layout = serde_json::to_string(&layout)?,
    );
    std::fs::write(filename, html)?;

    info!(file = %filename, orbits = rows.len(), "visualization saved");
    Ok(())
}

#[cfg(test)]
mod html_tests {
    use super::*;
    use ndarray::Array3;

    fn sample_tensor() -> Array3<f64> {
        Array3::from_shape_fn((2, 6, 8), |(n, c, t)| (n * 100 + c * 10 + t) as f64)
    }

    #[test]
    fn writes_one_trace_per_orbit_plus_highlights() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("orbits.html")).unwrap();
        let selection = PlotSelection {
            time_instants: vec![0, 7],
            points: vec![("L2".to_string(), [1.0, 0.0, 0.0])],
            show_legend: true,
            ..Default::default()
        };
        export_dynamic_orbits_html(&sample_tensor(), &selection, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Orbit 0"));
        assert!(html.contains("Orbit 1"));
        assert!(html.contains("Highlight 1 @ 7"));
        assert!(html.contains("L2"));
        assert!(html.contains("Plotly.newPlot"));
    }

    #[test]
    fn invalid_selection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("orbits.html")).unwrap();
        let selection = PlotSelection {
            orbit_indices: Some(vec![5]),
            ..Default::default()
        };
        let err = export_dynamic_orbits_html(&sample_tensor(), &selection, &path).unwrap_err();
        assert!(matches!(err, OrbitsetError::IndexOutOfRange { .. }));
        assert!(!path.as_std_path().exists());
    }
}
