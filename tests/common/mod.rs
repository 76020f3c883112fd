//! Shared fixtures for the integration tests: deterministic in-memory orbit
//! sets and a writer for a small, fully-formed HDF5 sample file.
use camino::{Utf8Path, Utf8PathBuf};
use hdf5::types::VarLenUnicode;
use ndarray::{Array1, Array2};
use orbitset::constants::STATE_DIM;
use orbitset::OrbitSet;

/// A `(6, samples)` trajectory whose value encodes its own coordinates:
/// `channel * 1000 + sample`. Handy for asserting slicing and padding.
pub fn ramp_orbit(samples: usize) -> Array2<f64> {
    Array2::from_shape_fn((STATE_DIM, samples), |(channel, t)| {
        (channel * 1000 + t) as f64
    })
}

/// Three ramp orbits of different lengths under contiguous keys.
#[allow(dead_code)]
pub fn sample_orbit_set() -> OrbitSet {
    let mut orbits = OrbitSet::default();
    orbits.insert(0, ramp_orbit(9));
    orbits.insert(1, ramp_orbit(13));
    orbits.insert(2, ramp_orbit(7));
    orbits
}

#[allow(dead_code)]
pub fn unicode_labels(labels: &[&str]) -> Array1<VarLenUnicode> {
    Array1::from_vec(
        labels
            .iter()
            .map(|label| label.parse::<VarLenUnicode>().unwrap())
            .collect(),
    )
}

/// Write a complete sample file under `dir` and return its path.
///
/// Contents:
/// * four feature columns (`period`, `propagated_periods`), orbit 3 (1-based)
///   flagged as not propagated,
/// * three orbit datasets named `2`, `5`, `10` with 9, 13 and 7 samples,
/// * system constants `mu` and `lstar`.
///
/// After loading, the three surviving feature rows line up with the
/// re-indexed orbit keys `0..3`: periods `[2, 3, 4]`, propagated `[2, 2, 3]`.
#[allow(dead_code)]
pub fn write_sample_hdf5(dir: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    let path = dir.join(file_name);
    let file = hdf5::File::create(&path).unwrap();

    let not_propagated = Array2::from_shape_vec((1, 1), vec![3.0]).unwrap();
    file.new_dataset_builder()
        .with_data(&not_propagated)
        .create("not_propagated_orbits")
        .unwrap();

    let system_features = Array2::from_shape_vec((2, 1), vec![0.0121, 384400.0]).unwrap();
    file.new_dataset_builder()
        .with_data(&system_features)
        .create("system_features")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&unicode_labels(&["mu", "lstar"]))
        .create("system_labels")
        .unwrap();

    // One column per orbit; column 2 belongs to the not-propagated orbit.
    let orbit_features = Array2::from_shape_vec(
        (2, 4),
        vec![
            2.0, 3.0, 99.0, 4.0, // period
            2.0, 2.0, 1.0, 3.0, // propagated_periods
        ],
    )
    .unwrap();
    file.new_dataset_builder()
        .with_data(&orbit_features)
        .create("orbit_features")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&unicode_labels(&["period", "propagated_periods"]))
        .create("orbit_labels")
        .unwrap();

    for (name, samples) in [("2", 9), ("5", 13), ("10", 7)] {
        file.new_dataset_builder()
            .with_data(&ramp_orbit(samples))
            .create(name)
            .unwrap();
    }

    path
}

/// Write a sample file in which every orbit completed: `not_propagated_orbits`
/// is a zero-extent `(1, 0)` dataset, and the three feature columns line up
/// directly with the three orbit datasets (nothing is dropped).
#[allow(dead_code)]
pub fn write_fully_propagated_hdf5(dir: &Utf8Path, file_name: &str) -> Utf8PathBuf {
    let path = dir.join(file_name);
    let file = hdf5::File::create(&path).unwrap();

    let not_propagated = Array2::<f64>::zeros((1, 0));
    file.new_dataset_builder()
        .with_data(&not_propagated)
        .create("not_propagated_orbits")
        .unwrap();

    let system_features = Array2::from_shape_vec((1, 1), vec![0.0121]).unwrap();
    file.new_dataset_builder()
        .with_data(&system_features)
        .create("system_features")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&unicode_labels(&["mu"]))
        .create("system_labels")
        .unwrap();

    let orbit_features = Array2::from_shape_vec(
        (2, 3),
        vec![
            2.0, 3.0, 4.0, // period
            2.0, 2.0, 3.0, // propagated_periods
        ],
    )
    .unwrap();
    file.new_dataset_builder()
        .with_data(&orbit_features)
        .create("orbit_features")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&unicode_labels(&["period", "propagated_periods"]))
        .create("orbit_labels")
        .unwrap();

    for (name, samples) in [("2", 9), ("5", 13), ("10", 7)] {
        file.new_dataset_builder()
            .with_data(&ramp_orbit(samples))
            .create(name)
            .unwrap();
    }

    path
}

/// Utf8 view of a tempdir path.
#[allow(dead_code)]
pub fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}
