//! # Experiment-folder bookkeeping
//!
//! Create numbered experiment folders and keep an append-only CSV log of the
//! parameters each experiment ran with.
//!
//! ## Layout
//! -----------------
//! ```text
//! experiments/
//! ├── experiments.csv        # id,<param keys...>; one row per experiment
//! ├── experiment 1/
//! ├── experiment 2/
//! └── ...
//! ```
//!
//! The next experiment number is one past the highest existing `experiment <n>`
//! folder, so deleting an old folder never reuses its id as long as newer ones
//! remain. Parameters are ordered `(key, value)` pairs; the CSV header is
//! written once, when the log file is first created.
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

use crate::orbitset_errors::OrbitsetError;

/// Set up a new experiment: create its folder and log its parameters.
///
/// Arguments
/// -----------------
/// * `params`: ordered `(key, value)` parameter pairs for the new experiment.
/// * `experiments_folder`: folder holding all experiments (created if absent).
/// * `csv_file`: log-file path override; defaults to
///   `<experiments_folder>/experiments.csv`.
///
/// Return
/// ----------
/// * `Ok(Utf8PathBuf)` — path of the newly created `experiment <n>` folder.
/// * `Err(_)` — folder creation or CSV I/O failure.
///
/// Note
/// ----
/// The header row is derived from `params` at creation time; callers are
/// expected to log the same parameter keys for every run of one experiment
/// series (no reconciliation is attempted).
pub fn setup_new_experiment(
    params: &[(String, String)],
    experiments_folder: &Utf8Path,
    csv_file: Option<&Utf8Path>,
) -> Result<Utf8PathBuf, OrbitsetError> {
    std::fs::create_dir_all(experiments_folder)?;

    let csv_path = csv_file
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|| experiments_folder.join("experiments.csv"));

    let next_number = next_experiment_number(experiments_folder)?;
    let new_folder = experiments_folder.join(format!("experiment {next_number}"));
    std::fs::create_dir(&new_folder)?;

    let write_header = !csv_path.as_std_path().is_file();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)?;
    let mut writer = csv::Writer::from_writer(file);
    if write_header {
        let header: Vec<&str> = std::iter::once("id")
            .chain(params.iter().map(|(key, _)| key.as_str()))
            .collect();
        writer.write_record(&header)?;
    }
    let row: Vec<String> = std::iter::once(next_number.to_string())
        .chain(params.iter().map(|(_, value)| value.clone()))
        .collect();
    writer.write_record(&row)?;
    writer.flush()?;

    info!(experiment = next_number, folder = %new_folder, csv = %csv_path, "new experiment setup complete");
    Ok(new_folder)
}

/// Highest existing `experiment <n>` folder number plus one (1 when none exist).
fn next_experiment_number(experiments_folder: &Utf8Path) -> Result<u32, OrbitsetError> {
    let mut highest = 0u32;
    for entry in std::fs::read_dir(experiments_folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(number) = name
            .strip_prefix("experiment ")
            .and_then(|suffix| suffix.parse::<u32>().ok())
        {
            highest = highest.max(number);
        }
    }
    Ok(highest + 1)
}
