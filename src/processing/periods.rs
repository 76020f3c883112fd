//! # Period extraction
//!
//! Truncate every orbit of a set to a desired number of full periods.
//!
//! ## Overview
//! -----------------
//! Raw trajectories cover `propagated_periods[k]` full periods in `T_k` samples.
//! [`extract_periods`] keeps, for each orbit, the leading samples covering
//! `desired_periods` periods plus **one extra boundary sample**, so the slice
//! closes on the state where the next period would begin:
//!
//! ```text
//! length_per_period = T / propagated          (integer division)
//! length_to_take    = length_per_period × desired
//! kept samples      = length_to_take + 1      (clamped to T)
//! ```
//!
//! The clamp matters in one corner: when `T` divides exactly by `propagated`
//! and `desired == propagated`, the boundary sample would point one past the
//! end; the whole orbit is kept instead.
//!
//! ## Error semantics
//! -----------------
//! * `desired_periods == 0` → [`OrbitsetError::InvalidPackingParameter`]; an
//!   extraction of zero periods has no meaningful slice.
//! * An orbit key absent from the propagated-period map →
//!   [`OrbitsetError::MissingOrbitKey`].
//! * `propagated < desired` → [`OrbitsetError::InsufficientPeriods`]; you cannot
//!   extract more periods than were simulated (an orbit with zero propagated
//!   periods fails here for any request).
//!
//! Both abort the whole extraction: there is no partial result. The aggregate
//! retained fraction is reported through `tracing` as an informational side
//! effect, never as an error.
use itertools::Itertools;
use ndarray::s;
use tracing::info;

use crate::constants::{OrbitSet, PropagatedPeriods};
use crate::orbitset_errors::OrbitsetError;

/// Extract the first `desired_periods` periods of every orbit in the set.
///
/// Pure over its inputs: no orbit is mutated in place; a new set with the same
/// keys is returned.
///
/// Arguments
/// -----------------
/// * `orbits`: the orbit set to truncate.
/// * `propagated_periods`: full-period count per orbit key.
/// * `desired_periods`: how many leading periods to keep.
///
/// Return
/// ----------
/// * `Ok(OrbitSet)` — truncated copies, keys preserved.
/// * `Err(OrbitsetError::InvalidPackingParameter)` — `desired_periods == 0`.
/// * `Err(OrbitsetError::MissingOrbitKey)` — an orbit has no period count.
/// * `Err(OrbitsetError::InsufficientPeriods)` — fewer periods were propagated
///   than requested.
///
/// Example
/// -----------------
/// ```rust
/// use ndarray::Array2;
/// use orbitset::constants::{OrbitSet, PropagatedPeriods};
/// use orbitset::processing::periods::extract_periods;
///
/// let mut orbits = OrbitSet::default();
/// orbits.insert(0, Array2::zeros((6, 10)));
/// let propagated: PropagatedPeriods = [(0, 2)].into_iter().collect();
///
/// let first = extract_periods(&orbits, &propagated, 1).unwrap();
/// // length_per_period = 5, length_to_take = 5, plus the boundary sample
/// assert_eq!(first[&0].dim(), (6, 6));
/// ```
pub fn extract_periods(
    orbits: &OrbitSet,
    propagated_periods: &PropagatedPeriods,
    desired_periods: usize,
) -> Result<OrbitSet, OrbitsetError> {
    if desired_periods == 0 {
        return Err(OrbitsetError::InvalidPackingParameter(
            "desired_periods must be >= 1".into(),
        ));
    }
    let mut processed = OrbitSet::default();
    let mut total_before = 0usize;
    let mut total_after = 0usize;

    for &key in orbits.keys().sorted() {
        let orbit = &orbits[&key];
        let samples = orbit.ncols();
        total_before += samples;

        let &propagated = propagated_periods
            .get(&key)
            .ok_or(OrbitsetError::MissingOrbitKey(key))?;
        if propagated < desired_periods {
            return Err(OrbitsetError::InsufficientPeriods {
                orbit: key,
                propagated,
                desired: desired_periods,
            });
        }

        let length_per_period = samples / propagated;
        let length_to_take = length_per_period * desired_periods;
        // One extra boundary sample, clamped when the slice would run past the end.
        let keep = (length_to_take + 1).min(samples);
        processed.insert(key, orbit.slice(s![.., ..keep]).to_owned());
        total_after += keep;
    }

    if total_before > 0 {
        let percentage = total_after as f64 / total_before as f64 * 100.0;
        info!(
            desired_periods,
            retained_samples = total_after,
            total_samples = total_before,
            "Percentage of the dataset returned: {percentage:.2}%"
        );
    }

    Ok(processed)
}
