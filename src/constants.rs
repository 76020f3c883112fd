//! # Constants and type definitions for orbitset
//!
//! This module centralizes the **channel-order constants** and **common type
//! definitions** used throughout the `orbitset` library. It also defines the key
//! container types for organizing orbits and packed tensors.
//!
//! ## Overview
//!
//! - The fixed scalar-channel layout of a simulated orbit
//! - Core type aliases used across the crate
//! - Container types for storing orbit sets and system constants
//!
//! These definitions are used by all main modules, including the HDF5 loader,
//! the period extractor, the tensor packer, and the statistics summarizer.

use ndarray::{Array2, Array3};
use std::collections::HashMap;

use ahash::RandomState;

// -------------------------------------------------------------------------------------------------
// Channel layout
// -------------------------------------------------------------------------------------------------

/// Number of state scalars per time sample (3 position + 3 velocity)
pub const STATE_DIM: usize = 6;

/// Names of the state channels, in the fixed row order used everywhere.
///
/// Channel 0 is always `posx`, regardless of packing policy.
pub const SCALAR_CHANNELS: [&str; STATE_DIM] = ["posx", "posy", "posz", "velx", "vely", "velz"];

/// Name of the optional elapsed-simulation-time channel appended by the packer.
pub const TIME_CHANNEL: &str = "time";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// A `HashMap` using [`ahash`](https://docs.rs/ahash) for fast hashing.
pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

/// Re-indexed orbit identifier (0-based, contiguous after loading).
pub type OrbitKey = usize;

/// One simulated trajectory: a `(STATE_DIM, T)` array of scalars over `T` time samples.
///
/// The packer may extend this to `(STATE_DIM + 1, T)` when a time channel is appended.
pub type OrbitArray = Array2<f64>;

/// A packed dataset: `(N, C, T_fixed)` with one row per orbit or segment.
pub type PackedTensor = Array3<f64>;

/// Per-file scalar constants (e.g. gravitational parameters), keyed by label.
pub type SystemConstants = FastHashMap<String, f64>;

/// Number of full periods actually simulated, per orbit key.
pub type PropagatedPeriods = FastHashMap<OrbitKey, usize>;

// -------------------------------------------------------------------------------------------------
// Data containers
// -------------------------------------------------------------------------------------------------

/// A full set of orbits for one system.
///
/// The key is the [`OrbitKey`] (re-indexed orbit identifier).
/// The value is the `(STATE_DIM, T)` trajectory of this orbit.
///
/// After [`OrbitDataset::from_hdf5`](crate::orbit_dataset::OrbitDataset::from_hdf5),
/// keys are contiguous `0..N`, assigned in ascending original-key order. Row `i` of
/// the accompanying [`FeatureTable`](crate::orbit_dataset::feature_table::FeatureTable)
/// describes orbit key `i`.
pub type OrbitSet = FastHashMap<OrbitKey, OrbitArray>;
