//! # Packing parameters
//!
//! This module defines the [`PackingParams`] configuration struct and its
//! builder, which control how a variable-length [`OrbitSet`](crate::OrbitSet)
//! is converted into one fixed-shape 3D tensor.
//!
//! ## Purpose
//!
//! [`PackingParams`] centralizes the tunable parameters consumed by
//! [`pack`](crate::processing::packing::pack) as an explicit, validated
//! configuration value passed by the caller. It lets you:
//!
//! - choose the packing policy (pad-to-fixed vs. fixed-length segmentation),
//! - pick the pad fill policy (zero fill or last-sample fill),
//! - request an elapsed-simulation-time channel appended to the state channels,
//! - set the fixed timestep count and the segment window length.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orbitset::{FillValue, PackingParams, PackingPolicy};
//!
//! let params = PackingParams::builder()
//!     .policy(PackingPolicy::PadToFixed)
//!     .timesteps(1000)
//!     .fill(FillValue::LastSample)
//!     .append_time_channel(true)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## See also
//!
//! * [`pack`](crate::processing::packing::pack) – policy dispatch consuming these parameters.
//! * [`extract_periods`](crate::processing::periods::extract_periods) – upstream period truncation.
use std::fmt;

use crate::orbitset_errors::OrbitsetError;

pub mod packing;
pub mod periods;

/// How variable-length orbits become rows of one fixed-shape tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackingPolicy {
    /// One tensor row per orbit, right-padded or truncated to `timesteps`.
    PadToFixed,
    /// One tensor row per non-overlapping window of `segment_length` samples;
    /// the remainder is dropped.
    FixedSegments,
}

/// Fill policy for samples beyond an orbit's end under [`PackingPolicy::PadToFixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillValue {
    /// Pad with zeros.
    Zero,
    /// Repeat the orbit's last sample.
    LastSample,
}

/// Configuration for [`pack`](crate::processing::packing::pack).
///
/// Fields
/// -----------------
/// * `policy` – packing policy (see [`PackingPolicy`]).
/// * `timesteps` – fixed time-dimension length under `PadToFixed`.
/// * `fill` – pad fill policy under `PadToFixed`.
/// * `append_time_channel` – append an elapsed-simulation-time channel derived
///   from per-orbit `period` × `propagated_periods` metadata (`PadToFixed` only).
/// * `segment_length` – window length under `FixedSegments`.
///
/// Defaults
/// -----------------
/// `PadToFixed`, `timesteps = 1000`, zero fill, no time channel,
/// `segment_length = 100`.
#[derive(Debug, Clone)]
pub struct PackingParams {
    pub policy: PackingPolicy,
    pub timesteps: usize,
    pub fill: FillValue,
    pub append_time_channel: bool,
    pub segment_length: usize,
}

impl PackingParams {
    /// Construct a new [`PackingParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fluent [`PackingParamsBuilder`] initialized with defaults.
    pub fn builder() -> PackingParamsBuilder {
        PackingParamsBuilder::new()
    }
}

impl Default for PackingParams {
    fn default() -> Self {
        PackingParams {
            policy: PackingPolicy::PadToFixed,
            timesteps: 1000,
            fill: FillValue::Zero,
            append_time_channel: false,
            segment_length: 100,
        }
    }
}

/// Builder for [`PackingParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct PackingParamsBuilder {
    params: PackingParams,
}

impl PackingParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: PackingParams::default(),
        }
    }

    pub fn policy(mut self, v: PackingPolicy) -> Self {
        self.params.policy = v;
        self
    }
    pub fn timesteps(mut self, v: usize) -> Self {
        self.params.timesteps = v;
        self
    }
    pub fn fill(mut self, v: FillValue) -> Self {
        self.params.fill = v;
        self
    }
    pub fn append_time_channel(mut self, v: bool) -> Self {
        self.params.append_time_channel = v;
        self
    }
    pub fn segment_length(mut self, v: usize) -> Self {
        self.params.segment_length = v;
        self
    }

    /// Finalize the builder and produce a [`PackingParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `timesteps >= 1` – a padded tensor needs at least one sample.
    /// * `segment_length >= 1` – a window needs at least one sample.
    /// * `append_time_channel` requires the `PadToFixed` policy; segments carry
    ///   no per-orbit period metadata of their own.
    ///
    /// Return
    /// ----------
    /// * `Ok(PackingParams)` when the configuration is consistent.
    /// * `Err(OrbitsetError::InvalidPackingParameter)` otherwise.
    pub fn build(self) -> Result<PackingParams, OrbitsetError> {
        let p = &self.params;
        if p.timesteps == 0 {
            return Err(OrbitsetError::InvalidPackingParameter(
                "timesteps must be >= 1".into(),
            ));
        }
        if p.segment_length == 0 {
            return Err(OrbitsetError::InvalidPackingParameter(
                "segment_length must be >= 1".into(),
            ));
        }
        if p.append_time_channel && p.policy != PackingPolicy::PadToFixed {
            return Err(OrbitsetError::InvalidPackingParameter(
                "append_time_channel requires the PadToFixed policy".into(),
            ));
        }
        Ok(self.params)
    }
}

impl fmt::Display for PackingParams {
    /// Compact by default; pretty multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Packing parameters")?;
            writeln!(f, "------------------")?;
            writeln!(f, "policy              : {:?}", self.policy)?;
            writeln!(f, "timesteps           : {}", self.timesteps)?;
            writeln!(f, "fill                : {:?}", self.fill)?;
            writeln!(f, "append_time_channel : {}", self.append_time_channel)?;
            write!(f, "segment_length      : {}", self.segment_length)
        } else {
            write!(
                f,
                "PackingParams(policy={:?}, timesteps={}, fill={:?}, time_channel={}, segment_length={})",
                self.policy, self.timesteps, self.fill, self.append_time_channel, self.segment_length
            )
        }
    }
}

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn builder_defaults_are_valid() {
        let params = PackingParams::builder().build().unwrap();
        assert_eq!(params.policy, PackingPolicy::PadToFixed);
        assert_eq!(params.fill, FillValue::Zero);
    }

    #[test]
    fn zero_timesteps_rejected() {
        let err = PackingParams::builder().timesteps(0).build().unwrap_err();
        assert!(matches!(err, OrbitsetError::InvalidPackingParameter(_)));
    }

    #[test]
    fn zero_segment_length_rejected() {
        let err = PackingParams::builder()
            .segment_length(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbitsetError::InvalidPackingParameter(_)));
    }

    #[test]
    fn time_channel_only_with_padding() {
        let err = PackingParams::builder()
            .policy(PackingPolicy::FixedSegments)
            .append_time_channel(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbitsetError::InvalidPackingParameter(_)));
    }
}
