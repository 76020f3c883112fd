use approx::assert_relative_eq;
use ndarray::Array2;
use orbitset::constants::{SystemConstants, STATE_DIM};
use orbitset::orbit_dataset::feature_table::FeatureTable;
use orbitset::stats::overall_statistics;
use orbitset::{FillValue, OrbitDataset, PackingParams, PackingPolicy};

mod common;

/// Dataset over three ramp orbits of 9, 13 and 7 samples, with period
/// metadata matching the sample HDF5 fixture.
fn sample_dataset() -> OrbitDataset {
    let features = FeatureTable::new(
        vec!["period".to_string(), "propagated_periods".to_string()],
        Array2::from_shape_vec((3, 2), vec![2.0, 2.0, 3.0, 2.0, 4.0, 3.0]).unwrap(),
    )
    .unwrap();
    OrbitDataset {
        orbits: common::sample_orbit_set(),
        features,
        constants: SystemConstants::default(),
    }
}

#[test]
fn padding_policy_truncates_and_fills() {
    let dataset = sample_dataset();
    let params = PackingParams::builder()
        .policy(PackingPolicy::PadToFixed)
        .timesteps(10)
        .fill(FillValue::LastSample)
        .build()
        .unwrap();

    let packed = dataset.pack(&params).unwrap();
    assert_eq!(packed.tensor.dim(), (3, STATE_DIM, 10));
    assert_eq!(packed.segment_ids, vec![0, 1, 2]);

    // Orbit 0 (9 samples): last real sample repeated into the pad region.
    assert_relative_eq!(packed.tensor[[0, 0, 8]], 8.0);
    assert_relative_eq!(packed.tensor[[0, 0, 9]], 8.0);
    // Orbit 1 (13 samples): truncated at the fixed length.
    assert_relative_eq!(packed.tensor[[1, 0, 9]], 9.0);
    // Orbit 2 (7 samples): three padded samples.
    assert_relative_eq!(packed.tensor[[2, 5, 9]], 5006.0);
}

#[test]
fn time_channel_carries_elapsed_simulation_time() {
    let dataset = sample_dataset();
    let params = PackingParams::builder()
        .timesteps(9)
        .fill(FillValue::LastSample)
        .append_time_channel(true)
        .build()
        .unwrap();

    let packed = dataset.pack(&params).unwrap();
    assert_eq!(packed.tensor.dim(), (3, STATE_DIM + 1, 9));

    // Orbit 0: period 2 x 2 propagated periods over 9 samples, so the
    // elapsed time runs linearly from 0 to 4.
    let time = STATE_DIM;
    assert_relative_eq!(packed.tensor[[0, time, 0]], 0.0);
    assert_relative_eq!(packed.tensor[[0, time, 4]], 2.0);
    assert_relative_eq!(packed.tensor[[0, time, 8]], 4.0);
    // Position channels are untouched by the appended channel.
    assert_relative_eq!(packed.tensor[[0, 0, 3]], 3.0);
}

#[test]
fn segmentation_policy_tracks_source_orbits() {
    let dataset = sample_dataset();
    let params = PackingParams::builder()
        .policy(PackingPolicy::FixedSegments)
        .segment_length(4)
        .build()
        .unwrap();

    let packed = dataset.pack(&params).unwrap();
    // floor(9/4) + floor(13/4) + floor(7/4) = 2 + 3 + 1 windows.
    assert_eq!(packed.tensor.dim(), (6, STATE_DIM, 4));
    assert_eq!(packed.segment_ids, vec![0, 0, 1, 1, 1, 2]);

    // Second window of orbit 1 starts at its sample 4.
    assert_relative_eq!(packed.tensor[[3, 0, 0]], 4.0);
}

#[test]
fn packed_tensor_feeds_channel_statistics() {
    let dataset = sample_dataset();
    let params = PackingParams::builder()
        .policy(PackingPolicy::FixedSegments)
        .segment_length(5)
        .build()
        .unwrap();

    let packed = dataset.pack(&params).unwrap();
    let stats = overall_statistics(&packed.tensor).unwrap();

    assert_eq!(stats.len(), STATE_DIM);
    assert_eq!(stats[0].0, "posx");
    assert_eq!(stats[5].0, "velz");
    for (_, channel) in &stats {
        assert!(channel.min <= channel.p25);
        assert!(channel.p25 <= channel.median);
        assert!(channel.median <= channel.p75);
        assert!(channel.p75 <= channel.max);
    }
    // Ramp orbits put channel c in [c*1000, c*1000 + 12]; windows never cross
    // channels, so each channel's minimum is its own base value.
    assert_relative_eq!(stats[2].1.min, 2000.0);
}
