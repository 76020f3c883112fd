pub mod constants;
pub mod experiment;
pub mod orbit_classes;
pub mod orbit_dataset;
pub mod orbitset_errors;
pub mod processing;
pub mod stats;
pub mod visualization;

pub use constants::{OrbitKey, OrbitSet, PackedTensor, SystemConstants};
pub use orbit_dataset::OrbitDataset;
pub use orbitset_errors::OrbitsetError;
pub use processing::packing::PackedOrbits;
pub use processing::{FillValue, PackingParams, PackingPolicy};
