// Analysis module - metric extraction and advisory rules
//
// This module owns the numeric half of the pipeline: turning a decoded
// mono clip into scalar metrics, and turning metrics into human-readable
// mixing advice.
//
// Pipeline position: decode -> FeatureExtractor -> advise
//
// Both stages are deterministic; persistence and identity concerns live
// elsewhere (store, identity).

pub mod advisor;
pub mod features;

pub use advisor::{advise, Advice};
pub use features::{FeatureExtractor, Metrics};
