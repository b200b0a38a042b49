//! Test support utilities for eye-retouch.
//!
//! Provides mock detector/codec ports and synthetic portrait builders with
//! known eye geometry for testing the edit pipeline.

mod builders;
mod mocks;

pub use builders::SyntheticPortrait;
pub use mocks::{MockFaceBoxDetector, MockImageCodec, MockLandmarkDetector};
