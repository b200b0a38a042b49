//! Eye Retouch Adapters - External adapters for eye-retouch.
//!
//! This crate provides the filesystem image codec adapter. Detector
//! adapters (face mesh, face boxes) are supplied by the embedding
//! application against the core's port traits.

pub mod fs;

pub use fs::FsImageCodec;
