//! Edit pipeline stages.
//!
//! Each stage is a pure function over landmark geometry and pixel data;
//! the [`crate::editor::Editor`] strings them together and commits the
//! resulting patches.

pub mod eye_state;
pub mod iris;
pub mod locate;
pub mod warp;
