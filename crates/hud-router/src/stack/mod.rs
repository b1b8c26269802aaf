//! The z-ordered surface stack and its accepting flags.

mod types;

pub use types::SurfaceStack;
