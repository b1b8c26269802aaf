//! Pointer routing across a stack of embedded surfaces.
//!
//! Surfaces overlap pixel for pixel; for every pointer event exactly one
//! of them (or the backplane behind them all) becomes the accepting
//! recipient. Priority is strictly front to back.

pub mod layout;
pub mod router;
pub mod source;
pub mod stack;
pub mod surface;

pub use layout::{Dispatched, LayoutElement, LayoutSurface};
pub use router::{Recipient, RouterEvent, RouterEventKind, SurfaceRouter};
pub use source::{load_surfaces, FeatureRegistry, FeatureSource, LookupError, LookupService};
pub use stack::SurfaceStack;
pub use surface::{ElementRef, HitTarget, LoadState, Surface, PASS_THROUGH_CLASS};
