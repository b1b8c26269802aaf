//! The surface contract the router hit-tests against.

use hud_common::{Point, PointerEvent, Rect, SurfaceId};
use serde::{Deserialize, Serialize};

/// Class that marks an element as a pass-through zone.
pub const PASS_THROUGH_CLASS: &str = "deadzone";

/// An element inside a surface, as returned by a hit test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Pointer input over a pass-through zone belongs to whatever is behind.
    pub fn is_pass_through(&self) -> bool {
        self.classes.iter().any(|c| c == PASS_THROUGH_CLASS)
    }
}

/// Result of hit-testing a point inside a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hit", rename_all = "lowercase")]
pub enum HitTarget {
    /// Nothing at that point.
    Nothing,
    /// The surface's own root: empty or transparent area.
    Root,
    /// An interactive element.
    Element(ElementRef),
}

impl HitTarget {
    /// Whether this hit should make the surface the recipient.
    pub fn claims(&self) -> bool {
        matches!(self, HitTarget::Element(e) if !e.is_pass_through())
    }
}

/// Content load state of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

/// An embedded content region with its own coordinate space.
pub trait Surface {
    fn id(&self) -> &SurfaceId;

    /// Region of the host viewport the surface covers. `None` means fullscreen.
    fn bounds(&self) -> Option<Rect> {
        None
    }

    /// Topmost element at `local`, in the surface's own coordinates.
    fn hit_test(&self, local: Point) -> HitTarget;

    /// Deliver a synthesized event to `element` inside this surface.
    fn dispatch(&mut self, element: &ElementRef, event: PointerEvent);
}

impl Surface for Box<dyn Surface> {
    fn id(&self) -> &SurfaceId {
        (**self).id()
    }

    fn bounds(&self) -> Option<Rect> {
        (**self).bounds()
    }

    fn hit_test(&self, local: Point) -> HitTarget {
        (**self).hit_test(local)
    }

    fn dispatch(&mut self, element: &ElementRef, event: PointerEvent) {
        (**self).dispatch(element, event)
    }
}
