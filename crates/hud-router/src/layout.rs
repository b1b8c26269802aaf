//! A surface whose content is a declared list of rectangular elements.
//!
//! The host does not render surface content; it only needs to know where
//! the interactive elements are. Each `LayoutSurface` keeps that geometry
//! and an outbox of events dispatched to it, which the host drains.

use hud_common::{Point, PointerEvent, Rect, SurfaceId};
use serde::{Deserialize, Serialize};

use crate::source::FeatureSource;
use crate::surface::{ElementRef, HitTarget, Surface};

/// An interactive element, in the surface's local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutElement {
    pub id: String,
    pub rect: Rect,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl LayoutElement {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    fn to_ref(&self) -> ElementRef {
        ElementRef {
            id: self.id.clone(),
            classes: self.classes.clone(),
        }
    }
}

/// An event that was delivered into a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatched {
    pub surface: SurfaceId,
    pub element: ElementRef,
    pub event: PointerEvent,
}

pub struct LayoutSurface {
    id: SurfaceId,
    bounds: Option<Rect>,
    source: Option<FeatureSource>,
    /// Paint order: later elements are on top.
    elements: Vec<LayoutElement>,
    outbox: Vec<Dispatched>,
}

impl LayoutSurface {
    pub fn new(id: impl Into<SurfaceId>) -> Self {
        Self {
            id: id.into(),
            bounds: None,
            source: None,
            elements: Vec::new(),
            outbox: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_source(mut self, source: FeatureSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_elements(mut self, elements: Vec<LayoutElement>) -> Self {
        self.elements = elements;
        self
    }

    /// Replace the element geometry, e.g. after the surface re-lays itself out.
    pub fn set_elements(&mut self, elements: Vec<LayoutElement>) {
        self.elements = elements;
    }

    /// Move or resize the surface. `None` means it covers the whole host.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn source(&self) -> Option<&FeatureSource> {
        self.source.as_ref()
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// Take every event dispatched since the last drain.
    pub fn drain_dispatched(&mut self) -> Vec<Dispatched> {
        std::mem::take(&mut self.outbox)
    }
}

impl Surface for LayoutSurface {
    fn id(&self) -> &SurfaceId {
        &self.id
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn hit_test(&self, local: Point) -> HitTarget {
        if let Some(b) = self.bounds {
            if local.x < 0.0 || local.y < 0.0 || local.x >= b.width || local.y >= b.height {
                return HitTarget::Nothing;
            }
        }
        self.elements
            .iter()
            .rev()
            .find(|e| e.rect.contains(local))
            .map_or(HitTarget::Root, |e| HitTarget::Element(e.to_ref()))
    }

    fn dispatch(&mut self, element: &ElementRef, event: PointerEvent) {
        self.outbox.push(Dispatched {
            surface: self.id.clone(),
            element: element.clone(),
            event,
        });
    }
}
