//! The surface router: one recipient per pointer event.

use std::collections::HashSet;

use hud_common::{HandlerTable, PointerKind, SurfaceId};
use serde::Serialize;

use crate::stack::SurfaceStack;
use crate::surface::{ElementRef, Surface};

mod glue;
mod routing;


/// Who received a routed pointer event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "recipient", rename_all = "lowercase")]
pub enum Recipient {
    /// A surface claimed the event; a copy was dispatched to `element`.
    Surface {
        surface: SurfaceId,
        element: ElementRef,
    },
    /// No surface claimed it; it continues through top-level handling.
    Backplane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterEventKind {
    Routed,
    GlueInstalled,
}

/// Notifications for the rest of the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    Routed {
        kind: PointerKind,
        recipient: Recipient,
    },
    GlueInstalled {
        surface: SurfaceId,
    },
}

impl RouterEvent {
    pub fn kind(&self) -> RouterEventKind {
        match self {
            RouterEvent::Routed { .. } => RouterEventKind::Routed,
            RouterEvent::GlueInstalled { .. } => RouterEventKind::GlueInstalled,
        }
    }
}

/// Routes pointer events over a fixed stack of surfaces.
///
/// Owns all routing state; nothing here is global, so independent routers
/// can coexist.
pub struct SurfaceRouter<S> {
    pub(crate) stack: SurfaceStack<S>,
    kinds: HashSet<PointerKind>,
    handlers: HandlerTable<RouterEventKind, RouterEvent>,
}

impl<S: Surface> SurfaceRouter<S> {
    /// Create a router subscribed to the given pointer kinds.
    pub fn new(stack: SurfaceStack<S>, kinds: impl IntoIterator<Item = PointerKind>) -> Self {
        Self {
            stack,
            kinds: kinds.into_iter().collect(),
            handlers: HandlerTable::new(),
        }
    }

    /// Register a handler for router notifications.
    pub fn on(&mut self, kind: RouterEventKind, handler: impl FnMut(&RouterEvent) + 'static) {
        self.handlers.on(kind, handler);
    }

    pub fn handles(&self, kind: PointerKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn stack(&self) -> &SurfaceStack<S> {
        &self.stack
    }

    pub fn surface_mut(&mut self, id: &SurfaceId) -> Option<&mut S> {
        self.stack.get_mut(id)
    }

    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.stack.surfaces_mut()
    }

    pub fn is_accepting(&self, id: &SurfaceId) -> bool {
        self.stack.is_accepting(id).unwrap_or(false)
    }

    pub fn backplane_accepting(&self) -> bool {
        self.stack.backplane_accepting()
    }

    pub fn accepting_flags(&self) -> Vec<(SurfaceId, bool)> {
        self.stack.accepting_flags()
    }

    fn notify(&mut self, event: RouterEvent) {
        self.handlers.emit(&event.kind(), &event);
    }
}
