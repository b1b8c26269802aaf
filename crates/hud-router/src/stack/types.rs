use hud_common::{Point, SurfaceId};

use crate::surface::{ElementRef, HitTarget, LoadState, Surface};

/// One surface in the stack plus the router's bookkeeping for it.
pub(crate) struct SurfaceSlot<S> {
    pub(crate) surface: S,
    pub(crate) state: LoadState,
    pub(crate) accepting: bool,
    pub(crate) glue_installed: bool,
}

impl<S: Surface> SurfaceSlot<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            state: LoadState::Loading,
            accepting: false,
            glue_installed: false,
        }
    }

    /// Hit-test a host-space point. Returns the local point and element
    /// when this surface claims the event.
    pub(crate) fn claim(&self, point: Point) -> Option<(Point, ElementRef)> {
        if self.state != LoadState::Loaded {
            return None;
        }
        let local = match self.surface.bounds() {
            Some(b) if !b.contains(point) => return None,
            Some(b) => b.to_local(point),
            None => point,
        };
        match self.surface.hit_test(local) {
            HitTarget::Element(element) if !element.is_pass_through() => Some((local, element)),
            _ => None,
        }
    }
}

/// Ordered stack of surfaces, fixed at construction.
///
/// Index 0 is checked first. The backplane is implicit and sits behind
/// every surface. There is no way to insert, remove or reorder surfaces
/// once the stack exists.
pub struct SurfaceStack<S> {
    pub(crate) slots: Vec<SurfaceSlot<S>>,
    pub(crate) backplane_accepting: bool,
}

impl<S: Surface> SurfaceStack<S> {
    pub fn new(surfaces: Vec<S>) -> Self {
        Self {
            slots: surfaces.into_iter().map(SurfaceSlot::new).collect(),
            backplane_accepting: true,
        }
    }

    /// Number of surfaces, not counting the backplane.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Surface ids in z-order.
    pub fn ids(&self) -> Vec<SurfaceId> {
        self.slots.iter().map(|s| s.surface.id().clone()).collect()
    }

    pub fn position(&self, id: &SurfaceId) -> Option<usize> {
        self.slots.iter().position(|s| s.surface.id() == id)
    }

    pub fn get(&self, id: &SurfaceId) -> Option<&S> {
        self.slot(id).map(|s| &s.surface)
    }

    pub fn get_mut(&mut self, id: &SurfaceId) -> Option<&mut S> {
        self.slot_mut(id).map(|s| &mut s.surface)
    }

    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.slots.iter_mut().map(|s| &mut s.surface)
    }

    pub fn load_state(&self, id: &SurfaceId) -> Option<LoadState> {
        self.slot(id).map(|s| s.state)
    }

    /// The accepting flag of a surface, `None` for unknown ids.
    pub fn is_accepting(&self, id: &SurfaceId) -> Option<bool> {
        self.slot(id).map(|s| s.accepting)
    }

    pub fn backplane_accepting(&self) -> bool {
        self.backplane_accepting
    }

    /// Accepting flags in z-order, backplane excluded.
    pub fn accepting_flags(&self) -> Vec<(SurfaceId, bool)> {
        self.slots
            .iter()
            .map(|s| (s.surface.id().clone(), s.accepting))
            .collect()
    }

    /// How many recipients (surfaces plus backplane) are accepting.
    pub fn accepting_count(&self) -> usize {
        self.slots.iter().filter(|s| s.accepting).count() + usize::from(self.backplane_accepting)
    }

    /// Backplane accepting, everything else not.
    pub(crate) fn reset_accepting(&mut self) {
        self.backplane_accepting = true;
        for slot in &mut self.slots {
            slot.accepting = false;
        }
    }

    pub(crate) fn slot(&self, id: &SurfaceId) -> Option<&SurfaceSlot<S>> {
        self.slots.iter().find(|s| s.surface.id() == id)
    }

    pub(crate) fn slot_mut(&mut self, id: &SurfaceId) -> Option<&mut SurfaceSlot<S>> {
        self.slots.iter_mut().find(|s| s.surface.id() == id)
    }
}
