//! Surface load lifecycle and the hit-test glue installed into surfaces.

use hud_common::{PointerEvent, SurfaceId};
use tracing::{debug, info, warn};

use super::{Recipient, RouterEvent, SurfaceRouter};
use crate::surface::{HitTarget, LoadState, Surface};

impl<S: Surface> SurfaceRouter<S> {
    /// A surface finished loading. Installs its glue the first time only.
    ///
    /// Returns `false` when the glue was already installed (a reload) or
    /// the surface is unknown.
    pub fn on_surface_loaded(&mut self, id: &SurfaceId) -> bool {
        let Some(slot) = self.stack.slot_mut(id) else {
            warn!(surface = %id, "load notification for unknown surface");
            return false;
        };

        slot.state = LoadState::Loaded;
        if slot.glue_installed {
            debug!(surface = %id, "hit-test glue already installed, skipping");
            return false;
        }
        slot.glue_installed = true;

        info!(surface = %id, "surface loaded, hit-test glue installed");
        self.notify(RouterEvent::GlueInstalled {
            surface: id.clone(),
        });
        true
    }

    /// A surface's content failed to load. Its hit tests report nothing
    /// from now on, so events fall through to the next surface.
    pub fn on_surface_failed(&mut self, id: &SurfaceId) {
        match self.stack.slot_mut(id) {
            Some(slot) => {
                slot.state = LoadState::Failed;
                warn!(surface = %id, "surface content failed to load");
            }
            None => warn!(surface = %id, "failure notification for unknown surface"),
        }
    }

    /// An event landed inside surface `from` on `target`.
    ///
    /// When the target is the surface's root or a pass-through zone the
    /// surface yields: the event is routed again from the host. Targets the
    /// surface owns are left alone and `None` is returned, as is any event
    /// from a surface whose glue is not installed.
    pub fn yield_event(
        &mut self,
        from: &SurfaceId,
        target: &HitTarget,
        event: &PointerEvent,
    ) -> Option<Recipient> {
        let glue_installed = self.stack.slot(from).is_some_and(|s| s.glue_installed);
        if !glue_installed {
            debug!(surface = %from, "no glue installed, event not yielded");
            return None;
        }
        if target.claims() {
            return None;
        }
        debug!(surface = %from, "surface yields pointer event to host");
        self.route(event)
    }
}
