//! Front-to-back hit testing and dispatch.

use hud_common::PointerEvent;
use tracing::{debug, trace};

use super::{Recipient, RouterEvent, SurfaceRouter};
use crate::surface::Surface;

impl<S: Surface> SurfaceRouter<S> {
    /// Route one pointer event to exactly one recipient.
    ///
    /// Returns `None` for pointer kinds the router is not subscribed to.
    /// Accepting flags are recomputed from scratch on every call: the
    /// backplane starts out accepting and loses the flag only when a
    /// surface claims the event.
    pub fn route(&mut self, event: &PointerEvent) -> Option<Recipient> {
        if !self.handles(event.kind) {
            trace!(kind = %event.kind, "pointer kind not routed");
            return None;
        }

        self.stack.reset_accepting();

        let mut recipient = Recipient::Backplane;
        for slot in self.stack.slots.iter_mut() {
            let Some((local, element)) = slot.claim(event.point) else {
                slot.accepting = false;
                continue;
            };

            self.stack.backplane_accepting = false;
            slot.accepting = true;
            slot.surface.dispatch(&element, event.synthesize(local));

            recipient = Recipient::Surface {
                surface: slot.surface.id().clone(),
                element,
            };
            // First match wins; surfaces further back never see the event.
            break;
        }

        match &recipient {
            Recipient::Surface { surface, element } => {
                debug!(kind = %event.kind, surface = %surface, element = %element.id, "pointer event routed to surface");
            }
            Recipient::Backplane => {
                debug!(kind = %event.kind, "pointer event falls through to backplane");
            }
        }

        self.notify(RouterEvent::Routed {
            kind: event.kind,
            recipient: recipient.clone(),
        });
        Some(recipient)
    }
}
