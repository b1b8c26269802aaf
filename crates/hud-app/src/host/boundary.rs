//! Applying boundary input to the host.

use std::time::Instant;

use hud_bus::Incoming;
use hud_common::{PartyId, PointerEvent};
use hud_router::Recipient;
use tracing::{debug, trace, warn};

use super::protocol::{parse_input, pointer_event, HostInput};
use super::{HostOutput, Hud};

impl Hud {
    /// Parse and apply one input line, then settle.
    pub fn handle_line(&mut self, line: &str, now: Instant) {
        if let Some(input) = parse_input(line) {
            self.apply(input, now);
        }
    }

    pub fn apply(&mut self, input: HostInput, now: Instant) {
        match input {
            HostInput::Pointer { kind, x, y, payload } => {
                let event = pointer_event(kind, x, y, payload);
                let recipient = self.router.route(&event);
                self.record_route(&event, recipient);
            }
            HostInput::Loaded { surface } => {
                if self.router.on_surface_loaded(&surface) {
                    self.open_channel(&surface);
                }
            }
            HostInput::Failed { surface } => {
                self.router.on_surface_failed(&surface);
            }
            HostInput::Layout {
                surface,
                bounds,
                elements,
            } => match self.router.surface_mut(&surface) {
                Some(s) => {
                    debug!(surface = %surface, elements = elements.len(), "layout updated");
                    s.set_bounds(bounds);
                    s.set_elements(elements);
                }
                None => warn!(surface = %surface, "layout for unknown surface"),
            },
            HostInput::Message {
                surface,
                origin,
                message,
            } => {
                let incoming = Incoming::new(origin, PartyId::from(&surface), message);
                let delivery = self.bus.on_incoming(incoming);
                trace!(surface = %surface, ?delivery, "raw message to host");
            }
            HostInput::Send { surface, message } => match self.surface_buses.get_mut(&surface) {
                Some(bus) => {
                    let outcome = bus.send(message, now);
                    debug!(surface = %surface, ?outcome, "surface send");
                }
                None => warn!(surface = %surface, "send from unknown surface"),
            },
            HostInput::Yield {
                surface,
                target,
                kind,
                x,
                y,
                payload,
            } => {
                let event = pointer_event(kind, x, y, payload);
                let recipient = self.router.yield_event(&surface, &target, &event);
                self.record_route(&event, recipient);
            }
        }

        self.settle();
    }

    fn record_route(&mut self, event: &PointerEvent, recipient: Option<Recipient>) {
        match recipient {
            Some(recipient) => self.outputs.push(HostOutput::Routed {
                kind: event.kind,
                recipient,
            }),
            None => trace!(kind = %event.kind, "pointer event not routed"),
        }
    }
}
