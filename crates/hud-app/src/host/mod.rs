//! The host: owns the surface router and the host side of the bus.
//!
//! Each surface also gets its own bus endpoint standing in for the
//! surface-side half of the protocol, so messages a surface sends travel
//! through a real channel (or the retry path) before the host relays them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use hud_bus::{BusEvent, BusEventKind, ChannelBus, Incoming, Message, OriginPolicy};
use hud_common::{PartyId, SurfaceId};
use hud_config::HudConfig;
use hud_router::{
    load_surfaces, FeatureSource, LayoutSurface, LookupError, LookupService, Surface, SurfaceRouter,
    SurfaceStack,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

mod boundary;
mod event_loop;
mod protocol;
mod relay;

#[cfg(test)]
mod tests;

pub use event_loop::run;
pub use protocol::{HostInput, HostOutput, SurfaceInfo};

/// Bus identity of the host page.
pub const HOST_PARTY: &str = "host";

type Inbox<T> = Rc<RefCell<Vec<T>>>;

/// A feature lookup that finished off the event loop.
#[derive(Debug)]
pub struct FeatureLookup {
    from: PartyId,
    url: String,
    result: Result<FeatureSource, LookupError>,
}

pub struct Hud {
    router: SurfaceRouter<LayoutSurface>,
    bus: ChannelBus,
    surface_buses: BTreeMap<SurfaceId, ChannelBus>,
    lookup: Arc<dyn LookupService>,
    lookups_tx: mpsc::UnboundedSender<FeatureLookup>,
    lookups_rx: mpsc::UnboundedReceiver<FeatureLookup>,
    lookups_in_flight: usize,
    host_origin: String,
    host_party: PartyId,
    /// Filled by the host bus's message handler.
    inbox: Inbox<(PartyId, Message)>,
    /// Filled by the surface buses' message handlers.
    deliveries: Inbox<(SurfaceId, Message)>,
    outputs: Vec<HostOutput>,
}

impl Hud {
    /// Resolve the configured sources and build the host around them.
    pub async fn start(config: &HudConfig, lookup: Arc<dyn LookupService>) -> Self {
        let surfaces = load_surfaces(&config.surfaces.sources, lookup.as_ref(), |index, _, source| {
            LayoutSurface::new(format!("surface-{index}")).with_source(source)
        })
        .await;
        info!(
            configured = config.surfaces.sources.len(),
            loaded = surfaces.len(),
            "surfaces resolved"
        );
        Self::new(config, surfaces, lookup)
    }

    /// Build the host over an already-resolved stack, front first.
    pub fn new(config: &HudConfig, surfaces: Vec<LayoutSurface>, lookup: Arc<dyn LookupService>) -> Self {
        let host_origin = config.host.origin.clone();

        let deliveries: Inbox<(SurfaceId, Message)> = Rc::new(RefCell::new(Vec::new()));
        let mut surface_buses = BTreeMap::new();
        for surface in &surfaces {
            let id = surface.id().clone();
            let mut bus = ChannelBus::new(OriginPolicy::new(host_origin.clone()));
            let sink = deliveries.clone();
            let owner = id.clone();
            bus.on(BusEventKind::Message, move |event| {
                if let BusEvent::Message { message, .. } = event {
                    sink.borrow_mut().push((owner.clone(), message.clone()));
                }
            });
            surface_buses.insert(id, bus);
        }

        let inbox: Inbox<(PartyId, Message)> = Rc::new(RefCell::new(Vec::new()));
        let mut bus = ChannelBus::new(OriginPolicy::new(host_origin.clone()));
        let sink = inbox.clone();
        bus.on(BusEventKind::Message, move |event| {
            if let BusEvent::Message { from, message } = event {
                sink.borrow_mut().push((from.clone(), message.clone()));
            }
        });

        let ready = surfaces
            .iter()
            .filter_map(|s| {
                s.source().map(|source| SurfaceInfo {
                    surface: s.id().clone(),
                    src: source.src.clone(),
                    text: source.text.clone(),
                })
            })
            .collect();

        let kinds = config.surfaces.pointer_kinds.iter().copied();
        let (lookups_tx, lookups_rx) = mpsc::unbounded_channel();
        Self {
            router: SurfaceRouter::new(SurfaceStack::new(surfaces), kinds),
            bus,
            surface_buses,
            lookup,
            lookups_tx,
            lookups_rx,
            lookups_in_flight: 0,
            host_origin,
            host_party: PartyId::new(HOST_PARTY),
            inbox,
            deliveries,
            outputs: vec![HostOutput::Ready { surfaces: ready }],
        }
    }

    pub fn router(&self) -> &SurfaceRouter<LayoutSurface> {
        &self.router
    }

    pub fn bus(&self) -> &ChannelBus {
        &self.bus
    }

    /// Take everything produced since the last call.
    pub fn drain_outputs(&mut self) -> Vec<HostOutput> {
        std::mem::take(&mut self.outputs)
    }

    /// Earliest pending retry on any bus endpoint.
    pub fn next_retry_at(&self) -> Option<Instant> {
        std::iter::once(&self.bus)
            .chain(self.surface_buses.values())
            .filter_map(ChannelBus::next_retry_at)
            .min()
    }

    /// Fire every retry due at `now`, then settle.
    pub fn fire_retries(&mut self, now: Instant) {
        let mut fired = self.bus.poll_retries(now);
        for bus in self.surface_buses.values_mut() {
            fired += bus.poll_retries(now);
        }
        debug!(fired, "retries fired");
        self.settle();
    }

    /// Feature lookups started but not yet finished.
    pub fn lookups_in_flight(&self) -> usize {
        self.lookups_in_flight
    }

    /// Wait for the next feature lookup to finish. Pending while none
    /// are in flight. Cancel safe.
    pub async fn next_lookup(&mut self) -> Option<FeatureLookup> {
        self.lookups_rx.recv().await
    }

    /// Resolve a feature location on a separate task; the result comes
    /// back through [`Hud::next_lookup`].
    fn spawn_lookup(&mut self, from: PartyId, url: String) {
        let lookup = self.lookup.clone();
        let tx = self.lookups_tx.clone();
        self.lookups_in_flight += 1;
        tokio::spawn(async move {
            let result = lookup.resolve(&url).await;
            // The receiver lives as long as the host.
            let _ = tx.send(FeatureLookup { from, url, result });
        });
    }

    /// Host side of the handshake: open a channel to `surface` and hand
    /// the surface its end.
    fn open_channel(&mut self, surface: &SurfaceId) {
        let Some((offer, port)) = self.bus.connect(PartyId::from(surface)) else {
            return;
        };
        if let Some(surface_bus) = self.surface_buses.get_mut(surface) {
            let incoming = Incoming::new(self.host_origin.clone(), self.host_party.clone(), offer).with_port(port);
            let delivery = surface_bus.on_incoming(incoming);
            debug!(surface = %surface, ?delivery, "handshake offered");
        }
    }

    /// Drain channels and outboxes until nothing moves.
    fn settle(&mut self) {
        loop {
            self.bus.poll_ports();
            let pending = std::mem::take(&mut *self.inbox.borrow_mut());
            if pending.is_empty() {
                break;
            }
            for (from, message) in pending {
                self.relay(from, message);
            }
        }

        for bus in self.surface_buses.values_mut() {
            bus.poll_ports();
        }
        let delivered = std::mem::take(&mut *self.deliveries.borrow_mut());
        self.outputs.extend(
            delivered
                .into_iter()
                .map(|(surface, message)| HostOutput::Deliver { surface, message }),
        );

        for surface in self.router.surfaces_mut() {
            self.outputs
                .extend(surface.drain_dispatched().into_iter().map(HostOutput::Dispatch));
        }
    }
}
