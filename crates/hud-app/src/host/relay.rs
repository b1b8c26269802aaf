//! What the host does with messages addressed to it.

use hud_bus::{Intent, Message};
use hud_common::PartyId;
use tracing::{debug, info, warn};

use super::{FeatureLookup, Hud};

impl Hud {
    /// Relay one message that reached the host.
    pub(super) fn relay(&mut self, from: PartyId, message: Message) {
        match message.intent() {
            Intent::Missing => {
                warn!(party = %from, "message without info, skipping");
            }
            Intent::NewFeature => self.request_feature(from, &message),
            Intent::Broadcast => {
                let recipients = self.bus.broadcast_except(&from, &message);
                debug!(party = %from, recipients, "broadcast relayed");
            }
            Intent::ChannelOffer => {
                warn!(party = %from, "channel offer without a port, not relayed");
            }
            Intent::Other(info) => {
                warn!(party = %from, info = %info, "unknown message info, not relayed");
            }
        }
    }

    /// Start resolving the requested feature. The loop keeps running
    /// while the lookup is out.
    fn request_feature(&mut self, from: PartyId, message: &Message) {
        let Some(url) = message.get_str("url") else {
            warn!(party = %from, "new feature request without url");
            return;
        };
        debug!(party = %from, url, "feature lookup started");
        self.spawn_lookup(from, url.to_string());
    }

    /// Tell every surface about a resolved feature, then settle.
    pub fn finish_lookup(&mut self, done: FeatureLookup) {
        self.lookups_in_flight = self.lookups_in_flight.saturating_sub(1);
        let FeatureLookup { from, url, result } = done;
        match result {
            Ok(source) => {
                let created = Message::created_feature(&source.src, source.text.as_deref());
                let recipients = self.bus.broadcast_except(&self.host_party, &created);
                info!(url = %url, src = %source.src, recipients, "feature created");
            }
            Err(e) => {
                warn!(party = %from, url = %url, error = %e, "feature lookup failed");
            }
        }
        self.settle();
    }
}
