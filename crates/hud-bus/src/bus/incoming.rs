//! Raw messages, handshakes, and traffic arriving on channels.

use hud_common::PartyId;
use tracing::{debug, info, trace};

use super::{BusEvent, ChannelBus, Delivery, Incoming};
use crate::message::{Intent, Message};
use crate::port::{message_channel, MessagePort};

impl ChannelBus {
    /// Handle a raw message posted to this side.
    ///
    /// Untrusted origins are dropped without a trace. A channel offer with
    /// a port establishes the channel; everything else, including an offer
    /// that arrived without a port, is application data.
    pub fn on_incoming(&mut self, incoming: Incoming) -> Delivery {
        let Incoming {
            origin,
            source,
            message,
            mut ports,
        } = incoming;

        if !self.policy.is_trusted(&origin) {
            return Delivery::Dropped;
        }

        match message.intent() {
            Intent::ChannelOffer if !ports.is_empty() => {
                let port = ports.swap_remove(0);
                return self.register(source, port);
            }
            Intent::ChannelOffer => {
                debug!(party = %source, "channel offer without a port, handling as data");
            }
            Intent::Other(_) | Intent::Missing => {
                debug!(party = %source, "unrecognized message info, handling anyway");
            }
            Intent::NewFeature | Intent::Broadcast => {}
        }

        self.deliver(source, message);
        Delivery::Delivered
    }

    /// Open a channel to `party` from this side.
    ///
    /// Returns the handshake to post to the party along with the port it
    /// must receive, or `None` if a channel already exists.
    pub fn connect(&mut self, party: PartyId) -> Option<(Message, MessagePort)> {
        if self.is_connected(&party) {
            debug!(party = %party, "already connected");
            return None;
        }
        let (local, remote) = message_channel();
        self.register(party, local);
        Some((Message::handshake(), remote))
    }

    /// Drain every channel and hand what arrived to the message handlers.
    /// Returns how many messages were delivered.
    pub fn poll_ports(&mut self) -> usize {
        let mut inbound = Vec::new();
        for (party, port) in self.channels.iter_mut() {
            while let Some(message) = port.try_recv() {
                inbound.push((party.clone(), message));
            }
        }

        let count = inbound.len();
        for (from, message) in inbound {
            self.deliver(from, message);
        }
        count
    }

    fn register(&mut self, party: PartyId, port: MessagePort) -> Delivery {
        if self.is_connected(&party) {
            debug!(party = %party, "duplicate handshake ignored");
            return Delivery::DuplicateHandshake;
        }
        info!(party = %party, "channel established");
        self.channels.push((party.clone(), port));
        self.notify(BusEvent::ChannelEstablished { party });
        Delivery::Handshake
    }

    fn deliver(&mut self, from: PartyId, message: Message) {
        debug!(party = %from, %message, "bus received");
        if self.notify(BusEvent::Message { from, message }) == 0 {
            trace!("no message handler registered");
        }
    }
}
