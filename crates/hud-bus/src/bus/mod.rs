//! The channel bus: handshake, send with one retry, and broadcast.

use hud_common::{HandlerTable, PartyId};

use crate::message::Message;
use crate::origin::OriginPolicy;
use crate::port::MessagePort;
use crate::retry::RetryQueue;

mod incoming;
mod outgoing;


/// Per-party connection state. There is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    NoChannel,
    ChannelEstablished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusEventKind {
    Message,
    ChannelEstablished,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    /// Application data from a party, either through its channel or a
    /// trusted raw message.
    Message { from: PartyId, message: Message },
    ChannelEstablished { party: PartyId },
    /// A send that still found no channel on its retry.
    Abandoned { message: Message },
}

impl BusEvent {
    pub fn kind(&self) -> BusEventKind {
        match self {
            BusEvent::Message { .. } => BusEventKind::Message,
            BusEvent::ChannelEstablished { .. } => BusEventKind::ChannelEstablished,
            BusEvent::Abandoned { .. } => BusEventKind::Abandoned,
        }
    }
}

/// A raw message arriving outside any channel.
#[derive(Debug)]
pub struct Incoming {
    pub origin: String,
    pub source: PartyId,
    pub message: Message,
    pub ports: Vec<MessagePort>,
}

impl Incoming {
    pub fn new(origin: impl Into<String>, source: PartyId, message: Message) -> Self {
        Self {
            origin: origin.into(),
            source,
            message,
            ports: Vec::new(),
        }
    }

    pub fn with_port(mut self, port: MessagePort) -> Self {
        self.ports.push(port);
        self
    }
}

/// What `on_incoming` did with a raw message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Untrusted origin; nothing happened.
    Dropped,
    /// A channel was established from the attached port.
    Handshake,
    /// The party already had a channel; the new port was discarded.
    DuplicateHandshake,
    /// Handed to the message handlers.
    Delivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Posted on this many channels.
    Delivered(usize),
    /// No channel yet; one retry is scheduled.
    Deferred,
    /// No channel on the retry either; the message is gone.
    Abandoned,
}

/// One side of the bus. The host owns one; so does each surface.
pub struct ChannelBus {
    policy: OriginPolicy,
    channels: Vec<(PartyId, MessagePort)>,
    retries: RetryQueue,
    handlers: HandlerTable<BusEventKind, BusEvent>,
}

impl ChannelBus {
    pub fn new(policy: OriginPolicy) -> Self {
        Self {
            policy,
            channels: Vec::new(),
            retries: RetryQueue::default(),
            handlers: HandlerTable::new(),
        }
    }

    /// Register a handler for bus events.
    pub fn on(&mut self, kind: BusEventKind, handler: impl FnMut(&BusEvent) + 'static) {
        self.handlers.on(kind, handler);
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    /// `ChannelEstablished` once any party is connected.
    pub fn state(&self) -> ChannelState {
        if self.channels.is_empty() {
            ChannelState::NoChannel
        } else {
            ChannelState::ChannelEstablished
        }
    }

    pub fn state_of(&self, party: &PartyId) -> ChannelState {
        if self.is_connected(party) {
            ChannelState::ChannelEstablished
        } else {
            ChannelState::NoChannel
        }
    }

    pub fn is_connected(&self, party: &PartyId) -> bool {
        self.channels.iter().any(|(p, _)| p == party)
    }

    /// Connected parties in the order their channels were established.
    pub fn connected_parties(&self) -> Vec<PartyId> {
        self.channels.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Retries waiting to fire.
    pub fn pending_retries(&self) -> usize {
        self.retries.len()
    }

    fn port(&self, party: &PartyId) -> Option<&MessagePort> {
        self.channels
            .iter()
            .find(|(p, _)| p == party)
            .map(|(_, port)| port)
    }

    fn notify(&mut self, event: BusEvent) -> usize {
        self.handlers.emit(&event.kind(), &event)
    }
}
