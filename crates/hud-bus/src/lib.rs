//! Message bus between the host and its embedded surfaces.
//!
//! Each party starts out with no channel. A one-time handshake message
//! carrying a port upgrades the connection to a private, ordered,
//! two-way channel; from then on all traffic to that party goes through
//! it. Messages sent before any channel exists are retried once after
//! `RETRY_DELAY` and then abandoned.

pub mod bus;
pub mod errors;
pub mod message;
pub mod origin;
pub mod port;
pub mod retry;

pub use bus::{BusEvent, BusEventKind, ChannelBus, ChannelState, Delivery, Incoming, SendOutcome};
pub use errors::BusError;
pub use message::{Intent, Message, INFO_KEY};
pub use origin::{OriginPolicy, DEV_HOSTNAMES};
pub use port::{message_channel, MessagePort};
pub use retry::{PendingSend, RETRY_DELAY};
