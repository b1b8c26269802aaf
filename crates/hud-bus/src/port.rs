//! In-process message ports.
//!
//! `message_channel()` returns two entangled ends; whatever is posted on
//! one end arrives, in order, on the other. One end is handed to the
//! other party inside a handshake.

use tokio::sync::mpsc;

use crate::errors::BusError;
use crate::message::Message;

#[derive(Debug)]
pub struct MessagePort {
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

/// Create a connected pair of ports.
pub fn message_channel() -> (MessagePort, MessagePort) {
    let (a_tx, b_rx) = mpsc::unbounded_channel();
    let (b_tx, a_rx) = mpsc::unbounded_channel();
    (
        MessagePort { tx: a_tx, rx: a_rx },
        MessagePort { tx: b_tx, rx: b_rx },
    )
}

impl MessagePort {
    /// Post a message to the other end.
    pub fn post(&self, message: Message) -> Result<(), BusError> {
        self.tx.send(message).map_err(|_| BusError::ChannelClosed)
    }

    /// Take the next message if one is waiting.
    pub fn try_recv(&mut self) -> Option<Message> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next message. `None` once the other end is gone.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Whether the other end has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
