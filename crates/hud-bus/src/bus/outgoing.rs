//! Send with one deferred retry, and origin-excluding broadcast.

use std::time::Instant;

use hud_common::PartyId;
use tracing::{debug, warn};

use super::{BusEvent, ChannelBus, SendOutcome};
use crate::message::Message;
use crate::retry::{PendingSend, RETRY_DELAY};

impl ChannelBus {
    /// Send `message` to every connected party.
    ///
    /// With no channel yet, one retry is scheduled `RETRY_DELAY` after
    /// `now`. The retry checks the state when it fires, so a channel
    /// established in between still gets the message.
    pub fn send(&mut self, message: Message, now: Instant) -> SendOutcome {
        self.post_message(message, false, now)
    }

    /// Fire every retry due at `now`. Returns how many fired.
    pub fn poll_retries(&mut self, now: Instant) -> usize {
        let due = self.retries.take_due(now);
        let count = due.len();
        for pending in due {
            self.post_message(pending.message, pending.second_attempt, now);
        }
        count
    }

    /// When the earliest pending retry is due.
    pub fn next_retry_at(&self) -> Option<Instant> {
        self.retries.next_deadline()
    }

    /// Post `message` to each recipient except `origin`.
    ///
    /// Recipients without a channel are skipped. Returns how many
    /// recipients the message was posted to.
    pub fn broadcast(&self, origin: &PartyId, message: &Message, recipients: &[PartyId]) -> usize {
        let mut delivered = 0;
        for party in recipients.iter().filter(|p| *p != origin) {
            let Some(port) = self.port(party) else {
                debug!(party = %party, "no channel, skipping broadcast");
                continue;
            };
            match port.post(message.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(party = %party, error = %e, "broadcast not delivered"),
            }
        }
        delivered
    }

    /// Broadcast to every connected party except `origin`.
    pub fn broadcast_except(&self, origin: &PartyId, message: &Message) -> usize {
        let recipients = self.connected_parties();
        self.broadcast(origin, message, &recipients)
    }

    fn post_message(&mut self, message: Message, second_attempt: bool, now: Instant) -> SendOutcome {
        if self.channels.is_empty() {
            if second_attempt {
                warn!(%message, "no channel after retry, message abandoned");
                self.notify(BusEvent::Abandoned { message });
                return SendOutcome::Abandoned;
            }
            debug!(%message, "no channel yet, retrying in {}ms", RETRY_DELAY.as_millis());
            self.retries.schedule(
                PendingSend {
                    message,
                    second_attempt: true,
                },
                now + RETRY_DELAY,
            );
            return SendOutcome::Deferred;
        }

        let mut delivered = 0;
        for (party, port) in &self.channels {
            match port.post(message.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(party = %party, error = %e, "message not delivered"),
            }
        }
        debug!(%message, channels = delivered, "message sent");
        SendOutcome::Delivered(delivered)
    }
}
