//! The one-shot retry for sends made before any channel exists.

use std::time::{Duration, Instant};

use crate::message::Message;

/// Delay before the single retry of a send that found no channel.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// A message waiting for its retry.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub message: Message,
    /// Set on the retry; a second attempt that still finds no channel is
    /// abandoned.
    pub second_attempt: bool,
}

/// Scheduled retries ordered by deadline.
///
/// Entries are never cancelled. Whoever fires them checks the current
/// channel state at that moment.
#[derive(Debug, Default)]
pub(crate) struct RetryQueue {
    entries: Vec<(Instant, PendingSend)>,
}

impl RetryQueue {
    pub(crate) fn schedule(&mut self, pending: PendingSend, due: Instant) {
        let pos = self.entries.partition_point(|(t, _)| *t <= due);
        self.entries.insert(pos, (due, pending));
    }

    /// Remove and return every entry due at or before `now`, in deadline order.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<PendingSend> {
        let split = self.entries.partition_point(|(t, _)| *t <= now);
        self.entries.drain(..split).map(|(_, p)| p).collect()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|(t, _)| *t)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
