//! # Event Subscriber
//!
//! Live view of records as they are committed.

use crate::events::{EventFilter, LedgerRecord};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event log was dropped.
    #[error("Event log closed")]
    Closed,
}

/// A subscription handle for receiving committed records.
///
/// A subscriber that falls more than the channel capacity behind skips the
/// oldest records; the durable log still holds them.
pub struct Subscription {
    receiver: broadcast::Receiver<LedgerRecord>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<LedgerRecord>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next record that matches the filter.
    ///
    /// # Returns
    ///
    /// - `Some(record)` - The next matching record
    /// - `None` - The channel was closed (log dropped)
    pub async fn recv(&mut self) -> Option<LedgerRecord> {
        loop {
            let record = match self.receiver.recv().await {
                Ok(r) => r,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some records skipped");
                    continue;
                }
            };

            if self.filter.matches(&record.event) {
                return Some(record);
            }
        }
    }

    /// Try to receive the next matching record without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` - A record was available and matched
    /// - `Ok(None)` - Nothing available
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<LedgerRecord>, SubscriptionError> {
        loop {
            let record = match self.receiver.try_recv() {
                Ok(r) => r,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&record.event) {
                return Ok(Some(record));
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
