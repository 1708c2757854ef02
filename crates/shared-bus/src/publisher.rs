//! # Event Log
//!
//! The recording side of the bus: an append-only, totally ordered log with
//! optional units of work that stage events until the triggering operation
//! succeeds.

use crate::events::{EventFilter, LedgerEvent, LedgerRecord};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use parking_lot::Mutex;
use shared_types::entities::{BatchId, NoticeId};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from event log operations.
#[derive(Debug, Error)]
pub enum BusError {
    /// A unit of work is already open on this log.
    #[error("A unit of work is already open")]
    UnitAlreadyOpen,

    /// Record could not be serialized for export.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait subsystems use to emit audit records.
pub trait EventRecorder: Send + Sync {
    /// Record an event.
    ///
    /// Inside an open unit of work the event is staged; otherwise it is
    /// committed immediately.
    fn record(&self, event: LedgerEvent);
}

#[derive(Default)]
struct LogState {
    records: Vec<LedgerRecord>,
    staged: Option<Vec<LedgerEvent>>,
}

/// In-memory append-only event log.
///
/// Committed records are broadcast to subscribers through
/// `tokio::sync::broadcast`.
pub struct EventLog {
    state: Mutex<LogState>,
    sender: broadcast::Sender<LedgerRecord>,
    capacity: usize,
}

impl EventLog {
    /// Create a new event log with default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new event log with specified channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            state: Mutex::new(LogState::default()),
            sender,
            capacity,
        }
    }

    /// Open a unit of work.
    ///
    /// Events recorded while the unit is open become durable only on
    /// `UnitOfWork::commit`; dropping the unit discards them.
    ///
    /// The open unit captures every `record` call on this log, whoever makes
    /// it, so only the component that serializes all writers may open one.
    /// Share the log with readers through a query wrapper rather than the
    /// `EventLog` itself.
    pub fn begin_unit(&self) -> Result<UnitOfWork<'_>, BusError> {
        let mut state = self.state.lock();
        if state.staged.is_some() {
            return Err(BusError::UnitAlreadyOpen);
        }
        state.staged = Some(Vec::new());
        Ok(UnitOfWork {
            log: self,
            finished: false,
        })
    }

    /// Append events to the durable log and broadcast them.
    fn append(&self, state: &mut LogState, events: Vec<LedgerEvent>) -> usize {
        let count = events.len();
        for event in events {
            let sequence = state.records.len() as u64 + 1;
            let record = LedgerRecord { sequence, event };
            // No receivers is fine; the durable log is the source of truth
            let receivers = self.sender.send(record.clone()).unwrap_or(0);
            debug!(sequence, topic = ?record.event.topic(), receivers, "Event committed");
            state.records.push(record);
        }
        count
    }

    /// All committed records in order.
    #[must_use]
    pub fn records(&self) -> Vec<LedgerRecord> {
        self.state.lock().records.clone()
    }

    /// Committed records with a sequence strictly greater than `sequence`.
    #[must_use]
    pub fn records_since(&self, sequence: u64) -> Vec<LedgerRecord> {
        let state = self.state.lock();
        let start = usize::try_from(sequence)
            .unwrap_or(usize::MAX)
            .min(state.records.len());
        state.records[start..].to_vec()
    }

    /// Committed records matching a filter.
    #[must_use]
    pub fn matching(&self, filter: &EventFilter) -> Vec<LedgerRecord> {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| filter.matches(&r.event))
            .cloned()
            .collect()
    }

    /// Committed records concerning a batch.
    #[must_use]
    pub fn records_for_batch(&self, batch_id: BatchId) -> Vec<LedgerRecord> {
        self.matching(&EventFilter::batches(vec![batch_id]))
    }

    /// Committed records concerning a notice.
    #[must_use]
    pub fn records_for_notice(&self, notice_id: NoticeId) -> Vec<LedgerRecord> {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| r.event.notice_id() == Some(notice_id))
            .cloned()
            .collect()
    }

    /// Number of committed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    /// Check if nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render committed records as JSON lines for external indexers.
    pub fn export_json_lines(&self) -> Result<String, BusError> {
        let state = self.state.lock();
        let mut out = String::new();
        for record in &state.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Subscribe to records committed from now on.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRecorder for EventLog {
    fn record(&self, event: LedgerEvent) {
        let mut state = self.state.lock();
        match state.staged.as_mut() {
            Some(staged) => staged.push(event),
            None => {
                self.append(&mut state, vec![event]);
            }
        }
    }
}

/// Guard over the events staged by one atomic operation.
pub struct UnitOfWork<'a> {
    log: &'a EventLog,
    finished: bool,
}

impl UnitOfWork<'_> {
    /// Number of events staged so far.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.log
            .state
            .lock()
            .staged
            .as_ref()
            .map_or(0, Vec::len)
    }

    /// Make the staged events durable. Returns how many were committed.
    pub fn commit(mut self) -> usize {
        self.finished = true;
        let mut state = self.log.state.lock();
        let staged = state.staged.take().unwrap_or_default();
        self.log.append(&mut state, staged)
    }

    /// Discard the staged events. Returns how many were dropped.
    pub fn rollback(mut self) -> usize {
        self.finished = true;
        self.discard()
    }

    fn discard(&self) -> usize {
        let dropped = self
            .log
            .state
            .lock()
            .staged
            .take()
            .map_or(0, |staged| staged.len());
        if dropped > 0 {
            debug!(dropped, "Staged events discarded");
        }
        dropped
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.discard();
        }
    }
}
