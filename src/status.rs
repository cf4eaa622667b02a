//! Transaction status slot and user history log
//!
//! Both are session-scoped UI state objects with explicit mutation entry
//! points, injected into the pipelines rather than accessed as globals.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// How long a success status stays visible before auto-clearing
pub const SUCCESS_CLEAR_AFTER: Duration = Duration::from_secs(2);
/// How long an error status stays visible before auto-clearing
pub const ERROR_CLEAR_AFTER: Duration = Duration::from_secs(3);

/// How many history entries consumers see
pub const VISIBLE_HISTORY: usize = 5;

/// Kind of an in-flight operation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Success,
    Error,
}

/// Current contents of the status slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlot {
    pub visible: bool,
    pub kind: StatusKind,
    pub message: String,
}

impl StatusSlot {
    fn hidden() -> Self {
        Self {
            visible: false,
            kind: StatusKind::Pending,
            message: String::new(),
        }
    }
}

struct SlotState {
    slot: StatusSlot,
    // Bumped on every set; a scheduled clear only fires if it still owns
    // the slot. A stale timer can never clear a newer message.
    epoch: u64,
}

/// Single-slot notifier of in-flight operation status.
///
/// A new status always replaces the current one; there is no queueing.
/// Success and error statuses auto-clear after a fixed delay
/// ([`SUCCESS_CLEAR_AFTER`] / [`ERROR_CLEAR_AFTER`]); pending statuses stay
/// until overwritten.
#[derive(Clone)]
pub struct StatusTracker {
    state: Arc<Mutex<SlotState>>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState {
                slot: StatusSlot::hidden(),
                epoch: 0,
            })),
        }
    }

    /// Show a pending status (no auto-clear)
    pub async fn pending(&self, message: impl Into<String>) {
        self.set(StatusKind::Pending, message.into(), None).await;
    }

    /// Show a success status, auto-clearing after [`SUCCESS_CLEAR_AFTER`]
    pub async fn success(&self, message: impl Into<String>) {
        self.set(StatusKind::Success, message.into(), Some(SUCCESS_CLEAR_AFTER))
            .await;
    }

    /// Show an error status, auto-clearing after [`ERROR_CLEAR_AFTER`]
    pub async fn error(&self, message: impl Into<String>) {
        self.set(StatusKind::Error, message.into(), Some(ERROR_CLEAR_AFTER))
            .await;
    }

    /// Hide the slot immediately
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.epoch += 1;
        state.slot = StatusSlot::hidden();
    }

    /// Snapshot of the current slot
    pub async fn current(&self) -> StatusSlot {
        self.state.lock().await.slot.clone()
    }

    async fn set(&self, kind: StatusKind, message: String, clear_after: Option<Duration>) {
        let epoch = {
            let mut state = self.state.lock().await;
            state.epoch += 1;
            state.slot = StatusSlot {
                visible: true,
                kind,
                message,
            };
            state.epoch
        };

        if let Some(delay) = clear_after {
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut state = state.lock().await;
                if state.epoch == epoch {
                    state.slot = StatusSlot::hidden();
                }
            });
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only, session-scoped log of completed user actions.
///
/// The underlying sequence is unbounded for the session; consumers see only
/// the last [`VISIBLE_HISTORY`] entries.
#[derive(Clone)]
pub struct HistoryLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a completed-action entry
    pub async fn append(&self, entry: impl Into<String>) {
        self.entries.lock().await.push(entry.into());
    }

    /// The last [`VISIBLE_HISTORY`] entries, oldest first
    pub async fn recent(&self) -> Vec<String> {
        let entries = self.entries.lock().await;
        let start = entries.len().saturating_sub(VISIBLE_HISTORY);
        entries[start..].to_vec()
    }

    /// Total entries appended this session
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}
