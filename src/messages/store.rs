//! In-memory conversation storage.

use std::sync::{Arc, PoisonError, RwLock};

use super::{MessageRecord, Role};

/// Smallest non-zero limit; one full `[user, system]` turn.
const MIN_HISTORY_LIMIT: usize = 2;

/// Thread-safe, ordered store of message records.
///
/// Cloning the store yields another handle to the same conversation.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    inner: Arc<MessageStoreInner>,
}

#[derive(Debug, Default)]
struct MessageStoreInner {
    records: RwLock<Vec<MessageRecord>>,
    /// Maximum number of records kept; zero means unbounded.
    history_limit: usize,
}

impl MessageStore {
    /// Create an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that keeps at most `limit` records, dropping the oldest
    /// whole turns.
    ///
    /// A limit of zero keeps everything. A limit of one is raised to two so
    /// the newest turn always fits.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        let history_limit = if limit == 0 {
            0
        } else {
            limit.max(MIN_HISTORY_LIMIT)
        };

        Self {
            inner: Arc::new(MessageStoreInner {
                records: RwLock::new(Vec::new()),
                history_limit,
            }),
        }
    }

    /// Snapshot of all records in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<MessageRecord> {
        self.inner
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Append records under a single lock so a turn is never split.
    pub fn append(&self, records: impl IntoIterator<Item = MessageRecord>) {
        let mut guard = self
            .inner
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.extend(records);

        let limit = self.inner.history_limit;
        if limit > 0 && guard.len() > limit {
            let excess = turn_boundary(&guard, guard.len() - limit);
            guard.drain(..excess);
            tracing::debug!(dropped = excess, limit, "Trimmed conversation history");
        }
    }

    /// The newest record carrying a markdown payload.
    #[must_use]
    pub fn latest_with_markdown(&self) -> Option<MessageRecord> {
        self.inner
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|r| r.has_markdown())
            .cloned()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the conversation is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.inner
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// First index at or after `from` where a user turn starts.
///
/// Falls back to `from` when no user record follows, so the limit still holds.
fn turn_boundary(records: &[MessageRecord], from: usize) -> usize {
    records[from..]
        .iter()
        .position(|r| r.role == Role::User)
        .map_or(from, |offset| from + offset)
}
