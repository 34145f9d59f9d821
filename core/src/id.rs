//! Todo id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

/// Source of fresh todo ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Milliseconds since the Unix epoch, as a decimal string.
///
/// Two calls within the same millisecond return the same id, and the store
/// then rejects the second `add` as a duplicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockIds;

impl IdGenerator for ClockIds {
    fn next_id(&self) -> String {
        Utc::now().timestamp_millis().to_string()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counter starting at a fixed value. Deterministic, for tests and replays.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
