use std::sync::Arc;

use crate::contract::CounterRecord;

/// Result of a single atomic add against the counter record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The add was applied; carries the post-update value.
    Updated(u64),
    /// No record exists for the key.
    NotFound,
    Failed(String),
}

/// Durable key-value capability the increment protocol runs against.
///
/// `atomic_add` must be serialized by the store for a given key. `put` is an
/// unconditional overwrite-or-create.
pub trait CounterStore {
    fn atomic_add(&self, key: &str, field: &str, delta: u64) -> AddOutcome;
    fn put(&self, record: &CounterRecord) -> Result<(), String>;
}

impl<T: CounterStore + ?Sized> CounterStore for &T {
    fn atomic_add(&self, key: &str, field: &str, delta: u64) -> AddOutcome {
        (**self).atomic_add(key, field, delta)
    }

    fn put(&self, record: &CounterRecord) -> Result<(), String> {
        (**self).put(record)
    }
}

impl<T: CounterStore + ?Sized> CounterStore for Arc<T> {
    fn atomic_add(&self, key: &str, field: &str, delta: u64) -> AddOutcome {
        (**self).atomic_add(key, field, delta)
    }

    fn put(&self, record: &CounterRecord) -> Result<(), String> {
        (**self).put(record)
    }
}
