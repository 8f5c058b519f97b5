use serde_json::json;

use crate::contract::{CounterRecord, COUNTER_ID, COUNTER_VALUE_ATTRIBUTE};
use crate::logging::{log_error, log_info};
use crate::store::{AddOutcome, CounterStore};

const COMPONENT: &str = "counter_service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    /// The atomic add failed for a reason other than a missing record.
    Store(String),
    /// The record was missing and creating it failed.
    Creation(String),
}

impl CounterError {
    pub fn message(&self) -> &str {
        match self {
            Self::Store(message) | Self::Creation(message) => message,
        }
    }
}

impl std::fmt::Display for CounterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CounterError {}

pub struct CounterService<S> {
    store: S,
}

impl<S: CounterStore> CounterService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds one to the visitor counter and returns the new value.
    ///
    /// A missing record is created with value 1. That fallback is a plain
    /// overwrite, so concurrent first-time callers can both observe the miss
    /// and both write 1.
    pub fn increment(&self) -> Result<u64, CounterError> {
        match self.store.atomic_add(COUNTER_ID, COUNTER_VALUE_ATTRIBUTE, 1) {
            AddOutcome::Updated(count) => {
                log_info(
                    COMPONENT,
                    "counter_incremented",
                    json!({ "counter_id": COUNTER_ID, "count": count }),
                );
                Ok(count)
            }
            AddOutcome::NotFound => {
                log_info(
                    COMPONENT,
                    "counter_missing",
                    json!({ "counter_id": COUNTER_ID }),
                );
                self.create_counter()
            }
            AddOutcome::Failed(reason) => {
                log_error(
                    COMPONENT,
                    "counter_increment_failed",
                    json!({ "counter_id": COUNTER_ID, "error": reason.clone() }),
                );
                Err(CounterError::Store(reason))
            }
        }
    }

    fn create_counter(&self) -> Result<u64, CounterError> {
        let record = CounterRecord::initial();
        match self.store.put(&record) {
            Ok(()) => {
                log_info(
                    COMPONENT,
                    "counter_created",
                    json!({ "counter_id": record.id, "count": record.value }),
                );
                Ok(record.value)
            }
            Err(error) => {
                log_error(
                    COMPONENT,
                    "counter_create_failed",
                    json!({ "counter_id": record.id, "error": error.clone() }),
                );
                Err(CounterError::Creation(error))
            }
        }
    }
}
