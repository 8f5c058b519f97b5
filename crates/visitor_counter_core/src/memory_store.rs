use std::collections::HashMap;
use std::sync::Mutex;

use crate::contract::{CounterRecord, COUNTER_VALUE_ATTRIBUTE};
use crate::store::{AddOutcome, CounterStore};

/// Process-local store with DynamoDB-like semantics: `atomic_add` on a missing
/// item reports `NotFound`, a missing field on an existing item starts at zero,
/// and `put` replaces the whole item.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    items: Mutex<HashMap<String, HashMap<String, u64>>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(id: &str, value: u64) -> Self {
        let store = Self::new();
        store.seed(id, value);
        store
    }

    pub fn seed(&self, id: &str, value: u64) {
        self.seed_field(id, COUNTER_VALUE_ATTRIBUTE, value);
    }

    pub fn seed_field(&self, id: &str, field: &str, value: u64) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(id.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    pub fn value(&self, id: &str) -> Option<u64> {
        self.field_value(id, COUNTER_VALUE_ATTRIBUTE)
    }

    pub fn field_value(&self, id: &str, field: &str) -> Option<u64> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .and_then(|fields| fields.get(field))
            .copied()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn atomic_add(&self, key: &str, field: &str, delta: u64) -> AddOutcome {
        let mut items = match self.items.lock() {
            Ok(guard) => guard,
            Err(_) => return AddOutcome::Failed("counter store lock poisoned".to_string()),
        };
        let Some(fields) = items.get_mut(key) else {
            return AddOutcome::NotFound;
        };
        let value = fields.entry(field.to_string()).or_insert(0);
        match value.checked_add(delta) {
            Some(updated) => {
                *value = updated;
                AddOutcome::Updated(updated)
            }
            None => AddOutcome::Failed(format!("counter '{key}.{field}' would overflow")),
        }
    }

    fn put(&self, record: &CounterRecord) -> Result<(), String> {
        self.items
            .lock()
            .map_err(|_| "counter store lock poisoned".to_string())?
            .insert(
                record.id.clone(),
                HashMap::from([(COUNTER_VALUE_ATTRIBUTE.to_string(), record.value)]),
            );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_on_missing_key_reports_not_found() {
        let store = InMemoryCounterStore::new();
        assert_eq!(
            store.atomic_add("visitors", "visitor_count", 1),
            AddOutcome::NotFound
        );
        assert_eq!(store.value("visitors"), None);
    }

    #[test]
    fn add_updates_in_place() {
        let store = InMemoryCounterStore::with_value("visitors", 41);
        assert_eq!(
            store.atomic_add("visitors", "visitor_count", 1),
            AddOutcome::Updated(42)
        );
        assert_eq!(store.value("visitors"), Some(42));
    }

    #[test]
    fn add_targets_only_the_named_field() {
        let store = InMemoryCounterStore::with_value("visitors", 5);
        assert_eq!(
            store.atomic_add("visitors", "page_views", 3),
            AddOutcome::Updated(3)
        );
        assert_eq!(store.field_value("visitors", "page_views"), Some(3));
        assert_eq!(store.value("visitors"), Some(5));
    }

    #[test]
    fn add_refuses_to_wrap() {
        let store = InMemoryCounterStore::with_value("visitors", u64::MAX);
        assert!(matches!(
            store.atomic_add("visitors", "visitor_count", 1),
            AddOutcome::Failed(_)
        ));
        assert_eq!(store.value("visitors"), Some(u64::MAX));
    }

    #[test]
    fn put_replaces_existing_item() {
        let store = InMemoryCounterStore::with_value("visitors", 9);
        store.seed_field("visitors", "page_views", 4);
        store
            .put(&CounterRecord::initial())
            .expect("put should succeed");
        assert_eq!(store.value("visitors"), Some(1));
        assert_eq!(store.field_value("visitors", "page_views"), None);
    }
}
