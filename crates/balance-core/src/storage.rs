//! Persistence port: a string key-value service the application writes
//! through after every state change.

use std::{collections::HashMap, sync::Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::CoreError;

/// Key holding the identity used to partition ledgers.
pub const USER_KEY: &str = "userEmail";
/// Key holding the period shown on startup.
pub const CURRENT_PERIOD_KEY: &str = "currentMonth";
/// Key holding the serialized selection set.
pub const SELECTION_KEY: &str = "selectedCategories";
const LEDGER_KEY_PREFIX: &str = "monthlyBalance";

/// Key under which `user`'s ledger is stored.
pub fn ledger_key(user: &str) -> String {
    format!("{LEDGER_KEY_PREFIX}/{user}")
}

/// Abstraction over key-value backends holding serialized application state.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Reads and decodes the JSON value stored under `key`.
pub fn load_value<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, CoreError>
where
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn save_value<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), CoreError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)
}

/// Process-local store, used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_domain::Period;

    #[test]
    fn absent_keys_read_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
        let value: Option<Period> = load_value(&store, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn typed_values_roundtrip() {
        let store = MemoryStore::new();
        save_value(&store, CURRENT_PERIOD_KEY, &Period::April).unwrap();
        assert_eq!(
            store.get(CURRENT_PERIOD_KEY).unwrap().as_deref(),
            Some("\"April\"")
        );
        let loaded: Option<Period> = load_value(&store, CURRENT_PERIOD_KEY).unwrap();
        assert_eq!(loaded, Some(Period::April));
    }

    #[test]
    fn malformed_stored_value_is_an_error() {
        let store = MemoryStore::new();
        store.put(CURRENT_PERIOD_KEY, "{oops").unwrap();
        assert!(load_value::<Period>(&store, CURRENT_PERIOD_KEY).is_err());
    }

    #[test]
    fn ledger_keys_are_partitioned_by_user() {
        assert_ne!(ledger_key("a@example.com"), ledger_key("b@example.com"));
        assert!(ledger_key("a@example.com").ends_with("a@example.com"));
    }
}
