/// The durable key-value store holding the `groups` and `settings` records
use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{GROUPS_KEY, SETTINGS_KEY, Settings};
use crate::error::{Result, TabFlowError};
use crate::tab_data::Group;

/// Whole-record reads and writes; absent records read as their defaults.
#[allow(async_fn_in_trait)]
pub trait TabStore {
    async fn load_groups(&self) -> Result<Vec<Group>>;
    async fn save_groups(&self, groups: &[Group]) -> Result<()>;
    async fn load_settings(&self) -> Result<Settings>;
    async fn save_settings(&self, settings: &Settings) -> Result<()>;
}

/// In-process store of JSON blobs
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store a raw JSON value under `key`
    pub fn insert_raw(&self, key: &str, value: serde_json::Value) {
        self.records.borrow_mut().insert(key.to_string(), value);
    }

    pub fn get_raw(&self, key: &str) -> Option<serde_json::Value> {
        self.records.borrow().get(key).cloned()
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.records.borrow().get(key) {
            None | Some(serde_json::Value::Null) => Ok(T::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| TabFlowError::CorruptRecord {
                key: key.to_string(),
                details: e.to_string(),
            }),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| TabFlowError::StoreUnavailable(e.to_string()))?;
        self.insert_raw(key, value);
        Ok(())
    }
}

impl TabStore for MemoryStore {
    async fn load_groups(&self) -> Result<Vec<Group>> {
        self.read(GROUPS_KEY)
    }

    async fn save_groups(&self, groups: &[Group]) -> Result<()> {
        self.write(GROUPS_KEY, groups)
    }

    async fn load_settings(&self) -> Result<Settings> {
        self.read(SETTINGS_KEY)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_KEY, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab_data::{GroupTheme, TabRecord};
    use futures::executor::block_on;

    fn create_test_group(id: &str, name: &str) -> Group {
        Group {
            id: id.to_string(),
            name: name.to_string(),
            color: "#8b5a3c".to_string(),
            tabs: vec![TabRecord {
                id: 1,
                title: "Google".to_string(),
                url: "https://google.com".to_string(),
                favicon: "fa-google".to_string(),
                last_visited: 1698508200000.0,
                visit_count: 1,
            }],
            collapsed: false,
            theme: GroupTheme::Gradient,
            icon: "fa-google".to_string(),
        }
    }

    #[test]
    fn test_empty_store_defaults() {
        let store = MemoryStore::new();

        assert!(block_on(store.load_groups()).unwrap().is_empty());
        assert_eq!(block_on(store.load_settings()).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load_groups() {
        let store = MemoryStore::new();
        let groups = vec![create_test_group("g-1", "Google"), create_test_group("g-2", "Other")];

        block_on(store.save_groups(&groups)).unwrap();
        let loaded = block_on(store.load_groups()).unwrap();

        assert_eq!(loaded, groups);
        assert_eq!(store.get_raw("groups").unwrap()[1]["name"], "Other");
    }

    #[test]
    fn test_save_and_load_settings() {
        let store = MemoryStore::new();
        let settings = Settings {
            auto_group: false,
            ai_enabled: false,
            theme: "dark".to_string(),
        };

        block_on(store.save_settings(&settings)).unwrap();

        assert_eq!(block_on(store.load_settings()).unwrap(), settings);
    }

    #[test]
    fn test_null_record_reads_as_default() {
        let store = MemoryStore::new();
        store.insert_raw("groups", serde_json::Value::Null);

        assert!(block_on(store.load_groups()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_record() {
        let store = MemoryStore::new();
        store.insert_raw("groups", serde_json::json!({"not": "a list"}));

        match block_on(store.load_groups()) {
            Err(TabFlowError::CorruptRecord { key, .. }) => assert_eq!(key, "groups"),
            other => panic!("expected CorruptRecord, got {:?}", other),
        }
    }
}
