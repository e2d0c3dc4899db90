/// Chrome extension APIs behind the engine's collaborator traits
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::{GROUPS_KEY, SETTINGS_KEY, Settings};
use crate::error::{Result, TabFlowError};
use crate::services::{Clock, ExtensionShell, Notification, TabInspector, TabQuery};
use crate::storage::TabStore;
use crate::tab_data::{Group, TabInfo};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs(query: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn focusWindow(window_id: i32) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn showNotification(title: &str, message: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openPopup() -> std::result::Result<(), JsValue>;
}

fn store_error(e: JsValue) -> TabFlowError {
    TabFlowError::StoreUnavailable(format!("{:?}", e))
}

fn tabs_error(e: JsValue) -> TabFlowError {
    TabFlowError::InspectionUnavailable(format!("{:?}", e))
}

/// `chrome.storage.local`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStore;

impl ChromeStore {
    async fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let value = getStorage(key).await.map_err(store_error)?;
        if value.is_null() || value.is_undefined() {
            return Ok(T::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| TabFlowError::CorruptRecord {
            key: key.to_string(),
            details: e.to_string(),
        })
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_wasm_bindgen::to_value(value)
            .map_err(|e| TabFlowError::StoreUnavailable(format!("Failed to serialize {}: {}", key, e)))?;
        setStorage(key, value).await.map_err(store_error)
    }
}

impl TabStore for ChromeStore {
    async fn load_groups(&self) -> Result<Vec<Group>> {
        self.read(GROUPS_KEY).await
    }

    async fn save_groups(&self, groups: &[Group]) -> Result<()> {
        self.write(GROUPS_KEY, groups).await
    }

    async fn load_settings(&self) -> Result<Settings> {
        self.read(SETTINGS_KEY).await
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_KEY, settings).await
    }
}

/// `chrome.tabs` and `chrome.windows`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabInspector for ChromeTabs {
    async fn list_open_tabs(&self, query: &TabQuery) -> Result<Vec<TabInfo>> {
        let query = serde_wasm_bindgen::to_value(query).map_err(|e| TabFlowError::InspectionUnavailable(e.to_string()))?;
        let tabs = queryTabs(query).await.map_err(tabs_error)?;
        serde_wasm_bindgen::from_value(tabs)
            .map_err(|e| TabFlowError::InspectionUnavailable(format!("Failed to parse tabs: {}", e)))
    }

    async fn get_tab(&self, tab_id: i32) -> Result<Option<TabInfo>> {
        let tab = getTab(tab_id).await.map_err(tabs_error)?;
        if tab.is_null() || tab.is_undefined() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(tab)
            .map(Some)
            .map_err(|e| TabFlowError::InspectionUnavailable(format!("Failed to parse tab: {}", e)))
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<()> {
        activateTab(tab_id).await.map_err(tabs_error)
    }

    async fn create_tab(&self, url: &str) -> Result<()> {
        createTab(url).await.map_err(tabs_error)
    }

    async fn focus_window(&self, window_id: i32) -> Result<()> {
        focusWindow(window_id).await.map_err(tabs_error)
    }
}

/// `chrome.notifications` and `chrome.action`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeShell;

impl ExtensionShell for ChromeShell {
    fn notify(&self, notification: Notification) {
        spawn_local(async move {
            if let Err(e) = showNotification(&notification.title, &notification.message).await {
                log::warn!("Notification failed: {:?}", e);
            }
        });
    }

    async fn open_popup(&self) -> Result<()> {
        openPopup()
            .await
            .map_err(|e| TabFlowError::ShellUnavailable(format!("Failed to open popup: {:?}", e)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        js_sys::Date::now()
    }
}
