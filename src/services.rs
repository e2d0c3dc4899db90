/// Browser-side collaborators of the engine
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tab_data::TabInfo;

/// Which open tabs to list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "camelCase")]
pub enum TabQuery {
    All,
    CurrentWindow,
    ActiveInCurrentWindow,
    Url(String),
}

/// Enumerates and drives the live browser tabs
#[allow(async_fn_in_trait)]
pub trait TabInspector {
    async fn list_open_tabs(&self, query: &TabQuery) -> Result<Vec<TabInfo>>;
    async fn get_tab(&self, tab_id: i32) -> Result<Option<TabInfo>>;
    async fn activate_tab(&self, tab_id: i32) -> Result<()>;
    async fn create_tab(&self, url: &str) -> Result<()>;
    async fn focus_window(&self, window_id: i32) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// Extension surfaces outside the tab list
#[allow(async_fn_in_trait)]
pub trait ExtensionShell {
    /// Fire and forget
    fn notify(&self, notification: Notification);
    async fn open_popup(&self) -> Result<()>;
}

/// Milliseconds since the epoch
pub trait Clock {
    fn now(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_query_wire_shape() {
        assert_eq!(serde_json::to_value(TabQuery::All).unwrap(), serde_json::json!({"kind": "all"}));
        assert_eq!(
            serde_json::to_value(TabQuery::ActiveInCurrentWindow).unwrap(),
            serde_json::json!({"kind": "activeInCurrentWindow"})
        );
        assert_eq!(
            serde_json::to_value(TabQuery::Url("https://a.com".to_string())).unwrap(),
            serde_json::json!({"kind": "url", "url": "https://a.com"})
        );
    }
}
