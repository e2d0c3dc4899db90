/// Data structures for TabFlow
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_FAVICON;

/// A browser tab as reported by the tab service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub window_id: Option<i32>,
    #[serde(default)]
    pub active: bool,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String) -> TabInfo {
        TabInfo {
            id,
            title,
            url,
            fav_icon_url: None,
            window_id: None,
            active: false,
        }
    }

    /// The favicon to store for this tab
    pub fn favicon_or_default(&self) -> String {
        self.fav_icon_url
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FAVICON.to_string())
    }
}

/// Cached metadata about a tab owned by a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Either a favicon URL or an icon-class token
    #[serde(default)]
    pub favicon: String,
    #[serde(default)]
    pub last_visited: f64,
    #[serde(default = "first_visit")]
    pub visit_count: u32,
}

fn first_visit() -> u32 {
    1
}

impl TabRecord {
    /// Record for a tab seen for the first time at `now`
    pub fn from_live(tab: &TabInfo, now: f64) -> TabRecord {
        TabRecord {
            id: tab.id,
            title: tab.title.clone(),
            url: tab.url.clone(),
            favicon: tab.favicon_or_default(),
            last_visited: now,
            visit_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupTheme {
    #[default]
    Gradient,
    Solid,
    Glass,
}

/// A named, colored collection of tab records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub tabs: Vec<TabRecord>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub theme: GroupTheme,
    pub icon: String,
}

impl Group {
    pub fn contains_tab(&self, tab_id: i32) -> bool {
        self.tabs.iter().any(|t| t.id == tab_id)
    }
}

/// Display priority of a tab record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Active,
    Stale,
    Normal,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Active => "active",
            Priority::Stale => "stale",
            Priority::Normal => "normal",
        }
    }
}
