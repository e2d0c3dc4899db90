/// In-memory collaborators for exercising the async handlers

use std::cell::{Cell, RefCell};

use crate::config::Settings;
use crate::error::{Result, TabFlowError};
use crate::grouping::domain_group;
use crate::services::{Clock, ExtensionShell, Notification, TabInspector, TabQuery};
use crate::storage::TabStore;
use crate::tab_data::{Group, TabInfo, TabRecord};

pub const CURRENT_WINDOW: i32 = 1;

pub fn create_test_tab(id: i32, url: &str) -> TabInfo {
    TabInfo::new(id, url.to_string(), format!("Tab {}", id))
}

/// One group per `(id, url)` pair, each record visited once at time 0
pub fn grouped(tabs: &[(i32, &str)]) -> Vec<Group> {
    tabs.iter()
        .map(|&(id, url)| {
            let mut group = domain_group(&format!("group{}.test", id), "#8b5a3c");
            group.tabs.push(TabRecord::from_live(&create_test_tab(id, url), 0.0));
            group
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct FakeTabs {
    pub tabs: RefCell<Vec<TabInfo>>,
    pub activated: RefCell<Vec<i32>>,
    pub created: RefCell<Vec<String>>,
    pub focused: RefCell<Vec<i32>>,
    pub offline: Cell<bool>,
}

impl FakeTabs {
    pub fn new(tabs: Vec<TabInfo>) -> Self {
        FakeTabs {
            tabs: RefCell::new(tabs),
            ..FakeTabs::default()
        }
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.get() {
            Err(TabFlowError::InspectionUnavailable("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

fn in_current_window(tab: &TabInfo) -> bool {
    tab.window_id.is_none_or(|w| w == CURRENT_WINDOW)
}

impl TabInspector for FakeTabs {
    async fn list_open_tabs(&self, query: &TabQuery) -> Result<Vec<TabInfo>> {
        self.check_online()?;
        let tabs = self.tabs.borrow();
        let matching = tabs.iter().filter(|t| match query {
            TabQuery::All => true,
            TabQuery::CurrentWindow => in_current_window(t),
            TabQuery::ActiveInCurrentWindow => t.active && in_current_window(t),
            TabQuery::Url(url) => &t.url == url,
        });
        Ok(matching.cloned().collect())
    }

    async fn get_tab(&self, tab_id: i32) -> Result<Option<TabInfo>> {
        self.check_online()?;
        Ok(self.tabs.borrow().iter().find(|t| t.id == tab_id).cloned())
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<()> {
        self.check_online()?;
        self.activated.borrow_mut().push(tab_id);
        Ok(())
    }

    async fn create_tab(&self, url: &str) -> Result<()> {
        self.check_online()?;
        self.created.borrow_mut().push(url.to_string());
        Ok(())
    }

    async fn focus_window(&self, window_id: i32) -> Result<()> {
        self.check_online()?;
        self.focused.borrow_mut().push(window_id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingShell {
    pub notifications: RefCell<Vec<Notification>>,
    pub popups: Cell<usize>,
}

impl ExtensionShell for RecordingShell {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }

    async fn open_popup(&self) -> Result<()> {
        self.popups.set(self.popups.get() + 1);
        Ok(())
    }
}

pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

/// A store whose every call fails
pub struct OfflineStore;

impl TabStore for OfflineStore {
    async fn load_groups(&self) -> Result<Vec<Group>> {
        Err(TabFlowError::StoreUnavailable("offline".to_string()))
    }

    async fn save_groups(&self, _groups: &[Group]) -> Result<()> {
        Err(TabFlowError::StoreUnavailable("offline".to_string()))
    }

    async fn load_settings(&self) -> Result<Settings> {
        Err(TabFlowError::StoreUnavailable("offline".to_string()))
    }

    async fn save_settings(&self, _settings: &Settings) -> Result<()> {
        Err(TabFlowError::StoreUnavailable("offline".to_string()))
    }
}
