/// Service worker handlers: tab lifecycle events, commands, housekeeping and sync
use std::collections::HashSet;

use futures::lock::Mutex;
use serde::Serialize;

use crate::activity::{reconcile_against_live_set, record_visit, remove_tab, sync_metadata};
use crate::config::{HOUSEKEEPING_ALARM, Settings};
use crate::error::{Result, TabFlowError};
use crate::grouping::assign_or_create_group;
use crate::services::{Clock, ExtensionShell, Notification, TabInspector, TabQuery};
use crate::storage::TabStore;
use crate::tab_data::TabInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallReason {
    Install,
    Update,
    Other,
}

impl InstallReason {
    pub fn parse(reason: &str) -> InstallReason {
        match reason {
            "install" => InstallReason::Install,
            "update" => InstallReason::Update,
            _ => InstallReason::Other,
        }
    }
}

/// Keyboard commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenPopup,
    QuickGroup,
}

impl Command {
    pub fn parse(command: &str) -> Option<Command> {
        match command {
            "open-popup" => Some(Command::OpenPopup),
            "quick-group" => Some(Command::QuickGroup),
            _ => None,
        }
    }
}

/// Reply to the popup's `syncTabs` request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Background logic over its collaborators.
///
/// Every read-modify-write of the stored groups holds `lock`, so a handler
/// never interleaves its write with another handler's.
pub struct Background<S, T, X, C> {
    store: S,
    tabs: T,
    shell: X,
    clock: C,
    lock: Mutex<()>,
}

impl<S, T, X, C> Background<S, T, X, C>
where
    S: TabStore,
    T: TabInspector,
    X: ExtensionShell,
    C: Clock,
{
    pub fn new(store: S, tabs: T, shell: X, clock: C) -> Self {
        Background {
            store,
            tabs,
            shell,
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// First install writes empty groups and default settings
    pub async fn on_installed(&self, reason: InstallReason) -> Result<()> {
        if reason != InstallReason::Install {
            return Ok(());
        }

        let _guard = self.lock.lock().await;
        self.store.save_groups(&[]).await?;
        self.store.save_settings(&Settings::default()).await?;
        log::info!("TabFlow installed");
        Ok(())
    }

    /// A tab finished loading. Returns whether a stored record changed.
    pub async fn on_tab_updated(&self, tab_id: i32, complete: bool, tab: &TabInfo) -> Result<bool> {
        if !complete || tab.url.is_empty() {
            return Ok(false);
        }
        self.record_activity(tab_id, tab).await
    }

    pub async fn on_tab_activated(&self, tab_id: i32) -> Result<bool> {
        let tab = self
            .tabs
            .get_tab(tab_id)
            .await?
            .ok_or(TabFlowError::TabNotFound(tab_id))?;
        self.record_activity(tab_id, &tab).await
    }

    async fn record_activity(&self, tab_id: i32, tab: &TabInfo) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let groups = self.store.load_groups().await?;
        let (groups, changed) = record_visit(groups, tab_id, tab, self.clock.now());
        if changed {
            self.store.save_groups(&groups).await?;
            log::debug!("Recorded visit to tab {}", tab_id);
        }
        Ok(changed)
    }

    pub async fn on_tab_removed(&self, tab_id: i32) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let groups = self.store.load_groups().await?;
        let (groups, changed) = remove_tab(groups, tab_id);
        if changed {
            self.store.save_groups(&groups).await?;
            log::debug!("Dropped closed tab {}", tab_id);
        }
        Ok(changed)
    }

    pub async fn on_command(&self, command: Command) -> Result<()> {
        match command {
            Command::OpenPopup => self.shell.open_popup().await,
            Command::QuickGroup => self.quick_group_active_tab().await.map(|_| ()),
        }
    }

    /// Put the active tab in its domain group and tell the user which one.
    ///
    /// Returns the group name, or `None` when there is no active tab or its
    /// URL cannot be grouped.
    pub async fn quick_group_active_tab(&self) -> Result<Option<String>> {
        let active = self.tabs.list_open_tabs(&TabQuery::ActiveInCurrentWindow).await?;
        let Some(tab) = active.into_iter().next() else {
            return Ok(None);
        };

        let name = {
            let _guard = self.lock.lock().await;
            let groups = self.store.load_groups().await?;
            let assignment = assign_or_create_group(groups, &tab, self.clock.now());
            let Some(name) = assignment.target_group().map(|g| g.name.clone()) else {
                log::warn!("Cannot quick-group tab {}: {}", tab.id, tab.url);
                return Ok(None);
            };
            self.store.save_groups(&assignment.groups).await?;
            name
        };

        self.shell.notify(Notification {
            title: "Tab Grouped!".to_string(),
            message: format!("Added to \"{}\" group", name),
        });
        Ok(Some(name))
    }

    pub async fn on_alarm(&self, name: &str) -> Result<()> {
        if name == HOUSEKEEPING_ALARM {
            self.housekeeping().await?;
        }
        Ok(())
    }

    /// Drop records of tabs closed while nothing was listening.
    ///
    /// Returns whether the stored groups changed.
    pub async fn housekeeping(&self) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let groups = self.store.load_groups().await?;
        let live: HashSet<i32> = self
            .tabs
            .list_open_tabs(&TabQuery::All)
            .await?
            .iter()
            .map(|t| t.id)
            .collect();

        let (groups, changed) = reconcile_against_live_set(groups, &live);
        if changed {
            self.store.save_groups(&groups).await?;
            log::info!("Cleanup completed: {} groups remaining", groups.len());
        }
        Ok(changed)
    }

    /// Refresh stored metadata from the tabs of the current window
    pub async fn sync_tabs(&self) -> SyncResponse {
        match self.try_sync_tabs().await {
            Ok(group_count) => SyncResponse {
                success: true,
                group_count: Some(group_count),
                error: None,
            },
            Err(e) => {
                log::error!("Error syncing tabs: {}", e);
                SyncResponse {
                    success: false,
                    group_count: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn try_sync_tabs(&self) -> Result<usize> {
        let live = self.tabs.list_open_tabs(&TabQuery::CurrentWindow).await?;

        let _guard = self.lock.lock().await;
        let groups = self.store.load_groups().await?;
        let (groups, refreshed) = sync_metadata(groups, &live);
        self.store.save_groups(&groups).await?;
        log::debug!("Synced {} tab records", refreshed);
        Ok(groups.len())
    }
}
