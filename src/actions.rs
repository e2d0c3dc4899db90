/// Popup-side flows: each loads the stored groups, transforms them and writes them back
use crate::activity::record_open;
use crate::config::Settings;
use crate::error::Result;
use crate::grouping::create_initial_groups;
use crate::operations::{delete_group, new_group, toggle_collapsed};
use crate::services::{TabInspector, TabQuery};
use crate::storage::TabStore;
use crate::suggestions::{Suggestion, SuggestionAction, apply, generate};
use crate::tab_data::{Group, TabRecord};

/// Everything the popup renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupView {
    pub groups: Vec<Group>,
    pub suggestions: Vec<Suggestion>,
    pub settings: Settings,
}

/// Load the popup state, creating domain groups from the open tabs when
/// nothing is stored yet and `autoGroup` is on
pub async fn load_popup<S: TabStore, T: TabInspector>(store: &S, tabs: &T, now: f64) -> Result<PopupView> {
    let settings = store.load_settings().await?;
    let mut groups = store.load_groups().await?;
    let live = tabs.list_open_tabs(&TabQuery::CurrentWindow).await?;

    if groups.is_empty() && settings.auto_group {
        groups = create_initial_groups(&live, now);
        if !groups.is_empty() {
            store.save_groups(&groups).await?;
            log::info!("Created {} initial groups", groups.len());
        }
    }

    let suggestions = generate(&groups, &live, now);
    Ok(PopupView {
        groups,
        suggestions,
        settings,
    })
}

pub async fn suggestions_for<T: TabInspector>(tabs: &T, groups: &[Group], now: f64) -> Result<Vec<Suggestion>> {
    let live = tabs.list_open_tabs(&TabQuery::CurrentWindow).await?;
    Ok(generate(groups, &live, now))
}

/// Focus the open tab showing `record`, or open a new one, then count the visit
pub async fn open_tab<S: TabStore, T: TabInspector>(store: &S, tabs: &T, record: &TabRecord, now: f64) -> Result<Vec<Group>> {
    let existing = tabs.list_open_tabs(&TabQuery::Url(record.url.clone())).await?;
    match existing.first() {
        Some(tab) => {
            tabs.activate_tab(tab.id).await?;
            if let Some(window_id) = tab.window_id {
                tabs.focus_window(window_id).await?;
            }
        }
        None => tabs.create_tab(&record.url).await?,
    }

    let (groups, changed) = record_open(store.load_groups().await?, record.id, now);
    if changed {
        store.save_groups(&groups).await?;
    }
    Ok(groups)
}

pub async fn apply_suggestion<S: TabStore, T: TabInspector>(
    store: &S,
    tabs: &T,
    action: SuggestionAction,
    now: f64,
) -> Result<Vec<Group>> {
    let groups = store.load_groups().await?;
    let live = match action {
        SuggestionAction::AutoGroup => tabs.list_open_tabs(&TabQuery::CurrentWindow).await?,
        _ => Vec::new(),
    };

    let groups = apply(action, groups, &live, now);
    store.save_groups(&groups).await?;
    log::info!("Applied {}: {} groups", action.as_str(), groups.len());
    Ok(groups)
}

pub async fn create_group<S: TabStore>(store: &S) -> Result<Vec<Group>> {
    let groups = new_group(store.load_groups().await?);
    store.save_groups(&groups).await?;
    Ok(groups)
}

/// Remove a group after the user confirmed it
pub async fn remove_group<S: TabStore>(store: &S, group_id: &str) -> Result<Vec<Group>> {
    let (groups, changed) = delete_group(store.load_groups().await?, group_id);
    if changed {
        store.save_groups(&groups).await?;
    }
    Ok(groups)
}

pub async fn toggle_group<S: TabStore>(store: &S, group_id: &str) -> Result<Vec<Group>> {
    let (groups, changed) = toggle_collapsed(store.load_groups().await?, group_id);
    if changed {
        store.save_groups(&groups).await?;
    }
    Ok(groups)
}

/// Flip `aiEnabled`, which shows or hides the suggestions panel
pub async fn toggle_suggestions<S: TabStore>(store: &S) -> Result<Settings> {
    let mut settings = store.load_settings().await?;
    settings.ai_enabled = !settings.ai_enabled;
    store.save_settings(&settings).await?;
    Ok(settings)
}
