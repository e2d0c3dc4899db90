/// Keeping stored tab records in step with the live browser tabs
use std::collections::{HashMap, HashSet};

use crate::operations::prune_empty;
use crate::tab_data::{Group, TabInfo};

/// A tab was activated or finished loading.
///
/// Every record with this id is refreshed. Returns whether anything changed.
pub fn record_visit(mut groups: Vec<Group>, tab_id: i32, live: &TabInfo, now: f64) -> (Vec<Group>, bool) {
    let mut changed = false;

    for record in groups.iter_mut().flat_map(|g| g.tabs.iter_mut()).filter(|t| t.id == tab_id) {
        record.last_visited = now;
        record.visit_count = record.visit_count.saturating_add(1);
        record.title = live.title.clone();
        record.url = live.url.clone();
        record.favicon = live.favicon_or_default();
        changed = true;
    }

    (groups, changed)
}

/// The user opened a record from the popup; only the first match counts.
pub fn record_open(mut groups: Vec<Group>, tab_id: i32, now: f64) -> (Vec<Group>, bool) {
    let record = groups
        .iter_mut()
        .flat_map(|g| g.tabs.iter_mut())
        .find(|t| t.id == tab_id);

    let changed = match record {
        Some(record) => {
            record.last_visited = now;
            record.visit_count = record.visit_count.saturating_add(1);
            true
        }
        None => false,
    };

    (groups, changed)
}

/// Drop the record of a closed tab
pub fn remove_tab(groups: Vec<Group>, tab_id: i32) -> (Vec<Group>, bool) {
    retain_tabs(groups, |id| id != tab_id)
}

/// Drop every record whose tab is no longer open
pub fn reconcile_against_live_set(groups: Vec<Group>, live_ids: &HashSet<i32>) -> (Vec<Group>, bool) {
    retain_tabs(groups, |id| live_ids.contains(&id))
}

fn retain_tabs<F>(mut groups: Vec<Group>, keep: F) -> (Vec<Group>, bool)
where
    F: Fn(i32) -> bool,
{
    let before: usize = groups.iter().map(|g| g.tabs.len()).sum();
    for group in &mut groups {
        group.tabs.retain(|t| keep(t.id));
    }
    let after: usize = groups.iter().map(|g| g.tabs.len()).sum();

    if after == before {
        (groups, false)
    } else {
        (prune_empty(groups), true)
    }
}

/// Refresh title, url and favicon from the live tabs. Membership is untouched.
///
/// Returns the number of records refreshed.
pub fn sync_metadata(mut groups: Vec<Group>, live_tabs: &[TabInfo]) -> (Vec<Group>, usize) {
    let live: HashMap<i32, &TabInfo> = live_tabs.iter().map(|t| (t.id, t)).collect();
    let mut refreshed = 0;

    for record in groups.iter_mut().flat_map(|g| g.tabs.iter_mut()) {
        if let Some(tab) = live.get(&record.id) {
            record.title = tab.title.clone();
            record.url = tab.url.clone();
            if let Some(favicon) = tab.fav_icon_url.as_ref().filter(|f| !f.is_empty()) {
                record.favicon = favicon.clone();
            }
            refreshed += 1;
        }
    }

    (groups, refreshed)
}
