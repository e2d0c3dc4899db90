/// Heuristic suggestions shown in the popup
use std::collections::HashSet;

use serde::Serialize;

use crate::config::AUTO_GROUP_THRESHOLD;
use crate::operations::{archive_stale_tabs, auto_group_tabs, duplicate_domains, merge_duplicate_domains};
use crate::priority::is_stale;
use crate::tab_data::{Group, TabInfo};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionAction {
    MergeDomains,
    ArchiveStale,
    AutoGroup,
}

impl SuggestionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionAction::MergeDomains => "merge-domains",
            SuggestionAction::ArchiveStale => "archive-stale",
            SuggestionAction::AutoGroup => "auto-group",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    pub icon: String,
    pub text: String,
    pub action: SuggestionAction,
    pub count: usize,
}

/// Stale tabs across every group, Archived included
pub fn stale_count(groups: &[Group], now: f64) -> usize {
    groups
        .iter()
        .flat_map(|g| g.tabs.iter())
        .filter(|t| is_stale(t, now))
        .count()
}

/// Open tabs that no group holds
pub fn ungrouped_count(groups: &[Group], live_tabs: &[TabInfo]) -> usize {
    let grouped: HashSet<i32> = groups.iter().flat_map(|g| g.tabs.iter().map(|t| t.id)).collect();
    live_tabs.iter().filter(|t| !grouped.contains(&t.id)).count()
}

/// Suggestions in fixed order: merge, archive, auto-group
pub fn generate(groups: &[Group], live_tabs: &[TabInfo], now: f64) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let duplicates = duplicate_domains(groups).len();
    if duplicates > 0 {
        suggestions.push(Suggestion {
            icon: "fa-object-group".to_string(),
            text: format!("Merge {} groups with duplicate domains", duplicates),
            action: SuggestionAction::MergeDomains,
            count: duplicates,
        });
    }

    let stale = stale_count(groups, now);
    if stale > 0 {
        suggestions.push(Suggestion {
            icon: "fa-archive".to_string(),
            text: format!("Archive {} tabs inactive for 24+ hours", stale),
            action: SuggestionAction::ArchiveStale,
            count: stale,
        });
    }

    let ungrouped = ungrouped_count(groups, live_tabs);
    if ungrouped > AUTO_GROUP_THRESHOLD {
        suggestions.push(Suggestion {
            icon: "fa-layer-group".to_string(),
            text: format!("Group {} ungrouped tabs automatically", ungrouped),
            action: SuggestionAction::AutoGroup,
            count: ungrouped,
        });
    }

    suggestions
}

/// Run the transformation behind a suggestion
pub fn apply(action: SuggestionAction, groups: Vec<Group>, live_tabs: &[TabInfo], now: f64) -> Vec<Group> {
    match action {
        SuggestionAction::MergeDomains => merge_duplicate_domains(groups),
        SuggestionAction::ArchiveStale => archive_stale_tabs(groups, now),
        SuggestionAction::AutoGroup => auto_group_tabs(live_tabs, groups, now),
    }
}
