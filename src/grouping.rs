/// Assigning tabs to domain groups
use std::collections::HashMap;

use uuid::Uuid;

use crate::config::PALETTE;
use crate::domain::{domain_contains, domain_key, group_name, icon_for_domain};
use crate::tab_data::{Group, GroupTheme, TabInfo, TabRecord};

pub fn new_group_id() -> String {
    Uuid::new_v4().to_string()
}

/// A palette color picked at random
pub fn random_color() -> &'static str {
    let mut byte = [0u8; 1];
    match getrandom::getrandom(&mut byte) {
        Ok(()) => PALETTE[byte[0] as usize % PALETTE.len()],
        Err(e) => {
            log::warn!("No randomness available for group color: {}", e);
            PALETTE[0]
        }
    }
}

/// The palette color for the n-th group created in one pass
pub fn cycled_color(n: usize) -> &'static str {
    PALETTE[n % PALETTE.len()]
}

/// An empty group named after `domain`
pub fn domain_group(domain: &str, color: &str) -> Group {
    Group {
        id: new_group_id(),
        name: group_name(domain),
        color: color.to_string(),
        tabs: Vec::new(),
        collapsed: false,
        theme: GroupTheme::Gradient,
        icon: icon_for_domain(domain).to_string(),
    }
}

/// Index of the first group holding a tab whose domain contains `domain`
pub fn find_domain_group(groups: &[Group], domain: &str) -> Option<usize> {
    groups
        .iter()
        .position(|g| g.tabs.iter().any(|t| domain_contains(&t.url, domain)))
}

/// Result of placing one tab
#[derive(Debug)]
pub struct Assignment {
    pub groups: Vec<Group>,
    /// Index of the group that holds the tab, `None` if the URL was not groupable
    pub target: Option<usize>,
    /// Whether a new record was appended
    pub inserted: bool,
}

impl Assignment {
    pub fn target_group(&self) -> Option<&Group> {
        self.target.map(|i| &self.groups[i])
    }
}

/// Put `tab` in the group for its domain, creating the group if needed
pub fn assign_or_create_group(mut groups: Vec<Group>, tab: &TabInfo, now: f64) -> Assignment {
    let Some(domain) = domain_key(&tab.url) else {
        log::debug!("Tab {} has no groupable domain: {}", tab.id, tab.url);
        return Assignment {
            groups,
            target: None,
            inserted: false,
        };
    };

    let target = match find_domain_group(&groups, &domain) {
        Some(index) => index,
        None => {
            groups.push(domain_group(&domain, random_color()));
            groups.len() - 1
        }
    };

    let group = &mut groups[target];
    let inserted = !group.contains_tab(tab.id);
    if inserted {
        group.tabs.push(TabRecord::from_live(tab, now));
    }

    Assignment {
        groups,
        target: Some(target),
        inserted,
    }
}

/// Live tabs bucketed by exact domain key, in first-seen order
pub fn bucket_by_domain<'a, I>(tabs: I) -> Vec<(String, Vec<&'a TabInfo>)>
where
    I: IntoIterator<Item = &'a TabInfo>,
{
    let mut buckets: Vec<(String, Vec<&TabInfo>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for tab in tabs {
        let Some(domain) = domain_key(&tab.url) else {
            continue;
        };
        match positions.get(&domain) {
            Some(&i) => buckets[i].1.push(tab),
            None => {
                positions.insert(domain.clone(), buckets.len());
                buckets.push((domain, vec![tab]));
            }
        }
    }

    buckets
}

/// First-run population: one group per domain among the open tabs
pub fn create_initial_groups(live_tabs: &[TabInfo], now: f64) -> Vec<Group> {
    bucket_by_domain(live_tabs)
        .into_iter()
        .enumerate()
        .map(|(n, (domain, tabs))| {
            let mut group = domain_group(&domain, cycled_color(n));
            group.tabs = tabs.iter().map(|t| TabRecord::from_live(t, now)).collect();
            group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_760_000_000_000.0;

    fn create_test_tab(id: i32, url: &str) -> TabInfo {
        TabInfo::new(id, url.to_string(), format!("Tab {}", id))
    }

    #[test]
    fn test_assign_creates_group() {
        let result = assign_or_create_group(Vec::new(), &create_test_tab(1, "https://www.github.com/a"), NOW);

        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.target, Some(0));
        assert!(result.inserted);

        let group = &result.groups[0];
        assert_eq!(group.name, "Github");
        assert_eq!(group.icon, "fa-github");
        assert_eq!(group.theme, GroupTheme::Gradient);
        assert!(!group.collapsed);
        assert!(PALETTE.contains(&group.color.as_str()));
        assert_eq!(group.tabs[0].visit_count, 1);
        assert_eq!(group.tabs[0].last_visited, NOW);
        assert_eq!(group.tabs[0].favicon, "fas fa-globe");
    }

    #[test]
    fn test_assign_joins_group_by_substring() {
        let first = assign_or_create_group(Vec::new(), &create_test_tab(1, "https://mail.google.com"), NOW);
        let second = assign_or_create_group(first.groups, &create_test_tab(2, "https://google.com"), NOW);

        assert_eq!(second.groups.len(), 1);
        assert_eq!(second.target, Some(0));
        assert_eq!(second.groups[0].tabs.len(), 2);
    }

    #[test]
    fn test_assign_ignores_existing_tab() {
        let tab = create_test_tab(1, "https://github.com");
        let first = assign_or_create_group(Vec::new(), &tab, NOW);
        let second = assign_or_create_group(first.groups, &tab, NOW + 10.0);

        assert!(!second.inserted);
        assert_eq!(second.groups[0].tabs.len(), 1);
        assert_eq!(second.groups[0].tabs[0].last_visited, NOW);
    }

    #[test]
    fn test_assign_after_navigation_adds_second_record_until_merged() {
        let first = assign_or_create_group(Vec::new(), &create_test_tab(1, "https://github.com"), NOW);
        let moved = create_test_tab(1, "https://example.com");
        let second = assign_or_create_group(first.groups, &moved, NOW);

        assert!(second.inserted);
        assert_eq!(second.groups.len(), 2);

        let (synced, _) = crate::activity::sync_metadata(second.groups, &[moved]);
        let merged = crate::operations::merge_duplicate_domains(synced);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].tabs.len(), 1);
        assert_eq!(merged[0].tabs[0].url, "https://example.com");
    }

    #[test]
    fn test_assign_skips_unparseable_url() {
        let result = assign_or_create_group(Vec::new(), &create_test_tab(1, "chrome://newtab"), NOW);

        assert!(result.groups.is_empty());
        assert!(result.target.is_none());
        assert!(result.target_group().is_none());
    }

    #[test]
    fn test_create_initial_groups() {
        let tabs = vec![
            create_test_tab(1, "https://github.com/a"),
            create_test_tab(2, "https://www.example.com"),
            create_test_tab(3, "https://github.com/b"),
            create_test_tab(4, "chrome://settings"),
        ];

        let groups = create_initial_groups(&tabs, NOW);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Github");
        assert_eq!(groups[0].color, PALETTE[0]);
        assert_eq!(groups[0].tabs.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[1].name, "Example");
        assert_eq!(groups[1].color, PALETTE[1]);
        assert_ne!(groups[0].id, groups[1].id);
    }

    #[test]
    fn test_cycled_color_wraps() {
        assert_eq!(cycled_color(0), PALETTE[0]);
        assert_eq!(cycled_color(6), PALETTE[0]);
        assert_eq!(cycled_color(7), PALETTE[1]);
    }
}
