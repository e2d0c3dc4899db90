/// Bulk transformations over the group collection: merge, archive, auto-group.
///
/// Each takes the groups by value and returns the new collection. None of
/// them leaves a group without tabs.
use std::collections::{HashMap, HashSet};

use crate::config::{ARCHIVED_GROUP_COLOR, ARCHIVED_GROUP_ICON, ARCHIVED_GROUP_NAME, DEFAULT_GROUP_ICON, NEW_GROUP_NAME};
use crate::domain::domain_key;
use crate::grouping::{bucket_by_domain, cycled_color, domain_group, find_domain_group, new_group_id, random_color};
use crate::priority::is_stale;
use crate::tab_data::{Group, GroupTheme, TabInfo, TabRecord};

pub fn prune_empty(mut groups: Vec<Group>) -> Vec<Group> {
    groups.retain(|g| !g.tabs.is_empty());
    groups
}

pub fn is_archive(group: &Group) -> bool {
    group.name == ARCHIVED_GROUP_NAME
}

fn archived_group() -> Group {
    Group {
        id: new_group_id(),
        name: ARCHIVED_GROUP_NAME.to_string(),
        color: ARCHIVED_GROUP_COLOR.to_string(),
        tabs: Vec::new(),
        collapsed: true,
        theme: GroupTheme::Gradient,
        icon: ARCHIVED_GROUP_ICON.to_string(),
    }
}

/// Domains owned by more than one group, with the owners in encounter order
pub fn duplicate_domains(groups: &[Group]) -> Vec<(String, Vec<usize>)> {
    let mut owners: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, group) in groups.iter().enumerate() {
        for tab in &group.tabs {
            let Some(domain) = domain_key(&tab.url) else {
                continue;
            };
            match positions.get(&domain) {
                Some(&i) => {
                    if !owners[i].1.contains(&index) {
                        owners[i].1.push(index);
                    }
                }
                None => {
                    positions.insert(domain.clone(), owners.len());
                    owners.push((domain, vec![index]));
                }
            }
        }
    }

    owners.retain(|(_, groups)| groups.len() > 1);
    owners
}

/// Collect every domain into the first group that holds it
pub fn merge_duplicate_domains(mut groups: Vec<Group>) -> Vec<Group> {
    // Moving one domain's records never changes which groups own another domain.
    for (domain, owners) in duplicate_domains(&groups) {
        let survivor = owners[0];

        for &source in &owners[1..] {
            let (moved, kept): (Vec<TabRecord>, Vec<TabRecord>) = std::mem::take(&mut groups[source].tabs)
                .into_iter()
                .partition(|t| domain_key(&t.url).as_deref() == Some(domain.as_str()));
            groups[source].tabs = kept;

            let target = &mut groups[survivor];
            for record in moved {
                if !target.contains_tab(record.id) {
                    target.tabs.push(record);
                }
            }
        }

        log::debug!("Merged {} groups sharing {}", owners.len(), domain);
    }

    // A tab id already held by an earlier group keeps only that first record.
    let mut seen = HashSet::new();
    for group in &mut groups {
        group.tabs.retain(|t| seen.insert(t.id));
    }

    prune_empty(groups)
}

/// Move every stale tab into the "Archived" group
pub fn archive_stale_tabs(mut groups: Vec<Group>, now: f64) -> Vec<Group> {
    let archive = match groups.iter().position(is_archive) {
        Some(index) => index,
        None => {
            groups.push(archived_group());
            groups.len() - 1
        }
    };

    let mut stale = Vec::new();
    for (index, group) in groups.iter_mut().enumerate() {
        if index == archive {
            continue;
        }
        let (old, fresh): (Vec<TabRecord>, Vec<TabRecord>) =
            std::mem::take(&mut group.tabs).into_iter().partition(|t| is_stale(t, now));
        group.tabs = fresh;
        stale.extend(old);
    }
    groups[archive].tabs.extend(stale);

    prune_empty(groups)
}

/// Give every open tab that no group holds a group for its domain
pub fn auto_group_tabs(live_tabs: &[TabInfo], mut groups: Vec<Group>, now: f64) -> Vec<Group> {
    let grouped: HashSet<i32> = groups.iter().flat_map(|g| g.tabs.iter().map(|t| t.id)).collect();
    let mut seen = HashSet::new();
    let ungrouped = live_tabs
        .iter()
        .filter(|t| !grouped.contains(&t.id) && seen.insert(t.id));

    let mut created = 0;
    for (domain, tabs) in bucket_by_domain(ungrouped) {
        let records = tabs.iter().map(|t| TabRecord::from_live(t, now));

        match find_domain_group(&groups, &domain) {
            Some(index) => groups[index].tabs.extend(records),
            None => {
                let mut group = domain_group(&domain, cycled_color(created));
                group.tabs = records.collect();
                groups.push(group);
                created += 1;
            }
        }
    }

    prune_empty(groups)
}

/// Append an empty user-created group. It lives until the next transformation.
pub fn new_group(mut groups: Vec<Group>) -> Vec<Group> {
    groups.push(Group {
        id: new_group_id(),
        name: NEW_GROUP_NAME.to_string(),
        color: random_color().to_string(),
        tabs: Vec::new(),
        collapsed: false,
        theme: GroupTheme::Gradient,
        icon: DEFAULT_GROUP_ICON.to_string(),
    });
    groups
}

/// Forget a group. The browser tabs stay open.
pub fn delete_group(mut groups: Vec<Group>, group_id: &str) -> (Vec<Group>, bool) {
    let before = groups.len();
    groups.retain(|g| g.id != group_id);
    let changed = groups.len() < before;
    (groups, changed)
}

pub fn toggle_collapsed(mut groups: Vec<Group>, group_id: &str) -> (Vec<Group>, bool) {
    let changed = groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .map(|group| {
            group.collapsed = !group.collapsed;
        })
        .is_some();
    (groups, changed)
}
