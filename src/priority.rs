/// Priority and staleness of tab records
use crate::config::{ACTIVE_HOURS, HIGH_VISIT_COUNT, MS_PER_HOUR, STALE_HOURS};
use crate::tab_data::{Priority, TabRecord};

pub fn hours_since(last_visited: f64, now: f64) -> f64 {
    (now - last_visited) / MS_PER_HOUR
}

pub fn is_stale(record: &TabRecord, now: f64) -> bool {
    hours_since(record.last_visited, now) > STALE_HOURS
}

/// Classify a record; visit frequency wins over recency.
pub fn classify(record: &TabRecord, now: f64) -> Priority {
    let hours = hours_since(record.last_visited, now);

    if record.visit_count > HIGH_VISIT_COUNT {
        Priority::High
    } else if hours < ACTIVE_HOURS {
        Priority::Active
    } else if hours > STALE_HOURS {
        Priority::Stale
    } else {
        Priority::Normal
    }
}

/// Badge icon shown next to a priority
pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "fa-fire",
        Priority::Active => "fa-circle",
        Priority::Stale => "fa-clock",
        Priority::Normal => "fa-minus",
    }
}

/// Short relative label like "5m ago"
pub fn time_since_label(last_visited: f64, now: f64) -> String {
    let seconds = ((now - last_visited) / 1000.0).floor() as i64;

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}
