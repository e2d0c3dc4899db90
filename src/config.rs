/// Engine constants and the persisted settings record
use serde::{Deserialize, Serialize};

/// Group colors, in the order new groups cycle through them
pub const PALETTE: [&str; 6] = [
    "#8b5a3c", "#6d4226", "#a0826d", "#5c3d2e", "#b8956a", "#8b6f47",
];

/// A tab visited more often than this is always `high` priority
pub const HIGH_VISIT_COUNT: u32 = 50;

/// Tabs visited within this many hours are `active`
pub const ACTIVE_HOURS: f64 = 1.0;

/// Tabs unvisited for more than this many hours are stale
pub const STALE_HOURS: f64 = 24.0;

/// More ungrouped tabs than this triggers the auto-group suggestion
pub const AUTO_GROUP_THRESHOLD: usize = 5;

/// Interval of the housekeeping alarm
pub const HOUSEKEEPING_PERIOD_MINUTES: u32 = 60;
pub const HOUSEKEEPING_ALARM: &str = "cleanup";

pub const ARCHIVED_GROUP_NAME: &str = "Archived";
pub const ARCHIVED_GROUP_COLOR: &str = "#8b6f47";
pub const ARCHIVED_GROUP_ICON: &str = "fa-archive";

pub const NEW_GROUP_NAME: &str = "New Group";
pub const DEFAULT_GROUP_ICON: &str = "fa-folder";

/// Favicon token used when the browser reports none
pub const DEFAULT_FAVICON: &str = "fas fa-globe";

pub const GROUPS_KEY: &str = "groups";
pub const SETTINGS_KEY: &str = "settings";

pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Global configuration, one instance in storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Populate groups from the open tabs when the popup finds none
    pub auto_group: bool,
    /// Show the suggestions panel
    pub ai_enabled: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_group: true,
            ai_enabled: true,
            theme: "coffee-brown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_group);
        assert!(settings.ai_enabled);
        assert_eq!(settings.theme, "coffee-brown");
    }

    #[test]
    fn test_settings_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"aiEnabled": false}"#).unwrap();
        assert!(settings.auto_group);
        assert!(!settings.ai_enabled);
        assert_eq!(settings.theme, "coffee-brown");
    }

    #[test]
    fn test_settings_wire_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["autoGroup"], true);
        assert_eq!(json["aiEnabled"], true);
        assert_eq!(json["theme"], "coffee-brown");
    }
}
