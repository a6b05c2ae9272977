use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the product store, the tracker and logging.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub store: StoreSettings,
    pub tracker: TrackerSettings,
    pub log: LogSettings,
}

/// Where the product store lives on disk.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreSettings {
    pub path: String,
}

/// Bounds of the range subscription identities are drawn from (inclusive).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TrackerSettings {
    pub id_min: u32,
    pub id_max: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub store: Option<PartialStoreSettings>,
    pub tracker: Option<PartialTrackerSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialTrackerSettings {
    pub id_min: Option<u32>,
    pub id_max: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreSettings {
                path: "products.json".to_string(),
            },
            tracker: TrackerSettings::default(),
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            id_min: 1,
            id_max: 1000,
        }
    }
}

impl PartialSettings {
    /// Fill every missing value from `default`.
    pub fn merge_over(self, default: Settings) -> Settings {
        Settings {
            store: StoreSettings {
                path: self
                    .store
                    .and_then(|s| s.path)
                    .unwrap_or(default.store.path),
            },
            tracker: TrackerSettings {
                id_min: self
                    .tracker
                    .as_ref()
                    .and_then(|t| t.id_min)
                    .unwrap_or(default.tracker.id_min),
                id_max: self
                    .tracker
                    .as_ref()
                    .and_then(|t| t.id_max)
                    .unwrap_or(default.tracker.id_max),
            },
            log: LogSettings {
                level: self
                    .log
                    .and_then(|l| l.level)
                    .unwrap_or(default.log.level),
            },
        }
    }
}
