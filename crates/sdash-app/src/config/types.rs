//! Configuration types for the dashboard
//!
//! Defines `Settings` and its per-section sub-types. Every section is
//! optional in the file; missing keys take the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use sdash_core::Mode;

/// Global application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub download: DownloadSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Root URL; each mode lives under `{base_url}/{mode}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Periodic refresh of the active mode
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl RefreshSettings {
    /// Refresh period (minimum 1s)
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

fn default_interval_secs() -> u64 {
    30
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Mode shown on startup
    #[serde(default)]
    pub start_mode: Mode,

    /// Substitute flagged placeholder data when a mode fails to load
    #[serde(default = "default_true")]
    pub placeholder_on_failure: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            start_mode: Mode::default(),
            placeholder_on_failure: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Replication log lines shown in production mode
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,

    /// Seconds before a notification disappears
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            log_limit: default_log_limit(),
            notification_secs: default_notification_secs(),
        }
    }
}

impl UiSettings {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

fn default_log_limit() -> usize {
    10
}

fn default_notification_secs() -> u64 {
    5
}

/// Where downloaded files are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DownloadSettings {
    /// Target directory; `~/` is expanded. Defaults to the platform download dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl DownloadSettings {
    pub fn resolved_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => dirs::download_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.base_url, "http://localhost:8080");
        assert_eq!(settings.refresh.interval(), Duration::from_secs(30));
        assert_eq!(settings.behavior.start_mode, Mode::Simple);
        assert!(settings.behavior.placeholder_on_failure);
        assert_eq!(settings.ui.log_limit, 10);
        assert_eq!(settings.ui.notification_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_sections_take_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[behavior]
start_mode = "production"

[refresh]
interval_secs = 0
"#,
        )
        .unwrap();
        assert_eq!(settings.behavior.start_mode, Mode::Production);
        assert!(settings.behavior.placeholder_on_failure);
        assert_eq!(settings.refresh.interval(), Duration::from_secs(1));
        assert_eq!(settings.server.timeout_secs, 10);
    }

    #[test]
    fn test_download_dir_expands_home() {
        let settings = DownloadSettings {
            dir: Some(PathBuf::from("~/sdfbs")),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(settings.resolved_dir(), home.join("sdfbs"));
        }

        let absolute = DownloadSettings {
            dir: Some(PathBuf::from("/tmp/sdfbs")),
        };
        assert_eq!(absolute.resolved_dir(), PathBuf::from("/tmp/sdfbs"));
    }
}
