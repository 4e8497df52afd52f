// ─── Configuration ───
// Persistent launcher settings, stored as JSON under the platform data
// directory. Unknown or missing fields fall back to defaults so old config
// files keep working across upgrades.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{LauncherError, LauncherResult};

pub const APP_DIR_NAME: &str = "PurrLauncher";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub java_downloaded: bool,
    pub java_path: String,
    pub username: String,
    pub uuid: String,
    pub debug: bool,
    /// JVM heap cap, e.g. `4G` or `2048M`. Empty means no `-Xmx` flag.
    pub max_ram: String,
    pub pack_url: String,
    pub pack_manifest_url: String,
    pub pack_version: String,
    pub log_file: String,
    pub api_url: String,
    pub auth_token: String,
    /// Version descriptor id to launch.
    pub version: String,
    pub last_synced: Option<DateTime<Utc>>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            java_downloaded: false,
            java_path: String::new(),
            username: "Player".to_string(),
            uuid: String::new(),
            debug: false,
            max_ram: "4G".to_string(),
            pack_url: String::new(),
            pack_manifest_url: String::new(),
            pack_version: String::new(),
            log_file: "launcher.log".to_string(),
            api_url: String::new(),
            auth_token: String::new(),
            version: "Forge 1.20.1".to_string(),
            last_synced: None,
        }
    }
}

impl LauncherConfig {
    /// Load the config at `path`, or defaults when the file is absent or
    /// unreadable. A corrupt file is reported but never blocks startup.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config at {:?} is corrupt, using defaults: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> LauncherResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LauncherError::io(parent, e))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|e| LauncherError::io(path, e))
    }
}

/// The launcher's data directory under the platform data root.
pub fn data_dir() -> LauncherResult<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| LauncherError::Other("platform data directory unavailable".to_string()))
}

pub fn config_path() -> LauncherResult<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

/// Validate a `max_ram` value: `<n>G` with 1..=32, or `<n>M` with
/// 512..=32768.
pub fn is_valid_ram_value(value: &str) -> bool {
    let Some(unit) = value.chars().last() else {
        return false;
    };
    let digits = &value[..value.len() - unit.len_utf8()];
    let Ok(amount) = digits.parse::<u32>() else {
        return false;
    };

    match unit {
        'G' => (1..=32).contains(&amount),
        'M' => (512..=32768).contains(&amount),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("config-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_apply_for_missing_and_partial_files() {
        let dir = scratch("defaults");

        let config = LauncherConfig::load_or_default(&dir.join("absent.json"));
        assert_eq!(config.version, "Forge 1.20.1");
        assert_eq!(config.max_ram, "4G");

        let partial = dir.join("partial.json");
        std::fs::write(&partial, r#"{"username": "Notch", "debug": true}"#).unwrap();
        let config = LauncherConfig::load_or_default(&partial);
        assert_eq!(config.username, "Notch");
        assert!(config.debug);
        assert_eq!(config.version, "Forge 1.20.1");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = scratch("corrupt");
        let path = dir.join("config.json");
        std::fs::write(&path, "{broken").unwrap();

        let config = LauncherConfig::load_or_default(&path);
        assert_eq!(config.username, "Player");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = scratch("roundtrip");
        let path = dir.join("nested").join("config.json");

        let mut config = LauncherConfig::default();
        config.username = "Alex".to_string();
        config.auth_token = "tok".to_string();
        config.last_synced = Some(Utc::now());
        config.save(&path).unwrap();

        let loaded = LauncherConfig::load_or_default(&path);
        assert_eq!(loaded.username, "Alex");
        assert_eq!(loaded.auth_token, "tok");
        assert!(loaded.last_synced.is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn ram_validation_enforces_unit_ranges() {
        assert!(is_valid_ram_value("1G"));
        assert!(is_valid_ram_value("32G"));
        assert!(is_valid_ram_value("512M"));
        assert!(is_valid_ram_value("32768M"));

        assert!(!is_valid_ram_value("0G"));
        assert!(!is_valid_ram_value("33G"));
        assert!(!is_valid_ram_value("511M"));
        assert!(!is_valid_ram_value("32769M"));
        assert!(!is_valid_ram_value("4"));
        assert!(!is_valid_ram_value("G"));
        assert!(!is_valid_ram_value(""));
        assert!(!is_valid_ram_value("4g"));
    }
}
