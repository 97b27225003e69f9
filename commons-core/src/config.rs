//! Configuration management
//!
//! Settings live in a `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "demoMode": false },
//!   "bootstrap": { "adminPhoneNumber": "18688835658", "adminPassword": "895600" },
//!   "suggestion": { "endpoint": "https://...", "timeoutSecs": 30 }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Documented recovery credential the portal is seeded with
const DEFAULT_ADMIN_PHONE: &str = "18688835658";
const DEFAULT_ADMIN_PASSWORD: &str = "895600";

fn default_timeout_secs() -> u64 {
    30
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    bootstrap: BootstrapSettings,
    #[serde(default)]
    suggestion: SuggestionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BootstrapSettings {
    admin_phone_number: String,
    admin_password: String,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            admin_phone_number: DEFAULT_ADMIN_PHONE.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionSettings {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

/// Portal configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    /// Bootstrap super admin login, seeded on first use
    pub admin_phone_number: String,
    pub admin_password: String,
    /// Drafting endpoint; suggestion falls back to the fixed draft when unset
    pub suggestion_endpoint: Option<String>,
    pub suggestion_timeout_secs: u64,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        let raw = SettingsFile::default();
        Self {
            demo_mode: false,
            admin_phone_number: raw.bootstrap.admin_phone_number.clone(),
            admin_password: raw.bootstrap.admin_password.clone(),
            suggestion_endpoint: None,
            suggestion_timeout_secs: default_timeout_secs(),
            _raw_settings: raw,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// Demo mode can be enabled via the settings file or the
    /// COMMONS_DEMO_MODE environment variable (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let demo_mode = match std::env::var("COMMONS_DEMO_MODE").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.demo_mode,
        };

        Ok(Self {
            demo_mode,
            admin_phone_number: raw.bootstrap.admin_phone_number.clone(),
            admin_password: raw.bootstrap.admin_password.clone(),
            suggestion_endpoint: raw.suggestion.endpoint.clone(),
            suggestion_timeout_secs: raw.suggestion.timeout_secs,
            _raw_settings: raw,
        })
    }

    /// Save config to the data directory
    /// Preserves settings this view doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.app.demo_mode = self.demo_mode;
        settings.suggestion.endpoint = self.suggestion_endpoint.clone();
        settings.suggestion.timeout_secs = self.suggestion_timeout_secs;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Enable demo mode
    pub fn enable_demo_mode(&mut self) {
        self.demo_mode = true;
    }

    /// Disable demo mode
    pub fn disable_demo_mode(&mut self) {
        self.demo_mode = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(!config.demo_mode);
        assert_eq!(config.admin_phone_number, DEFAULT_ADMIN_PHONE);
        assert!(config.suggestion_endpoint.is_none());
    }

    #[test]
    fn test_load_reads_settings_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
                "app": { "demoMode": true },
                "bootstrap": { "adminPhoneNumber": "100", "adminPassword": "secret" },
                "suggestion": { "endpoint": "http://localhost:9000/draft", "timeoutSecs": 5 }
            }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.demo_mode);
        assert_eq!(config.admin_phone_number, "100");
        assert_eq!(
            config.suggestion_endpoint.as_deref(),
            Some("http://localhost:9000/draft")
        );
        assert_eq!(config.suggestion_timeout_secs, 5);
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempdir().unwrap();
        let mut config = Config::load(dir.path()).unwrap();
        config.enable_demo_mode();
        config.save(dir.path()).unwrap();

        let reloaded = Config::load(dir.path()).unwrap();
        assert!(reloaded.demo_mode);
    }
}
