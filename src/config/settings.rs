//! User settings for the expense manager
//!
//! Settings live in a flat JSON document next to the database. The key names
//! match the settings file written by earlier desktop releases, so an existing
//! `config.json` can be reused as-is.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

/// Models offered by the settings panel; any other name is accepted as free text
pub const MODEL_CHOICES: &[&str] = &["gemini-flash-latest", "gemini-pro"];

/// Allowed font size range (points)
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u8> = 8..=20;

/// Placeholder older releases stored when no logo was chosen
const NO_LOGO_PLACEHOLDER: &str = "No logo selected.";

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API key for the generative language assistant
    #[serde(rename = "GEMINI_API_KEY", default)]
    pub api_key: String,

    /// Model name used for assistant questions and dictation
    #[serde(rename = "GEMINI_MODEL", default = "default_model")]
    pub model: String,

    /// Preferred font size
    #[serde(rename = "FONT_SIZE", default = "default_font_size")]
    pub font_size: u8,

    /// Optional logo image shown in the sidebar header
    #[serde(rename = "LOGO_PATH", default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,

    /// Address used for email backups
    #[serde(rename = "BACKUP_EMAIL", default)]
    pub backup_email: String,

    /// Number of local database snapshots to keep
    #[serde(rename = "SNAPSHOT_RETENTION", default = "default_snapshot_retention")]
    pub snapshot_retention: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_font_size() -> u8 {
    12
}

fn default_snapshot_retention() -> u32 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            font_size: default_font_size(),
            logo_path: None,
            backup_email: String::new(),
            snapshot_retention: default_snapshot_retention(),
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is absent
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.normalize();

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        log::info!("Settings saved to {}", paths.settings_file().display());
        Ok(())
    }

    /// Check values that the settings form constrains
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(ExpenseError::Validation(format!(
                "Font size must be between {} and {}.",
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ExpenseError::Validation("Model name cannot be empty.".into()));
        }
        Ok(())
    }

    /// Whether an API key has been configured
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Display name of the configured logo (file name only)
    pub fn logo_name(&self) -> Option<String> {
        self.logo_path.as_ref().map(|path| {
            std::path::Path::new(path)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone())
        })
    }

    fn normalize(&mut self) {
        if matches!(self.logo_path.as_deref(), Some(p) if p.trim().is_empty() || p == NO_LOGO_PLACEHOLDER)
        {
            self.logo_path = None;
        }
        self.font_size = self
            .font_size
            .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
        if self.model.trim().is_empty() {
            self.model = default_model();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gemini-flash-latest");
        assert_eq!(settings.font_size, 12);
        assert!(settings.logo_path.is_none());
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            api_key: "secret".into(),
            model: "gemini-pro".into(),
            font_size: 16,
            logo_path: Some("/tmp/logo.png".into()),
            backup_email: "me@example.com".into(),
            snapshot_retention: 3,
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_legacy_document_with_missing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"GEMINI_API_KEY": "abc", "LOGO_PATH": "No logo selected."}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.api_key, "abc");
        assert_eq!(loaded.model, DEFAULT_MODEL);
        assert_eq!(loaded.font_size, 12);
        assert!(loaded.logo_path.is_none());
        assert!(loaded.backup_email.is_empty());
    }

    #[test]
    fn test_key_names_match_settings_document() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("GEMINI_API_KEY").is_some());
        assert!(json.get("GEMINI_MODEL").is_some());
        assert!(json.get("FONT_SIZE").is_some());
        assert!(json.get("BACKUP_EMAIL").is_some());
    }

    #[test]
    fn test_font_size_out_of_range_is_rejected() {
        let settings = Settings {
            font_size: 30,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_logo_name() {
        let settings = Settings {
            logo_path: Some("/home/me/pictures/me.png".into()),
            ..Settings::default()
        };
        assert_eq!(settings.logo_name().as_deref(), Some("me.png"));
    }
}
