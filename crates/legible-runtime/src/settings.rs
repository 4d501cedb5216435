#![forbid(unsafe_code)]

//! Per-site settings and their JSON export format.
//!
//! The export document is what hosts offer as a download:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "exportDate": "2025-10-14T09:30:00.000Z",
//!   "siteSettings": { "example.com": { "autoSave": true, "lastUpdated": 1760434200000 } },
//!   "preferences": { "darkMode": true }
//! }
//! ```
//!
//! Import is lenient about missing sections and strict about malformed JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version string written into every export.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Settings stored for one domain.
///
/// Keys other than `autoSave` and `lastUpdated` are kept as-is so documents
/// written by newer hosts survive an import/export cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SiteSettings {
    /// Overlay every field present in `patch`.
    pub fn merge(&mut self, patch: SiteSettings) {
        if patch.auto_save.is_some() {
            self.auto_save = patch.auto_save;
        }
        if patch.last_updated.is_some() {
            self.last_updated = patch.last_updated;
        }
        self.extra.extend(patch.extra);
    }

    #[must_use]
    pub fn auto_save_enabled(&self) -> bool {
        self.auto_save.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// The export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsExport {
    pub version: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub export_date: String,
    pub site_settings: BTreeMap<String, SiteSettings>,
    pub preferences: Preferences,
}

/// Shape accepted on import; every section may be missing or null.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportDocument {
    #[serde(default)]
    site_settings: Option<BTreeMap<String, SiteSettings>>,
    #[serde(default)]
    preferences: Option<ImportPreferences>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportPreferences {
    #[serde(default)]
    dark_mode: Option<bool>,
}

/// Errors from settings import and file I/O.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings document must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl SettingsError {
    /// Notification text for the host.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Error importing settings"
    }
}

/// In-memory settings state: per-domain site settings plus preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsStore {
    site_settings: BTreeMap<String, SiteSettings>,
    dark_mode: bool,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            site_settings: BTreeMap::new(),
            dark_mode: true,
        }
    }
}

impl SettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn site(&self, domain: &str) -> Option<&SiteSettings> {
        self.site_settings.get(domain)
    }

    #[must_use]
    pub fn sites(&self) -> &BTreeMap<String, SiteSettings> {
        &self.site_settings
    }

    /// Merge `patch` into the settings for `domain` and stamp `lastUpdated`.
    pub fn save_site_settings(&mut self, domain: &str, patch: SiteSettings, now_ms: u64) {
        let entry = self.site_settings.entry(domain.to_owned()).or_default();
        entry.merge(patch);
        entry.last_updated = Some(now_ms);
        tracing::debug!(target: "legible.settings", domain, "site settings saved");
    }

    pub fn set_auto_save(&mut self, domain: &str, auto_save: bool, now_ms: u64) {
        let patch = SiteSettings {
            auto_save: Some(auto_save),
            ..SiteSettings::default()
        };
        self.save_site_settings(domain, patch, now_ms);
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Flip the theme preference and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Build the export document stamped at `now_ms`.
    #[must_use]
    pub fn export(&self, now_ms: u64) -> SettingsExport {
        SettingsExport {
            version: EXPORT_VERSION.to_owned(),
            export_date: iso_timestamp(now_ms),
            site_settings: self.site_settings.clone(),
            preferences: Preferences {
                dark_mode: self.dark_mode,
            },
        }
    }

    /// The export document as pretty-printed JSON.
    pub fn to_json_pretty(&self, now_ms: u64) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(&self.export(now_ms))?)
    }

    /// Replace the current state with an imported document.
    ///
    /// A missing `siteSettings` imports as empty and a missing
    /// `preferences.darkMode` as `true`. Anything but a JSON object at the
    /// top level is rejected. On error the store is unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<(), SettingsError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(SettingsError::NotAnObject(json_kind(&value)));
        }
        let doc: ImportDocument = serde_json::from_value(value)?;
        self.site_settings = doc.site_settings.unwrap_or_default();
        self.dark_mode = doc.preferences.and_then(|p| p.dark_mode).unwrap_or(true);
        tracing::debug!(
            target: "legible.settings",
            sites = self.site_settings.len(),
            dark_mode = self.dark_mode,
            "settings imported"
        );
        Ok(())
    }

    /// Write the export document into `dir` under [`export_file_name`].
    pub fn write_export(&self, dir: impl AsRef<Path>, now_ms: u64) -> Result<PathBuf, SettingsError> {
        let path = dir.as_ref().join(export_file_name(now_ms));
        std::fs::write(&path, self.to_json_pretty(now_ms)?)?;
        Ok(path)
    }

    /// Import from a file on disk.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.import_json(&content)
    }
}

/// Download file name for an export made at `now_ms`.
#[must_use]
pub fn export_file_name(now_ms: u64) -> String {
    format!("accessibility-settings-{now_ms}.json")
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn iso_timestamp(now_ms: u64) -> String {
    let date: DateTime<Utc> = i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
