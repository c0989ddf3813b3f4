//! Configuration management
//!
//! Settings live in `settings.json` inside the gastos directory:
//! ```json
//! {
//!   "app": { "demoMode": false },
//!   "sheet": { "spreadsheetId": "...", "range": "2025!A1:Z" },
//!   "columnPolicy": "headers",
//!   "auth": { "required": true, "allowedEmail": "me@example.com" }
//! }
//! ```
//!
//! Environment variables override the file. Secrets (the service-account
//! blob and the identity provider key) are only ever read from the
//! environment and never written back.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::result::Error;
use crate::domain::{AllowList, ColumnPolicy};

/// Range read when neither settings nor `SHEET_RANGE` provide one
pub const DEFAULT_RANGE: &str = "2025!A1:Z";

/// Web API key used to verify identity tokens
pub const IDENTITY_API_KEY_ENV: &str = "FIREBASE_API_KEY";

/// `Sheet!A1:Z`, `'My Sheet'!B2:D`, `A:Z`, or a bare sheet name
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:'[^']+'|[^!':]+)!)?(?:[A-Za-z]{1,3}[0-9]*(?::[A-Za-z]{1,3}[0-9]*)?|[0-9]+:[0-9]+)$|^(?:'[^']+'|[^!':]+)$",
    )
    .expect("range pattern is valid")
});

/// Check that `range` looks like an A1-notation range
pub fn validate_range(range: &str) -> crate::domain::result::Result<()> {
    let range = range.trim();
    if range.is_empty() || !RANGE_RE.is_match(range) {
        return Err(Error::validation(format!("Invalid A1 range: {:?}", range)));
    }
    Ok(())
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    sheet: SheetSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column_policy: Option<PolicySetting>,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    demo_mode: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSettings {
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_email: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            required: true,
            allowed_uid: None,
            allowed_email: None,
            other: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Column policy as written in settings: a preset name or a full policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicySetting {
    Preset(String),
    Custom(ColumnPolicy),
}

impl PolicySetting {
    pub fn resolve(&self) -> Result<ColumnPolicy> {
        match self {
            PolicySetting::Preset(name) => ColumnPolicy::preset(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown column policy preset: {}. Available: headers, letters", name)),
            PolicySetting::Custom(policy) => Ok(policy.clone()),
        }
    }
}

/// gastos configuration (resolved view of settings + environment)
#[derive(Debug, Clone)]
pub struct Config {
    pub demo_mode: bool,
    pub spreadsheet_id: Option<String>,
    pub range: String,
    pub column_policy: ColumnPolicy,
    pub auth_required: bool,
    pub allow_list: AllowList,
    // Keep the raw settings for preservation when saving
    pub(crate) raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_mode: false,
            spreadsheet_id: None,
            range: DEFAULT_RANGE.to_string(),
            column_policy: ColumnPolicy::default(),
            auth_required: true,
            allow_list: AllowList::default(),
            raw_settings: SettingsFile::default(),
        }
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(name: &str) -> Option<bool> {
    match std::env::var(name).ok().as_deref() {
        Some("true" | "1" | "yes" | "TRUE" | "YES") => Some(true),
        Some("false" | "0" | "no" | "FALSE" | "NO") => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load config from the gastos directory
    ///
    /// Overrides, in order of precedence over settings.json:
    /// `GASTOS_DEMO_MODE`, `SHEET_ID`, `SHEET_RANGE`, `ALLOWED_UID`,
    /// `ALLOWED_EMAIL`.
    pub fn load(gastos_dir: &Path) -> Result<Self> {
        let settings_path = gastos_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content)?
        } else {
            SettingsFile::default()
        };

        let column_policy = match &raw.column_policy {
            Some(setting) => setting.resolve()?,
            None => ColumnPolicy::default(),
        };

        let range = env_nonempty("SHEET_RANGE")
            .or_else(|| raw.sheet.range.clone())
            .unwrap_or_else(|| DEFAULT_RANGE.to_string());
        validate_range(&range)?;

        Ok(Self {
            demo_mode: env_flag("GASTOS_DEMO_MODE").unwrap_or(raw.app.demo_mode),
            spreadsheet_id: env_nonempty("SHEET_ID").or_else(|| raw.sheet.spreadsheet_id.clone()),
            range,
            column_policy,
            auth_required: raw.auth.required,
            allow_list: AllowList {
                uid: env_nonempty("ALLOWED_UID").or_else(|| raw.auth.allowed_uid.clone()),
                email: env_nonempty("ALLOWED_EMAIL").or_else(|| raw.auth.allowed_email.clone()),
            },
            raw_settings: raw,
        })
    }

    /// Save config to the gastos directory
    ///
    /// Only the demo flag is managed from the CLI; everything else in the
    /// file, including keys this version does not know, is preserved.
    pub fn save(&self, gastos_dir: &Path) -> Result<()> {
        let settings_path = gastos_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_else(|_| self.raw_settings.clone())
        } else {
            self.raw_settings.clone()
        };

        settings.app.demo_mode = self.demo_mode;

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

    /// Identity provider web API key, if configured
    pub fn identity_api_key(&self) -> Option<String> {
        env_nonempty(IDENTITY_API_KEY_ENV)
    }
}
