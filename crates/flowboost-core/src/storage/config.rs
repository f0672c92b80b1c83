//! TOML-based user preferences.
//!
//! Stores:
//! - Focus/break session durations
//! - Notification preferences (sound, visual, reminders)
//! - Learning profile (learning style, breakdown depth, categories,
//!   per-time-of-day energy)
//! - API base URL
//!
//! Preferences are stored at `~/.config/flowboost/config.toml`, loaded at
//! session start and written only through an explicit save. The remote
//! preferences endpoint exchanges the same fields as a camelCase JSON
//! object ([`PreferencesPayload`]); pull/push overwrite whole objects, there
//! is no partial patch.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::task::EnergyLevel;

pub const FOCUS_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;
pub const BREAK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

/// Session duration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub visual: bool,
    #[serde(default = "default_true")]
    pub reminders: bool,
}

/// How the user prefers material presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    #[serde(rename = "Reading/Writing")]
    ReadingWriting,
}

impl Default for LearningStyle {
    fn default() -> Self {
        LearningStyle::Visual
    }
}

/// How granular suggested breakdowns should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakdownDepth {
    Minimal,
    Moderate,
    Detailed,
}

impl Default for BreakdownDepth {
    fn default() -> Self {
        BreakdownDepth::Moderate
    }
}

/// Self-reported energy level per time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnergyPatterns {
    #[serde(default)]
    pub morning: EnergyLevel,
    #[serde(default)]
    pub afternoon: EnergyLevel,
    #[serde(default)]
    pub evening: EnergyLevel,
}

/// Learning profile configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub learning_style: LearningStyle,
    #[serde(default)]
    pub breakdown_depth: BreakdownDepth,
    #[serde(default = "default_categories")]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub energy: EnergyPatterns,
}

/// API endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// User preferences.
///
/// Serialized to/from TOML at `~/.config/flowboost/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

// Default functions
fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_true() -> bool {
    true
}
fn default_categories() -> Vec<String> {
    vec!["Work".into(), "Personal".into(), "Learning".into(), "Health".into()]
}
fn default_base_url() -> String {
    "https://flowboost.app".into()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            sound: true,
            visual: true,
            reminders: true,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            learning_style: LearningStyle::default(),
            breakdown_depth: BreakdownDepth::default(),
            preferred_categories: default_categories(),
            energy: EnergyPatterns::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            notifications: NotificationsConfig::default(),
            profile: ProfileConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/flowboost"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Check duration bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FOCUS_MINUTES_RANGE.contains(&self.session.focus_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "session.focus_minutes".into(),
                message: format!(
                    "must be between {} and {} minutes",
                    FOCUS_MINUTES_RANGE.start(),
                    FOCUS_MINUTES_RANGE.end()
                ),
            });
        }
        if !BREAK_MINUTES_RANGE.contains(&self.session.break_minutes) {
            return Err(ConfigError::InvalidValue {
                key: "session.break_minutes".into(),
                message: format!(
                    "must be between {} and {} minutes",
                    BREAK_MINUTES_RANGE.start(),
                    BREAK_MINUTES_RANGE.end()
                ),
            });
        }
        Ok(())
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, holds
    /// out-of-range durations, or the default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a preference as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a preference by key and persist. Unknown keys and out-of-range
    /// durations are rejected; the in-memory value is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        updated.save()?;
        *self = updated;
        Ok(())
    }

    /// Project into the wire shape the preferences endpoint exchanges.
    pub fn to_payload(&self) -> PreferencesPayload {
        PreferencesPayload {
            learning_style: self.profile.learning_style,
            breakdown_depth: self.profile.breakdown_depth,
            focus_session_duration: self.session.focus_minutes,
            break_duration: self.session.break_minutes,
            preferred_categories: self.profile.preferred_categories.clone(),
            energy_patterns: self.profile.energy,
            notification_preferences: NotificationFlags {
                sound: self.notifications.sound,
                visual: self.notifications.visual,
                reminders: self.notifications.reminders,
            },
        }
    }

    /// Overwrite every synced field from the wire shape. The API base URL is
    /// local-only and untouched.
    pub fn apply_payload(&mut self, payload: &PreferencesPayload) {
        self.profile.learning_style = payload.learning_style;
        self.profile.breakdown_depth = payload.breakdown_depth;
        self.session.focus_minutes = payload.focus_session_duration;
        self.session.break_minutes = payload.break_duration;
        self.profile.preferred_categories = payload.preferred_categories.clone();
        self.profile.energy = payload.energy_patterns;
        self.notifications.sound = payload.notification_preferences.sound;
        self.notifications.visual = payload.notification_preferences.visual;
        self.notifications.reminders = payload.notification_preferences.reminders;
    }
}

/// Notification flags as the endpoint spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFlags {
    pub sound: bool,
    pub visual: bool,
    pub reminders: bool,
}

/// The preferences object exchanged with the hosted endpoint. Whole-object
/// semantics: a save overwrites the server copy, a fetch overwrites local
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    pub learning_style: LearningStyle,
    pub breakdown_depth: BreakdownDepth,
    pub focus_session_duration: u32,
    pub break_duration: u32,
    pub preferred_categories: Vec<String>,
    pub energy_patterns: EnergyPatterns,
    pub notification_preferences: NotificationFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.focus_minutes, 25);
        assert_eq!(parsed.session.break_minutes, 5);
        assert!(parsed.notifications.sound);
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.focus_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("notifications.sound").as_deref(), Some("true"));
        assert_eq!(cfg.get("api.base_url").as_deref(), Some("https://flowboost.app"));
        assert!(cfg.get("session.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "session.focus_minutes", "45").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "session.focus_minutes").unwrap(),
            &serde_json::Value::Number(45.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.sound", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.sound").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "session.nonexistent", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn out_of_range_durations_fail_validation() {
        let mut cfg = Config::default();
        cfg.session.focus_minutes = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        cfg.session.focus_minutes = 61;
        assert!(cfg.validate().is_err());

        cfg.session.focus_minutes = 60;
        cfg.session.break_minutes = 31;
        assert!(cfg.validate().is_err());

        cfg.session.break_minutes = 30;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn payload_roundtrips_through_config() {
        let mut cfg = Config::default();
        cfg.session.focus_minutes = 50;
        cfg.profile.learning_style = LearningStyle::Kinesthetic;
        cfg.notifications.visual = false;

        let payload = cfg.to_payload();
        let mut other = Config::default();
        other.apply_payload(&payload);

        assert_eq!(other.session.focus_minutes, 50);
        assert_eq!(other.profile.learning_style, LearningStyle::Kinesthetic);
        assert!(!other.notifications.visual);
        assert_eq!(other.api.base_url, Config::default().api.base_url);
    }

    #[test]
    fn payload_uses_api_field_names() {
        let payload = Config::default().to_payload();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["focusSessionDuration"], 25);
        assert_eq!(json["breakDuration"], 5);
        assert_eq!(json["learningStyle"], "Visual");
        assert!(json["notificationPreferences"]["reminders"].as_bool().unwrap());
        assert!(json["energyPatterns"]["morning"].is_string());
    }

    #[test]
    fn reading_writing_style_uses_slash_name() {
        let json = serde_json::to_string(&LearningStyle::ReadingWriting).unwrap();
        assert_eq!(json, "\"Reading/Writing\"");
    }
}
