//! Application settings document.
//!
//! Settings are stored next to progress but the progress tracker never reads
//! them. Every field defaults, so partial documents load cleanly.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Errors raised when editing settings by key.
#[derive(Debug, thiserror::Error)]
pub enum SettingError {
    /// No setting with this key
    #[error("unknown setting: {0}")]
    UnknownKey(String),

    /// Value does not fit the setting
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting key
        key: String,
        /// Rejected value
        value: String,
    },
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// Color theme
    pub theme: Theme,

    /// Interface language
    pub language: Language,

    /// Pronounce words automatically
    pub auto_play: bool,

    /// Show translations on cards
    pub show_translations: bool,

    /// Send a daily study reminder
    pub daily_reminder: bool,

    /// Reminder time, `HH:MM`
    pub reminder_time: String,

    /// Play sound effects
    pub sound_enabled: bool,

    /// Play animations
    pub animations_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: Language::En,
            auto_play: true,
            show_translations: true,
            daily_reminder: true,
            reminder_time: "09:00".to_string(),
            sound_enabled: true,
            animations_enabled: true,
        }
    }
}

impl AppSettings {
    /// Keys accepted by [`AppSettings::set`].
    pub const KEYS: [&'static str; 8] = [
        "theme",
        "language",
        "autoPlay",
        "showTranslations",
        "dailyReminder",
        "reminderTime",
        "soundEnabled",
        "animationsEnabled",
    ];

    /// Update one setting from its serialized key and a string value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingError> {
        let invalid = || SettingError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "theme" => self.theme = Theme::parse(value).ok_or_else(invalid)?,
            "language" => self.language = Language::parse(value).ok_or_else(invalid)?,
            "autoPlay" => self.auto_play = parse_bool(value).ok_or_else(invalid)?,
            "showTranslations" => self.show_translations = parse_bool(value).ok_or_else(invalid)?,
            "dailyReminder" => self.daily_reminder = parse_bool(value).ok_or_else(invalid)?,
            "reminderTime" => {
                NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;
                self.reminder_time = value.to_string();
            }
            "soundEnabled" => self.sound_enabled = parse_bool(value).ok_or_else(invalid)?,
            "animationsEnabled" => self.animations_enabled = parse_bool(value).ok_or_else(invalid)?,
            _ => return Err(SettingError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
    /// Follow the system
    Auto,
}

impl Theme {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// English
    #[default]
    #[serde(rename = "en")]
    En,
    /// Simplified Chinese
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// Traditional Chinese
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhCn => "zh-CN",
            Language::ZhTw => "zh-TW",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "en" => Some(Language::En),
            "zh-CN" => Some(Language::ZhCn),
            "zh-TW" => Some(Language::ZhTw),
            _ => None,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme":"dark","language":"zh-TW"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, Language::ZhTw);
        assert!(settings.auto_play);
        assert_eq!(settings.reminder_time, "09:00");
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = AppSettings::default();
        settings.set("theme", "auto").unwrap();
        settings.set("soundEnabled", "off").unwrap();
        settings.set("reminderTime", "21:30").unwrap();

        assert_eq!(settings.theme, Theme::Auto);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.reminder_time, "21:30");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut settings = AppSettings::default();
        assert!(matches!(settings.set("volume", "10"), Err(SettingError::UnknownKey(_))));
        assert!(matches!(settings.set("reminderTime", "25:00"), Err(SettingError::InvalidValue { .. })));
        assert!(matches!(settings.set("language", "fr"), Err(SettingError::InvalidValue { .. })));
        assert_eq!(settings, AppSettings::default());
    }
}
