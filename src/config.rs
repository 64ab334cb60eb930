use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_PATH_ENV: &str = "PHQ_VOICE_CONFIG";

/// Runtime settings for the driver and its adapters. Nothing here changes
/// how the dialogue itself behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred synthesis voice. Falls back to the system default when absent
    /// or not installed.
    pub voice: Option<String>,
    /// External text-to-speech command (`say` on macOS, `espeak` etc. elsewhere).
    pub speech_command: String,
    /// Capacity of the driver's inbound event channel.
    pub event_capacity: usize,
    /// Stop the driver once the final assessment has been spoken.
    pub exit_on_complete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            voice: Some("Samantha".to_string()),
            speech_command: "say".to_string(),
            event_capacity: 64,
            exit_on_complete: true,
        }
    }
}

impl Config {
    /// Defaults, then the JSON file named by `PHQ_VOICE_CONFIG` (if set), then
    /// `PHQ_*` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PHQ_VOICE_NAME`, `PHQ_SPEECH_COMMAND`, `PHQ_EVENT_CAPACITY`
    /// and `PHQ_EXIT_ON_COMPLETE` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(voice) = lookup("PHQ_VOICE_NAME") {
            // Empty means "use the system default voice".
            self.voice = Some(voice).filter(|v| !v.trim().is_empty());
        }
        if let Some(command) = lookup("PHQ_SPEECH_COMMAND") {
            self.speech_command = command;
        }
        if let Some(capacity) = lookup("PHQ_EVENT_CAPACITY") {
            self.event_capacity = capacity
                .parse()
                .map_err(|_| Error::Config(format!("PHQ_EVENT_CAPACITY is not a number: {capacity}")))?;
        }
        if let Some(flag) = lookup("PHQ_EXIT_ON_COMPLETE") {
            self.exit_on_complete = parse_flag(&flag)
                .ok_or_else(|| Error::Config(format!("PHQ_EXIT_ON_COMPLETE is not a boolean: {flag}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(Error::Config("event_capacity must be at least 1".to_string()));
        }
        if self.speech_command.trim().is_empty() {
            return Err(Error::Config("speech_command must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
