use crate::autosave::DEFAULT_INTERVAL_MS;
use crate::error::{NotesError, Result};
use crate::speech::synthesis::{clamp_rate, DEFAULT_RATE};
use crate::store::{is_valid_key, DEFAULT_NOTES_KEY, DEFAULT_THEME_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by `voxnotes config KEY [VALUE]`.
pub const CONFIG_KEYS: &[&str] = &[
    "autosave-interval",
    "notes-key",
    "theme-key",
    "speech-command",
    "speech-rate",
    "voice",
    "dictation-lang",
];

/// Configuration for voxnotes, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotesConfig {
    /// Milliseconds between autosave ticks; 0 turns autosave off
    #[serde(default = "default_interval")]
    pub autosave_interval_ms: u64,

    /// Store key holding the note collection
    #[serde(default = "default_notes_key")]
    pub notes_key: String,

    /// Store key holding the theme preference
    #[serde(default = "default_theme_key")]
    pub theme_key: String,

    /// Speech program override (`say`, `espeak`, `espeak-ng`, ...)
    #[serde(default)]
    pub speech_command: Option<String>,

    #[serde(default = "default_rate")]
    pub speech_rate: f32,

    /// Preferred voice name
    #[serde(default)]
    pub voice: Option<String>,

    #[serde(default = "default_lang")]
    pub dictation_lang: String,
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_notes_key() -> String {
    DEFAULT_NOTES_KEY.to_string()
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}

fn default_rate() -> f32 {
    DEFAULT_RATE
}

fn default_lang() -> String {
    "en-US".to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            autosave_interval_ms: default_interval(),
            notes_key: default_notes_key(),
            theme_key: default_theme_key(),
            speech_command: None,
            speech_rate: default_rate(),
            voice: None,
            dictation_lang: default_lang(),
        }
    }
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    /// Current value of `key` as shown to the user.
    pub fn get(&self, key: &str) -> Result<String> {
        Ok(match key {
            "autosave-interval" => self.autosave_interval_ms.to_string(),
            "notes-key" => self.notes_key.clone(),
            "theme-key" => self.theme_key.clone(),
            "speech-command" => self.speech_command.clone().unwrap_or_default(),
            "speech-rate" => self.speech_rate.to_string(),
            "voice" => self.voice.clone().unwrap_or_default(),
            "dictation-lang" => self.dictation_lang.clone(),
            other => return Err(unknown_key(other)),
        })
    }

    /// Set `key` from user input. Empty values reset optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "autosave-interval" => {
                self.autosave_interval_ms = value.parse().map_err(|_| {
                    NotesError::Api(format!("autosave-interval must be milliseconds, got {value}"))
                })?;
            }
            "notes-key" => self.notes_key = store_key(value)?,
            "theme-key" => self.theme_key = store_key(value)?,
            "speech-command" => self.speech_command = optional(value),
            "speech-rate" => {
                let rate: f32 = value.parse().map_err(|_| {
                    NotesError::Api(format!("speech-rate must be a number, got {value}"))
                })?;
                self.speech_rate = clamp_rate(rate);
            }
            "voice" => self.voice = optional(value),
            "dictation-lang" => {
                if value.is_empty() {
                    return Err(NotesError::Api("dictation-lang cannot be empty".into()));
                }
                self.dictation_lang = value.to_string();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|v| (*key, v)))
            .collect()
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn store_key(value: &str) -> Result<String> {
    if is_valid_key(value) {
        Ok(value.to_string())
    } else {
        Err(NotesError::Api(format!("Invalid store key: {value}")))
    }
}

fn unknown_key(key: &str) -> NotesError {
    NotesError::Api(format!(
        "Unknown config key: {key} (known: {})",
        CONFIG_KEYS.join(", ")
    ))
}
