use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::question::QuizDirection;
use crate::session::quiz::SessionOptions;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Path, `http(s)://` URL, or `bundled`.
    #[serde(default = "default_words_source")]
    pub words_source: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_direction")]
    pub default_direction: String,
    /// Lesson to start in; unset means all lessons.
    #[serde(default)]
    pub lesson: Option<String>,
    #[serde(default = "default_correct_delay_ms")]
    pub correct_delay_ms: u64,
    #[serde(default = "default_incorrect_delay_ms")]
    pub incorrect_delay_ms: u64,
    #[serde(default = "default_refuse_partial_questions")]
    pub refuse_partial_questions: bool,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_words_source() -> String {
    "bundled".to_string()
}
fn default_admin_password() -> String {
    "admin".to_string()
}
fn default_direction() -> String {
    QuizDirection::default().as_str().to_string()
}
fn default_correct_delay_ms() -> u64 {
    100
}
fn default_incorrect_delay_ms() -> u64 {
    1000
}
fn default_refuse_partial_questions() -> bool {
    false
}
fn default_tick_rate_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            words_source: default_words_source(),
            admin_password: default_admin_password(),
            default_direction: default_direction(),
            lesson: None,
            correct_delay_ms: default_correct_delay_ms(),
            incorrect_delay_ms: default_incorrect_delay_ms(),
            refuse_partial_questions: default_refuse_partial_questions(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_direction();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordflash")
            .join("config.toml")
    }

    pub fn direction(&self) -> QuizDirection {
        QuizDirection::from_name(&self.default_direction).unwrap_or_default()
    }

    /// Reset an unrecognised direction name to the default.
    pub fn normalize_direction(&mut self) {
        if QuizDirection::from_name(&self.default_direction).is_none() {
            self.default_direction = default_direction();
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            direction: self.direction(),
            correct_delay: Duration::from_millis(self.correct_delay_ms),
            incorrect_delay: Duration::from_millis(self.incorrect_delay_ms),
            refuse_partial: self.refuse_partial_questions,
            admin_password: self.admin_password.clone(),
        }
    }
}
