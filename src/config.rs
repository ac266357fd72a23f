use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Timed game length in seconds.
    #[serde(default = "default_game_duration_secs")]
    pub game_duration_secs: u32,
    /// "text" for typed answers, "choice" for four-button multiple choice.
    #[serde(default = "default_answer_mode")]
    pub answer_mode: String,
    /// Questions per targeted practice run.
    #[serde(default = "default_practice_question_count")]
    pub practice_question_count: usize,
    /// Show a mental-math hint with each practice question.
    #[serde(default = "default_practice_hints")]
    pub practice_hints: bool,
}

fn default_game_duration_secs() -> u32 {
    60
}
fn default_answer_mode() -> String {
    "text".to_string()
}
fn default_practice_question_count() -> usize {
    10
}
fn default_practice_hints() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game_duration_secs: default_game_duration_secs(),
            answer_mode: default_answer_mode(),
            practice_question_count: default_practice_question_count(),
            practice_hints: default_practice_hints(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mathdr")
            .join("config.toml")
    }

    pub fn multiple_choice(&self) -> bool {
        self.answer_mode == "choice"
    }

    /// Clamp out-of-range values from stale or hand-edited files. Call
    /// after deserialization.
    pub fn normalize(&mut self) {
        if self.game_duration_secs < 10 {
            self.game_duration_secs = 10;
        } else if self.game_duration_secs > 600 {
            self.game_duration_secs = 600;
        }
        if self.practice_question_count == 0 {
            self.practice_question_count = default_practice_question_count();
        } else if self.practice_question_count > 100 {
            self.practice_question_count = 100;
        }
        if self.answer_mode != "text" && self.answer_mode != "choice" {
            self.answer_mode = default_answer_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.game_duration_secs, 60);
        assert_eq!(config.answer_mode, "text");
        assert_eq!(config.practice_question_count, 10);
        assert!(config.practice_hints);
    }

    #[test]
    fn test_config_serde_defaults_from_partial_file() {
        let toml_str = r#"
game_duration_secs = 120
answer_mode = "choice"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game_duration_secs, 120);
        assert!(config.multiple_choice());
        assert_eq!(config.practice_question_count, 10);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.game_duration_secs, deserialized.game_duration_secs);
        assert_eq!(config.answer_mode, deserialized.answer_mode);
        assert_eq!(
            config.practice_question_count,
            deserialized.practice_question_count
        );
    }

    #[test]
    fn test_normalize_clamps_values() {
        let mut config = Config {
            game_duration_secs: 3,
            answer_mode: "buttons".to_string(),
            practice_question_count: 0,
            practice_hints: true,
        };
        config.normalize();
        assert_eq!(config.game_duration_secs, 10);
        assert_eq!(config.answer_mode, "text");
        assert_eq!(config.practice_question_count, 10);
    }

    #[test]
    fn test_normalize_caps_long_sessions() {
        let mut config = Config::default();
        config.game_duration_secs = 100_000;
        config.practice_question_count = 5_000;
        config.normalize();
        assert_eq!(config.game_duration_secs, 600);
        assert_eq!(config.practice_question_count, 100);
    }
}
