use crate::error::Error;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_vocabulary_path")]
    pub vocabulary_path: PathBuf,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Words shorter than this do not trigger suggestions in the editors.
    #[serde(default = "default_min_suggest_len")]
    pub min_suggest_len: usize,
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Settings for the AI analysis sidebar
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_vocabulary_path() -> PathBuf {
    PathBuf::from("medical_vocabulary.txt")
}

fn default_suggestion_limit() -> usize {
    crate::core::types::DEFAULT_SUGGESTION_LIMIT
}

fn default_min_suggest_len() -> usize {
    3
}

fn default_max_edit_distance() -> usize {
    crate::core::types::DEFAULT_MAX_EDIT_DISTANCE
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_max_output_tokens() -> u32 {
    150 // Keep answers to a short paragraph
}

fn default_temperature() -> f32 {
    0.2
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("ai_cache.json")
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            cache_path: default_cache_path(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vocabulary_path: default_vocabulary_path(),
            suggestion_limit: default_suggestion_limit(),
            min_suggest_len: default_min_suggest_len(),
            max_edit_distance: default_max_edit_distance(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml(&contents)?;
        info!("[Config] Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Reads settings from `path` when given, falling back to defaults if the
    /// file is missing or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("[Config] Using default settings, could not load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The analysis API key, if the configured environment variable is set.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.analysis.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.suggestion_limit, 5);
        assert_eq!(settings.max_edit_distance, 2);
        assert_eq!(settings.analysis.max_output_tokens, 150);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let settings = Settings::from_toml(
            r#"
            vocabulary_path = "vocab/terms.txt"
            suggestion_limit = 8

            [analysis]
            model = "gemini-pro"
            "#,
        )
        .unwrap();
        assert_eq!(settings.vocabulary_path, PathBuf::from("vocab/terms.txt"));
        assert_eq!(settings.suggestion_limit, 8);
        assert_eq!(settings.min_suggest_len, 3);
        assert_eq!(settings.analysis.model, "gemini-pro");
        assert_eq!(settings.analysis.cache_path, PathBuf::from("ai_cache.json"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            Settings::from_toml("suggestion_limit = \"many\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let settings = Settings::load_or_default(Some(Path::new("/no/such/drcorrect.toml")));
        assert_eq!(settings, Settings::default());
    }
}
