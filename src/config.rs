use std::path::PathBuf;

use crate::cli::Cli;
use crate::core::Language;

/// Environment variables holding the Gemini API key, in lookup order
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Where downloaded images are written
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct UiConfig {
    /// Language of labels and messages
    pub language: Language,
}

// Default value functions
fn default_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

impl Config {
    /// Build config from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());

        Self {
            api: ApiConfig {
                key,
                ..Default::default()
            },
            output: OutputConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Apply launcher flags on top of the environment
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(model) = &cli.model {
            self.api.model = model.clone();
        }
        if let Some(base_url) = &cli.base_url {
            self = self.with_base_url(base_url.as_str());
        }
        if let Some(dir) = &cli.output_dir {
            self.output.directory = dir.clone();
        }
        if let Some(language) = cli.lang {
            self.ui.language = language;
        }
        self
    }

    /// Get API key, if one was configured
    pub fn api_key(&self) -> Option<&str> {
        self.api.key.as_deref()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
