use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const APP_DIR: &str = "storycrafter";

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,

    /// Never compiled in. Leave empty when the endpoint is a proxy that
    /// injects the credential server-side.
    pub api_key: Option<String>,

    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

pub fn app_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn config_path() -> PathBuf {
    app_config_dir().join("config.json")
}

impl AppConfig {
    /// Config file first, then environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file(&config_path());
        config.apply_env(|name| std::env::var(name).ok());

        if config.api_key.is_none() {
            info!(endpoint = %config.endpoint, "no API key configured, requests go out unauthenticated");
        }
        config
    }

    pub fn from_file(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = var("STORYCRAFTER_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }

        let non_blank = |v: &String| !v.trim().is_empty();
        let key = var("STORYCRAFTER_API_KEY")
            .filter(non_blank)
            .or_else(|| var("GEMINI_API_KEY").filter(non_blank));
        if key.is_some() {
            self.api_key = key;
        }

        // Treat an empty key in the file the same as no key.
        if self.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.api_key = None;
        }
    }
}
