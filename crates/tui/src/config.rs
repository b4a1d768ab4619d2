use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENDPOINT_ENV: &str = "BIRDWATCH_ENDPOINT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub positive_label: String,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Extension the file picker offers by default. Not enforced on upload.
    pub accepted_extension: String,
    pub title: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/predict/".to_string(),
            positive_label: "Bird".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            accepted_extension: "csv".to_string(),
            title: "Micro-Doppler Based Target Classifier".to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
    }

    fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.classifier.endpoint = endpoint.trim().to_string();
        }
    }
}
