use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::email::MaintenanceForm;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatesConfig {
    /// Notice template; the built-in template is used when unset
    pub template_path: Option<PathBuf>,
    /// Stylesheet injected with the preview; the built-in one is used when unset
    pub stylesheet_path: Option<PathBuf>,
    /// Re-read both files on every render pass instead of once at startup
    #[serde(default)]
    pub reload: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default = "default_description")]
    pub default_description: String,
    /// Components offered in the form's selector
    #[serde(default = "default_components")]
    pub components: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            default_description: default_description(),
            components: default_components(),
        }
    }
}

fn default_title() -> String {
    "Server Maintenance".to_string()
}

fn default_description() -> String {
    "Scheduled maintenance to improve system performance and security.".to_string()
}

fn default_components() -> Vec<String> {
    [
        "Web Services",
        "API",
        "Database",
        "Authentication",
        "File Storage",
        "Email Service",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl FormConfig {
    /// Form prefilled with the configured defaults
    pub fn initial_form(&self) -> MaintenanceForm {
        MaintenanceForm {
            title: self.default_title.clone(),
            description: self.default_description.clone(),
            ..MaintenanceForm::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
