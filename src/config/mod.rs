#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::adapters::raster::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_CANVAS_SIDE};
use crate::core::export::ExportFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_url, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("pokecard/", env!("CARGO_PKG_VERSION"));

/// Settings after file values and command line overrides are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub output_path: String,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: "./output".to_string(),
            format: ExportFormat::Png,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let mut config = Self::default();

        if let Some(provider) = &file.provider {
            if let Some(base_url) = &provider.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(timeout) = provider.timeout_seconds {
                config.timeout_seconds = timeout;
            }
            if let Some(user_agent) = &provider.user_agent {
                config.user_agent = user_agent.clone();
            }
        }

        if let Some(export) = &file.export {
            if let Some(output_path) = &export.output_path {
                config.output_path = output_path.clone();
            }
            if let Some(format) = export.format {
                config.format = format;
            }
            config.width = export.width.unwrap_or(config.width);
            config.height = export.height.unwrap_or(config.height);
        }

        config.log_level = file.logging.as_ref().and_then(|l| l.level.clone());
        config
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validate_range("width", self.width, 200, MAX_CANVAS_SIDE)?;
        validate_range("height", self.height, 280, MAX_CANVAS_SIDE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[provider]
timeout_seconds = 5

[export]
format = "json"
height = 600
"#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&file);
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.height, 600);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_tiny_canvas_is_invalid() {
        let config = AppConfig {
            width: 100,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_canvas_is_invalid() {
        let file = TomlConfig::from_toml_str("[export]\nwidth = 4000000000\n").unwrap();
        let config = AppConfig::from_toml(&file);
        match config.validate().unwrap_err() {
            crate::utils::error::CardError::Validation { field, .. } => assert_eq!(field, "width"),
            other => panic!("unexpected error: {:?}", other),
        }

        let config = AppConfig {
            height: MAX_CANVAS_SIDE,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
