//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory and can be overridden
//! with `SMARTSPLIT_` environment variables, e.g. `SMARTSPLIT_SERVER__PORT`.
//!
//! See `settings.toml` for the configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Server {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Permissive CORS when unset.
    pub allowed_origin: Option<String>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            allowed_origin: None,
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load("settings")
    }

    pub fn load(file: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("SMARTSPLIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn filter(&self) -> String {
        format!(
            "smartsplit={level},actix_web={level}",
            level = self.app.level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("definitely-not-a-settings-file").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.bind, "127.0.0.1");
        assert_eq!(settings.server.allowed_origin, None);
        assert_eq!(settings.app.level, "info");
    }

    #[test]
    fn filter_covers_crate_and_server() {
        let settings = Settings::default();
        assert_eq!(settings.filter(), "smartsplit=info,actix_web=info");
    }
}
