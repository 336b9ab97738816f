use crate::error::AppError;
use config::{Config as Cfg, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub http_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint. Span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    3002
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Loads `.env` (if present), an optional `configuration` file and the
    /// process environment, in increasing order of precedence.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let builder = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(environment());

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Process environment as a config source. Variables that are set but empty
/// count as unset, so defaults still apply.
fn environment() -> Environment {
    Environment::default().try_parsing(true).ignore_empty(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn empty_port_variable_falls_back_to_default() {
        let builder = Cfg::builder().add_source(env_source(&[("HTTP_PORT", "")]));

        let config = Config::from_builder(builder).unwrap();
        assert_eq!(config.http_port, 3002);
    }

    #[test]
    fn port_variable_is_parsed() {
        let builder = Cfg::builder().add_source(env_source(&[
            ("HTTP_PORT", "8080"),
            ("LOG_LEVEL", "debug"),
        ]));

        let config = Config::from_builder(builder).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_builder(Cfg::builder()).unwrap();
        assert_eq!(config.http_port, 3002);
        assert_eq!(config.log_level, "info");
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn overrides_take_precedence() {
        let builder = Cfg::builder()
            .set_override("http_port", 8081)
            .unwrap()
            .set_override("otlp_endpoint", "http://tempo:4317")
            .unwrap();

        let config = Config::from_builder(builder).unwrap();
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://tempo:4317"));
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let builder = Cfg::builder()
            .set_override("http_port", "not-a-port")
            .unwrap();

        let err = Config::from_builder(builder).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
