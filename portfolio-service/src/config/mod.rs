use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Every portfolio route except the liveness check lives under this prefix.
pub const BASE_PATH: &str = "/ms-portfolio-bs/v1";

#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub file_path: PathBuf,
}

impl PortfolioConfig {
    /// Fails when `MONGO_URI` is missing or empty.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(PortfolioConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGO_URI", None)?,
                database: get_env("MONGO_DATABASE", Some("portfolio_db"))?,
                collection: get_env("MONGO_COLLECTION", Some("portfolio"))?,
            },
            seed: SeedConfig {
                file_path: PathBuf::from(get_env("SEED_FILE", Some("client_portfolio.json"))?),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_key_missing_is_config_error() {
        let err = get_env("PORTFOLIO_TEST_UNSET_REQUIRED", None).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("PORTFOLIO_TEST_UNSET_REQUIRED"));
    }

    #[test]
    fn empty_required_key_is_rejected() {
        env::set_var("PORTFOLIO_TEST_EMPTY_REQUIRED", "  ");
        assert!(get_env("PORTFOLIO_TEST_EMPTY_REQUIRED", None).is_err());
    }

    #[test]
    fn default_used_when_unset() {
        let value = get_env("PORTFOLIO_TEST_UNSET_OPTIONAL", Some("portfolio_db")).unwrap();
        assert_eq!(value, "portfolio_db");
    }

    #[test]
    fn environment_wins_over_default() {
        env::set_var("PORTFOLIO_TEST_SET_OPTIONAL", "other_db");
        let value = get_env("PORTFOLIO_TEST_SET_OPTIONAL", Some("portfolio_db")).unwrap();
        assert_eq!(value, "other_db");
    }
}
