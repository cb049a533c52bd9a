use crate::engine::{Grouping, DEFAULT_TOP_N};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub snapshot_url: String,
    pub default_grouping: Grouping,
    pub trend_top_n: usize,
    pub fetch_max_elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let snapshot_url = env_map
            .get("SNAPSHOT_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("SNAPSHOT_URL".to_string()))?;

        let default_grouping = env_map
            .get("DEFAULT_GROUPING")
            .map(|s| s.as_str())
            .unwrap_or("name")
            .parse::<Grouping>()
            .map_err(|e| ConfigError::InvalidValue("DEFAULT_GROUPING".to_string(), e))?;

        let trend_top_n = match env_map.get("TREND_TOP_N") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "TREND_TOP_N".to_string(),
                        "must be a positive integer".to_string(),
                    ))
                }
            },
            None => DEFAULT_TOP_N,
        };

        let fetch_max_elapsed = env_map
            .get("FETCH_MAX_ELAPSED_SECS")
            .map(|s| s.as_str())
            .unwrap_or("30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "FETCH_MAX_ELAPSED_SECS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        Ok(Config {
            port,
            snapshot_url,
            default_grouping,
            trend_top_n,
            fetch_max_elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "SNAPSHOT_URL".to_string(),
            "https://script.example.com/macros/s/abc/exec".to_string(),
        );
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_grouping, Grouping::Name);
        assert_eq!(config.trend_top_n, 5);
        assert_eq!(config.fetch_max_elapsed, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_snapshot_url() {
        let mut env_map = setup_required_env();
        env_map.remove("SNAPSHOT_URL");
        let result = Config::from_env_map(env_map);
        assert!(matches!(result, Err(ConfigError::MissingEnv(ref v)) if v == "SNAPSHOT_URL"));
    }

    #[test]
    fn test_blank_snapshot_url() {
        let mut env_map = setup_required_env();
        env_map.insert("SNAPSHOT_URL".to_string(), "   ".to_string());
        assert!(matches!(
            Config::from_env_map(env_map),
            Err(ConfigError::MissingEnv(_))
        ));
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        assert!(matches!(result, Err(ConfigError::InvalidValue(ref k, _)) if k == "PORT"));
    }

    #[test]
    fn test_grouping_override() {
        let mut env_map = setup_required_env();
        env_map.insert("DEFAULT_GROUPING".to_string(), "owner".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.default_grouping, Grouping::Owner);
    }

    #[test]
    fn test_invalid_grouping() {
        let mut env_map = setup_required_env();
        env_map.insert("DEFAULT_GROUPING".to_string(), "account".to_string());
        let err = Config::from_env_map(env_map).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for DEFAULT_GROUPING: must be none, name, or owner, got account"
        );
    }

    #[test]
    fn test_trend_top_n_must_be_positive() {
        let mut env_map = setup_required_env();
        env_map.insert("TREND_TOP_N".to_string(), "0".to_string());
        assert!(matches!(
            Config::from_env_map(env_map),
            Err(ConfigError::InvalidValue(ref k, _)) if k == "TREND_TOP_N"
        ));
    }

    #[test]
    fn test_custom_values() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "3000".to_string());
        env_map.insert("TREND_TOP_N".to_string(), "8".to_string());
        env_map.insert("FETCH_MAX_ELAPSED_SECS".to_string(), "5".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.trend_top_n, 8);
        assert_eq!(config.fetch_max_elapsed, Duration::from_secs(5));
    }
}
