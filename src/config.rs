use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `sqlite://path`, `sqlite:path` or a bare file path.
    pub database_url: String,
    pub max_connections: u32,
    /// budget for every mutating operation.
    pub write_timeout: Duration,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None)
    }

    /// like [`Config::from_env`], with `database_url` taking precedence over `DATABASE_URL`.
    pub fn from_env_with(database_url: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| match (var, &database_url) {
            ("DATABASE_URL", Some(url)) => Some(url.clone()),
            _ => std::env::var(var).ok(),
        })
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let mut config = Self::new(database_url);

        if let Some(value) = lookup("QUOTEBOOK_MAX_CONNECTIONS") {
            config.max_connections = match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "QUOTEBOOK_MAX_CONNECTIONS",
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup("QUOTEBOOK_WRITE_TIMEOUT_SECS") {
            config.write_timeout = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "QUOTEBOOK_WRITE_TIMEOUT_SECS",
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |var| vars.get(var).map(|v| v.to_string())
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config = Config::from_lookup(lookup_in(&[("DATABASE_URL", "sqlite://quotes.db")]))
            .unwrap();

        assert_eq!(config, Config::new("sqlite://quotes.db"));
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.write_timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = Config::from_lookup(lookup_in(&[])).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "quotes.db"),
            ("QUOTEBOOK_MAX_CONNECTIONS", "4"),
            ("QUOTEBOOK_WRITE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.write_timeout, Duration::from_secs(2));
    }

    #[test]
    fn zero_or_garbage_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "quotes.db"),
            ("QUOTEBOOK_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "QUOTEBOOK_MAX_CONNECTIONS",
                ..
            }
        ));

        let err = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "quotes.db"),
            ("QUOTEBOOK_WRITE_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "QUOTEBOOK_WRITE_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
