//! Runtime configuration read from the environment (`.env` supported)

use thiserror::Error;

const DEFAULT_COOLDOWN_SECS: u64 = 5;
const DEFAULT_GLOBAL_RATE_LIMIT: usize = 50;
const DEFAULT_BACKEND_RATE_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub backend_base_url: String,
    /// 32-byte AES key, hex encoded
    pub session_key_hex: String,
    pub command_cooldown_secs: u64,
    pub global_rate_limit: usize,
    pub backend_rate_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let backend_base_url = required("BACKEND_BASE_URL")?;
        if !backend_base_url.starts_with("http://") && !backend_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "BACKEND_BASE_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let session_key_hex = required("SESSION_ENCRYPTION_KEY")?;
        match hex::decode(&session_key_hex) {
            Ok(bytes) if bytes.len() == 32 => {}
            Ok(bytes) => {
                return Err(ConfigError::Invalid {
                    name: "SESSION_ENCRYPTION_KEY",
                    reason: format!("expected 32 bytes, got {}", bytes.len()),
                })
            }
            Err(e) => {
                return Err(ConfigError::Invalid {
                    name: "SESSION_ENCRYPTION_KEY",
                    reason: e.to_string(),
                })
            }
        }

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            backend_base_url,
            session_key_hex,
            command_cooldown_secs: optional_number(&lookup, "COMMAND_COOLDOWN_SECS", DEFAULT_COOLDOWN_SECS)?,
            global_rate_limit: optional_number(&lookup, "GLOBAL_RATE_LIMIT", DEFAULT_GLOBAL_RATE_LIMIT)?,
            backend_rate_limit: optional_number(&lookup, "BACKEND_RATE_LIMIT", DEFAULT_BACKEND_RATE_LIMIT)?,
        })
    }
}

fn optional_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DISCORD_TOKEN", "discord"),
            ("DATABASE_URL", "mysql://localhost/mockinvest"),
            ("BACKEND_BASE_URL", "https://game.example.com/api"),
            ("SESSION_ENCRYPTION_KEY", KEY),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&base_vars())).unwrap();
        assert_eq!(config.command_cooldown_secs, 5);
        assert_eq!(config.global_rate_limit, 50);
        assert_eq!(config.backend_rate_limit, 20);
    }

    #[test]
    fn test_overrides_parsed() {
        let mut vars = base_vars();
        vars.push(("COMMAND_COOLDOWN_SECS", "2"));
        vars.push(("BACKEND_RATE_LIMIT", " 8 "));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.command_cooldown_secs, 2);
        assert_eq!(config.backend_rate_limit, 8);
    }

    #[test]
    fn test_missing_variable_reported() {
        let vars: Vec<_> = base_vars().into_iter().filter(|(k, _)| *k != "DISCORD_TOKEN").collect();
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn test_short_key_rejected() {
        let mut vars = base_vars();
        vars.retain(|(k, _)| *k != "SESSION_ENCRYPTION_KEY");
        vars.push(("SESSION_ENCRYPTION_KEY", "abcd"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("SESSION_ENCRYPTION_KEY"));
    }

    #[test]
    fn test_bad_number_rejected() {
        let mut vars = base_vars();
        vars.push(("GLOBAL_RATE_LIMIT", "lots"));
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_backend_url_needs_scheme() {
        let mut vars = base_vars();
        vars.retain(|(k, _)| *k != "BACKEND_BASE_URL");
        vars.push(("BACKEND_BASE_URL", "game.example.com"));
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }
}
