use anyhow::{ensure, Context, Result};

use crate::fold::{Locale, SimulationParameters};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Parameters a new session starts with when the client sends none.
    pub default_parameters: SimulationParameters,
    pub locale: Locale,
    pub max_sessions: usize,
    /// Sessions untouched for this long are evicted.
    pub session_idle_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            // 0.1 mm copy paper, 21 cm square (the short side of A4)
            default_parameters: SimulationParameters::new(0.1, 21.0),
            locale: Locale::Ja,
            max_sessions: 10_000,
            session_idle_secs: 30 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = parse_or("PORT", &lookup, defaults.port)?;
        let base = parse_or(
            "FOLD_DEFAULT_BASE_THICKNESS_MM",
            &lookup,
            defaults.default_parameters.base_thickness_mm,
        )?;
        let side = parse_or(
            "FOLD_DEFAULT_SIDE_LENGTH_CM",
            &lookup,
            defaults.default_parameters.initial_side_length_cm,
        )?;
        let default_parameters = SimulationParameters::new(base, side);
        default_parameters
            .validate()
            .context("Default fold parameters are invalid")?;

        let locale = parse_or("FOLD_LOCALE", &lookup, defaults.locale)?;
        let max_sessions = parse_or("FOLD_MAX_SESSIONS", &lookup, defaults.max_sessions)?;
        ensure!(max_sessions > 0, "FOLD_MAX_SESSIONS must be at least 1");
        let session_idle_secs =
            parse_or("FOLD_SESSION_IDLE_SECS", &lookup, defaults.session_idle_secs)?;
        ensure!(session_idle_secs > 0, "FOLD_SESSION_IDLE_SECS must be at least 1");

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            default_parameters,
            locale,
            max_sessions,
            session_idle_secs,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.default_parameters, SimulationParameters::new(0.1, 21.0));
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.max_sessions, 10_000);
        assert_eq!(config.session_idle_secs, 1800);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("FOLD_DEFAULT_BASE_THICKNESS_MM", "0.08"),
            ("FOLD_DEFAULT_SIDE_LENGTH_CM", "29.7"),
            ("FOLD_LOCALE", "en"),
            ("FOLD_MAX_SESSIONS", "5"),
            ("FOLD_SESSION_IDLE_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_parameters, SimulationParameters::new(0.08, 29.7));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.max_sessions, 5);
        assert_eq!(config.session_idle_secs, 60);
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"), "{err}");
    }

    #[test]
    fn test_non_positive_default_rejected() {
        assert!(config_from(&[("FOLD_DEFAULT_SIDE_LENGTH_CM", "0")]).is_err());
        assert!(config_from(&[("FOLD_DEFAULT_BASE_THICKNESS_MM", "-1")]).is_err());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(config_from(&[("FOLD_LOCALE", "klingon")]).is_err());
    }

    #[test]
    fn test_zero_max_sessions_rejected() {
        assert!(config_from(&[("FOLD_MAX_SESSIONS", "0")]).is_err());
    }

    #[test]
    fn test_zero_idle_ttl_rejected() {
        assert!(config_from(&[("FOLD_SESSION_IDLE_SECS", "0")]).is_err());
    }
}
