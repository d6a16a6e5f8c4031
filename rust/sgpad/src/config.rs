//! Process configuration, read once from the environment at startup.
//!
//! | Variable           | Meaning                                   | Default   |
//! |--------------------|-------------------------------------------|-----------|
//! | `SGPAD_LOG`        | `tracing` filter directives (`EnvFilter`) | `info`    |
//! | `SGPAD_LOG_FORMAT` | `compact` or `json`                       | `compact` |

use std::str::FromStr;

pub const LOG_ENV: &str = "SGPAD_LOG";
pub const LOG_FORMAT_ENV: &str = "SGPAD_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("SGPAD_LOG_FORMAT must be one of: compact, json (got {0:?})")]
    BadLogFormat(String),
    #[error("SGPAD_LOG is not a valid filter: {0}")]
    BadLogFilter(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::BadLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(filter) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            cfg.log_filter = filter.trim().to_string();
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            cfg.log_format = format.parse()?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DaemonConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn reads_filter_and_format() {
        let cfg = DaemonConfig::from_lookup(lookup_from(&[
            (LOG_ENV, " sgpad=debug "),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .expect("config");
        assert_eq!(cfg.log_filter, "sgpad=debug");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_filter_keeps_default() {
        let cfg = DaemonConfig::from_lookup(lookup_from(&[(LOG_ENV, "  ")])).expect("config");
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn rejects_unknown_format() {
        let err = DaemonConfig::from_lookup(lookup_from(&[(LOG_FORMAT_ENV, "pretty")]))
            .expect_err("bad format");
        assert_eq!(err, ConfigError::BadLogFormat("pretty".into()));
    }
}
