// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the TelcoNova dispatch gateway.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelconovaConfig {
    /// Backend selection and remote API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Durable session (auth token) storage.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TelconovaConfig {
    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Backend selection and remote API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base address every remote path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Use the in-memory mock backend. Only an explicit `false` disables it.
    #[serde(default = "default_use_mock", deserialize_with = "deserialize_mock_flag")]
    pub use_mock: bool,

    /// Per-request timeout. `None` keeps the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            use_mock: default_use_mock(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_use_mock() -> bool {
    true
}

/// Accepts a boolean or any scalar; only `false` (or the string "false")
/// turns mock mode off.
fn deserialize_mock_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct MockFlag;

    impl Visitor<'_> for MockFlag {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(v != "false")
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<bool, E> {
            Ok(true)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<bool, E> {
            Ok(true)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<bool, E> {
            Ok(true)
        }
    }

    deserializer.deserialize_any(MockFlag)
}

/// Where the auth token is persisted between runs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Directory holding the token file. Defaults to `<data_dir>/telconova`.
    #[serde(default)]
    pub token_dir: Option<String>,
}

impl SessionConfig {
    /// Resolves the token directory, falling back to the platform data dir.
    pub fn resolved_token_dir(&self) -> PathBuf {
        match &self.token_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("telconova"))
                .unwrap_or_else(|| {
                    tracing::warn!("no platform data directory, using ./.telconova for the session");
                    PathBuf::from(".telconova")
                }),
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "deserialize_mock_flag")]
        use_mock: bool,
    }

    fn flag(toml_value: &str) -> bool {
        toml::from_str::<Flag>(&format!("use_mock = {toml_value}"))
            .unwrap()
            .use_mock
    }

    #[test]
    fn only_false_disables_mock() {
        assert!(!flag("false"));
        assert!(!flag("\"false\""));
        assert!(flag("\"FALSE\""));
        assert!(flag("\"False\""));
        assert!(flag("\" false\""));
        assert!(flag("true"));
        assert!(flag("\"no\""));
        assert!(flag("0"));
    }

    #[test]
    fn explicit_token_dir_wins() {
        let session = SessionConfig {
            token_dir: Some("/tmp/tokens".into()),
        };
        assert_eq!(session.resolved_token_dir(), PathBuf::from("/tmp/tokens"));
    }

    #[test]
    fn default_token_dir_ends_in_telconova() {
        let dir = SessionConfig::default().resolved_token_dir();
        assert!(dir.ends_with("telconova") || dir.ends_with(".telconova"));
    }
}
