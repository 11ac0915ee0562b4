// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./telconova.toml` > `~/.config/telconova/telconova.toml`
//! > `/etc/telconova/telconova.toml` with environment variable overrides via the
//! `TELCONOVA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TelconovaConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/telconova/telconova.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "telconova.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/telconova/telconova.toml` (system-wide)
/// 3. `~/.config/telconova/telconova.toml` (user XDG config)
/// 4. `./telconova.toml` (local directory)
/// 5. `TELCONOVA_*` environment variables
pub fn load_config() -> Result<TelconovaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TelconovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TelconovaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TelconovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TelconovaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TelconovaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("telconova/telconova.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `TELCONOVA_API_USE_MOCK` must map to `api.use_mock`, not
/// `api.use.mock`.
///
/// Only `API_`, `SESSION_` and `LOGGING_` variables are read, so other
/// `TELCONOVA_*` variables (such as `TELCONOVA_PASSWORD`) never reach config.
fn env_provider() -> Env {
    Env::prefixed("TELCONOVA_")
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ["api_", "session_", "logging_"]
                .iter()
                .any(|section| key.starts_with(section))
        })
        .map(|key| {
            let mapped = key
                .as_str()
                .to_ascii_lowercase()
                .replacen("api_", "api.", 1)
                .replacen("session_", "session.", 1)
                .replacen("logging_", "logging.", 1);
            mapped.into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TELCONOVA_API_USE_MOCK", "false");
            jail.set_env("TELCONOVA_API_BASE_URL", "http://backend:8080/api");
            jail.set_env("TELCONOVA_SESSION_TOKEN_DIR", "/var/lib/telconova");
            jail.set_env("TELCONOVA_LOGGING_LEVEL", "debug");

            let config = load_config()?;
            assert!(!config.api.use_mock);
            assert_eq!(config.api.base_url, "http://backend:8080/api");
            assert_eq!(config.session.token_dir.as_deref(), Some("/var/lib/telconova"));
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn unrelated_prefixed_env_vars_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TELCONOVA_PASSWORD", "secret");
            jail.set_env("TELCONOVA_API_USE_MOCK", "false");

            let config = crate::load_and_validate().map_err(|errors| {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                format!("config rejected: {messages:?}")
            })?;
            assert!(!config.api.use_mock);
            Ok(())
        });
    }

    #[test]
    fn non_false_env_value_keeps_mock_mode() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TELCONOVA_API_USE_MOCK", "maybe");
            let config = load_config()?;
            assert!(config.api.use_mock);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_merged_before_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
[api]
base_url = "http://from-file/api"
use_mock = false
"#,
            )?;
            jail.set_env("TELCONOVA_API_BASE_URL", "http://from-env/api");

            let config = load_config()?;
            assert_eq!(config.api.base_url, "http://from-env/api");
            assert!(!config.api.use_mock);
            Ok(())
        });
    }
}
