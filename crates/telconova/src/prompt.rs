// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the TELCONOVA_PASSWORD environment variable.

use secrecy::SecretString;
use telconova_core::DispatchError;

/// The environment variable name for providing the account password.
pub const PASSWORD_ENV_VAR: &str = "TELCONOVA_PASSWORD";

/// Get the account password from environment variable or interactive TTY prompt.
///
/// Priority:
/// 1. `TELCONOVA_PASSWORD` environment variable (for scripts)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_password(label: &str) -> Result<SecretString, DispatchError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("{label}: ");
        let password = rpassword::read_password().map_err(|e| {
            DispatchError::InvalidRequest(format!("failed to read password: {e}"))
        })?;
        if password.is_empty() {
            return Err(DispatchError::InvalidRequest(
                "empty password not allowed".to_string(),
            ));
        }
        return Ok(SecretString::from(password));
    }

    Err(DispatchError::InvalidRequest(
        "No password provided. Pass --password, set TELCONOVA_PASSWORD, or run interactively."
            .to_string(),
    ))
}
