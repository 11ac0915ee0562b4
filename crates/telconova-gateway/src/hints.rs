// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test credentials shown next to the login prompt.

use serde::Serialize;
use telconova_mock::fixtures::{DEMO_EMAIL, DEMO_PASSWORD};

/// One account a user can try.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialHint {
    pub label: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

/// Everything the login screen needs to explain how to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialHints {
    pub title: &'static str,
    pub accounts: Vec<CredentialHint>,
    pub instructions: String,
}

/// Builds the hint card for a remote backend expected at `base_url`.
pub fn credential_hints(base_url: &str) -> CredentialHints {
    CredentialHints {
        title: "Credenciales de Prueba",
        accounts: vec![
            CredentialHint {
                label: "Usuario de Prueba (Backend Real)",
                email: "test@example.com",
                password: "secret",
            },
            CredentialHint {
                label: "Supervisor (Mock API)",
                email: DEMO_EMAIL,
                password: DEMO_PASSWORD,
            },
        ],
        instructions: format!(
            "Para usar el backend real, define use_mock = false en la sección [api] \
             (o TELCONOVA_API_USE_MOCK=false). Backend esperado en: {base_url}"
        ),
    }
}
