// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the TelcoNova dispatch gateway.
//!
//! This crate provides the error type, the domain records, and the traits
//! both backends implement. Everything else in the workspace builds on it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DispatchError;
pub use traits::{DispatchBackend, KeyValueStore};
pub use types::BackendMode;
