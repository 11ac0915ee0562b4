// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session persistence for the TelcoNova dispatch gateway.
//!
//! [`TokenStore`] owns the bearer token; [`FileStore`] keeps it on disk
//! between runs and [`MemoryStore`] keeps it for the life of the process.

pub mod store;
pub mod token;

pub use store::{FileStore, MemoryStore};
pub use token::{TokenStore, TOKEN_KEY};
