// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the gateway's seams.
//!
//! [`DispatchBackend`] is the single operation surface both backends
//! implement; [`KeyValueStore`] abstracts the durable storage the token
//! store persists into.

pub mod backend;
pub mod storage;

pub use backend::DispatchBackend;
pub use storage::KeyValueStore;
