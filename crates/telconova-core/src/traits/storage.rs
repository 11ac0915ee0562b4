// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable string key-value storage.

use crate::error::DispatchError;

/// A small synchronous string store that survives process restarts.
///
/// Reads and writes are expected to be cheap (a handful of bytes), so the
/// trait is synchronous and callable from constructors.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the stored value, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, DispatchError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), DispatchError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), DispatchError>;
}
