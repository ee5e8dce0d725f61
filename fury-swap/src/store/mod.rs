// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! The key-value storage that ledger records are persisted into.
//!
//! Stores are injected by the host: the ledger only needs point reads, ordered prefix
//! scans, and atomic batches of writes. Keys are compared byte-wise.

use std::{fmt::Debug, ops::Bound};

/// Helper definitions for in-memory storage.
pub mod memory;

#[cfg(test)]
#[path = "../unit_tests/store_tests.rs"]
mod store_tests;

/// A write operation, staged in a [`Batch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WriteOperation {
    /// Delete the given key.
    Delete {
        /// The key that will be deleted.
        key: Vec<u8>,
    },
    /// Delete all the keys matching the given prefix.
    DeletePrefix {
        /// The prefix of the keys to be deleted.
        key_prefix: Vec<u8>,
    },
    /// Set or replace the value of a given key.
    Put {
        /// The key to be inserted or replaced.
        key: Vec<u8>,
        /// The value to be inserted on the key.
        value: Vec<u8>,
    },
}

/// A batch of writes, applied atomically and in order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Batch {
    /// The entries of the batch to be consumed when processed.
    pub operations: Vec<WriteOperation>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of operations in the batch.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Inserts a serialized value at `key`.
    pub fn put_key_value(
        &mut self,
        key: Vec<u8>,
        value: &impl serde::Serialize,
    ) -> Result<(), bcs::Error> {
        let value = bcs::to_bytes(value)?;
        self.put_key_value_bytes(key, value);
        Ok(())
    }

    /// Inserts raw bytes at `key`.
    pub fn put_key_value_bytes(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.operations.push(WriteOperation::Put { key, value });
    }

    /// Deletes `key`.
    pub fn delete_key(&mut self, key: Vec<u8>) {
        self.operations.push(WriteOperation::Delete { key });
    }

    /// Deletes every key starting with `key_prefix`.
    pub fn delete_key_prefix(&mut self, key_prefix: Vec<u8>) {
        self.operations.push(WriteOperation::DeletePrefix { key_prefix });
    }
}

/// The error type of a store backend.
pub trait KeyValueStoreError: std::error::Error + Debug + Send + Sync + 'static {
    /// The name of the backend.
    const BACKEND: &'static str;
}

/// Stores with a common error type.
pub trait WithError {
    /// The error type.
    type Error: KeyValueStoreError;
}

/// Low-level read operations.
pub trait ReadableKeyValueStore: WithError {
    /// Retrieves a `Vec<u8>` from the database using the provided `key`.
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Finds the `(key, value)` pairs matching the prefix, in key order. The prefix is
    /// not included in the returned keys.
    fn find_key_values_by_prefix(
        &self,
        key_prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Self::Error>;

    /// Finds the keys matching the prefix, in key order. The prefix is not included in the
    /// returned keys.
    fn find_keys_by_prefix(&self, key_prefix: &[u8]) -> Result<Vec<Vec<u8>>, Self::Error> {
        Ok(self
            .find_key_values_by_prefix(key_prefix)?
            .into_iter()
            .map(|(key, _)| key)
            .collect())
    }
}

/// Low-level write operations.
pub trait WritableKeyValueStore: WithError {
    /// Writes the `batch` in the database.
    fn write_batch(&self, batch: Batch) -> Result<(), Self::Error>;
}

/// Returns the smallest key greater than every key starting with `key_prefix`, or
/// `None` if there is no such key.
fn get_upper_bound(key_prefix: &[u8]) -> Option<Vec<u8>> {
    let mut upper_bound = key_prefix.to_vec();
    while let Some(last_byte) = upper_bound.pop() {
        if last_byte < u8::MAX {
            upper_bound.push(last_byte + 1);
            return Some(upper_bound);
        }
    }
    None
}

/// Computes the range of the keys starting with `key_prefix`.
fn get_interval(key_prefix: Vec<u8>) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let upper_bound = match get_upper_bound(&key_prefix) {
        None => Bound::Unbounded,
        Some(upper_bound) => Bound::Excluded(upper_bound),
    };
    (Bound::Included(key_prefix), upper_bound)
}
