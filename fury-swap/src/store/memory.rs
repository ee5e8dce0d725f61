// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Implements the key-value store traits in memory.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;

use crate::store::{
    get_interval, Batch, KeyValueStoreError, ReadableKeyValueStore, WithError,
    WritableKeyValueStore, WriteOperation,
};

/// The values of a store.
type MemoryStoreMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// A store whose data live in memory. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// The map used for storing the data.
    map: Arc<RwLock<MemoryStoreMap>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys in the store.
    pub fn len(&self) -> Result<usize, MemoryStoreError> {
        Ok(self.read_map()?.len())
    }

    /// Whether the store holds no key at all.
    pub fn is_empty(&self) -> Result<bool, MemoryStoreError> {
        Ok(self.read_map()?.is_empty())
    }

    fn read_map(&self) -> Result<RwLockReadGuard<'_, MemoryStoreMap>, MemoryStoreError> {
        self.map.read().map_err(|_| MemoryStoreError::Poisoned)
    }

    fn write_map(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreMap>, MemoryStoreError> {
        self.map.write().map_err(|_| MemoryStoreError::Poisoned)
    }
}

impl WithError for MemoryStore {
    type Error = MemoryStoreError;
}

impl ReadableKeyValueStore for MemoryStore {
    fn read_value_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, MemoryStoreError> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn find_key_values_by_prefix(
        &self,
        key_prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, MemoryStoreError> {
        let map = self.read_map()?;
        let len = key_prefix.len();
        Ok(map
            .range(get_interval(key_prefix.to_vec()))
            .map(|(key, value)| (key[len..].to_vec(), value.clone()))
            .collect())
    }
}

impl WritableKeyValueStore for MemoryStore {
    fn write_batch(&self, batch: Batch) -> Result<(), MemoryStoreError> {
        let mut map = self.write_map()?;
        for operation in batch.operations {
            match operation {
                WriteOperation::Put { key, value } => {
                    map.insert(key, value);
                }
                WriteOperation::Delete { key } => {
                    map.remove(&key);
                }
                WriteOperation::DeletePrefix { key_prefix } => {
                    let key_list = map
                        .range(get_interval(key_prefix))
                        .map(|(key, _)| key.clone())
                        .collect::<Vec<_>>();
                    for key in key_list {
                        map.remove(&key);
                    }
                }
            }
        }
        Ok(())
    }
}

/// The error type for [`MemoryStore`].
#[derive(Error, Debug)]
pub enum MemoryStoreError {
    /// A thread panicked while holding the lock of the store.
    #[error("the memory store lock is poisoned")]
    Poisoned,
}

impl KeyValueStoreError for MemoryStoreError {
    const BACKEND: &'static str = "memory";
}
