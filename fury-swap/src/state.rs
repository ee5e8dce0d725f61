// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Typed access to the ledger records persisted in an injected key-value store.
//!
//! Every record is validated before it is written. Each public write maps to a single
//! [`Batch`], which is the only atomicity offered: callers updating a pool and a share
//! record together must provide their own transaction boundary.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::{
    address::Address,
    error::ValidationError,
    genesis::GenesisState,
    params::Params,
    pool_record::{PoolRecord, PoolRecords},
    share_record::{ShareRecord, ShareRecords},
    store::{Batch, KeyValueStoreError, ReadableKeyValueStore, WritableKeyValueStore},
};

#[cfg(test)]
#[path = "unit_tests/state_tests.rs"]
mod state_tests;

/// The first byte of every key, telling what the key points to.
#[repr(u8)]
enum KeyTag {
    /// Pool identifier to pool record.
    Pool = 0,
    /// Depositor and pool identifier to share record.
    ShareByDepositor = 1,
    /// Pool identifier and depositor to nothing; indexes share records by pool.
    ShareByPool = 2,
    /// The module parameters.
    Params = 3,
}

/// An error reading or writing ledger state.
#[derive(Debug, Error)]
pub enum StateError {
    /// A record was rejected before being written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A key or a value could not be encoded or decoded.
    #[error("failed to encode or decode ledger state: {0}")]
    Bcs(#[from] bcs::Error),

    /// The store backend failed.
    #[error("{backend} store error: {error}")]
    Store {
        /// The name of the backend.
        backend: &'static str,
        /// The backend error.
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The by-pool index references a share record that does not exist.
    #[error("share record of depositor '{depositor}' in pool '{pool_id}' is indexed but missing")]
    MissingIndexedShareRecord {
        /// The depositor found in the index.
        depositor: Address,
        /// The pool being listed.
        pool_id: String,
    },
}

impl StateError {
    fn store<E: KeyValueStoreError>(error: E) -> Self {
        StateError::Store {
            backend: E::BACKEND,
            error: Box::new(error),
        }
    }
}

/// The pools, share records and parameters of the swap module.
#[derive(Clone, Debug)]
pub struct SwapState<S> {
    store: S,
}

impl<S> SwapState<S>
where
    S: ReadableKeyValueStore + WritableKeyValueStore,
{
    /// Accesses the ledger persisted in `store`.
    pub fn new(store: S) -> Self {
        SwapState { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the module parameters, or the default ones if none were set.
    pub fn params(&self) -> Result<Params, StateError> {
        Ok(self
            .read::<Params>(&[KeyTag::Params as u8])?
            .unwrap_or_default())
    }

    /// Validates and stores the module parameters.
    #[instrument(level = "trace", skip_all)]
    pub fn set_params(&self, params: &Params) -> Result<(), StateError> {
        params.validate()?;
        let mut batch = Batch::new();
        batch.put_key_value(vec![KeyTag::Params as u8], params)?;
        self.write(batch)
    }

    /// Reads the record of the pool `pool_id`.
    pub fn pool(&self, pool_id: &str) -> Result<Option<PoolRecord>, StateError> {
        self.read(&pool_key(pool_id)?)
    }

    /// Validates and stores a pool record, replacing any previous one.
    #[instrument(level = "trace", skip_all, fields(pool_id = %record.pool_id))]
    pub fn set_pool(&self, record: &PoolRecord) -> Result<(), StateError> {
        record.validate()?;
        let mut batch = Batch::new();
        batch.put_key_value(pool_key(&record.pool_id)?, record)?;
        self.write(batch)
    }

    /// Removes the record of the pool `pool_id`, if any.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_pool(&self, pool_id: &str) -> Result<(), StateError> {
        let mut batch = Batch::new();
        batch.delete_key(pool_key(pool_id)?);
        self.write(batch)
    }

    /// Stores a mutated pool record, or removes it once every share has been withdrawn.
    pub fn update_pool(&self, record: &PoolRecord) -> Result<(), StateError> {
        if record.is_drained() {
            debug!(pool_id = %record.pool_id, "removing drained pool");
            self.delete_pool(&record.pool_id)
        } else {
            self.set_pool(record)
        }
    }

    /// Reads every pool record, ordered by key.
    pub fn pools(&self) -> Result<PoolRecords, StateError> {
        self.read_all(&[KeyTag::Pool as u8])
    }

    /// Reads the shares of `depositor` in the pool `pool_id`.
    pub fn share_record(
        &self,
        depositor: &Address,
        pool_id: &str,
    ) -> Result<Option<ShareRecord>, StateError> {
        self.read(&share_key(depositor, pool_id)?)
    }

    /// Validates and stores a share record, replacing any previous one.
    #[instrument(
        level = "trace",
        skip_all,
        fields(depositor = %record.depositor, pool_id = %record.pool_id)
    )]
    pub fn set_share_record(&self, record: &ShareRecord) -> Result<(), StateError> {
        record.validate()?;
        let mut batch = Batch::new();
        batch.put_key_value(share_key(&record.depositor, &record.pool_id)?, record)?;
        batch.put_key_value_bytes(
            pool_index_key(&record.pool_id, &record.depositor)?,
            Vec::new(),
        );
        self.write(batch)
    }

    /// Removes the shares of `depositor` in the pool `pool_id`, if any.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_share_record(
        &self,
        depositor: &Address,
        pool_id: &str,
    ) -> Result<(), StateError> {
        let mut batch = Batch::new();
        batch.delete_key(share_key(depositor, pool_id)?);
        batch.delete_key(pool_index_key(pool_id, depositor)?);
        self.write(batch)
    }

    /// Stores a mutated share record, or removes it once every share has been withdrawn.
    pub fn update_share_record(&self, record: &ShareRecord) -> Result<(), StateError> {
        if record.is_drained() {
            debug!(
                depositor = %record.depositor,
                pool_id = %record.pool_id,
                "removing drained share record"
            );
            self.delete_share_record(&record.depositor, &record.pool_id)
        } else {
            self.set_share_record(record)
        }
    }

    /// Reads every share record, ordered by depositor then pool.
    pub fn share_records(&self) -> Result<ShareRecords, StateError> {
        self.read_all(&[KeyTag::ShareByDepositor as u8])
    }

    /// Reads the share records of `depositor`, ordered by pool.
    pub fn share_records_by_depositor(
        &self,
        depositor: &Address,
    ) -> Result<ShareRecords, StateError> {
        let mut prefix = vec![KeyTag::ShareByDepositor as u8];
        prefix.extend(bcs::to_bytes(depositor)?);
        self.read_all(&prefix)
    }

    /// Reads the share records of the pool `pool_id`, ordered by depositor.
    pub fn share_records_by_pool(&self, pool_id: &str) -> Result<ShareRecords, StateError> {
        let mut prefix = vec![KeyTag::ShareByPool as u8];
        prefix.extend(bcs::to_bytes(pool_id)?);
        let keys = self
            .store
            .find_keys_by_prefix(&prefix)
            .map_err(StateError::store)?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let depositor = bcs::from_bytes::<Address>(&key)?;
            let record = self.share_record(&depositor, pool_id)?.ok_or_else(|| {
                StateError::MissingIndexedShareRecord {
                    depositor: depositor.clone(),
                    pool_id: pool_id.to_string(),
                }
            })?;
            records.push(record);
        }
        Ok(records.into())
    }

    /// Validates a genesis state and loads it in a single batch, replacing the
    /// parameters and every record already in the store.
    #[instrument(level = "trace", skip_all)]
    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), StateError> {
        genesis.validate()?;
        let mut batch = Batch::new();
        for tag in [KeyTag::Pool, KeyTag::ShareByDepositor, KeyTag::ShareByPool] {
            batch.delete_key_prefix(vec![tag as u8]);
        }
        batch.put_key_value(vec![KeyTag::Params as u8], &genesis.params)?;
        for record in genesis.pool_records.iter() {
            batch.put_key_value(pool_key(&record.pool_id)?, record)?;
        }
        for record in genesis.share_records.iter() {
            batch.put_key_value(share_key(&record.depositor, &record.pool_id)?, record)?;
            batch.put_key_value_bytes(
                pool_index_key(&record.pool_id, &record.depositor)?,
                Vec::new(),
            );
        }
        debug!(
            pools = genesis.pool_records.len(),
            share_records = genesis.share_records.len(),
            "loading swap genesis state"
        );
        self.write(batch)
    }

    /// Collects the parameters and every record into a genesis state.
    pub fn export_genesis(&self) -> Result<GenesisState, StateError> {
        Ok(GenesisState::new(
            self.params()?,
            self.pools()?,
            self.share_records()?,
        ))
    }

    fn read<V: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<V>, StateError> {
        let bytes = self.store.read_value_bytes(key).map_err(StateError::store)?;
        Ok(bytes.map(|bytes| bcs::from_bytes(&bytes)).transpose()?)
    }

    fn read_all<V, C>(&self, prefix: &[u8]) -> Result<C, StateError>
    where
        V: DeserializeOwned,
        C: FromIterator<V>,
    {
        let key_values = self
            .store
            .find_key_values_by_prefix(prefix)
            .map_err(StateError::store)?;
        trace!(count = key_values.len(), "read ledger entries");
        key_values
            .into_iter()
            .map(|(_, value)| Ok(bcs::from_bytes::<V>(&value)?))
            .collect()
    }

    fn write(&self, batch: Batch) -> Result<(), StateError> {
        trace!(operations = batch.len(), "writing ledger batch");
        self.store.write_batch(batch).map_err(StateError::store)
    }
}

fn pool_key(pool_id: &str) -> Result<Vec<u8>, bcs::Error> {
    let mut key = vec![KeyTag::Pool as u8];
    bcs::serialize_into(&mut key, pool_id)?;
    Ok(key)
}

// Every part is length-prefixed, so the key of a depositor is a prefix of the keys of its
// share records.
fn share_key(depositor: &Address, pool_id: &str) -> Result<Vec<u8>, bcs::Error> {
    let mut key = vec![KeyTag::ShareByDepositor as u8];
    bcs::serialize_into(&mut key, depositor)?;
    bcs::serialize_into(&mut key, pool_id)?;
    Ok(key)
}

fn pool_index_key(pool_id: &str, depositor: &Address) -> Result<Vec<u8>, bcs::Error> {
    let mut key = vec![KeyTag::ShareByPool as u8];
    bcs::serialize_into(&mut key, pool_id)?;
    bcs::serialize_into(&mut key, depositor)?;
    Ok(key)
}
