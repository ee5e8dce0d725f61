// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! The exported state of the swap module, and its JSON files.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    ensure,
    error::ValidationError,
    int::Int,
    params::Params,
    pool_record::PoolRecords,
    share_record::ShareRecords,
};

#[cfg(test)]
#[path = "unit_tests/genesis_tests.rs"]
mod genesis_tests;

/// Reads a value from a JSON file.
pub trait Import: DeserializeOwned {
    /// Reads and decodes the file at `path`.
    fn read(path: &Path) -> Result<Self, std::io::Error> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(data.as_slice())?)
    }
}

/// Writes a value to a JSON file, replacing its contents.
pub trait Export: Serialize {
    /// Encodes `self` as pretty-printed JSON into the file at `path`.
    fn write(&self, path: &Path) -> Result<(), std::io::Error> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        let data = serde_json::to_string_pretty(self)?;
        writer.write_all(data.as_ref())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

/// The whole state of the swap module, as imported at genesis and exported on upgrades.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    /// The module parameters.
    pub params: Params,
    /// Every pool.
    pub pool_records: PoolRecords,
    /// Every depositor stake.
    pub share_records: ShareRecords,
}

impl Import for GenesisState {}
impl Export for GenesisState {}

impl GenesisState {
    /// Creates a genesis state.
    pub fn new(
        params: Params,
        pool_records: impl Into<PoolRecords>,
        share_records: impl Into<ShareRecords>,
    ) -> Self {
        GenesisState {
            params,
            pool_records: pool_records.into(),
            share_records: share_records.into(),
        }
    }

    /// Validates the parameters and both record sets, then checks that share records
    /// only reference known pools and add up to each pool's total shares.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.validate()?;
        self.pool_records.validate()?;
        self.share_records.validate()?;

        let mut shares_by_pool = self
            .pool_records
            .iter()
            .map(|record| (record.pool_id.as_str(), Int::zero()))
            .collect::<HashMap<_, _>>();
        for record in self.share_records.iter() {
            let Some(shares) = shares_by_pool.get_mut(record.pool_id.as_str()) else {
                return Err(ValidationError::UnknownPool {
                    depositor: record.depositor.clone(),
                    pool_id: record.pool_id.clone(),
                });
            };
            *shares = std::mem::take(shares) + &record.shares_owned;
        }
        for record in self.pool_records.iter() {
            let shares = shares_by_pool
                .remove(record.pool_id.as_str())
                .unwrap_or_default();
            ensure!(
                shares == record.total_shares,
                ValidationError::SharesMismatch {
                    pool_id: record.pool_id.clone(),
                    shares,
                    total_shares: record.total_shares.clone(),
                }
            );
        }
        Ok(())
    }
}
