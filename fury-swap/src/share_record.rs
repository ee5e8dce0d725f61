// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::HashSet,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::{address::Address, ensure, error::ValidationError, int::Int, pool_id::parse_pool_id};

#[cfg(test)]
#[path = "unit_tests/share_record_tests.rs"]
mod share_record_tests;

/// The stake of one depositor in one pool.
///
/// Unlike [`crate::PoolRecord`], the pool identifier is stored as given: it is not
/// derived from denominations, and validation only checks that it is canonical. Nothing
/// here checks that the pool exists; see [`crate::GenesisState::validate`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    /// The owner of the shares.
    pub depositor: Address,
    /// The canonical identifier of the pool.
    pub pool_id: String,
    /// The number of shares owned.
    pub shares_owned: Int,
}

impl ShareRecord {
    /// Creates the record of `depositor` owning `shares_owned` shares of `pool_id`.
    pub fn new(
        depositor: Address,
        pool_id: impl Into<String>,
        shares_owned: impl Into<Int>,
    ) -> Self {
        ShareRecord {
            depositor,
            pool_id: pool_id.into(),
            shares_owned: shares_owned.into(),
        }
    }

    /// Whether the depositor has withdrawn every share. Such a record must be removed
    /// rather than persisted.
    pub fn is_drained(&self) -> bool {
        self.shares_owned.is_zero()
    }

    /// Checks the record, reporting the first failed check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure!(!self.depositor.is_empty(), ValidationError::MissingDepositor);
        ensure!(!self.pool_id.is_empty(), ValidationError::MissingPoolId);
        parse_pool_id(&self.pool_id).map_err(|reason| ValidationError::InvalidPoolId {
            pool_id: self.pool_id.clone(),
            reason,
        })?;
        ensure!(
            self.shares_owned.is_positive(),
            ValidationError::InvalidSharesOwned {
                depositor: self.depositor.clone(),
                pool_id: self.pool_id.clone(),
                shares_owned: self.shares_owned.clone(),
            }
        );
        Ok(())
    }
}

/// A sequence of share records, at most one per depositor and pool.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareRecords(pub Vec<ShareRecord>);

impl ShareRecords {
    /// Validates every record, then checks that no depositor holds two records for the
    /// same pool.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for record in &self.0 {
            record.validate()?;
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        for record in &self.0 {
            ensure!(
                seen.insert((&record.depositor, record.pool_id.as_str())),
                ValidationError::DuplicateShareRecord {
                    depositor: record.depositor.clone(),
                    pool_id: record.pool_id.clone(),
                }
            );
        }
        Ok(())
    }
}

impl Deref for ShareRecords {
    type Target = Vec<ShareRecord>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ShareRecords {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<ShareRecord>> for ShareRecords {
    fn from(records: Vec<ShareRecord>) -> Self {
        ShareRecords(records)
    }
}

impl FromIterator<ShareRecord> for ShareRecords {
    fn from_iter<I: IntoIterator<Item = ShareRecord>>(iter: I) -> Self {
        ShareRecords(iter.into_iter().collect())
    }
}

impl IntoIterator for ShareRecords {
    type Item = ShareRecord;
    type IntoIter = std::vec::IntoIter<ShareRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
