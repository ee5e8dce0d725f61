// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::HashSet,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::{
    coin::Coin,
    ensure,
    error::ValidationError,
    int::Int,
    pool_id::parse_pool_id,
    reserves::{ReservePair, ReservePool},
};

#[cfg(test)]
#[path = "unit_tests/pool_record_tests.rs"]
mod pool_record_tests;

/// The persisted state of one liquidity pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// The canonical identifier of the pool, derived from the two denominations.
    pub pool_id: String,
    /// The reserve of the lesser denomination.
    pub reserves_a: Coin,
    /// The reserve of the greater denomination.
    pub reserves_b: Coin,
    /// The number of shares issued to depositors.
    pub total_shares: Int,
}

impl PoolRecord {
    /// Creates the record of a pool holding `reserves`.
    pub fn new(reserves: ReservePair, total_shares: impl Into<Int>) -> Self {
        let pool_id = reserves.pool_id();
        let (reserves_a, reserves_b) = reserves.into_coins();
        PoolRecord {
            pool_id,
            reserves_a,
            reserves_b,
            total_shares: total_shares.into(),
        }
    }

    /// Captures the current state of a live pool.
    pub fn from_pool(pool: &impl ReservePool) -> Self {
        Self::new(pool.reserves(), pool.total_shares())
    }

    /// Returns both reserves as a pair.
    pub fn reserves(&self) -> Result<ReservePair, ValidationError> {
        ReservePair::new(self.reserves_a.clone(), self.reserves_b.clone())
    }

    /// Whether every share of the pool has been withdrawn. Such a pool must be removed
    /// rather than persisted.
    pub fn is_drained(&self) -> bool {
        self.total_shares.is_zero()
    }

    /// Checks the record, reporting the first failed check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure!(!self.pool_id.is_empty(), ValidationError::EmptyPoolId);
        let (lesser, greater) =
            parse_pool_id(&self.pool_id).map_err(|reason| ValidationError::InvalidPoolId {
                pool_id: self.pool_id.clone(),
                reason,
            })?;
        ensure!(
            self.reserves_a.denom == lesser && self.reserves_b.denom == greater,
            ValidationError::ReserveMismatch {
                pool_id: self.pool_id.clone()
            }
        );
        for reserve in [&self.reserves_a, &self.reserves_b] {
            ensure!(
                reserve.amount.is_positive(),
                ValidationError::InvalidReserves {
                    pool_id: self.pool_id.clone(),
                    reserve: reserve.clone(),
                }
            );
        }
        ensure!(
            self.total_shares.is_positive(),
            ValidationError::InvalidTotalShares {
                pool_id: self.pool_id.clone(),
                total_shares: self.total_shares.clone(),
            }
        );
        Ok(())
    }
}

/// A sequence of pool records with distinct identifiers.
///
/// Order is kept as given but carries no meaning.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolRecords(pub Vec<PoolRecord>);

impl PoolRecords {
    /// Validates every record, then checks that no identifier appears twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for record in &self.0 {
            record.validate()?;
        }
        let mut seen = HashSet::with_capacity(self.0.len());
        for record in &self.0 {
            ensure!(
                seen.insert(record.pool_id.as_str()),
                ValidationError::DuplicatePoolId {
                    pool_id: record.pool_id.clone()
                }
            );
        }
        Ok(())
    }
}

impl Deref for PoolRecords {
    type Target = Vec<PoolRecord>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PoolRecords {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<PoolRecord>> for PoolRecords {
    fn from(records: Vec<PoolRecord>) -> Self {
        PoolRecords(records)
    }
}

impl FromIterator<PoolRecord> for PoolRecords {
    fn from_iter<I: IntoIterator<Item = PoolRecord>>(iter: I) -> Self {
        PoolRecords(iter.into_iter().collect())
    }
}

impl IntoIterator for PoolRecords {
    type Item = PoolRecord;
    type IntoIter = std::vec::IntoIter<PoolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
