// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Parameters of the swap module.

use std::{
    collections::HashSet,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use crate::{
    coin::validate_denom,
    ensure,
    error::ValidationError,
    pool_id::{ordered_denoms, pool_id},
    rate::Rate,
};

#[cfg(test)]
#[path = "unit_tests/params_tests.rs"]
mod params_tests;

/// A pair of denominations for which a pool may be created.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct AllowedPool {
    /// The lesser denomination.
    pub token_a: String,
    /// The greater denomination.
    pub token_b: String,
}

impl AllowedPool {
    /// Allows the pool of `token_a` and `token_b`, given in any order.
    pub fn new(token_a: &str, token_b: &str) -> Self {
        let (token_a, token_b) = ordered_denoms(token_a, token_b);
        AllowedPool {
            token_a: token_a.to_string(),
            token_b: token_b.to_string(),
        }
    }

    /// The canonical identifier of the pool.
    pub fn name(&self) -> String {
        pool_id(&self.token_a, &self.token_b)
    }

    /// Checks both denominations and their order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_denom(&self.token_a)?;
        validate_denom(&self.token_b)?;
        ensure!(
            self.token_a != self.token_b,
            ValidationError::SameTokens {
                token_a: self.token_a.clone(),
                token_b: self.token_b.clone(),
            }
        );
        ensure!(
            self.token_a < self.token_b,
            ValidationError::UnorderedTokens {
                token_a: self.token_a.clone(),
                token_b: self.token_b.clone(),
            }
        );
        Ok(())
    }
}

/// The pools that may be created, each listed once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedPools(pub Vec<AllowedPool>);

impl AllowedPools {
    /// Validates every pool, then checks that none is listed twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for pool in &self.0 {
            pool.validate()?;
            let name = pool.name();
            ensure!(
                !seen.contains(&name),
                ValidationError::DuplicateAllowedPool { name }
            );
            seen.insert(name);
        }
        Ok(())
    }
}

impl Deref for AllowedPools {
    type Target = Vec<AllowedPool>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AllowedPools {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<AllowedPool>> for AllowedPools {
    fn from(pools: Vec<AllowedPool>) -> Self {
        AllowedPools(pools)
    }
}

/// The parameters of the swap module.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// The pools that may be created.
    pub allowed_pools: AllowedPools,
    /// The fee taken on every swap, strictly lower than one.
    pub swap_fee: Rate,
}

impl Params {
    /// Creates parameters.
    pub fn new(allowed_pools: impl Into<AllowedPools>, swap_fee: Rate) -> Self {
        Params {
            allowed_pools: allowed_pools.into(),
            swap_fee,
        }
    }

    /// Checks the allowed pools and the swap fee.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.allowed_pools.validate()?;
        ensure!(
            self.swap_fee < Rate::ONE,
            ValidationError::InvalidSwapFee {
                swap_fee: self.swap_fee
            }
        );
        Ok(())
    }

    /// Whether a pool of `denom_a` and `denom_b`, in any order, may be created.
    pub fn is_allowed(&self, denom_a: &str, denom_b: &str) -> bool {
        let name = pool_id(denom_a, denom_b);
        self.allowed_pools.iter().any(|pool| pool.name() == name)
    }
}
