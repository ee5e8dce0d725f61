// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Two-asset reserves, and the live pools that hold them.

use std::collections::BTreeSet;

use crate::{
    coin::{validate_denom, Coin},
    ensure,
    error::ValidationError,
    int::Int,
    pool_id::pool_id,
};

/// The reserves of exactly two distinct assets, the lesser denomination first.
///
/// Building one is the only way to pick which asset is "lesser" and which is "greater",
/// so every record derived from it agrees with [`pool_id`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ReservePair {
    lesser: Coin,
    greater: Coin,
}

impl ReservePair {
    /// Orders the reserves of two distinct assets, given in any order.
    pub fn new(reserve_a: Coin, reserve_b: Coin) -> Result<Self, ValidationError> {
        validate_denom(&reserve_a.denom)?;
        validate_denom(&reserve_b.denom)?;
        ensure!(
            reserve_a.denom != reserve_b.denom,
            ValidationError::ArityMismatch { denominations: 1 }
        );
        let (lesser, greater) = if reserve_a.denom < reserve_b.denom {
            (reserve_a, reserve_b)
        } else {
            (reserve_b, reserve_a)
        };
        Ok(ReservePair { lesser, greater })
    }

    /// Builds a pair out of any number of coins, failing unless there are exactly two
    /// distinct denominations.
    pub fn from_coins(coins: impl IntoIterator<Item = Coin>) -> Result<Self, ValidationError> {
        let coins = coins.into_iter().collect::<Vec<_>>();
        let denominations = coins
            .iter()
            .map(|coin| coin.denom.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        ensure!(
            coins.len() == 2 && denominations == 2,
            ValidationError::ArityMismatch { denominations }
        );
        let mut coins = coins.into_iter();
        match (coins.next(), coins.next()) {
            (Some(reserve_a), Some(reserve_b)) => Self::new(reserve_a, reserve_b),
            _ => Err(ValidationError::ArityMismatch { denominations }),
        }
    }

    /// The reserve of the lesser denomination.
    pub fn lesser(&self) -> &Coin {
        &self.lesser
    }

    /// The reserve of the greater denomination.
    pub fn greater(&self) -> &Coin {
        &self.greater
    }

    /// The canonical identifier of the pool holding these reserves.
    pub fn pool_id(&self) -> String {
        pool_id(&self.lesser.denom, &self.greater.denom)
    }

    /// Splits the pair into its lesser and greater reserves.
    pub fn into_coins(self) -> (Coin, Coin) {
        (self.lesser, self.greater)
    }
}

/// A live two-asset pool, as maintained by the swap logic.
///
/// The pricing curve, fees and slippage are the implementor's business; a
/// [`crate::PoolRecord`] only captures the reserves and the issued shares.
pub trait ReservePool {
    /// The current reserves of the pool.
    fn reserves(&self) -> ReservePair;

    /// The number of shares currently issued by the pool.
    fn total_shares(&self) -> Int;
}
