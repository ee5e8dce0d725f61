// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Persisted records of a two-asset liquidity-pool ledger.
//!
//! A [`PoolRecord`] stores the reserves and issued shares of one pool, keyed by the
//! canonical identifier derived with [`pool_id::pool_id`]. A [`ShareRecord`] stores the
//! shares one depositor owns in one pool. Both validate themselves, and so do the
//! collections [`PoolRecords`] and [`ShareRecords`] that appear in a [`GenesisState`].
//!
//! [`SwapState`] persists validated records into any store implementing the traits of
//! [`store`], such as [`store::memory::MemoryStore`].

#![deny(missing_docs)]

pub mod address;
/// Single-asset amounts and denominations.
pub mod coin;
/// Validation failures and their classes.
pub mod error;
pub mod genesis;
pub mod int;
pub mod params;
pub mod pool_id;
/// Pool records and their collections.
pub mod pool_record;
/// Fixed-point fractions, such as the swap fee.
pub mod rate;
pub mod reserves;
/// Share records and their collections.
pub mod share_record;
pub mod state;
pub mod store;
pub mod tracing;

#[cfg(test)]
#[path = "unit_tests/test_utils.rs"]
mod test_utils;

#[doc(no_inline)]
pub use crate::{
    address::Address,
    coin::Coin,
    error::{ErrorKind, ValidationError},
    genesis::{Export, GenesisState, Import},
    int::Int,
    params::{AllowedPool, AllowedPools, Params},
    pool_record::{PoolRecord, PoolRecords},
    rate::Rate,
    reserves::{ReservePair, ReservePool},
    share_record::{ShareRecord, ShareRecords},
    state::{StateError, SwapState},
};
