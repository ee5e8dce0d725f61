// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Canonical identifiers of two-asset pools.
//!
//! A pool identifier has the form `<lesser>:<greater>`, where the two denominations are
//! distinct and sorted byte-wise. Deriving it from `(a, b)` or from `(b, a)` gives the
//! same value, so the same pair of assets can only ever be recorded once.

use thiserror::Error;

use crate::ensure;

/// The separator between the two denominations of a pool identifier.
pub const POOL_ID_SEPARATOR: char = ':';

#[cfg(test)]
#[path = "unit_tests/pool_id_tests.rs"]
mod pool_id_tests;

/// The reasons why a string is not a canonical pool identifier.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum PoolIdError {
    /// No `:` in the identifier.
    #[error("pool identifier has no ':' separator")]
    MissingSeparator,
    /// More than one `:` in the identifier.
    #[error("pool identifier has more than one ':' separator")]
    TooManySeparators,
    /// One of the sides is empty.
    #[error("pool identifier has an empty denomination")]
    EmptyDenom,
    /// Both sides name the same denomination.
    #[error("pool identifier repeats the same denomination")]
    DuplicateDenom,
    /// The sides are not sorted.
    #[error("pool identifier denominations are not in ascending order")]
    Unordered,
}

/// Orders two denominations, lesser first.
///
/// `str` ordering is byte-wise lexicographic: `"AAAA"` comes before `"aaaa"`, and `"a10"`
/// before `"a9"`.
pub fn ordered_denoms<'a>(denom_a: &'a str, denom_b: &'a str) -> (&'a str, &'a str) {
    if denom_a <= denom_b {
        (denom_a, denom_b)
    } else {
        (denom_b, denom_a)
    }
}

/// Returns the canonical identifier of the pool holding `denom_a` and `denom_b`, in
/// either order.
///
/// The denominations are expected to be distinct and free of [`POOL_ID_SEPARATOR`];
/// see [`crate::coin::validate_denom`].
pub fn pool_id(denom_a: &str, denom_b: &str) -> String {
    let (lesser, greater) = ordered_denoms(denom_a, denom_b);
    format!("{lesser}{POOL_ID_SEPARATOR}{greater}")
}

/// Splits a canonical pool identifier into its lesser and greater denominations.
pub fn parse_pool_id(pool_id: &str) -> Result<(&str, &str), PoolIdError> {
    let mut tokens = pool_id.split(POOL_ID_SEPARATOR);
    let (Some(lesser), Some(greater)) = (tokens.next(), tokens.next()) else {
        return Err(PoolIdError::MissingSeparator);
    };
    ensure!(tokens.next().is_none(), PoolIdError::TooManySeparators);
    ensure!(
        !lesser.is_empty() && !greater.is_empty(),
        PoolIdError::EmptyDenom
    );
    ensure!(lesser != greater, PoolIdError::DuplicateDenom);
    ensure!(lesser < greater, PoolIdError::Unordered);
    Ok((lesser, greater))
}
