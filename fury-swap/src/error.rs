// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

use crate::{address::Address, coin::Coin, int::Int, pool_id::PoolIdError, rate::Rate};

/// Returns early with the error `$e` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            return Err($e);
        }
    };
}

/// The classes of validation failures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The identifier of a pool record is empty or not canonical.
    MalformedId,
    /// A pool identifier does not name the denominations of the reserves next to it.
    ReserveMismatch,
    /// A reserve, a total share count or an owned share count is zero or negative.
    NonPositiveAmount,
    /// The depositor or the pool identifier of a share record is missing.
    EmptyIdentity,
    /// Two records of a collection have the same identity.
    DuplicateKey,
    /// Reserves were given with other than two distinct denominations.
    ArityMismatch,
    /// A denomination cannot take part in a pool identifier.
    InvalidDenom,
    /// The module parameters are inconsistent.
    InvalidParams,
    /// Pool records and share records disagree with each other.
    InconsistentGenesis,
}

/// A record, a collection of records or a genesis state failed validation.
///
/// The messages are matched verbatim by clients and must not change.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("poolID must be set")]
    EmptyPoolId,

    #[error("poolID must be set")]
    MissingPoolId,

    #[error("poolID '{pool_id}' is invalid")]
    InvalidPoolId {
        pool_id: String,
        #[source]
        reason: PoolIdError,
    },

    #[error("poolID '{pool_id}' does not match reserves")]
    ReserveMismatch { pool_id: String },

    #[error("pool '{pool_id}' has invalid reserves: {reserve}")]
    InvalidReserves { pool_id: String, reserve: Coin },

    #[error("pool '{pool_id}' has invalid total shares: {total_shares}")]
    InvalidTotalShares { pool_id: String, total_shares: Int },

    #[error("depositor must be set")]
    MissingDepositor,

    #[error("depositor '{depositor}' and pool '{pool_id}' has invalid total shares: {shares_owned}")]
    InvalidSharesOwned {
        depositor: Address,
        pool_id: String,
        shares_owned: Int,
    },

    #[error("duplicate poolID '{pool_id}'")]
    DuplicatePoolId { pool_id: String },

    #[error("duplicate depositor '{depositor}' and poolID '{pool_id}'")]
    DuplicateShareRecord { depositor: Address, pool_id: String },

    #[error("reserves must have two denominations")]
    ArityMismatch { denominations: usize },

    #[error("invalid denom '{denom}'")]
    InvalidDenom { denom: String },

    #[error("pool cannot have two tokens of the same type, received '{token_a}' and '{token_b}'")]
    SameTokens { token_a: String, token_b: String },

    #[error("invalid token order: '{token_b}' must come before '{token_a}'")]
    UnorderedTokens { token_a: String, token_b: String },

    #[error("duplicate pool: {name}")]
    DuplicateAllowedPool { name: String },

    #[error("invalid swap fee: {swap_fee} must be less than 1.0")]
    InvalidSwapFee { swap_fee: Rate },

    #[error("share record for depositor '{depositor}' references unknown pool '{pool_id}'")]
    UnknownPool { depositor: Address, pool_id: String },

    #[error("total depositor shares {shares} not equal to pool '{pool_id}' total shares {total_shares}")]
    SharesMismatch {
        pool_id: String,
        shares: Int,
        total_shares: Int,
    },
}

impl ValidationError {
    /// Returns the class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyPoolId | ValidationError::InvalidPoolId { .. } => {
                ErrorKind::MalformedId
            }
            ValidationError::ReserveMismatch { .. } => ErrorKind::ReserveMismatch,
            ValidationError::InvalidReserves { .. }
            | ValidationError::InvalidTotalShares { .. }
            | ValidationError::InvalidSharesOwned { .. } => ErrorKind::NonPositiveAmount,
            ValidationError::MissingPoolId | ValidationError::MissingDepositor => {
                ErrorKind::EmptyIdentity
            }
            ValidationError::DuplicatePoolId { .. }
            | ValidationError::DuplicateShareRecord { .. } => ErrorKind::DuplicateKey,
            ValidationError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            ValidationError::InvalidDenom { .. } => ErrorKind::InvalidDenom,
            ValidationError::SameTokens { .. }
            | ValidationError::UnorderedTokens { .. }
            | ValidationError::DuplicateAllowedPool { .. }
            | ValidationError::InvalidSwapFee { .. } => ErrorKind::InvalidParams,
            ValidationError::UnknownPool { .. } | ValidationError::SharesMismatch { .. } => {
                ErrorKind::InconsistentGenesis
            }
        }
    }
}
