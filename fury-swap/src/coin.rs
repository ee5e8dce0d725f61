// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ensure, error::ValidationError, int::Int, pool_id::POOL_ID_SEPARATOR};

/// The maximum length of a denomination, in bytes.
pub const MAX_DENOM_LENGTH: usize = 128;

/// An amount of a single asset.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// The denomination naming the asset.
    pub denom: String,
    /// The amount, as a decimal string once encoded.
    pub amount: Int,
}

impl Coin {
    /// Creates a coin of `amount` units of `denom`.
    pub fn new(denom: impl Into<String>, amount: impl Into<Int>) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Checks that `denom` can take part in a pool identifier.
pub fn validate_denom(denom: &str) -> Result<(), ValidationError> {
    ensure!(
        !denom.is_empty()
            && denom.len() <= MAX_DENOM_LENGTH
            && !denom.contains(POOL_ID_SEPARATOR)
            && !denom.chars().any(char::is_whitespace),
        ValidationError::InvalidDenom {
            denom: denom.to_string()
        }
    );
    Ok(())
}
