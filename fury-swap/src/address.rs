// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Depositor addresses.

use std::{fmt, str::FromStr};

use bech32::{FromBase32 as _, ToBase32 as _, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The human-readable prefix of account addresses.
pub const ADDRESS_PREFIX: &str = "fury";

/// An account address: opaque bytes, rendered as bech32 text with [`ADDRESS_PREFIX`].
///
/// The empty address can be decoded from an empty string so that records missing their
/// depositor reach validation, which rejects them.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address(Vec<u8>);

impl Address {
    /// Wraps the raw bytes of an address.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Address(bytes.into())
    }

    /// Whether the address has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let encoded = bech32::encode(ADDRESS_PREFIX, self.0.to_base32(), Variant::Bech32)
            .map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// An error decoding an [`Address`] from text.
#[derive(Clone, Debug, Error, PartialEq)]
#[allow(missing_docs)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,
    #[error("invalid bech32 address '{address}': {error}")]
    Bech32 {
        address: String,
        error: bech32::Error,
    },
    #[error("invalid address prefix '{prefix}', expected '{expected}'")]
    Prefix {
        prefix: String,
        expected: &'static str,
    },
    #[error("address '{0}' does not use the bech32 checksum variant")]
    Variant(String),
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AddressError::Empty);
        }
        let bech32_error = |error| AddressError::Bech32 {
            address: s.to_string(),
            error,
        };
        let (prefix, data, variant) = bech32::decode(s).map_err(bech32_error)?;
        if prefix != ADDRESS_PREFIX {
            return Err(AddressError::Prefix {
                prefix,
                expected: ADDRESS_PREFIX,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::Variant(s.to_string()));
        }
        let bytes = Vec::<u8>::from_base32(&data).map_err(bech32_error)?;
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            if s.is_empty() {
                return Ok(Address::default());
            }
            s.parse().map_err(serde::de::Error::custom)
        } else {
            Ok(Address(Vec::<u8>::deserialize(deserializer)?))
        }
    }
}
