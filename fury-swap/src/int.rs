// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary-precision integers used for reserves and share counts.

use std::{fmt, iter, ops, str::FromStr};

use num_bigint::BigInt;
use num_traits::{Signed as _, Zero as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An arbitrary-precision signed integer.
///
/// Records accept any value here, including zero and negative ones, so that an invalid
/// amount survives decoding and is reported by validation instead of being clamped.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Int(BigInt);

impl Int {
    /// Returns zero.
    pub fn zero() -> Self {
        Int(BigInt::zero())
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ParseIntError {
    #[error("cannot parse integer from an empty string")]
    Empty,
    #[error("cannot parse integer from '{0}': expected decimal digits")]
    InvalidDigit(String),
}

impl FromStr for Int {
    type Err = ParseIntError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match src.as_bytes().first() {
            None => return Err(ParseIntError::Empty),
            Some(b'-') => (true, &src[1..]),
            Some(b'+') => (false, &src[1..]),
            Some(_) => (false, src),
        };
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ParseIntError::InvalidDigit(src.to_string()));
        }
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| ParseIntError::InvalidDigit(src.to_string()))?;
        Ok(Int(if negative { -magnitude } else { magnitude }))
    }
}

macro_rules! impl_from_primitive {
    ($($primitive:ty),*) => {
        $(
            impl From<$primitive> for Int {
                fn from(value: $primitive) -> Self {
                    Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(i32, i64, i128, u32, u64, u128);

impl From<BigInt> for Int {
    fn from(value: BigInt) -> Self {
        Int(value)
    }
}

impl ops::Add for Int {
    type Output = Int;

    fn add(self, other: Int) -> Int {
        Int(self.0 + other.0)
    }
}

impl<'a> ops::Add<&'a Int> for Int {
    type Output = Int;

    fn add(self, other: &'a Int) -> Int {
        Int(self.0 + &other.0)
    }
}

impl ops::Sub for Int {
    type Output = Int;

    fn sub(self, other: Int) -> Int {
        Int(self.0 - other.0)
    }
}

impl ops::Neg for Int {
    type Output = Int;

    fn neg(self) -> Int {
        Int(-self.0)
    }
}

impl<'a> iter::Sum<&'a Int> for Int {
    fn sum<I: Iterator<Item = &'a Int>>(iter: I) -> Self {
        iter.fold(Int::zero(), |total, value| total + value)
    }
}
