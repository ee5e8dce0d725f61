// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-negative fixed-point fraction, such as a fee rate.
///
/// There are [`Rate::DECIMAL_PLACES`] digits after the point. [`Rate::ONE`] is `1.0`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default, Debug)]
pub struct Rate(u128);

#[derive(Serialize, Deserialize)]
#[serde(rename = "Rate")]
struct RateString(String);

#[derive(Serialize, Deserialize)]
#[serde(rename = "Rate")]
struct RateU128(u128);

impl Serialize for Rate {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            RateString(self.to_string()).serialize(serializer)
        } else {
            RateU128(self.0).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: serde::de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let RateString(s) = RateString::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            Ok(Rate(RateU128::deserialize(deserializer)?.0))
        }
    }
}

impl Rate {
    /// The base-10 exponent of the smallest representable step.
    pub const DECIMAL_PLACES: u8 = 18;

    /// Zero.
    pub const ZERO: Rate = Rate(0);

    /// One whole unit.
    pub const ONE: Rate = Rate(10u128.pow(Rate::DECIMAL_PLACES as u32));

    /// Returns a rate of `per_mille` thousandths, or the maximum value if saturated.
    pub const fn from_per_mille(per_mille: u128) -> Rate {
        Rate(10u128.pow(Rate::DECIMAL_PLACES as u32 - 3).saturating_mul(per_mille))
    }

    /// Returns a rate of `basis_points` ten-thousandths, or the maximum value if saturated.
    pub const fn from_basis_points(basis_points: u128) -> Rate {
        Rate(10u128.pow(Rate::DECIMAL_PLACES as u32 - 4).saturating_mul(basis_points))
    }

    /// The number of `10^-DECIMAL_PLACES` steps in this rate.
    pub const fn atto(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad with zeros so that there is at least one digit before the point.
        let places = Rate::DECIMAL_PLACES as usize;
        let min_digits = places + 1;
        let decimals = format!("{:0min_digits$}", self.0);
        let integer_part = &decimals[..(decimals.len() - places)];
        let fractional_part = decimals[(decimals.len() - places)..].trim_end_matches('0');
        if fractional_part.is_empty() {
            write!(f, "{integer_part}")
        } else {
            write!(f, "{integer_part}.{fractional_part}")
        }
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ParseRateError {
    #[error("cannot parse rate")]
    Parse,
    #[error("cannot represent rate: number too high")]
    TooHigh,
    #[error("cannot represent rate: too many decimal places after the point")]
    TooManyDigits,
}

impl FromStr for Rate {
    type Err = ParseRateError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut result: u128 = 0;
        let mut decimals: Option<u8> = None;
        let mut seen_digit = false;
        for char in src.trim().chars() {
            match char {
                '.' if decimals.is_some() => return Err(ParseRateError::Parse),
                '.' => decimals = Some(Rate::DECIMAL_PLACES),
                char => {
                    let digit = u128::from(char.to_digit(10).ok_or(ParseRateError::Parse)?);
                    seen_digit = true;
                    if let Some(d) = &mut decimals {
                        *d = d.checked_sub(1).ok_or(ParseRateError::TooManyDigits)?;
                    }
                    result = result
                        .checked_mul(10)
                        .and_then(|r| r.checked_add(digit))
                        .ok_or(ParseRateError::TooHigh)?;
                }
            }
        }
        if !seen_digit {
            return Err(ParseRateError::Parse);
        }
        result = result
            .checked_mul(10u128.pow(decimals.unwrap_or(Rate::DECIMAL_PLACES) as u32))
            .ok_or(ParseRateError::TooHigh)?;
        Ok(Rate(result))
    }
}
