// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use test_case::test_case;
use test_strategy::proptest;

use super::{ordered_denoms, parse_pool_id, pool_id, PoolIdError};

#[test_case("atoken", "btoken", "atoken:btoken"; "distinct first byte")]
#[test_case("aaa", "aaaa", "aaa:aaaa"; "prefix sorts first")]
#[test_case("aaaa", "aaab", "aaaa:aaab"; "last byte differs")]
#[test_case("a001", "a002", "a001:a002"; "digits")]
#[test_case("AAAA", "aaaa", "AAAA:aaaa"; "upper case sorts first")]
#[test_case("a9", "a10", "a10:a9"; "byte-wise not numeric")]
#[test_case("hard", "usdx", "hard:usdx"; "hard and usdx")]
fn test_pool_id(denom_a: &str, denom_b: &str, expected: &str) {
    assert_eq!(pool_id(denom_a, denom_b), expected);
    assert_eq!(pool_id(denom_b, denom_a), expected);
}

#[test]
fn test_ordered_denoms() {
    assert_eq!(ordered_denoms("usdx", "ufury"), ("ufury", "usdx"));
    assert_eq!(ordered_denoms("ufury", "usdx"), ("ufury", "usdx"));
}

#[test_case("ufury:usdx", Ok(("ufury", "usdx")); "canonical")]
#[test_case("", Err(PoolIdError::MissingSeparator); "empty")]
#[test_case("ufuryusdx", Err(PoolIdError::MissingSeparator); "no separator")]
#[test_case("a:b:c", Err(PoolIdError::TooManySeparators); "three denoms")]
#[test_case(":", Err(PoolIdError::EmptyDenom); "both sides empty")]
#[test_case(":usdx", Err(PoolIdError::EmptyDenom); "empty lesser")]
#[test_case("ufury:", Err(PoolIdError::EmptyDenom); "empty greater")]
#[test_case("ufury:ufury", Err(PoolIdError::DuplicateDenom); "same denom")]
#[test_case("usdx:ufury", Err(PoolIdError::Unordered); "unsorted")]
#[test_case("aaaa:AAAA", Err(PoolIdError::Unordered); "lower case before upper case")]
fn test_parse_pool_id(input: &str, expected: Result<(&str, &str), PoolIdError>) {
    assert_eq!(parse_pool_id(input), expected);
}

/// The identifier does not depend on the order of the denominations, and parses back into
/// the sorted pair.
#[proptest]
fn pool_id_is_symmetric_and_canonical(
    #[strategy("[a-m][a-zA-Z0-9/]{0,15}")] first: String,
    #[strategy("[n-z][a-zA-Z0-9/]{0,15}")] second: String,
    swap: bool,
) {
    let (denom_a, denom_b) = if swap {
        (&second, &first)
    } else {
        (&first, &second)
    };
    let id = pool_id(denom_a, denom_b);
    assert_eq!(id, pool_id(denom_b, denom_a));
    assert_eq!(parse_pool_id(&id), Ok((first.as_str(), second.as_str())));
}
