// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

//! Coins, depositors and records shared by the unit tests.

use crate::{
    address::Address, coin::Coin, int::Int, pool_record::PoolRecord, reserves::ReservePair,
    share_record::ShareRecord,
};

pub const DEPOSITOR_1: &str = "fury1mq9qxlhze029lm0frzw2xr6hem8c3k9tu2gu2x";
pub const DEPOSITOR_2: &str = "fury1esagqd83rhqdtpy5sxhklaxgn58k2m3sa9wnu4";

pub fn depositor_1() -> Address {
    DEPOSITOR_1.parse().expect("DEPOSITOR_1 is a valid address")
}

pub fn depositor_2() -> Address {
    DEPOSITOR_2.parse().expect("DEPOSITOR_2 is a valid address")
}

pub fn ufury(amount: i64) -> Coin {
    Coin::new("ufury", amount)
}

pub fn usdx(amount: i64) -> Coin {
    Coin::new("usdx", amount)
}

pub fn hard(amount: i64) -> Coin {
    Coin::new("hard", amount)
}

pub fn int(value: i64) -> Int {
    Int::from(value)
}

/// Creates the record of a pool holding two reserves, given in any order.
pub fn pool_record(reserve_a: Coin, reserve_b: Coin, total_shares: i64) -> PoolRecord {
    let reserves = ReservePair::new(reserve_a, reserve_b).expect("reserves are a valid pair");
    PoolRecord::new(reserves, total_shares)
}

pub fn share_record(depositor: Address, pool_id: &str, shares_owned: i64) -> ShareRecord {
    ShareRecord::new(depositor, pool_id, shares_owned)
}
