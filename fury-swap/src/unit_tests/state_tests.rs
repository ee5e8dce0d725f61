// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use assert_matches::assert_matches;

use super::{pool_index_key, pool_key, share_key, StateError, SwapState};
use crate::{
    error::ValidationError,
    genesis::GenesisState,
    int::Int,
    params::{AllowedPool, Params},
    rate::Rate,
    store::{memory::MemoryStore, Batch, WritableKeyValueStore},
    test_utils::{depositor_1, depositor_2, hard, pool_record, share_record, ufury, usdx},
};

fn state() -> SwapState<MemoryStore> {
    SwapState::new(MemoryStore::new())
}

#[test]
fn test_keys_are_tagged_and_length_prefixed() {
    assert_eq!(pool_key("a:b").unwrap(), vec![0, 3, b'a', b':', b'b']);

    let depositor = depositor_1();
    let share = share_key(&depositor, "a:b").unwrap();
    assert_eq!(share[0], 1);
    assert_eq!(share[1] as usize, depositor.as_bytes().len());
    assert!(share.ends_with(&[3, b'a', b':', b'b']));

    let index = pool_index_key("a:b", &depositor).unwrap();
    assert!(index.starts_with(&[2, 3, b'a', b':', b'b']));
    assert!(index.ends_with(depositor.as_bytes()));
}

#[test]
fn test_set_and_read_pool() {
    let state = state();
    let record = pool_record(ufury(1_000_000), usdx(5_000_000), 3_000_000);

    assert_eq!(state.pool("ufury:usdx").unwrap(), None);
    state.set_pool(&record).unwrap();
    assert_eq!(state.pool("ufury:usdx").unwrap(), Some(record.clone()));
    assert_eq!(state.pools().unwrap().0, vec![record]);

    state.delete_pool("ufury:usdx").unwrap();
    assert_eq!(state.pool("ufury:usdx").unwrap(), None);
    assert!(state.store().is_empty().unwrap());
}

#[test]
fn test_invalid_pool_is_not_written() {
    let state = state();
    let mut record = pool_record(ufury(1_000_000), usdx(5_000_000), 3_000_000);
    record.reserves_a.amount = Int::zero();

    assert_matches!(
        state.set_pool(&record),
        Err(StateError::Validation(ValidationError::InvalidReserves { .. }))
    );
    assert!(state.store().is_empty().unwrap());
}

#[test]
fn test_update_pool_removes_drained_pool() {
    let state = state();
    let mut record = pool_record(ufury(1_000_000), usdx(5_000_000), 3_000_000);
    state.update_pool(&record).unwrap();
    assert!(state.pool("ufury:usdx").unwrap().is_some());

    record.total_shares = Int::zero();
    state.update_pool(&record).unwrap();
    assert_eq!(state.pool("ufury:usdx").unwrap(), None);
}

#[test]
fn test_pools_are_listed_in_key_order() {
    let state = state();
    let ufury_usdx = pool_record(ufury(1), usdx(1), 1);
    let hard_usdx = pool_record(hard(1), usdx(1), 1);
    let hard_ufury = pool_record(hard(1), ufury(1), 1);
    for record in [&ufury_usdx, &hard_usdx, &hard_ufury] {
        state.set_pool(record).unwrap();
    }
    // Keys are length-prefixed: shorter identifiers come first.
    assert_eq!(
        state.pools().unwrap().0,
        vec![hard_usdx, hard_ufury, ufury_usdx]
    );
}

#[test]
fn test_share_records_by_depositor_and_by_pool() {
    let state = state();
    let records = [
        share_record(depositor_1(), "ufury:usdx", 20),
        share_record(depositor_1(), "hard:usdx", 10),
        share_record(depositor_2(), "ufury:usdx", 5),
    ];
    for record in &records {
        state.set_share_record(record).unwrap();
    }

    assert_eq!(
        state.share_record(&depositor_1(), "hard:usdx").unwrap(),
        Some(records[1].clone())
    );
    assert_eq!(state.share_record(&depositor_2(), "hard:usdx").unwrap(), None);

    let by_depositor = state.share_records_by_depositor(&depositor_1()).unwrap();
    assert_eq!(by_depositor.0, vec![records[1].clone(), records[0].clone()]);

    let by_pool = state.share_records_by_pool("ufury:usdx").unwrap();
    assert_eq!(by_pool.len(), 2);
    assert!(by_pool.iter().all(|record| record.pool_id == "ufury:usdx"));
    assert!(by_pool.contains(&records[0]));
    assert!(by_pool.contains(&records[2]));

    assert_eq!(state.share_records().unwrap().len(), 3);
}

#[test]
fn test_update_share_record_removes_index_entry() {
    let state = state();
    let mut record = share_record(depositor_1(), "ufury:usdx", 20);
    state.update_share_record(&record).unwrap();
    assert_eq!(state.share_records_by_pool("ufury:usdx").unwrap().len(), 1);

    record.shares_owned = Int::zero();
    state.update_share_record(&record).unwrap();
    assert_eq!(state.share_record(&depositor_1(), "ufury:usdx").unwrap(), None);
    assert!(state.share_records_by_pool("ufury:usdx").unwrap().is_empty());
    assert!(state.store().is_empty().unwrap());
}

#[test]
fn test_invalid_share_record_is_not_written() {
    let state = state();
    let record = share_record(depositor_1(), "usdx:ufury", 20);
    assert_matches!(
        state.set_share_record(&record),
        Err(StateError::Validation(ValidationError::InvalidPoolId { .. }))
    );
    assert!(state.store().is_empty().unwrap());
}

#[test]
fn test_dangling_index_entry_is_reported() {
    let state = state();
    let mut batch = Batch::new();
    batch.put_key_value_bytes(pool_index_key("ufury:usdx", &depositor_1()).unwrap(), vec![]);
    state.store().write_batch(batch).unwrap();

    assert_matches!(
        state.share_records_by_pool("ufury:usdx"),
        Err(StateError::MissingIndexedShareRecord { pool_id, .. }) if pool_id == "ufury:usdx"
    );
}

#[test]
fn test_params_default_until_set() {
    let state = state();
    assert_eq!(state.params().unwrap(), Params::default());

    let params = Params::new(vec![AllowedPool::new("ufury", "usdx")], Rate::from_per_mille(3));
    state.set_params(&params).unwrap();
    assert_eq!(state.params().unwrap(), params);

    let invalid = Params::new(params.allowed_pools.clone(), Rate::ONE);
    assert_matches!(
        state.set_params(&invalid),
        Err(StateError::Validation(ValidationError::InvalidSwapFee { .. }))
    );
    assert_eq!(state.params().unwrap(), params);
}

#[test]
fn test_genesis_round_trip() {
    let genesis = GenesisState::new(
        Params::new(vec![AllowedPool::new("ufury", "usdx")], Rate::from_per_mille(3)),
        vec![
            pool_record(hard(1_000_000), usdx(2_000_000), 1_000_000),
            pool_record(ufury(1_000_000), usdx(5_000_000), 3_000_000),
        ],
        vec![
            share_record(depositor_1(), "hard:usdx", 1_000_000),
            share_record(depositor_1(), "ufury:usdx", 2_000_000),
            share_record(depositor_2(), "ufury:usdx", 1_000_000),
        ],
    );
    let state = state();
    state.init_genesis(&genesis).unwrap();

    let exported = state.export_genesis().unwrap();
    assert!(exported.validate().is_ok());
    assert_eq!(exported.params, genesis.params);

    let mut pools = exported.pool_records.0.clone();
    pools.sort_by(|a, b| a.pool_id.cmp(&b.pool_id));
    assert_eq!(pools, genesis.pool_records.0);

    let mut shares = exported.share_records.0.clone();
    shares.sort_by(|a, b| (&a.depositor, &a.pool_id).cmp(&(&b.depositor, &b.pool_id)));
    let mut expected = genesis.share_records.0.clone();
    expected.sort_by(|a, b| (&a.depositor, &a.pool_id).cmp(&(&b.depositor, &b.pool_id)));
    assert_eq!(shares, expected);
}

#[test]
fn test_inconsistent_genesis_is_not_loaded() {
    let genesis = GenesisState::new(
        Params::default(),
        vec![pool_record(ufury(1), usdx(1), 10)],
        vec![share_record(depositor_1(), "ufury:usdx", 9)],
    );
    let state = state();
    assert_matches!(
        state.init_genesis(&genesis),
        Err(StateError::Validation(ValidationError::SharesMismatch { .. }))
    );
    assert!(state.store().is_empty().unwrap());
}

#[test]
fn test_genesis_replaces_previous_state() {
    let first = GenesisState::new(
        Params::new(vec![AllowedPool::new("ufury", "usdx")], Rate::from_per_mille(3)),
        vec![pool_record(ufury(1_000_000), usdx(5_000_000), 3_000_000)],
        vec![
            share_record(depositor_1(), "ufury:usdx", 2_000_000),
            share_record(depositor_2(), "ufury:usdx", 1_000_000),
        ],
    );
    let second = GenesisState::new(
        Params::new(vec![AllowedPool::new("hard", "usdx")], Rate::from_basis_points(25)),
        vec![pool_record(hard(10), usdx(40), 20)],
        vec![share_record(depositor_2(), "hard:usdx", 20)],
    );
    let state = state();
    state.init_genesis(&first).unwrap();
    state.init_genesis(&second).unwrap();

    assert_eq!(state.export_genesis().unwrap(), second);
    assert_eq!(state.pool("ufury:usdx").unwrap(), None);
    assert!(state.share_records_by_pool("ufury:usdx").unwrap().is_empty());
    assert!(state
        .share_records_by_depositor(&depositor_1())
        .unwrap()
        .is_empty());
    // Params, one pool, one share record and its index entry.
    assert_eq!(state.store().len().unwrap(), 4);
}

#[test]
fn test_rejected_genesis_keeps_previous_state() {
    let genesis = GenesisState::new(
        Params::default(),
        vec![pool_record(ufury(1), usdx(1), 10)],
        vec![share_record(depositor_1(), "ufury:usdx", 10)],
    );
    let inconsistent = GenesisState::new(
        Params::default(),
        vec![pool_record(hard(1), usdx(1), 10)],
        vec![share_record(depositor_1(), "ufury:usdx", 10)],
    );
    let state = state();
    state.init_genesis(&genesis).unwrap();
    assert_matches!(
        state.init_genesis(&inconsistent),
        Err(StateError::Validation(ValidationError::UnknownPool { .. }))
    );
    assert_eq!(state.export_genesis().unwrap(), genesis);
}
