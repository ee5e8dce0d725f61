// Copyright (c) Fury Network
// SPDX-License-Identifier: Apache-2.0

use super::{
    get_upper_bound, memory::MemoryStore, Batch, ReadableKeyValueStore, WritableKeyValueStore,
    WriteOperation,
};

#[test]
fn test_upper_bound() {
    assert_eq!(get_upper_bound(&[]), None);
    assert_eq!(get_upper_bound(&[255]), None);
    assert_eq!(get_upper_bound(&[255, 255, 255, 255]), None);
    assert_eq!(get_upper_bound(&[0, 2]), Some(vec![0, 3]));
    assert_eq!(get_upper_bound(&[0, 255]), Some(vec![1]));
    assert_eq!(get_upper_bound(&[255, 0]), Some(vec![255, 1]));
}

#[test]
fn test_batch_keeps_operation_order() {
    let mut batch = Batch::new();
    assert_eq!(batch.len(), 0);
    batch.put_key_value_bytes(vec![1], vec![10]);
    batch.delete_key(vec![1]);
    batch.delete_key_prefix(vec![2]);
    batch.put_key_value(vec![3], &"three").unwrap();
    assert_eq!(batch.len(), 4);
    assert_eq!(
        batch.operations,
        vec![
            WriteOperation::Put {
                key: vec![1],
                value: vec![10]
            },
            WriteOperation::Delete { key: vec![1] },
            WriteOperation::DeletePrefix {
                key_prefix: vec![2]
            },
            WriteOperation::Put {
                key: vec![3],
                value: bcs::to_bytes("three").unwrap()
            },
        ]
    );
}

#[test]
fn test_memory_store_reads_and_writes() {
    let store = MemoryStore::new();
    assert!(store.is_empty().unwrap());

    let mut batch = Batch::new();
    batch.put_key_value_bytes(vec![0, 1], vec![1]);
    batch.put_key_value_bytes(vec![0, 2], vec![2]);
    batch.put_key_value_bytes(vec![1, 0], vec![3]);
    batch.put_key_value(vec![2], &42u64).unwrap();
    store.write_batch(batch).unwrap();

    assert_eq!(store.len().unwrap(), 4);
    assert_eq!(store.read_value_bytes(&[0, 1]).unwrap(), Some(vec![1]));
    assert_eq!(store.read_value_bytes(&[0]).unwrap(), None);
    assert_eq!(store.read_value_bytes(&[1, 0]).unwrap(), Some(vec![3]));
    assert_eq!(store.read_value_bytes(&[1]).unwrap(), None);
    let value = store.read_value_bytes(&[2]).unwrap().unwrap();
    assert_eq!(bcs::from_bytes::<u64>(&value).unwrap(), 42);
}

#[test]
fn test_memory_store_prefix_search() {
    let store = MemoryStore::new();
    let mut batch = Batch::new();
    for key in [vec![0, 255, 1], vec![0, 1], vec![1], vec![0, 255], vec![0]] {
        batch.put_key_value_bytes(key.clone(), key);
    }
    store.write_batch(batch).unwrap();

    assert_eq!(
        store.find_keys_by_prefix(&[0]).unwrap(),
        vec![vec![], vec![1], vec![255], vec![255, 1]]
    );
    assert_eq!(
        store.find_key_values_by_prefix(&[0, 255]).unwrap(),
        vec![(vec![], vec![0, 255]), (vec![1], vec![0, 255, 1])]
    );
    assert_eq!(store.find_keys_by_prefix(&[]).unwrap().len(), 5);
    assert!(store.find_keys_by_prefix(&[2]).unwrap().is_empty());
}

#[test]
fn test_memory_store_delete_prefix() {
    let store = MemoryStore::new();
    let mut batch = Batch::new();
    batch.put_key_value_bytes(vec![0, 1], vec![]);
    batch.put_key_value_bytes(vec![0, 2], vec![]);
    batch.put_key_value_bytes(vec![1], vec![]);
    store.write_batch(batch).unwrap();

    let mut batch = Batch::new();
    batch.delete_key_prefix(vec![0]);
    batch.put_key_value_bytes(vec![0, 3], vec![]);
    store.write_batch(batch).unwrap();

    assert_eq!(
        store.find_keys_by_prefix(&[]).unwrap(),
        vec![vec![0, 3], vec![1]]
    );
}

#[test]
fn test_memory_store_clones_share_data() {
    let store = MemoryStore::new();
    let clone = store.clone();
    let mut batch = Batch::new();
    batch.put_key_value_bytes(vec![7], vec![7]);
    clone.write_batch(batch).unwrap();
    assert_eq!(store.read_value_bytes(&[7]).unwrap(), Some(vec![7]));
}
