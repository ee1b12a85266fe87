// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::cache::{QueryCache, QueryKey};

#[test]
fn second_read_is_a_hit() {
    let mut cache: QueryCache<Vec<i32>> = QueryCache::new();
    let key = QueryKey::new("notes").with(7);
    let mut loads = 0;
    for _ in 0..3 {
        let v: Result<_, String> = cache.get_or_try_insert_with(key.clone(), || {
            loads += 1;
            Ok(vec![1, 2])
        });
        assert_eq!(v.unwrap(), vec![1, 2]);
    }
    assert_eq!(loads, 1);
    assert_eq!(cache.stats(), (2, 1));
}

#[test]
fn invalidate_drops_only_matching_tag() {
    let mut cache: QueryCache<&str> = QueryCache::new();
    cache.insert(QueryKey::new("bills"), "a");
    cache.insert(QueryKey::new("bills").with("2025-01"), "b");
    cache.insert(QueryKey::new("notes"), "c");

    assert_eq!(cache.invalidate("bills"), 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&QueryKey::new("bills")).is_none());
    assert_eq!(cache.get(&QueryKey::new("notes")), Some("c"));
    assert_eq!(cache.invalidate("habits"), 0);
}

#[test]
fn failed_load_caches_nothing() {
    let mut cache: QueryCache<u8> = QueryCache::new();
    let key = QueryKey::new("goals");
    let err = cache.get_or_try_insert_with(key.clone(), || Err::<u8, _>("offline"));
    assert_eq!(err, Err("offline"));
    assert!(cache.is_empty());

    let ok: Result<u8, &str> = cache.get_or_try_insert_with(key, || Ok(3));
    assert_eq!(ok, Ok(3));
    assert_eq!(cache.len(), 1);
}

#[test]
fn params_distinguish_keys() {
    let mut cache: QueryCache<u32> = QueryCache::new();
    cache.insert(QueryKey::new("transactions").with("2025-01"), 1);
    cache.insert(QueryKey::new("transactions").with("2025-02"), 2);
    assert_eq!(cache.get(&QueryKey::new("transactions").with("2025-02")), Some(2));
    cache.clear();
    assert!(cache.is_empty());
}
