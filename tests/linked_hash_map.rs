// LinkedHashMap unit test suite (public API).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Order: iteration follows first-introduction order; erase + reinsert
//   moves a key to the back.
// - Uniqueness: a duplicate insert reports the original and mutates nothing.
// - Handles: fail fast past either end, on end(), after erase, and when
//   presented to a map that did not issue them.
// - Resizing: doubling/halving changes bucket layout only.
use linked_hashmap::{Config, Handle, LinkedHashMap, MapError};
use std::collections::hash_map::RandomState;

fn keys<S>(m: &LinkedHashMap<String, i32, S>) -> Vec<&str> {
    m.keys().map(String::as_str).collect()
}

// Test: insert a, b, c; erase b; insert d.
// Verifies: order a, c, d; b is gone from find/at; size is 3.
#[test]
fn erase_then_insert_keeps_order() {
    let mut m = LinkedHashMap::new();
    for (i, k) in ["a", "b", "c"].iter().enumerate() {
        m.insert(k.to_string(), i as i32);
    }
    let b = m.find("b");
    assert_eq!(m.erase(b), Ok(("b".to_string(), 1)));
    m.insert("d".to_string(), 3);

    assert_eq!(keys(&m), ["a", "c", "d"]);
    assert_eq!(m.find("b"), m.end());
    assert_eq!(m.at("b"), Err(MapError::MissingKey));
    assert_eq!(m.len(), 3);
}

// Test: insert followed by find and a duplicate insert.
// Verifies: find sees (k, v); duplicate returns (original, false) and keeps v.
#[test]
fn insert_find_and_duplicate() {
    let mut m = LinkedHashMap::new();
    let (h, fresh) = m.insert("k".to_string(), 1);
    assert!(fresh);
    let f = m.find("k");
    assert_eq!(f, h);
    assert_eq!(f.entry(&m), Ok((&"k".to_string(), &1)));

    let (h2, fresh) = m.insert("k".to_string(), 2);
    assert!(!fresh);
    assert_eq!(h2, h);
    assert_eq!(m.at("k"), Ok(&1));
}

// Test: get_or_insert_default on an absent key (the mutable subscript).
// Assumes: the new entry lands at the back with V::default().
// Verifies: writes through the returned reference are visible to find.
#[test]
fn default_insert_appends_and_is_writable() {
    let mut m: LinkedHashMap<String, i32> = LinkedHashMap::new();
    m.insert("first".to_string(), 5);
    *m.get_or_insert_default("second".to_string()) += 7;
    *m.get_or_insert_default("first".to_string()) += 1;

    assert_eq!(keys(&m), ["first", "second"]);
    assert_eq!(m.find("second").value(&m), Ok(&7));
    assert_eq!(m["first"], 6);
}

// Test: the read-only subscript on a missing key.
// Verifies: Index panics, at() reports MissingKey, nothing is inserted.
#[test]
fn index_on_missing_key_panics() {
    let m: LinkedHashMap<String, i32> = LinkedHashMap::new();
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| m["nope"]));
    assert!(res.is_err());
    assert_eq!(m.at("nope"), Err(MapError::MissingKey));
    assert!(m.is_empty());
}

// Test: at_mut writes in place.
#[test]
fn at_mut_updates_value() {
    let mut m = LinkedHashMap::new();
    m.insert("x".to_string(), 1);
    *m.at_mut("x").unwrap() = 9;
    assert_eq!(m.get("x"), Some(&9));
    assert_eq!(m.at_mut("y").err(), Some(MapError::MissingKey));
}

// Test: erase bookkeeping.
// Verifies: len drops by exactly one; the key is gone; the handle goes stale.
#[test]
fn erase_reduces_len_and_invalidates_handle() {
    let mut m = LinkedHashMap::new();
    for i in 0..5 {
        m.insert(format!("k{i}"), i);
    }
    let h = m.find("k2");
    m.erase(h).unwrap();
    assert_eq!(m.len(), 4);
    assert_eq!(m.find("k2"), m.end());
    assert_eq!(h.value(&m), Err(MapError::InvalidIterator));
    assert_eq!(h.next(&m), Err(MapError::InvalidIterator));
    assert_eq!(m.erase(h), Err(MapError::InvalidIterator));
    assert_eq!(m.len(), 4);
}

// Test: erase rejects end() and handles issued by another map.
// Verifies: InvalidIterator and no mutation of either map.
#[test]
fn erase_rejects_end_and_foreign_handles() {
    let mut m1 = LinkedHashMap::new();
    let mut m2 = LinkedHashMap::new();
    m1.insert("a".to_string(), 1);
    m2.insert("a".to_string(), 1);

    let end = m1.end();
    assert_eq!(m1.erase(end), Err(MapError::InvalidIterator));

    let foreign = m2.find("a");
    assert_eq!(m1.erase(foreign), Err(MapError::InvalidIterator));
    assert_eq!(foreign.value(&m1), Err(MapError::InvalidIterator));
    assert_eq!(m1.len(), 1);
    assert_eq!(m2.len(), 1);
}

// Test: bidirectional handle movement at the boundaries.
// Verifies: ++ from the last entry reaches end(); ++ at end() fails;
// -- at the first entry fails; -- from end() reaches the last entry.
#[test]
fn handle_boundaries() {
    let mut m = LinkedHashMap::new();
    for (i, k) in ["a", "b", "c"].iter().enumerate() {
        m.insert(k.to_string(), i as i32);
    }
    let first = m.begin();
    assert_eq!(first.key(&m).map(String::as_str), Ok("a"));
    assert_eq!(first.prev(&m), Err(MapError::InvalidIterator));

    let last = m.end().prev(&m).unwrap();
    assert_eq!(last.key(&m).map(String::as_str), Ok("c"));
    assert_eq!(last.next(&m), Ok(m.end()));
    assert_eq!(m.end().next(&m), Err(MapError::InvalidIterator));
    assert_eq!(m.end().value(&m), Err(MapError::InvalidIterator));

    let mid = first.next(&m).unwrap();
    assert_eq!(mid.prev(&m), Ok(first));
    assert_eq!(mid.key(&m).map(String::as_str), Ok("b"));
}

// Test: boundaries on an empty map.
#[test]
fn empty_map_handles() {
    let m: LinkedHashMap<String, i32> = LinkedHashMap::new();
    assert_eq!(m.begin(), m.end());
    assert_eq!(m.end().prev(&m), Err(MapError::InvalidIterator));
    assert_eq!(m.end().next(&m), Err(MapError::InvalidIterator));
    assert_eq!(m.front(), None);
    assert_eq!(m.back(), None);
}

// Test: inserting C*L keys from capacity C.
// Verifies: exactly one doubling; all keys findable in original order.
#[test]
fn capacity_times_load_factor_inserts_double_once() {
    let (c, l) = (8usize, 2.0);
    let mut m = LinkedHashMap::with_config(Config::new(c, l).unwrap());
    let n = (c as f64 * l) as usize;
    for i in 0..n - 1 {
        m.insert(format!("k{i}"), i as i32);
    }
    assert_eq!(m.capacity(), c);
    m.insert(format!("k{}", n - 1), (n - 1) as i32);
    assert_eq!(m.capacity(), 2 * c);

    for i in 0..n {
        assert_eq!(m.get(format!("k{i}").as_str()), Some(&(i as i32)));
    }
    let want: Vec<String> = (0..n).map(|i| format!("k{i}")).collect();
    assert_eq!(keys(&m), want);
}

// Test: bulk insert then bulk erase across several grows and shrinks.
// Verifies: surviving keys and their relative order are unaffected.
#[test]
fn bulk_grow_and_shrink_preserve_order() {
    let mut m = LinkedHashMap::with_config(Config::new(1, 1.0).unwrap());
    let handles: Vec<Handle> = (0..500).map(|i| m.insert(format!("k{i}"), i).0).collect();
    let grown = m.capacity();
    assert!(grown >= 256);

    for (i, h) in handles.iter().enumerate() {
        if i % 10 != 0 {
            m.erase(*h).unwrap();
        }
    }
    assert!(m.capacity() < grown);
    let want: Vec<i32> = (0..500).filter(|i| i % 10 == 0).collect();
    let got: Vec<i32> = m.values().copied().collect();
    assert_eq!(got, want);
    for i in (0..500).step_by(10) {
        assert!(m.contains_key(format!("k{i}").as_str()));
    }
}

// Test: remove by key.
#[test]
fn remove_by_key() {
    let mut m: LinkedHashMap<String, i32> = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, k)| (k.to_string(), i as i32))
        .collect();
    assert_eq!(m.remove("b"), Some(1));
    assert_eq!(m.remove("b"), None);
    assert_eq!(keys(&m), ["a", "c"]);
    m.insert("b".to_string(), 10);
    assert_eq!(keys(&m), ["a", "c", "b"]);
}

// Test: clear.
// Verifies: all entries gone, bucket count kept, map reusable.
#[test]
fn clear_then_reuse() {
    let mut m = LinkedHashMap::with_capacity(4);
    for i in 0..40 {
        m.insert(format!("k{i}"), i);
    }
    let cap = m.capacity();
    m.clear();
    assert!(m.is_empty());
    assert_eq!(m.capacity(), cap);
    assert_eq!(m.count("k1"), 0);
    m.insert("z".to_string(), 1);
    assert_eq!(keys(&m), ["z"]);
}

// Test: cloning.
// Verifies: equal contents and order; independent storage; handles do not
// cross between original and clone.
#[test]
fn clone_is_independent() {
    let mut m = LinkedHashMap::new();
    for i in 0..10 {
        m.insert(format!("k{i}"), i);
    }
    let mut c = m.clone();
    assert_eq!(c, m);

    c.remove("k0");
    *c.get_mut("k1").unwrap() = 100;
    assert_eq!(m.len(), 10);
    assert_eq!(m.get("k1"), Some(&1));
    assert_ne!(c, m);

    let h = m.begin();
    assert_eq!(h.key(&c), Err(MapError::InvalidIterator));
}

// Test: Extend keeps first occurrences; FromIterator and into_iter round out order.
#[test]
fn extend_and_collect() {
    let mut m: LinkedHashMap<String, i32> = LinkedHashMap::new();
    m.extend([("b".to_string(), 1), ("a".to_string(), 2), ("b".to_string(), 3)]);
    assert_eq!(keys(&m), ["b", "a"]);
    assert_eq!(m["b"], 1);

    let pairs: Vec<(String, i32)> = m.into_iter().collect();
    assert_eq!(pairs, [("b".to_string(), 1), ("a".to_string(), 2)]);
}

// Test: a caller-supplied hasher works end to end.
#[test]
fn custom_hasher() {
    let mut m: LinkedHashMap<String, i32, RandomState> =
        LinkedHashMap::with_hasher(RandomState::new());
    m.insert("x".to_string(), 1);
    m.insert("y".to_string(), 2);
    assert_eq!(keys(&m), ["x", "y"]);
    assert_eq!(m.get("y"), Some(&2));
}

// Test: Debug formatting follows insertion order.
#[test]
fn debug_lists_in_order() {
    let mut m = LinkedHashMap::new();
    m.insert("z", 1);
    m.insert("a", 2);
    assert_eq!(format!("{:?}", m), r#"{"z": 1, "a": 2}"#);
}

// Test: front/back and iteration via references.
#[test]
fn front_back_and_ref_iteration() {
    let mut m = LinkedHashMap::new();
    for (i, k) in ["p", "q", "r"].iter().enumerate() {
        m.insert(*k, i);
    }
    assert_eq!(m.front(), Some((&"p", &0)));
    assert_eq!(m.back(), Some((&"r", &2)));

    for (_, v) in &mut m {
        *v *= 2;
    }
    let collected: Vec<(&str, usize)> = (&m).into_iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(collected, [("p", 0), ("q", 2), ("r", 4)]);
}
