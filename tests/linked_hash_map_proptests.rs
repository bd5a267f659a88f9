// LinkedHashMap property tests (public API).
//
// Property 1: insertion order survives any mix of insert/erase.
//  - Model: Vec of keys in first-introduction order.
//  - Invariant: keys() == model; erase + reinsert moves a key to the back.
//  - Operations: insert, erase by handle, remove by key, get_or_insert_default.
//
// Property 2: clones are independent and reject each other's handles.
//  - Build a map, clone it, mutate the clone.
//  - Invariant: original unchanged; handles from one never resolve in the other.
use linked_hashmap::{Config, LinkedHashMap, MapError};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_insertion_order(
        load_factor in 0.25f64..4.0,
        ops in proptest::collection::vec((0u8..=3u8, 0u16..40u16), 1..200)
    ) {
        let config = Config::new(1, load_factor).unwrap();
        let mut m: LinkedHashMap<u16, u32> = LinkedHashMap::with_config(config);
        let mut model: Vec<u16> = Vec::new();

        for (op, k) in ops {
            match op {
                // Insert: appends only when new.
                0 => {
                    let (_, fresh) = m.insert(k, u32::from(k));
                    prop_assert_eq!(fresh, !model.contains(&k));
                    if fresh { model.push(k); }
                }
                // Erase through a handle from find().
                1 => {
                    let h = m.find(&k);
                    match model.iter().position(|&x| x == k) {
                        Some(p) => {
                            prop_assert_eq!(m.erase(h), Ok((k, u32::from(k))));
                            model.remove(p);
                        }
                        None => prop_assert_eq!(m.erase(h), Err(MapError::InvalidIterator)),
                    }
                }
                // Remove by key.
                2 => {
                    let had = model.iter().position(|&x| x == k).map(|p| model.remove(p));
                    prop_assert_eq!(m.remove(&k).is_some(), had.is_some());
                }
                // Default insert: value only observed when new.
                3 => {
                    let v = *m.get_or_insert_default(k);
                    if model.contains(&k) {
                        prop_assert_eq!(v, u32::from(k));
                    } else {
                        prop_assert_eq!(v, 0);
                        *m.get_or_insert_default(k) = u32::from(k);
                        model.push(k);
                    }
                }
                _ => unreachable!(),
            }

            let keys: Vec<u16> = m.keys().copied().collect();
            prop_assert_eq!(&keys, &model);
            prop_assert!(m.capacity() >= 1);
            let rev: Vec<u16> = m.keys().rev().copied().collect();
            prop_assert!(rev.iter().eq(model.iter().rev()));
        }
    }

    #[test]
    fn prop_clone_independent(keys in proptest::collection::vec(0u16..100u16, 1..60)) {
        let m: LinkedHashMap<u16, u16> = keys.iter().map(|&k| (k, k)).collect();
        let mut c = m.clone();
        prop_assert_eq!(&c, &m);

        let first = *m.front().unwrap().0;
        c.remove(&first);
        prop_assert!(m.contains_key(&first));
        prop_assert_eq!(c.len() + 1, m.len());

        let h = m.find(&first);
        prop_assert_eq!(h.value(&c), Err(MapError::InvalidIterator));
        let hc = c.begin();
        prop_assert_eq!(m.clone().erase(hc), Err(MapError::InvalidIterator));
    }
}
