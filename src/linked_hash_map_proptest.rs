#![cfg(test)]

// Property tests for LinkedHashMap kept inside the crate so they can check
// the index/list invariants through `check_invariants`.

use crate::config::Config;
use crate::error::MapError;
use crate::linked_hash_map::{Handle, LinkedHashMap};
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Default(usize),
    Erase(usize),
    Remove(usize),
    Mutate(usize, i32),
    Walk,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Default),
            3 => idx.clone().prop_map(OpI::Erase),
            1 => idx.clone().prop_map(OpI::Remove),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Walk),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Ordered model: a Vec of (key, value) in insertion order.
fn model_pos(model: &[(String, i32)], k: &str) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

fn run<S: BuildHasher>(
    mut sut: LinkedHashMap<String, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<(String, i32)> = Vec::new();
    let mut live: HashMap<String, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let (h, fresh) = sut.insert(k.clone(), v);
                match model_pos(&model, &k) {
                    Some(_) => {
                        prop_assert!(!fresh);
                        prop_assert_eq!(Some(&h), live.get(&k));
                    }
                    None => {
                        prop_assert!(fresh);
                        model.push((k.clone(), v));
                        live.insert(k, h);
                    }
                }
            }
            OpI::Default(i) => {
                let k = pool[i].clone();
                let got = *sut.get_or_insert_default(k.clone());
                match model_pos(&model, &k) {
                    Some(p) => prop_assert_eq!(got, model[p].1),
                    None => {
                        prop_assert_eq!(got, 0);
                        model.push((k.clone(), 0));
                        live.insert(k.clone(), sut.find(&k));
                    }
                }
            }
            OpI::Erase(i) => {
                let k = &pool[i];
                let h = sut.find(k);
                match model_pos(&model, k) {
                    Some(p) => {
                        let (kk, vv) = sut.erase(h).expect("live handle erases");
                        let (mk, mv) = model.remove(p);
                        prop_assert_eq!(kk, mk);
                        prop_assert_eq!(vv, mv);
                        stale.extend(live.remove(k));
                    }
                    None => {
                        prop_assert_eq!(h, sut.end());
                        prop_assert_eq!(sut.erase(h), Err(MapError::InvalidIterator));
                    }
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k.as_str());
                let want = model_pos(&model, k).map(|p| model.remove(p).1);
                prop_assert_eq!(got, want);
                stale.extend(live.remove(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(&h) = live.get(k) {
                    let v = h.value_mut(&mut sut).expect("live handle resolves");
                    *v = v.wrapping_add(d);
                    let p = model_pos(&model, k).expect("model has live key");
                    model[p].1 = model[p].1.wrapping_add(d);
                }
            }
            OpI::Walk => {
                // Forward with handles, then back from end().
                let mut fwd = Vec::new();
                let mut h = sut.begin();
                while h != sut.end() {
                    fwd.push(h.key(&sut).expect("interior handle").clone());
                    h = h.next(&sut).expect("step forward");
                }
                prop_assert_eq!(h.next(&sut), Err(MapError::InvalidIterator));

                let mut back = Vec::new();
                let mut h = sut.end();
                while let Ok(p) = h.prev(&sut) {
                    back.push(p.key(&sut).expect("interior handle").clone());
                    h = p;
                }
                back.reverse();
                let want: Vec<String> = model.iter().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(&fwd, &want);
                prop_assert_eq!(&back, &want);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
            }
        }

        sut.check_invariants();
        let seen: Vec<(String, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(&seen, &model);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        for &h in &stale {
            prop_assert_eq!(h.value(&sut), Err(MapError::InvalidIterator));
        }
    }
    Ok(())
}

// Property: state-machine equivalence against an ordered Vec model.
// Invariants exercised across random operation sequences:
// - Iteration order equals first-introduction order; erased-then-reinserted
//   keys move to the back.
// - Duplicate inserts report the original handle and change nothing.
// - Handles stay valid across resizes; erased handles never resolve again.
// - Every entry has exactly one bucket reference in bucket `hash % capacity`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(LinkedHashMap::new(), pool, ops)?;
    }

    // Tiny buckets and a low load factor force a resize on most mutations.
    #[test]
    fn prop_state_machine_resize_heavy((pool, ops) in arb_scenario()) {
        let config = Config::new(1, 0.5).unwrap();
        run(LinkedHashMap::with_config(config), pool, ops)?;
    }
}

#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions, where every bucket
// scan falls back on `Eq`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let config = Config::new(2, 1.0).unwrap();
        run(LinkedHashMap::with_config_and_hasher(config, ConstBuildHasher), pool, ops)?;
    }
}
