use crate::trie::{assert_invariants, RadixTree};

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_tree<V>(t: &RadixTree<V>) {
    let leaves = assert_invariants(&t.root);
    assert_eq!(leaves, t.len(), "reachable leaf count must match len");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u32),
    Remove(String),
    Get(String),
    LongestMatch(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet forces shared prefixes, splits and merges; the
    // multi-byte characters make sure keys split on characters, not bytes.
    let alphabet = vec!['a', 'b', 'c', 'あ', 'い', '💡'];
    prop::collection::vec(prop::sample::select(alphabet), 0..=8)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Remove),
        15 => key.clone().prop_map(Op::Get),
        10 => key.prop_map(Op::LongestMatch),
    ];
    prop::collection::vec(op, 0..=400)
}

fn model_longest_match<'a>(m: &'a BTreeMap<String, u32>, key: &str) -> Option<(&'a str, u32)> {
    m.iter()
        .filter(|(k, _)| key.starts_with(k.as_str()))
        .max_by_key(|(k, _)| k.len())
        .map(|(k, v)| (k.as_str(), *v))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut t: RadixTree<u32> = RadixTree::new();
        let mut m: BTreeMap<String, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let inserted = t.insert(&key, value);
                    let old = m.insert(key, value);
                    prop_assert_eq!(inserted, old.is_none());
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key).copied(), m.get(&key).copied());
                }
                Op::LongestMatch(key) => {
                    let got = t.longest_match(&key).map(|(k, v)| (k, *v));
                    prop_assert_eq!(got, model_longest_match(&m, &key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(&str, u32)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(&str, u32)> = m.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        prop_assert_eq!(got, expected);

        prop_assert_eq!(t.top().map(|(k, _)| k), m.keys().next().map(String::as_str));
        prop_assert_eq!(t.bottom().map(|(k, _)| k), m.keys().next_back().map(String::as_str));
    }

    #[test]
    fn prop_invariants_hold_after_every_op(ops in ops_strategy()) {
        let mut t: RadixTree<u32> = RadixTree::new();
        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    t.insert(&key, value);
                }
                Op::Remove(key) => {
                    t.remove(&key);
                }
                Op::Get(_) | Op::LongestMatch(_) => continue,
            }
            validate_tree(&t);
        }
    }

    #[test]
    fn prop_collect_matches_filtered_model(
        keys in prop::collection::btree_set(key_strategy(), 0..64),
        prefix in key_strategy(),
    ) {
        let t: RadixTree<()> = keys.iter().map(|k| (k, ())).collect();

        let got = t.collect_keys(&prefix);
        let expected: Vec<&str> = keys
            .iter()
            .filter(|k| k.starts_with(prefix.as_str()))
            .map(String::as_str)
            .collect();
        prop_assert_eq!(got, expected);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: &[&str] = &["", "a", "b", "ab", "abc", "abd", "ba"];

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(SMALL_SET, |perm| {
        let mut t: RadixTree<usize> = RadixTree::new();
        let mut m: BTreeMap<String, usize> = BTreeMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            assert_eq!(t.insert(k, i), m.insert(k.to_string(), i).is_none());
        }

        validate_tree(&t);
        let got: Vec<(&str, usize)> = t.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(&str, usize)> = m.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    // Insert in a fixed order, then remove in all permutations.
    let base: RadixTree<usize> = SMALL_SET.iter().enumerate().map(|(i, k)| (*k, i)).collect();

    for_each_permutation(SMALL_SET, |perm| {
        let mut t = base.clone();
        let mut remaining = t.len();

        for k in perm {
            assert_eq!(t.get(k).copied(), base.get(k).copied());
            assert!(t.remove(k).is_some());
            remaining -= 1;
            assert_eq!(t.len(), remaining);
            validate_tree(&t);
        }
        assert!(t.is_empty());
        assert!(t.root.edges.is_empty());
        assert!(t.root.leaf.is_none());
    });
}
