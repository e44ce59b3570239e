use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

fn validate_tree<C: Symbol>(t: &RadixTree<C>) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {issues:?}");

    // Every node must be reachable by key from its parent.
    let mut stack: Vec<&Node<C>> = t.roots().iter().collect();
    while let Some(node) = stack.pop() {
        for child in node.children() {
            let found = node.children().get(child.key());
            assert!(found.is_some_and(|n| std::ptr::eq(n, child)), "child not found by key");
        }
        stack.extend(node.children().iter());
    }
}

/// Expected shortest unique prefix of `word` within `set`: the word cut one
/// symbol after the longest proper prefix that is either a stored word or a
/// branching point.
fn model_prefix(set: &BTreeSet<Vec<u8>>, word: &[u8]) -> Vec<u8> {
    let is_boundary = |q: &[u8]| {
        if set.contains(q) {
            return true;
        }
        let next: BTreeSet<u8> = set
            .range(q.to_vec()..)
            .take_while(|s| s.starts_with(q))
            .filter_map(|s| s.get(q.len()).copied())
            .collect();
        next.len() >= 2
    };
    let start = (1..word.len())
        .rev()
        .find(|&k| is_boundary(&word[..k]))
        .unwrap_or(0);
    word[..start + 1].to_vec()
}

fn model_pairs(set: &BTreeSet<Vec<u8>>) -> Vec<(Vec<u8>, Vec<u8>)> {
    set.iter()
        .map(|w| (w.clone(), model_prefix(set, w)))
        .collect()
}

fn word_strategy() -> impl Strategy<Value = Vec<u8>> {
    // A tiny alphabet so that words share prefixes and force splits.
    prop::collection::vec(b'a'..=b'd', 0..=8)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 6)]
    Insert(#[proptest(strategy = "word_strategy()")] Vec<u8>),
    #[proptest(weight = 3)]
    Contains(#[proptest(strategy = "word_strategy()")] Vec<u8>),
    #[proptest(weight = 1)]
    Walk,
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=300)) {
        let mut t: RadixTree<u8> = RadixTree::new();
        let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(word) => {
                    let added_t = t.insert(&word);
                    let added_m = !word.is_empty() && m.insert(word);
                    prop_assert_eq!(added_t, added_m);
                }
                Op::Contains(word) => {
                    prop_assert_eq!(t.contains(&word), m.contains(&word));
                }
                Op::Walk => {
                    let got: Vec<Vec<u8>> = t.iter().map(|(w, _)| w).collect();
                    let expected: Vec<Vec<u8>> = m.iter().cloned().collect();
                    prop_assert_eq!(got, expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(Vec<u8>, Vec<u8>)> = t.iter().collect();
        prop_assert_eq!(got, model_pairs(&m));
    }

    #[test]
    fn prop_reverse_matches_forward(words in prop::collection::vec(word_strategy(), 0..=64)) {
        let t: RadixTree<u8> = words.iter().collect();
        let mut forward: Vec<(Vec<u8>, Vec<u8>)> = t.iter().collect();
        forward.reverse();
        let backward: Vec<(Vec<u8>, Vec<u8>)> = t.iter().rev().collect();
        prop_assert_eq!(backward, forward);
    }

    #[test]
    fn prop_advance_retreat_round_trip(words in prop::collection::vec(word_strategy(), 1..=64)) {
        let t: RadixTree<u8> = words.iter().collect();
        let mut c = t.begin();
        while !c.is_end() {
            let mut d = c.clone();
            d.advance().retreat();
            prop_assert_eq!(&d, &c);
            c.advance();
        }

        if !t.is_empty() {
            let mut last = t.end();
            last.retreat();
            let expected = t.iter().next_back();
            prop_assert_eq!(last.get().ok().cloned(), expected);
        }
    }

    #[test]
    fn prop_insertion_order_independent(
        words in prop::collection::vec(word_strategy(), 0..=48)
            .prop_flat_map(|w| (Just(w.clone()), Just(w).prop_shuffle()))
    ) {
        let (original, shuffled) = words;
        let a: RadixTree<u8> = original.iter().collect();
        let b: RadixTree<u8> = shuffled.iter().collect();
        prop_assert!(a.iter().eq(b.iter()));
        prop_assert_eq!(a.dump().to_string(), b.dump().to_string());
        validate_tree(&b);
    }

    #[test]
    fn prop_wide_matches_string_order(words in prop::collection::vec("[абвa-c]{0,6}", 0..=48)) {
        let mut t: RadixTree<char> = RadixTree::new();
        for w in &words {
            prop_assert!(t.insert_encoded(w.as_bytes()).is_ok());
        }
        let expected: Vec<String> = words
            .iter()
            .filter(|w| !w.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let got: Vec<String> = t.iter().map(|(w, _)| w).collect();
        prop_assert_eq!(got, expected);
        validate_tree(&t);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(
        items: &[T],
        used: &mut [bool],
        out: &mut Vec<T>,
        f: &mut impl FnMut(Vec<T>),
    ) {
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

#[test]
fn exhaustive_insert_order_small_set() {
    let words: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"b".to_vec(),
        b"ab".to_vec(),
        b"abc".to_vec(),
        b"abd".to_vec(),
        b"ba".to_vec(),
    ];
    let model: BTreeSet<Vec<u8>> = words.iter().cloned().collect();
    let expected = model_pairs(&model);

    for_each_permutation(&words, |perm| {
        let mut t: RadixTree<u8> = RadixTree::new();
        for w in &perm {
            assert!(t.insert(w));
            validate_tree(&t);
        }
        let got: Vec<(Vec<u8>, Vec<u8>)> = t.iter().collect();
        assert_eq!(got, expected, "insert order {perm:?}");
    });
}

#[test]
fn model_prefix_agrees_with_known_scenarios() {
    let set: BTreeSet<Vec<u8>> = ["aleksey", "aleks", "alek"]
        .iter()
        .map(|w| w.as_bytes().to_vec())
        .collect();
    assert_eq!(model_prefix(&set, b"alek"), b"a".to_vec());
    assert_eq!(model_prefix(&set, b"aleks"), b"aleks".to_vec());
    assert_eq!(model_prefix(&set, b"aleksey"), b"alekse".to_vec());

    let mut set = set;
    set.insert(b"alesha".to_vec());
    assert_eq!(model_prefix(&set, b"alek"), b"alek".to_vec());
    assert_eq!(model_prefix(&set, b"alesha"), b"ales".to_vec());
}
