use std::collections::BTreeSet;

use avl_sequence::{Error, FnComparator, Natural, Reverse, Sequence};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn sequence_of(keys: &[i32]) -> Sequence<i32> {
    let mut sequence = Sequence::new();
    for &key in keys {
        sequence.insert(key).unwrap();
    }
    sequence
}

/// Walks the links from the head, checking every back link on the way.
fn linked_keys<C>(sequence: &Sequence<i32, C>) -> Vec<i32> {
    let mut keys = Vec::new();
    let mut previous = None;
    let mut current = sequence.first();
    while let Some(link) = current {
        assert_eq!(link.left().map(|l| *l.value()), previous, "back link of {}", link.value());
        keys.push(*link.value());
        previous = Some(*link.value());
        current = link.right();
    }
    assert_eq!(sequence.last().map(|l| *l.value()), previous, "tail mismatch");
    keys
}

/// Asserts the neighbors of `value`; `None` means an open end.
fn assert_neighbors(sequence: &Sequence<i32>, value: i32, left: Option<i32>, right: Option<i32>) {
    let link = sequence.get(&value).unwrap_or_else(|| panic!("{value} is missing"));
    assert_eq!(*link.value(), value);
    assert_eq!(link.left().map(|l| *l.value()), left, "left of {value}");
    assert_eq!(link.right().map(|l| *l.value()), right, "right of {value}");
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[test]
fn insert_first() {
    let mut sequence = Sequence::new();
    let link = sequence.insert(1).unwrap();
    assert_eq!(*link.value(), 1);
    assert!(link.left().is_none());
    assert!(link.right().is_none());
}

#[test]
fn insert_and_get() {
    let sequence = sequence_of(&[1, 10, 7, 5, 18]);

    assert_eq!(sequence.get(&10).unwrap().left(), sequence.get(&7));
    assert_eq!(sequence.get(&10).unwrap().right(), sequence.get(&18));
    assert_eq!(sequence.get(&5).unwrap().left(), sequence.get(&1));
    assert_eq!(sequence.get(&5).unwrap().right(), sequence.get(&7));
    assert_neighbors(&sequence, 1, None, Some(5));
    assert_neighbors(&sequence, 18, Some(10), None);
}

#[test]
fn insert_duplicate_fails() {
    let mut sequence = sequence_of(&[1]);
    assert_eq!(sequence.insert(1).unwrap_err(), Error::Duplicate);
    assert_eq!(linked_keys(&sequence), [1]);
}

#[test]
fn insert_in_the_middle() {
    let sequence = sequence_of(&[3, 5, 7, 6]);
    assert_neighbors(&sequence, 6, Some(5), Some(7));
}

#[test]
fn insert_deep_inner_keys() {
    // Each new key lands as a leaf whose neighbor sits more than two levels up.
    let sequence = sequence_of(&[50, 25, 75, 12, 37, 62, 87, 6, 18, 31, 43, 56, 68, 81, 93, 44, 55]);
    assert_neighbors(&sequence, 44, Some(43), Some(50));
    assert_neighbors(&sequence, 55, Some(50), Some(56));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[test]
fn delete_single_element() {
    let mut sequence = sequence_of(&[1]);
    assert!(sequence.delete(&1));
    assert!(sequence.is_empty());
    assert!(sequence.first().is_none());
}

#[test]
fn delete_leftmost_and_rightmost() {
    let mut sequence = sequence_of(&[1, 3, 5, 7, 11]);
    sequence.delete(&1);
    sequence.delete(&11);

    assert!(sequence.get(&3).unwrap().left().is_none());
    assert_eq!(sequence.get(&3).unwrap().right().map(|l| *l.value()), Some(5));
    assert_eq!(sequence.get(&7).unwrap().left().map(|l| *l.value()), Some(5));
    assert!(sequence.get(&7).unwrap().right().is_none());
}

#[test]
fn delete_from_the_middle() {
    let mut sequence = sequence_of(&[1, 3, 5]);
    sequence.delete(&3);
    assert_neighbors(&sequence, 1, None, Some(5));
    assert_neighbors(&sequence, 5, Some(1), None);
}

#[test]
fn delete_absent_is_a_no_op() {
    let mut sequence = sequence_of(&[1, 3]);
    assert!(!sequence.delete(&2));
    assert_eq!(sequence.remove(&2), None);
    assert_eq!(linked_keys(&sequence), [1, 3]);
}

#[test]
fn insert_after_delete() {
    let mut sequence = sequence_of(&[1, 3, 7]);
    sequence.delete(&3);
    sequence.insert(5).unwrap();
    assert_neighbors(&sequence, 5, Some(1), Some(7));
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[test]
fn greater_than() {
    let sequence = sequence_of(&[1, 3, 5]);
    assert_eq!(sequence.greater_than(&0), Some(&1));
    assert_eq!(sequence.greater_than(&1), Some(&3));
    assert_eq!(sequence.greater_than(&2), Some(&3));
    assert_eq!(sequence.greater_than(&3), Some(&5));
    assert_eq!(sequence.greater_than(&4), Some(&5));
    assert_eq!(sequence.greater_than(&5), None);
}

#[test]
fn less_than() {
    let sequence = sequence_of(&[1, 3, 5]);
    assert_eq!(sequence.less_than(&1), None);
    assert_eq!(sequence.less_than(&2), Some(&1));
    assert_eq!(sequence.less_than(&3), Some(&1));
    assert_eq!(sequence.less_than(&4), Some(&3));
    assert_eq!(sequence.less_than(&5), Some(&3));
    assert_eq!(sequence.less_than(&6), Some(&5));
}

#[test]
fn equal_to() {
    let sequence = sequence_of(&[1, 3, 5]);
    assert_eq!(sequence.equal_to(&1), Some(&1));
    assert_eq!(sequence.equal_to(&2), None);
    assert_eq!(sequence.equal_to(&3), Some(&3));
    assert_eq!(sequence.equal_to(&4), None);
    assert_eq!(sequence.equal_to(&5), Some(&5));
    assert!(sequence.contains(&5));
    assert!(!sequence.contains(&4));
}

// ─── Join ────────────────────────────────────────────────────────────────────

#[test]
fn join_with_empty_sequence() {
    let joined = Sequence::join(Sequence::new(), sequence_of(&[1])).unwrap();
    assert_neighbors(&joined, 1, None, None);

    let joined = Sequence::join(sequence_of(&[1]), Sequence::new()).unwrap();
    assert_neighbors(&joined, 1, None, None);
}

#[test]
fn join_two_singletons() {
    let joined = Sequence::join(sequence_of(&[1]), sequence_of(&[2])).unwrap();
    assert_eq!(joined.get(&1).unwrap().right(), joined.get(&2));
    assert_eq!(joined.get(&2).unwrap().left(), joined.get(&1));
    assert_neighbors(&joined, 1, None, Some(2));
    assert_neighbors(&joined, 2, Some(1), None);
}

#[test]
fn join_two_sequences() {
    let joined = Sequence::join(sequence_of(&[1, 2]), sequence_of(&[3, 4, 5, 6, 7])).unwrap();
    assert_eq!(joined.get(&2).unwrap().right().map(|l| *l.value()), Some(3));
    assert_eq!(joined.get(&3).unwrap().left().map(|l| *l.value()), Some(2));
    assert_eq!(linked_keys(&joined), [1, 2, 3, 4, 5, 6, 7]);
    assert_neighbors(&joined, 1, None, Some(2));
    assert_neighbors(&joined, 7, Some(6), None);
}

#[test]
fn join_many_in_increasing_order() {
    let mut sequence = Sequence::join(sequence_of(&[1]), sequence_of(&[2])).unwrap();
    for key in 3..=10 {
        sequence = Sequence::join(sequence, sequence_of(&[key])).unwrap();
    }
    assert_eq!(linked_keys(&sequence), (1..=10).collect::<Vec<_>>());
    assert_neighbors(&sequence, 1, None, Some(2));
    assert_neighbors(&sequence, 10, Some(9), None);
}

#[test]
fn join_many_in_decreasing_order() {
    let mut sequence = Sequence::join(sequence_of(&[9]), sequence_of(&[10])).unwrap();
    for key in (1..=8).rev() {
        sequence = Sequence::join(sequence_of(&[key]), sequence).unwrap();
    }
    assert_eq!(linked_keys(&sequence), (1..=10).collect::<Vec<_>>());
    for key in 2..=9 {
        assert_neighbors(&sequence, key, Some(key - 1), Some(key + 1));
    }
}

#[test]
fn join_then_delete() {
    let mut joined = Sequence::join(sequence_of(&[1, 2]), sequence_of(&[7])).unwrap();
    joined.delete(&2);
    assert_neighbors(&joined, 1, None, Some(7));
    assert_neighbors(&joined, 7, Some(1), None);
}

#[test]
fn join_rejects_incompatible_comparators() {
    fn ascending(a: &i32, b: &i32) -> std::cmp::Ordering {
        a.cmp(b)
    }
    fn also_ascending(a: &i32, b: &i32) -> std::cmp::Ordering {
        b.cmp(a).reverse()
    }

    let mut left = Sequence::with_comparator(FnComparator::<i32>::new(ascending));
    left.insert(1).unwrap();
    let mut right = Sequence::with_comparator(FnComparator::<i32>::new(also_ascending));
    right.insert(2).unwrap();

    let error = Sequence::join(left, right).unwrap_err();
    assert_eq!(error.kind(), Error::IncompatibleComparators);
    let (left, right) = error.into_inner();
    assert_eq!(left.len() + right.len(), 2);
}

#[test]
fn join_accepts_comparators_wrapping_the_same_function() {
    fn ascending(a: &i32, b: &i32) -> std::cmp::Ordering {
        a.cmp(b)
    }

    let mut left = Sequence::with_comparator(FnComparator::<i32>::new(ascending));
    left.insert(1).unwrap();
    left.insert(2).unwrap();
    let mut right = Sequence::with_comparator(FnComparator::<i32>::new(ascending));
    right.insert(3).unwrap();

    let joined = Sequence::join(left, right).unwrap();
    assert_eq!(linked_keys(&joined), [1, 2, 3]);
    assert_eq!(joined.get(&2).unwrap().right(), joined.get(&3));
}

#[test]
fn join_reversed_sequences() {
    let descending = |keys: &[i32]| {
        let mut sequence = Sequence::with_comparator(Reverse(Natural));
        for &key in keys {
            sequence.insert(key).unwrap();
        }
        sequence
    };

    // Under the reversed order the larger keys come first.
    let joined = Sequence::join(descending(&[9, 7]), descending(&[5, 3, 1])).unwrap();
    assert_eq!(linked_keys(&joined), [9, 7, 5, 3, 1]);
    assert_eq!(joined.get(&7).unwrap().right(), joined.get(&5));
    assert_eq!(joined.greater_than(&5), Some(&3));

    let error = Sequence::join(descending(&[1]), descending(&[2])).unwrap_err();
    assert_eq!(error.kind(), Error::Overlapping);
}

#[test]
fn join_rejects_overlap() {
    let error = Sequence::join(sequence_of(&[1, 4]), sequence_of(&[3, 9])).unwrap_err();
    assert_eq!(error.kind(), Error::Overlapping);
    let error = Sequence::join(sequence_of(&[1, 3]), sequence_of(&[3, 9])).unwrap_err();
    assert_eq!(error.kind(), Error::Overlapping);
}

// ─── Randomized ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum SequenceOp {
    Insert(i32),
    Delete(i32),
    GreaterThan(i32),
    LessThan(i32),
    EqualTo(i32),
}

fn value_strategy() -> impl Strategy<Value = i32> {
    -5_000i32..5_000i32
}

fn op_strategy() -> impl Strategy<Value = SequenceOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SequenceOp::Insert),
        3 => value_strategy().prop_map(SequenceOp::Delete),
        1 => value_strategy().prop_map(SequenceOp::GreaterThan),
        1 => value_strategy().prop_map(SequenceOp::LessThan),
        1 => value_strategy().prop_map(SequenceOp::EqualTo),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both a Sequence and a BTreeSet and compares every result.
    #[test]
    fn ops_match_btreeset(ops in proptest::collection::vec(op_strategy(), TEST_SIZE)) {
        let mut sequence: Sequence<i32, Natural> = Sequence::new();
        let mut model = BTreeSet::new();

        for op in &ops {
            match *op {
                SequenceOp::Insert(v) => {
                    let inserted = sequence.insert(v).map(|link| *link.value());
                    let expected = if model.insert(v) { Ok(v) } else { Err(Error::Duplicate) };
                    prop_assert_eq!(inserted, expected, "insert({})", v);
                }
                SequenceOp::Delete(v) => {
                    prop_assert_eq!(sequence.delete(&v), model.remove(&v), "delete({})", v);
                }
                SequenceOp::GreaterThan(v) => {
                    prop_assert_eq!(sequence.greater_than(&v), model.range(v + 1..).next(), "greater_than({})", v);
                }
                SequenceOp::LessThan(v) => {
                    prop_assert_eq!(sequence.less_than(&v), model.range(..v).next_back(), "less_than({})", v);
                }
                SequenceOp::EqualTo(v) => {
                    prop_assert_eq!(sequence.equal_to(&v), model.get(&v), "equal_to({})", v);
                }
            }
            prop_assert_eq!(sequence.len(), model.len());
        }

        prop_assert_eq!(linked_keys(&sequence), model.into_iter().collect::<Vec<_>>());
    }

    /// Inserting a key and deleting it again leaves the linked order as it was.
    #[test]
    fn insert_delete_inverse(keys in proptest::collection::btree_set(value_strategy(), 0..200), extra in value_strategy()) {
        prop_assume!(!keys.contains(&extra));
        let keys: Vec<i32> = keys.into_iter().collect();
        let mut sequence = sequence_of(&keys);

        let before = linked_keys(&sequence);
        sequence.insert(extra).unwrap();
        sequence.delete(&extra);
        prop_assert_eq!(linked_keys(&sequence), before);
    }

    /// Splitting a key set anywhere and joining the halves back gives the whole set.
    #[test]
    fn split_and_join(keys in proptest::collection::btree_set(value_strategy(), 0..500), split in 0usize..500) {
        let keys: Vec<i32> = keys.into_iter().collect();
        let split = split.min(keys.len());
        let left = sequence_of(&keys[..split]);
        let right = sequence_of(&keys[split..]);

        let mut joined = Sequence::join(left, right).unwrap();
        prop_assert_eq!(linked_keys(&joined), keys.clone());

        // The result keeps working as an ordinary sequence.
        for key in keys.iter().step_by(3) {
            joined.delete(key);
        }
        let remaining: Vec<i32> = keys.iter().enumerate().filter(|(i, _)| i % 3 != 0).map(|(_, k)| *k).collect();
        prop_assert_eq!(linked_keys(&joined), remaining);
    }
}
