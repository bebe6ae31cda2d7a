//! Integration tests for Bst and TreeMap.
//!
//! Exercises ordering queries, deletion shapes and the key/value contract through the public
//! API.

use rstest::rstest;
use spinney::{Bst, TreeMap};

fn sample() -> Bst<i32> {
    [50, 30, 70, 20, 40, 60, 80].into_iter().collect()
}

fn collect<'a>(values: impl Iterator<Item = &'a i32>) -> Vec<i32> {
    values.copied().collect()
}

// =============================================================================
// Ordering Queries
// =============================================================================

#[rstest]
#[case(45, Some(40), Some(50))]
#[case(50, Some(50), Some(50))]
#[case(10, None, Some(20))]
#[case(90, Some(80), None)]
fn bst_floor_and_ceiling(#[case] probe: i32, #[case] floor: Option<i32>, #[case] ceiling: Option<i32>) {
    let bst = sample();
    assert_eq!(bst.floor(&probe).copied(), floor);
    assert_eq!(bst.ceiling(&probe).copied(), ceiling);
}

#[rstest]
#[case(50, Some(40), Some(60))]
#[case(45, Some(40), Some(50))]
#[case(20, None, Some(30))]
#[case(80, Some(70), None)]
fn bst_predecessor_and_successor(
    #[case] probe: i32,
    #[case] predecessor: Option<i32>,
    #[case] successor: Option<i32>,
) {
    let bst = sample();
    assert_eq!(bst.predecessor(&probe).copied(), predecessor);
    assert_eq!(bst.successor(&probe).copied(), successor);
}

#[rstest]
#[case(0, 0)]
#[case(20, 0)]
#[case(45, 3)]
#[case(80, 6)]
#[case(100, 7)]
fn bst_rank(#[case] probe: i32, #[case] rank: usize) {
    assert_eq!(sample().rank(&probe), rank);
}

#[rstest]
fn bst_select_inverts_rank() {
    let bst = sample();
    for value in bst.iter() {
        assert_eq!(bst.select(bst.rank(value)), Some(value));
    }
    assert_eq!(bst.select(7), None);
}

#[rstest]
#[case(25, 65, vec![30, 40, 50, 60])]
#[case(20, 20, vec![20])]
#[case(81, 99, vec![])]
#[case(0, 100, vec![20, 30, 40, 50, 60, 70, 80])]
fn bst_range_is_inclusive(#[case] min: i32, #[case] max: i32, #[case] expected: Vec<i32>) {
    let bst = sample();
    let found: Vec<i32> = bst.range(&min, &max).into_iter().copied().collect();
    assert_eq!(found, expected);
}

// =============================================================================
// Traversals and Shape
// =============================================================================

#[rstest]
fn bst_traversal_orders() {
    let bst = sample();

    assert_eq!(collect(bst.in_order()), [20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(collect(bst.pre_order()), [50, 30, 20, 40, 70, 60, 80]);
    assert_eq!(collect(bst.post_order()), [20, 40, 30, 60, 80, 70, 50]);
    assert_eq!(collect(bst.level_order()), [50, 30, 70, 20, 40, 60, 80]);
}

#[rstest]
fn bst_delete_with_two_children_promotes_successor() {
    let mut bst = sample();
    assert!(bst.delete(&50));

    let pre: Vec<i32> = bst.pre_order().copied().collect();
    assert_eq!(pre, [60, 30, 20, 40, 70, 80]);
    assert_eq!(bst.count(), 6);
    assert!(bst.is_balanced());
}

#[rstest]
fn bst_sorted_insert_degenerates_without_recursion() {
    let mut bst: Bst<u32> = (0..5_000).collect();
    assert_eq!(bst.height(), 4_999);
    assert!(!bst.is_balanced());
    assert_eq!(bst.select(4_999), Some(&4_999));
    assert_eq!(bst.rank(&2_500), 2_500);

    for value in (0..5_000).step_by(2) {
        assert!(bst.delete(&value));
    }
    assert_eq!(bst.count(), 2_500);
    assert_eq!(bst.min(), Some(&1));
}

#[rstest]
fn bst_custom_comparator_on_strings() {
    let mut bst = Bst::new_by(|a: &&str, b: &&str| a.len() < b.len());
    bst.extend(["pear", "fig", "banana", "kiwi"]);

    // "kiwi" has the same length as "pear" and is treated as a duplicate
    assert_eq!(bst.count(), 3);
    let words: Vec<&str> = bst.iter().copied().collect();
    assert_eq!(words, ["fig", "pear", "banana"]);
    assert!(bst.search(&"plum"));
}

// =============================================================================
// TreeMap
// =============================================================================

#[rstest]
fn treemap_put_updates_in_place() {
    let mut map = TreeMap::new();
    map.put("b", 2);
    map.put("a", 1);
    map.put("c", 3);

    assert_eq!(map.put("a", 10), Some(1));
    assert_eq!(map.count(), 3);
    assert_eq!(map.get(&"a"), Some(&10));
    assert_eq!(format!("{map:?}"), r#"TreeMap{"a": 10, "b": 2, "c": 3}"#);
}

#[rstest]
#[case(15, Some(10), Some(20))]
#[case(10, None, Some(20))]
#[case(30, Some(20), None)]
fn treemap_lower_and_higher(#[case] key: i32, #[case] lower: Option<i32>, #[case] higher: Option<i32>) {
    let map: TreeMap<i32, &str> = [(10, "ten"), (20, "twenty"), (30, "thirty")]
        .into_iter()
        .collect();
    assert_eq!(map.lower(&key).map(|(k, _)| *k), lower);
    assert_eq!(map.higher(&key).map(|(k, _)| *k), higher);
}

#[rstest]
fn treemap_custom_comparator_orders_descending() {
    let map = TreeMap::from_iter_by([(1, 'a'), (3, 'c'), (2, 'b')], |a: &i32, b: &i32| a > b);
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, [3, 2, 1]);
    assert_eq!(map.min(), Some((&3, &'c')));
    assert_eq!(map.floor(&0), Some((&1, &'a')));
}
