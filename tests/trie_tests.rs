//! Integration tests for Trie.
//!
//! Covers prefix queries, pruning on delete, wildcard and fuzzy search.

use rstest::rstest;
use spinney::{edit_distance, Error, SearchLimits, Trie};

fn dictionary() -> Trie {
    [
        "car", "card", "care", "careful", "cat", "dog", "dot", "do", "zebra",
    ]
    .into_iter()
    .collect()
}

fn owned(words: Vec<compact_str::CompactString>) -> Vec<String> {
    words.into_iter().map(String::from).collect()
}

// =============================================================================
// Prefix Queries
// =============================================================================

#[rstest]
#[case("car", vec!["car", "card", "care", "careful"])]
#[case("do", vec!["do", "dog", "dot"])]
#[case("ca", vec!["car", "card", "care", "careful", "cat"])]
#[case("x", vec![])]
#[case("", vec!["car", "card", "care", "careful", "cat", "do", "dog", "dot", "zebra"])]
fn trie_words_with_prefix(#[case] prefix: &str, #[case] expected: Vec<&str>) {
    assert_eq!(owned(dictionary().words_with_prefix(prefix)), expected);
}

#[rstest]
#[case(2, vec!["do"])]
#[case(3, vec!["car", "cat", "dog", "dot"])]
#[case(7, vec!["careful"])]
#[case(0, vec![])]
fn trie_words_by_length(#[case] length: usize, #[case] expected: Vec<&str>) {
    assert_eq!(owned(dictionary().words_by_length(length)), expected);
}

#[rstest]
fn trie_prefix_limit_stops_early() {
    let words = dictionary().words_with_prefix_limit("car", 2);
    assert_eq!(owned(words), ["car", "card"]);
}

// =============================================================================
// Delete and Pruning
// =============================================================================

#[rstest]
fn trie_delete_keeps_longer_words() {
    let mut trie = dictionary();
    assert!(trie.delete("care"));

    assert!(!trie.search("care"));
    assert!(trie.search("careful"));
    assert!(trie.search("car"));
    assert!(trie.starts_with("care"));
    assert_eq!(trie.count(), 8);
}

#[rstest]
fn trie_delete_prunes_unused_branches() {
    let mut trie = dictionary();
    assert!(trie.delete("zebra"));
    assert!(!trie.starts_with("z"));
    assert_eq!(trie.height(), 7);

    assert!(trie.delete("careful"));
    assert!(!trie.starts_with("caref"));
    assert!(trie.starts_with("care"));
    assert_eq!(trie.height(), 4);
}

#[rstest]
fn trie_values_survive_other_deletes() {
    let mut trie = Trie::new();
    trie.insert_with_value("alpha", 1u8);
    trie.insert_with_value("alphabet", 2);
    trie.delete("alpha");

    assert_eq!(trie.search_with_value("alpha"), None);
    assert_eq!(trie.search_with_value("alphabet"), Some(Some(&2)));
}

// =============================================================================
// Pattern Search
// =============================================================================

#[rstest]
#[case("ca?", vec!["car", "cat"])]
#[case("car*", vec!["car", "card", "care", "careful"])]
#[case("*e", vec!["care"])]
#[case("d?*", vec!["do", "dog", "dot"])]
#[case("*a*", vec!["car", "card", "care", "careful", "cat", "zebra"])]
#[case("????", vec!["card", "care"])]
#[case("q*", vec![])]
fn trie_words_with_pattern(#[case] pattern: &str, #[case] expected: Vec<&str>) {
    assert_eq!(owned(dictionary().words_with_pattern(pattern)), expected);
}

#[rstest]
fn trie_pattern_search_respects_limits() {
    let trie = dictionary();

    let limits = SearchLimits::default().with_max_results(3);
    assert_eq!(
        trie.words_with_pattern_limited("*", &limits),
        Err(Error::ResultLimit { limit: 3 })
    );

    let limits = SearchLimits::default().with_max_depth(4);
    assert_eq!(
        trie.words_with_pattern_limited("care*", &limits),
        Err(Error::DepthLimit { limit: 4 })
    );

    let limits = SearchLimits::default();
    let words = trie.words_with_pattern_limited("do?", &limits).map(owned);
    assert_eq!(words, Ok(vec!["dog".to_string(), "dot".to_string()]));
}

// =============================================================================
// Fuzzy Search
// =============================================================================

#[rstest]
#[case("cat", "cat", 0)]
#[case("cat", "bat", 1)]
#[case("cat", "dog", 3)]
#[case("", "dog", 3)]
#[case("flaw", "lawn", 2)]
#[case("intention", "execution", 5)]
fn edit_distance_examples(#[case] a: &str, #[case] b: &str, #[case] distance: usize) {
    assert_eq!(edit_distance(a, b), distance);
    assert_eq!(edit_distance(b, a), distance);
}

#[rstest]
fn trie_words_within_distance() {
    let trie = dictionary();
    assert_eq!(
        owned(trie.words_within_distance("cot", 1)),
        ["cat", "dot"]
    );
    assert_eq!(owned(trie.words_within_distance("cot", 0)), Vec::<String>::new());
}

#[rstest]
#[case(vec!["interview", "internet", "internal"], "inter")]
#[case(vec!["same"], "same")]
#[case(vec!["a", "ab"], "a")]
#[case(vec!["x", "y"], "")]
#[case(vec![], "")]
fn trie_longest_common_prefix(#[case] words: Vec<&str>, #[case] expected: &str) {
    let trie: Trie = words.into_iter().collect();
    assert_eq!(trie.longest_common_prefix(), expected);
}

#[rstest]
fn trie_debug_lists_words() {
    let trie: Trie = ["b", "a"].into_iter().collect();
    assert_eq!(format!("{trie:?}"), r#"Trie["a", "b"]"#);
}
