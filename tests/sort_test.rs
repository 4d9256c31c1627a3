// sort_test.rs - Hybrid sort against the standard library sort.

use linkscan::matcher::Marker;
use linkscan::sort::{
    hybrid_sort_by, hybrid_sort_by_key, sort_markers, MERGE_CHUNK_LEN, SHELL_SORT_MAX_LEN,
};
use proptest::prelude::*;

fn sorted(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values
}

// Deterministic pseudo-random sequence (xorshift), so large cases need no
// proptest shrinking.
fn scrambled(len: usize, seed: u64) -> Vec<u32> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 10_000) as u32
        })
        .collect()
}

proptest! {
    #[test]
    fn matches_std_sort(values in prop::collection::vec(0u32..1000, 0..600)) {
        let mut actual = values.clone();
        hybrid_sort_by(&mut actual, |a, b| a < b);
        prop_assert_eq!(actual, sorted(values));
    }

    #[test]
    fn matches_std_sort_above_threshold(
        values in prop::collection::vec(any::<u32>(), SHELL_SORT_MAX_LEN + 1..SHELL_SORT_MAX_LEN + 1200),
    ) {
        let mut actual = values.clone();
        hybrid_sort_by(&mut actual, |a, b| a < b);
        prop_assert_eq!(actual, sorted(values));
    }

    #[test]
    fn descending_comparator(values in prop::collection::vec(0u32..50, 0..200)) {
        let mut actual = values.clone();
        hybrid_sort_by(&mut actual, |a, b| a > b);
        let mut expected = sorted(values);
        expected.reverse();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn sizes_around_thresholds() {
    let sizes = [
        0,
        1,
        2,
        MERGE_CHUNK_LEN - 1,
        MERGE_CHUNK_LEN,
        MERGE_CHUNK_LEN + 1,
        SHELL_SORT_MAX_LEN - 1,
        SHELL_SORT_MAX_LEN,
        SHELL_SORT_MAX_LEN + 1,
        SHELL_SORT_MAX_LEN + MERGE_CHUNK_LEN * 3 + 17,
        20_000,
    ];
    for (seed, len) in sizes.into_iter().enumerate() {
        let values = scrambled(len, seed as u64 + 7);
        let mut actual = values.clone();
        hybrid_sort_by(&mut actual, |a, b| a < b);
        assert_eq!(actual, sorted(values), "len {}", len);
    }
}

#[test]
fn zero_is_an_ordinary_key() {
    let mut values = scrambled(SHELL_SORT_MAX_LEN * 2, 99);
    values.extend([0, 0, 0]);
    hybrid_sort_by(&mut values, |a, b| a < b);
    assert_eq!(&values[..3], [0, 0, 0]);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn already_sorted_and_reversed() {
    let ascending: Vec<u32> = (0..9000).collect();
    let mut actual = ascending.clone();
    hybrid_sort_by(&mut actual, |a, b| a < b);
    assert_eq!(actual, ascending);

    let mut reversed: Vec<u32> = (0..9000).rev().collect();
    hybrid_sort_by(&mut reversed, |a, b| a < b);
    assert_eq!(reversed, ascending);
}

#[test]
fn sort_by_key_of_records() {
    let mut pairs: Vec<(usize, &str)> = vec![(30, "c"), (0, "a"), (12, "b")];
    hybrid_sort_by_key(&mut pairs, |pair| pair.0);
    assert_eq!(pairs, [(0, "a"), (12, "b"), (30, "c")]);
}

#[test]
fn markers_sort_by_position() {
    let mut markers: Vec<Marker> = (0..5000)
        .rev()
        .map(|i| if i % 2 == 0 { Marker::open(i) } else { Marker::close(i) })
        .collect();
    sort_markers(&mut markers);
    assert!(markers.windows(2).all(|w| w[0].position < w[1].position));
    assert_eq!(markers[0], Marker::open(0));
    assert_eq!(markers[4999], Marker::close(4999));
}
