// sort.rs - Hybrid Shell / bottom-up merge sort.
//
// Short inputs are Shell-sorted in place with Ciura's gap sequence. Longer
// inputs are cut into fixed chunks, each chunk is Shell-sorted, and the
// sorted runs are merged bottom-up through one auxiliary buffer.

use crate::matcher::Marker;

/// Longest input sorted by Shell sort alone.
pub const SHELL_SORT_MAX_LEN: usize = 4000;

/// Run length Shell-sorted before merging. Must stay below
/// [`SHELL_SORT_MAX_LEN`].
pub const MERGE_CHUNK_LEN: usize = 512;

/// Ciura's gap sequence (OEIS A102549).
const CIURA_GAPS: [usize; 9] = [1, 4, 10, 23, 57, 132, 301, 701, 1750];

/// Sort `items` ascending, where `less(a, b)` means `a` orders before `b`.
///
/// Equal elements may be reordered.
///
/// # Examples
///
/// ```
/// use linkscan::sort::hybrid_sort_by;
///
/// let mut values = [5, 0, 3, 3, 1];
/// hybrid_sort_by(&mut values, |a, b| a < b);
/// assert_eq!(values, [0, 1, 3, 3, 5]);
/// ```
pub fn hybrid_sort_by<T, F>(items: &mut [T], mut less: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = items.len();
    if len <= 1 {
        return;
    }

    if len <= SHELL_SORT_MAX_LEN {
        shell_sort(items, &mut less);
        return;
    }

    for chunk in items.chunks_mut(MERGE_CHUNK_LEN) {
        shell_sort(chunk, &mut less);
    }
    merge_runs(items, MERGE_CHUNK_LEN, &mut less);
}

/// Sort `items` ascending by the key `key` extracts.
pub fn hybrid_sort_by_key<T, K, F>(items: &mut [T], mut key: F)
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    hybrid_sort_by(items, |a, b| key(a) < key(b));
}

/// Order markers by text position. At a shared position a closer comes
/// before an opener.
pub fn sort_markers(markers: &mut [Marker]) {
    hybrid_sort_by_key(markers, |marker| (marker.position, marker.is_open()));
}

fn shell_sort<T, F>(items: &mut [T], less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = items.len();
    let first = CIURA_GAPS
        .iter()
        .rposition(|&gap| gap < len / 2)
        .unwrap_or(0);

    for &gap in CIURA_GAPS[..=first].iter().rev() {
        for i in gap..len {
            let mut j = i;
            while j >= gap && less(&items[j], &items[j - gap]) {
                items.swap(j, j - gap);
                j -= gap;
            }
        }
    }
}

// `items` holds sorted runs of length `run` (the last may be shorter).
fn merge_runs<T, F>(items: &mut [T], run: usize, less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let len = items.len();
    let mut buffer = items.to_vec();

    let mut width = run;
    while width < len {
        let mut left = 0;
        while left < len - width {
            let mid = left + width;
            let right = (left + 2 * width).min(len);
            merge(items, &mut buffer, left, mid, right, less);
            left += 2 * width;
        }
        width *= 2;
    }
}

// Merge `items[left..mid]` and `items[mid..right]`.
fn merge<T, F>(items: &mut [T], buffer: &mut [T], left: usize, mid: usize, right: usize, less: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    buffer[left..right].clone_from_slice(&items[left..right]);

    let (mut i, mut j) = (left, mid);
    for slot in &mut items[left..right] {
        let take_right = if i >= mid {
            true
        } else if j >= right {
            false
        } else {
            less(&buffer[j], &buffer[i])
        };

        if take_right {
            *slot = buffer[j].clone();
            j += 1;
        } else {
            *slot = buffer[i].clone();
            i += 1;
        }
    }
}
