// exclusion.rs - Comment and noindex ranges ignored by tag search.
//
// Begin and end literals of a block are searched separately and paired by
// index. When the counts differ the whole block type is dropped: a partial
// pairing would exclude the wrong text.

use tracing::debug;

use crate::matcher::{search, Marker, Role};
use crate::terms::{Block, COMMENT_BLOCK, NOINDEX_BLOCK, NOINDEX_COMMENT_BLOCK};

/// Text between a block's begin marker and its end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExclusionRange {
    /// Position of the begin literal.
    pub start: usize,
    /// Position of the end literal.
    pub end: usize,
}

impl ExclusionRange {
    pub fn new(start: usize, end: usize) -> Self {
        ExclusionRange { start, end }
    }

    /// Whether `position` is excluded. Both bounds are inclusive.
    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position <= self.end
    }
}

/// Ranges of one block type, or nothing if its literals are unbalanced.
pub fn block_ranges(text: &str, block: Block) -> Vec<ExclusionRange> {
    let begins = search(block.begin, text, Role::Open);
    let ends = search(block.end, text, Role::Close);

    if begins.len() != ends.len() {
        debug!(
            begin = block.begin,
            begins = begins.len(),
            ends = ends.len(),
            "discarding unbalanced exclusion block"
        );
        return Vec::new();
    }

    begins
        .iter()
        .zip(&ends)
        .map(|(begin, end)| ExclusionRange::new(begin.position, end.position))
        .collect()
}

/// `<!--` ... `-->` ranges.
pub fn comment_ranges(text: &str) -> Vec<ExclusionRange> {
    block_ranges(text, COMMENT_BLOCK)
}

/// `<noindex>` and `<!--noindex-->` ranges.
pub fn noindex_ranges(text: &str) -> Vec<ExclusionRange> {
    let mut ranges = block_ranges(text, NOINDEX_BLOCK);
    ranges.extend(block_ranges(text, NOINDEX_COMMENT_BLOCK));
    ranges
}

/// Every comment and noindex range in `text`.
///
/// # Examples
///
/// ```
/// use linkscan::exclusion::exclusion_ranges;
///
/// let ranges = exclusion_ranges("a<!-- b -->c");
/// assert_eq!(ranges.len(), 1);
/// assert!(ranges[0].contains(5));
/// assert!(!ranges[0].contains(11));
/// ```
pub fn exclusion_ranges(text: &str) -> Vec<ExclusionRange> {
    let mut ranges = comment_ranges(text);
    ranges.extend(noindex_ranges(text));
    ranges
}

/// Whether `position` falls inside any of `ranges`.
pub fn is_excluded(position: usize, ranges: &[ExclusionRange]) -> bool {
    ranges.iter().any(|range| range.contains(position))
}

/// Drop markers inside any of `ranges`.
pub fn retain_outside(markers: &mut Vec<Marker>, ranges: &[ExclusionRange]) {
    if ranges.is_empty() {
        return;
    }
    markers.retain(|marker| !is_excluded(marker.position, ranges));
}
