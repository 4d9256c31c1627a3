// matcher.rs - Turbo Boyer-Moore search for literal patterns.
//
// Reports every occurrence (overlapping ones included) as a position marker
// tagged with the caller's role. Shift tables come from the shared cache in
// `tables`, so repeated searches for the same delimiter never rebuild them.

use crate::alphabet::Symbol;
use crate::tables::{PatternTables, PatternUnit};

/// Whether a marker opens or closes a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Open,
    Close,
}

/// A position in the searched text, tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Offset of the first unit of the occurrence.
    pub position: usize,
    pub role: Role,
}

impl Marker {
    pub fn open(position: usize) -> Self {
        Marker { position, role: Role::Open }
    }

    pub fn close(position: usize) -> Self {
        Marker { position, role: Role::Close }
    }

    pub fn is_open(&self) -> bool {
        self.role == Role::Open
    }
}

/// Find every occurrence of `pattern` in `text`.
///
/// Positions are UTF-8 byte offsets, so they can be used to slice `text`.
///
/// # Examples
///
/// ```
/// use linkscan::matcher::{search, Role};
///
/// let markers = search("</a>", "<a>x</a><a>y</a>", Role::Close);
/// let positions: Vec<usize> = markers.iter().map(|m| m.position).collect();
/// assert_eq!(positions, [4, 12]);
/// ```
pub fn search(pattern: &str, text: &str, role: Role) -> Vec<Marker> {
    search_units::<u8>(pattern, text.as_bytes(), role)
}

/// Find every occurrence of `pattern` in a text indexed by code point.
///
/// Positions are indices into `text`.
pub fn search_chars(pattern: &str, text: &[char], role: Role) -> Vec<Marker> {
    search_units::<char>(pattern, text, role)
}

/// Width-generic entry point behind [`search`] and [`search_chars`].
pub fn search_units<U: PatternUnit>(pattern: &str, text: &[U], role: Role) -> Vec<Marker> {
    if pattern.is_empty() || text.is_empty() {
        return Vec::new();
    }
    let tables = PatternTables::<U>::get(pattern);
    turbo_boyer_moore(&tables, text, role)
}

/// Run the search with already built tables.
pub fn turbo_boyer_moore<U: Symbol>(
    tables: &PatternTables<U>,
    text: &[U],
    role: Role,
) -> Vec<Marker> {
    let pattern = tables.pattern();
    let m = pattern.len();
    let n = text.len();
    let mut markers = Vec::new();
    if m == 0 || m > n {
        return markers;
    }

    let good_suffix = tables.good_suffix();
    let bad_character = tables.bad_character();
    let last = m as isize - 1;

    // `memory` is the length of the suffix matched by the previous attempt
    // that is known to match again at the current alignment.
    let mut j = 0usize;
    let mut memory = 0usize;
    let mut shift = m;
    while j <= n - m {
        let mut i = last;
        while i >= 0 && pattern[i as usize] == text[i as usize + j] {
            i -= 1;
            if memory != 0 && i == last - shift as isize {
                i -= memory as isize;
            }
        }

        if i < 0 {
            markers.push(Marker { position: j, role });
            shift = good_suffix[0];
            memory = m - shift;
        } else {
            let at = i as usize;
            let matched = m - 1 - at;
            let turbo_shift = memory as isize - matched as isize;

            let (bc_shift, bc_known) = match text[at + j].alphabet_index() {
                Some(index) => (bad_character[index] as isize - m as isize + 1 + i, true),
                None if tables.alphabet_complete() => (i + 1, true),
                None => (1, false),
            };

            let gs_shift = good_suffix[at] as isize;
            let mut next = turbo_shift.max(bc_shift).max(gs_shift);
            if next == gs_shift {
                memory = (m - good_suffix[at]).min(matched);
            } else {
                if bc_known && turbo_shift < bc_shift {
                    next = next.max(memory as isize + 1);
                }
                memory = 0;
            }
            shift = next as usize;
        }

        j += shift;
    }

    markers
}

/// Positions of `markers`, in order.
pub fn positions(markers: &[Marker]) -> Vec<usize> {
    markers.iter().map(|marker| marker.position).collect()
}
