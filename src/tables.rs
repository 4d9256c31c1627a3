// tables.rs - Boyer-Moore shift tables and their process-wide cache.
//
// Suffix, good-suffix and bad-character tables are built once per literal
// and unit width, then shared read-only through an `Arc`. The cache is a
// `DashMap` behind a `LazyLock`; the entry API makes construction
// compute-once per key.

use std::sync::{Arc, LazyLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;

use crate::alphabet::{Symbol, ALPHABET_LEN};

/// Cache of tables for one unit width, keyed by the pattern literal.
pub type TableCache<U> = DashMap<Box<str>, Arc<PatternTables<U>>>;

static BYTE_TABLES: LazyLock<TableCache<u8>> = LazyLock::new(DashMap::new);
static CHAR_TABLES: LazyLock<TableCache<char>> = LazyLock::new(DashMap::new);

/// A [`Symbol`] that patterns can be decoded into and whose tables are cached.
pub trait PatternUnit: Symbol {
    /// Decode a literal into units of this width.
    fn units(pattern: &str) -> Box<[Self]>;

    /// The process-wide cache for this width.
    fn table_cache() -> &'static TableCache<Self>;
}

impl PatternUnit for u8 {
    fn units(pattern: &str) -> Box<[u8]> {
        pattern.as_bytes().into()
    }

    fn table_cache() -> &'static TableCache<u8> {
        &BYTE_TABLES
    }
}

impl PatternUnit for char {
    fn units(pattern: &str) -> Box<[char]> {
        pattern.chars().collect()
    }

    fn table_cache() -> &'static TableCache<char> {
        &CHAR_TABLES
    }
}

/// Precomputed Boyer-Moore tables for one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTables<U> {
    pattern: Box<[U]>,
    suffix: Box<[usize]>,
    good_suffix: Box<[usize]>,
    bad_character: Box<[usize]>,
    alphabet_complete: bool,
}

impl<U: PatternUnit> PatternTables<U> {
    /// Tables for `pattern`, built on first request and shared afterwards.
    pub fn get(pattern: &str) -> Arc<Self> {
        let cache = U::table_cache();
        if let Some(tables) = cache.get(pattern) {
            return Arc::clone(tables.value());
        }

        match cache.entry(Box::from(pattern)) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                trace!(pattern, "building shift tables");
                let tables = Arc::new(Self::build(U::units(pattern)));
                entry.insert(Arc::clone(&tables));
                tables
            }
        }
    }
}

impl<U: Symbol> PatternTables<U> {
    /// Build tables without touching the cache.
    pub fn build(pattern: Box<[U]>) -> Self {
        if pattern.is_empty() {
            return PatternTables {
                pattern,
                suffix: Box::default(),
                good_suffix: Box::default(),
                bad_character: vec![0; ALPHABET_LEN].into_boxed_slice(),
                alphabet_complete: true,
            };
        }

        let suffix = suffixes(&pattern);
        let good_suffix = good_suffixes(&suffix);
        let bad_character = bad_characters(&pattern);
        let last = pattern.len() - 1;
        let alphabet_complete = pattern[..last]
            .iter()
            .all(|unit| unit.alphabet_index().is_some());

        PatternTables {
            pattern,
            suffix: suffix.into_boxed_slice(),
            good_suffix: good_suffix.into_boxed_slice(),
            bad_character: bad_character.into_boxed_slice(),
            alphabet_complete,
        }
    }

    /// The pattern units the tables were built for.
    pub fn pattern(&self) -> &[U] {
        &self.pattern
    }

    /// Pattern length in units.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// `suffix[i]`: length of the longest substring ending at `i` that is
    /// also a suffix of the pattern.
    pub fn suffix(&self) -> &[usize] {
        &self.suffix
    }

    /// Shift to apply after a mismatch at pattern position `i`.
    pub fn good_suffix(&self) -> &[usize] {
        &self.good_suffix
    }

    /// Distance from the last occurrence of each alphabet symbol in
    /// `pattern[..len - 1]` to the pattern end; `len` when absent.
    pub fn bad_character(&self) -> &[usize] {
        &self.bad_character
    }

    /// Whether every unit of `pattern[..len - 1]` is inside the alphabet, so
    /// an out-of-alphabet text unit cannot occur there.
    pub fn alphabet_complete(&self) -> bool {
        self.alphabet_complete
    }
}

fn suffixes<U: Symbol>(pattern: &[U]) -> Vec<usize> {
    let m = pattern.len() as isize;
    let mut suffix = vec![0usize; pattern.len()];
    suffix[pattern.len() - 1] = pattern.len();

    let mut f: isize = 0;
    let mut g: isize = m - 1;
    for i in (0..m - 1).rev() {
        if i > g && (suffix[(i + m - 1 - f) as usize] as isize) < i - g {
            suffix[i as usize] = suffix[(i + m - 1 - f) as usize];
        } else {
            if i < g {
                g = i;
            }
            f = i;
            while g >= 0 && pattern[g as usize] == pattern[(g + m - 1 - f) as usize] {
                g -= 1;
            }
            suffix[i as usize] = (f - g) as usize;
        }
    }

    suffix
}

fn good_suffixes(suffix: &[usize]) -> Vec<usize> {
    let m = suffix.len();
    let mut good = vec![m; m];

    // Only a prefix of the matched suffix reoccurs.
    let mut j = 0;
    for i in (0..m).rev() {
        if suffix[i] == i + 1 {
            while j < m - 1 - i {
                if good[j] == m {
                    good[j] = m - 1 - i;
                }
                j += 1;
            }
        }
    }

    // The whole matched suffix reoccurs earlier in the pattern.
    for i in 0..m - 1 {
        good[m - 1 - suffix[i]] = m - 1 - i;
    }

    good
}

fn bad_characters<U: Symbol>(pattern: &[U]) -> Vec<usize> {
    let m = pattern.len();
    let mut bad = vec![m; ALPHABET_LEN];
    for (i, unit) in pattern[..m - 1].iter().enumerate() {
        if let Some(index) = unit.alphabet_index() {
            bad[index] = m - 1 - i;
        }
    }
    bad
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::alphabet_index;

    fn bytes(pattern: &str) -> PatternTables<u8> {
        PatternTables::build(u8::units(pattern))
    }

    #[test]
    fn classic_gcagagag() {
        let tables = bytes("GCAGAGAG");
        assert_eq!(tables.suffix(), &[1, 0, 0, 2, 0, 4, 0, 8]);
        assert_eq!(tables.good_suffix(), &[7, 7, 7, 2, 7, 4, 7, 1]);

        let bc = |c: char| tables.bad_character()[alphabet_index(c as u32).unwrap()];
        assert_eq!(bc('A'), 1);
        assert_eq!(bc('C'), 6);
        assert_eq!(bc('G'), 2);
        assert_eq!(bc('T'), 8);
    }

    #[test]
    fn single_unit_pattern() {
        let tables = bytes("a");
        assert_eq!(tables.suffix(), &[1]);
        assert_eq!(tables.good_suffix(), &[1]);
        assert!(tables.bad_character().iter().all(|&shift| shift == 1));
    }

    #[test]
    fn anchor_close_literal() {
        let tables = bytes("</a>");
        assert_eq!(tables.suffix(), &[0, 0, 0, 4]);
        assert_eq!(tables.good_suffix(), &[4, 4, 4, 1]);
        let bc = |c: char| tables.bad_character()[alphabet_index(c as u32).unwrap()];
        assert_eq!(bc('<'), 3);
        assert_eq!(bc('/'), 2);
        assert_eq!(bc('a'), 1);
        assert_eq!(bc('>'), 4);
    }

    #[test]
    fn empty_pattern_tables() {
        let tables = bytes("");
        assert!(tables.is_empty());
        assert!(tables.suffix().is_empty());
        assert!(tables.good_suffix().is_empty());
    }

    #[test]
    fn alphabet_completeness() {
        assert!(bytes("<!--").alphabet_complete());
        // The last unit is never looked up.
        assert!(bytes("ab\n").alphabet_complete());
        assert!(!bytes("a\nb").alphabet_complete());
        assert!(!bytes("жa").alphabet_complete());
        assert!(PatternTables::<char>::build(char::units("жa")).alphabet_complete());
    }

    #[test]
    fn cache_shares_tables() {
        let first = PatternTables::<u8>::get("<!--noindex-->");
        let second = PatternTables::<u8>::get("<!--noindex-->");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 14);
    }

    #[test]
    fn widths_are_cached_separately() {
        let bytes = PatternTables::<u8>::get("ссылка");
        let chars = PatternTables::<char>::get("ссылка");
        assert_eq!(bytes.len(), 12);
        assert_eq!(chars.len(), 6);
    }
}
