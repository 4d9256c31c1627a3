// alphabet.rs - Dense symbol indices for the bad-character tables.
//
// Printable Latin (U+0020..U+007E) maps to 0..95 and the Cyrillic block
// (U+0400..U+04FE) to 95..350. Anything else is outside the alphabet; the
// matcher never looks such units up in a table.

/// First printable Latin code point.
pub const LATIN_START: u32 = 0x0020;
/// One past the last printable Latin code point.
pub const LATIN_END: u32 = 0x007f;
/// First code point of the Cyrillic block.
pub const CYRILLIC_START: u32 = 0x0400;
/// One past the last Cyrillic code point in the alphabet.
pub const CYRILLIC_END: u32 = 0x04ff;

pub const LATIN_LEN: usize = (LATIN_END - LATIN_START) as usize;
pub const CYRILLIC_LEN: usize = (CYRILLIC_END - CYRILLIC_START) as usize;

/// Number of entries in every bad-character table.
pub const ALPHABET_LEN: usize = LATIN_LEN + CYRILLIC_LEN;

const NOT_IN_ALPHABET: u16 = u16::MAX;

// Indexed directly by code point; everything at or above CYRILLIC_END is
// rejected by the bounds check in `alphabet_index`.
static ALPHABET_MAP: [u16; CYRILLIC_END as usize] = build_alphabet_map();

const fn build_alphabet_map() -> [u16; CYRILLIC_END as usize] {
    let mut map = [NOT_IN_ALPHABET; CYRILLIC_END as usize];
    let mut index: u16 = 0;

    let mut code = LATIN_START;
    while code < LATIN_END {
        map[code as usize] = index;
        index += 1;
        code += 1;
    }

    code = CYRILLIC_START;
    while code < CYRILLIC_END {
        map[code as usize] = index;
        index += 1;
        code += 1;
    }

    map
}

/// Dense alphabet index of `code_point`, or `None` when it is outside the
/// alphabet.
#[inline]
pub fn alphabet_index(code_point: u32) -> Option<usize> {
    match ALPHABET_MAP.get(code_point as usize) {
        Some(&index) if index != NOT_IN_ALPHABET => Some(index as usize),
        _ => None,
    }
}

/// A unit of text the matcher can compare and classify.
///
/// Implemented for `u8` (UTF-8 bytes of a `&str`; every non-ASCII byte is
/// outside the alphabet) and `char` (whole code points, so the Cyrillic part
/// of the alphabet applies).
pub trait Symbol: Copy + Eq + Send + Sync + 'static {
    /// Dense alphabet index of this unit, if it has one.
    fn alphabet_index(self) -> Option<usize>;
}

impl Symbol for u8 {
    #[inline]
    fn alphabet_index(self) -> Option<usize> {
        alphabet_index(self as u32)
    }
}

impl Symbol for char {
    #[inline]
    fn alphabet_index(self) -> Option<usize> {
        alphabet_index(self as u32)
    }
}
