// tag.rs - Pairing opening and closing delimiters into tag spans.
//
// Markers for both delimiters are filtered against the stop ranges, merged
// into position order and paired with a stack, so nested tags resolve
// innermost first. Malformed input is tolerated: stray closers and unclosed
// openers are dropped instead of mispairing.

use memchr::{memchr, memchr2};
use smallvec::SmallVec;
use tracing::debug;

use crate::attributes::Attributes;
use crate::error::SearchError;
use crate::exclusion::{retain_outside, ExclusionRange};
use crate::matcher::{search, Marker, Role};
use crate::outcome::TagRecord;
use crate::sort::sort_markers;
use crate::terms::{TAG_END, TAG_END_ALTERNATIVE};

/// The literals that open and close one kind of tag, e.g. `<a` and `</a>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDelimiters<'p> {
    open: &'p str,
    close: &'p str,
}

impl<'p> TagDelimiters<'p> {
    pub fn new(open: &'p str, close: &'p str) -> Self {
        TagDelimiters { open, close }
    }

    pub fn open(&self) -> &'p str {
        self.open
    }

    pub fn close(&self) -> &'p str {
        self.close
    }

    /// Whether the opening literal already contains its `>`, as in `<b>`.
    /// Otherwise the attributes follow the literal.
    pub fn is_open_self_terminating(&self) -> bool {
        self.open.contains(TAG_END_ALTERNATIVE)
    }

    /// Whether the closing literal is a bare tag end (`/>` or `>`), which
    /// also ends unrelated tags.
    pub fn closes_with_tag_end(&self) -> bool {
        self.close == TAG_END || self.close == TAG_END_ALTERNATIVE
    }

    // `<a` must not match `<abbr` or `<aside`.
    fn needs_name_boundary(&self) -> bool {
        !self.is_open_self_terminating()
            && self
                .open
                .bytes()
                .last()
                .is_some_and(|b| b.is_ascii_alphanumeric())
    }
}

/// One paired tag occurrence, borrowed from the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTagSpan<'t> {
    /// Position of the opening literal.
    pub start_index: usize,
    /// Position of the closing literal.
    pub end_index: usize,
    /// Content between the end of the opening tag and the closing literal.
    pub inner_html: &'t str,
    /// Text between the opening literal and the opening tag's `>`.
    pub raw_attributes: &'t str,
    pub attributes: Attributes<'t>,
}

impl TagRecord for RawTagSpan<'_> {
    fn start_index(&self) -> usize {
        self.start_index
    }

    fn end_index(&self) -> usize {
        self.end_index
    }

    fn is_valid(&self) -> bool {
        true
    }
}

/// Search `text` for `delimiters` and pair the occurrences.
///
/// Returns no spans when the opening literal never occurs. With `strict`,
/// unequal opener and closer counts (after filtering and recovery) are an
/// error.
pub fn find_tag_spans<'t>(
    text: &'t str,
    delimiters: TagDelimiters<'_>,
    stop_ranges: &[ExclusionRange],
    strict: bool,
) -> Result<Vec<RawTagSpan<'t>>, SearchError> {
    let open = search(delimiters.open(), text, Role::Open);
    if open.is_empty() {
        return Ok(Vec::new());
    }
    let close = search(delimiters.close(), text, Role::Close);
    pair_tags(text, delimiters, open, close, stop_ranges, strict)
}

/// Pair already located opening and closing markers.
pub fn pair_tags<'t>(
    text: &'t str,
    delimiters: TagDelimiters<'_>,
    mut open: Vec<Marker>,
    mut close: Vec<Marker>,
    stop_ranges: &[ExclusionRange],
    strict: bool,
) -> Result<Vec<RawTagSpan<'t>>, SearchError> {
    retain_outside(&mut open, stop_ranges);
    retain_outside(&mut close, stop_ranges);

    if delimiters.needs_name_boundary() {
        let bytes = text.as_bytes();
        let skip = delimiters.open().len();
        open.retain(|marker| at_name_boundary(bytes, marker.position + skip));
    }

    if open.len() != close.len() && delimiters.closes_with_tag_end() {
        close = drop_stray_closers(&open, close);
    }

    if open.len() != close.len() {
        if strict {
            debug!(
                open = delimiters.open(),
                opening = open.len(),
                closing = close.len(),
                "strict pairing rejected markup"
            );
            return Err(SearchError::markup(
                delimiters.open(),
                delimiters.close(),
                open.len(),
                close.len(),
            ));
        }
        debug!(
            open = delimiters.open(),
            opening = open.len(),
            closing = close.len(),
            "pairing unbalanced markers"
        );
    }

    let capacity = open.len();
    let mut markers = open;
    markers.append(&mut close);
    sort_markers(&mut markers);

    let mut stack: SmallVec<[usize; 8]> = SmallVec::new();
    let mut spans = Vec::with_capacity(capacity);
    let mut stray = 0usize;
    for marker in &markers {
        match marker.role {
            Role::Open => stack.push(marker.position),
            Role::Close => match stack.pop() {
                Some(start) => spans.push(resolve_span(text, delimiters, start, marker.position)),
                None => stray += 1,
            },
        }
    }

    if stray > 0 || !stack.is_empty() {
        debug!(
            open = delimiters.open(),
            stray_closers = stray,
            unclosed_openers = stack.len(),
            "dropped unpaired markers"
        );
    }

    Ok(spans)
}

/// Keep only closers that follow the next unconsumed opener; stop once the
/// openers run out.
pub fn drop_stray_closers(open: &[Marker], close: Vec<Marker>) -> Vec<Marker> {
    let mut kept = Vec::with_capacity(open.len());
    for marker in close {
        let Some(opener) = open.get(kept.len()) else {
            break;
        };
        if marker.position > opener.position {
            kept.push(marker);
        }
    }
    kept
}

fn at_name_boundary(bytes: &[u8], after: usize) -> bool {
    match bytes.get(after) {
        None => true,
        Some(&b) => b.is_ascii_whitespace() || b == b'>' || b == b'/',
    }
}

fn resolve_span<'t>(
    text: &'t str,
    delimiters: TagDelimiters<'_>,
    start: usize,
    end: usize,
) -> RawTagSpan<'t> {
    let body_start = (start + delimiters.open().len()).min(end);
    let body = &text[body_start..end];

    if delimiters.is_open_self_terminating() {
        return RawTagSpan {
            start_index: start,
            end_index: end,
            inner_html: body,
            raw_attributes: "",
            attributes: Attributes::new(),
        };
    }

    let (raw, inner) = match find_tag_end(body.as_bytes()) {
        Some(gt) => (&body[..gt], &body[gt + 1..]),
        None => (body, ""),
    };
    let raw_attributes = raw.trim();

    RawTagSpan {
        start_index: start,
        end_index: end,
        inner_html: inner,
        raw_attributes,
        attributes: Attributes::parse(raw_attributes),
    }
}

/// Offset of the `>` ending an opening tag: the first one outside double
/// quotes, or the first one at all when the quotes never balance.
pub fn find_tag_end(body: &[u8]) -> Option<usize> {
    let mut in_quotes = false;
    let mut at = 0;
    while let Some(offset) = memchr2(b'"', b'>', &body[at..]) {
        let pos = at + offset;
        if body[pos] == b'"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            return Some(pos);
        }
        at = pos + 1;
    }
    memchr(b'>', body)
}
