// engine.rs - Search entry points.
//
// `AnchorSearch` runs the whole pipeline for `<a>` elements: exclusion
// ranges, delimiter search for both letter cases, pairing, attribute
// tokenizing and projection. `TagSearch` exposes the same pipeline for any
// pair of delimiters. Panics inside a search are reported as failed
// outcomes rather than unwinding into the caller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use bitflags::bitflags;
use tracing::{trace, warn};

use crate::anchor::AnchorRecord;
use crate::error::SearchError;
use crate::exclusion::{comment_ranges, noindex_ranges, ExclusionRange};
use crate::outcome::SearchOutcome;
use crate::tag::{find_tag_spans, RawTagSpan, TagDelimiters};
use crate::terms::{ANCHOR_CLOSE, ANCHOR_OPEN};

bitflags! {
    /// Switches controlling a search.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SearchFlags: u8 {
        /// Fail when opener and closer counts differ instead of pairing
        /// what can be paired.
        const STRICT = 1 << 0;
        /// Ignore everything inside `<!--` ... `-->`.
        const EXCLUDE_COMMENTS = 1 << 1;
        /// Ignore everything inside `<noindex>` and `<!--noindex-->` blocks.
        const EXCLUDE_NOINDEX = 1 << 2;
        /// Also search the all-uppercase spelling of the delimiters.
        const UPPERCASE_VARIANT = 1 << 3;
    }
}

impl Default for SearchFlags {
    fn default() -> Self {
        SearchFlags::EXCLUDE_COMMENTS | SearchFlags::EXCLUDE_NOINDEX | SearchFlags::UPPERCASE_VARIANT
    }
}

/// Anchor extraction with configurable options.
///
/// # Examples
///
/// ```
/// use linkscan::engine::AnchorSearch;
///
/// let search = AnchorSearch::builder().strict(true).build();
/// let outcome = search.search(r#"<a href="/x">x</a> <a href="/y">y"#);
/// assert!(!outcome.is_success());
///
/// let anchors = AnchorSearch::new().find(r#"<a href="/x">x</a>"#).unwrap();
/// assert_eq!(anchors[0].href.as_deref(), Some("/x"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorSearch {
    flags: SearchFlags,
}

impl AnchorSearch {
    /// Default options: non-strict, comments and noindex excluded, both
    /// letter cases searched.
    pub fn new() -> Self {
        AnchorSearch::default()
    }

    pub fn with_flags(flags: SearchFlags) -> Self {
        AnchorSearch { flags }
    }

    pub fn builder() -> SearchBuilder {
        SearchBuilder::new()
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Run the search, reporting every failure as a failed outcome.
    pub fn search(&self, text: &str) -> SearchOutcome<AnchorRecord> {
        if let Err(err) = validate_text(text) {
            return SearchOutcome::failed(err.to_string());
        }
        let delimiters = TagDelimiters::new(ANCHOR_OPEN, ANCHOR_CLOSE);
        guarded(|| collect_spans(text, delimiters, self.flags).map_records(AnchorRecord::from))
    }

    /// Anchors in `text`, ordered by position.
    ///
    /// Fails with [`SearchError::InvalidArgument`] for empty or blank text
    /// and with [`SearchError::Failed`] when the search itself fails.
    pub fn find(&self, text: &str) -> Result<Vec<AnchorRecord>, SearchError> {
        validate_text(text)?;
        self.search(text).into_result()
    }

    /// Number of anchors in `text` pointing outside the site.
    pub fn count_external(&self, text: &str) -> Result<usize, SearchError> {
        let anchors = self.find(text)?;
        Ok(anchors.iter().filter(|anchor| anchor.is_external).count())
    }
}

/// Search for any pair of delimiters, e.g. `<img` and `/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSearch<'p> {
    delimiters: TagDelimiters<'p>,
    flags: SearchFlags,
}

impl<'p> TagSearch<'p> {
    pub fn new(open: &'p str, close: &'p str) -> Self {
        TagSearch::with_flags(open, close, SearchFlags::default())
    }

    pub fn with_flags(open: &'p str, close: &'p str, flags: SearchFlags) -> Self {
        TagSearch {
            delimiters: TagDelimiters::new(open, close),
            flags,
        }
    }

    pub fn delimiters(&self) -> TagDelimiters<'p> {
        self.delimiters
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    /// Run the search, reporting every failure as a failed outcome.
    pub fn search<'t>(&self, text: &'t str) -> SearchOutcome<RawTagSpan<'t>> {
        if let Err(err) = validate_text(text) {
            return SearchOutcome::failed(err.to_string());
        }
        guarded(|| collect_spans(text, self.delimiters, self.flags))
    }

    /// Tag spans in `text`, ordered by position.
    pub fn find<'t>(&self, text: &'t str) -> Result<Vec<RawTagSpan<'t>>, SearchError> {
        validate_text(text)?;
        self.search(text).into_result()
    }
}

/// Builder for [`AnchorSearch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchBuilder {
    flags: SearchFlags,
}

impl SearchBuilder {
    pub fn new() -> Self {
        SearchBuilder::default()
    }

    /// Fail on unbalanced markup instead of recovering.
    pub fn strict(mut self, yes: bool) -> Self {
        self.flags.set(SearchFlags::STRICT, yes);
        self
    }

    pub fn exclude_comments(mut self, yes: bool) -> Self {
        self.flags.set(SearchFlags::EXCLUDE_COMMENTS, yes);
        self
    }

    pub fn exclude_noindex(mut self, yes: bool) -> Self {
        self.flags.set(SearchFlags::EXCLUDE_NOINDEX, yes);
        self
    }

    /// Also search `<A` ... `</A>`.
    pub fn uppercase_variant(mut self, yes: bool) -> Self {
        self.flags.set(SearchFlags::UPPERCASE_VARIANT, yes);
        self
    }

    pub fn flags(&self) -> SearchFlags {
        self.flags
    }

    pub fn build(self) -> AnchorSearch {
        AnchorSearch::with_flags(self.flags)
    }

    /// Build a [`TagSearch`] for other delimiters with the same options.
    pub fn build_tags<'p>(self, open: &'p str, close: &'p str) -> TagSearch<'p> {
        TagSearch::with_flags(open, close, self.flags)
    }
}

/// Anchors in `text` with default options, ordered by position.
///
/// # Examples
///
/// ```
/// use linkscan::find_anchors;
///
/// let anchors = find_anchors(r#"<a href="/">Home</a><a href="https://example.com">Out</a>"#).unwrap();
/// assert_eq!(anchors.len(), 2);
/// assert!(!anchors[0].is_external);
/// assert!(anchors[1].is_external);
/// ```
pub fn find_anchors(text: &str) -> Result<Vec<AnchorRecord>, SearchError> {
    AnchorSearch::new().find(text)
}

/// Spans delimited by `open` and `close` with default options.
pub fn find_tags<'t>(text: &'t str, open: &str, close: &str) -> Result<Vec<RawTagSpan<'t>>, SearchError> {
    TagSearch::new(open, close).find(text)
}

/// Number of external anchors in `text` with default options.
pub fn count_external_links(text: &str) -> Result<usize, SearchError> {
    AnchorSearch::new().count_external(text)
}

fn validate_text(text: &str) -> Result<(), SearchError> {
    if text.is_empty() {
        Err(SearchError::invalid_argument("text", "is empty"))
    } else if text.trim().is_empty() {
        Err(SearchError::invalid_argument("text", "is whitespace-only"))
    } else {
        Ok(())
    }
}

fn stop_ranges(text: &str, flags: SearchFlags) -> Vec<ExclusionRange> {
    let mut ranges = Vec::new();
    if flags.contains(SearchFlags::EXCLUDE_COMMENTS) {
        ranges.extend(comment_ranges(text));
    }
    if flags.contains(SearchFlags::EXCLUDE_NOINDEX) {
        ranges.extend(noindex_ranges(text));
    }
    ranges
}

fn collect_spans<'t>(
    text: &'t str,
    delimiters: TagDelimiters<'_>,
    flags: SearchFlags,
) -> SearchOutcome<RawTagSpan<'t>> {
    let stop = stop_ranges(text, flags);
    let strict = flags.contains(SearchFlags::STRICT);

    let mut outcome: SearchOutcome<_> = find_tag_spans(text, delimiters, &stop, strict).into();

    if flags.contains(SearchFlags::UPPERCASE_VARIANT) {
        let open = delimiters.open().to_uppercase();
        let close = delimiters.close().to_uppercase();
        if open != delimiters.open() || close != delimiters.close() {
            let upper = TagDelimiters::new(&open, &close);
            outcome = outcome.union(find_tag_spans(text, upper, &stop, strict).into());
        }
    }

    outcome.sort_by_start();
    if let Some(records) = outcome.records() {
        trace!(
            open = delimiters.open(),
            stop_ranges = stop.len(),
            spans = records.len(),
            "tag search finished"
        );
    }
    outcome
}

fn guarded<T, F>(search: F) -> SearchOutcome<T>
where
    F: FnOnce() -> SearchOutcome<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(search)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "search panicked, reporting a failed outcome");
            SearchOutcome::failed(format!("unexpected fault: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
