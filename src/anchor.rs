// anchor.rs - Projection of a raw tag span onto an anchor record.

use crate::outcome::TagRecord;
use crate::tag::RawTagSpan;
use crate::terms::{
    DOWNLOAD_ATTRIBUTE, HREFLANG_ATTRIBUTE, HREF_ATTRIBUTE, REL_ATTRIBUTE, TARGET_ATTRIBUTE,
    TYPE_ATTRIBUTE,
};

/// One `<a>` element found in a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnchorRecord {
    /// Byte offset of `<a`.
    pub start_index: usize,
    /// Byte offset of `</a>`.
    pub end_index: usize,
    /// Markup between the opening tag and `</a>`, verbatim.
    pub inner_html: String,
    pub href: Option<String>,
    pub href_lang: Option<String>,
    pub target: Option<String>,
    pub download: Option<String>,
    pub rel: Option<String>,
    /// The `type` attribute (a MIME type hint).
    pub mime_type: Option<String>,
    /// Set when `href` is present and does not start with `/`.
    pub is_external: bool,
}

impl AnchorRecord {
    /// An anchor is valid when it has a non-blank `href`.
    pub fn is_valid(&self) -> bool {
        self.href.as_deref().is_some_and(|href| !href.trim().is_empty())
    }
}

impl TagRecord for AnchorRecord {
    fn start_index(&self) -> usize {
        self.start_index
    }

    fn end_index(&self) -> usize {
        self.end_index
    }

    fn is_valid(&self) -> bool {
        AnchorRecord::is_valid(self)
    }
}

impl From<&RawTagSpan<'_>> for AnchorRecord {
    fn from(span: &RawTagSpan<'_>) -> Self {
        let mut record = AnchorRecord {
            start_index: span.start_index,
            end_index: span.end_index,
            inner_html: span.inner_html.to_owned(),
            ..AnchorRecord::default()
        };

        for attribute in span.attributes.iter() {
            let value = Some(attribute.value.clone().into_owned());
            let name = attribute.name;
            if name.eq_ignore_ascii_case(HREF_ATTRIBUTE) {
                record.is_external = !attribute.value.starts_with('/');
                record.href = value;
            } else if name.eq_ignore_ascii_case(HREFLANG_ATTRIBUTE) {
                record.href_lang = value;
            } else if name.eq_ignore_ascii_case(TARGET_ATTRIBUTE) {
                record.target = value;
            } else if name.eq_ignore_ascii_case(DOWNLOAD_ATTRIBUTE) {
                record.download = value;
            } else if name.eq_ignore_ascii_case(REL_ATTRIBUTE) {
                record.rel = value;
            } else if name.eq_ignore_ascii_case(TYPE_ATTRIBUTE) {
                record.mime_type = value;
            }
        }

        record
    }
}

impl From<RawTagSpan<'_>> for AnchorRecord {
    fn from(span: RawTagSpan<'_>) -> Self {
        AnchorRecord::from(&span)
    }
}
