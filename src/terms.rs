// terms.rs - HTML literals the engine searches for.

/// Self-closing tag end.
pub const TAG_END: &str = "/>";
/// Plain tag end.
pub const TAG_END_ALTERNATIVE: &str = ">";

pub const COMMENT_BEGIN: &str = "<!--";
pub const COMMENT_END: &str = "-->";

pub const NOINDEX_BEGIN: &str = "<noindex>";
pub const NOINDEX_END: &str = "</noindex>";

/// Comment spelling of the noindex block, understood by some crawlers.
pub const NOINDEX_COMMENT_BEGIN: &str = "<!--noindex-->";
pub const NOINDEX_COMMENT_END: &str = "<!--/noindex-->";

pub const ANCHOR_OPEN: &str = "<a";
pub const ANCHOR_CLOSE: &str = "</a>";

pub const HREF_ATTRIBUTE: &str = "href";
pub const HREFLANG_ATTRIBUTE: &str = "hreflang";
pub const TARGET_ATTRIBUTE: &str = "target";
pub const DOWNLOAD_ATTRIBUTE: &str = "download";
pub const REL_ATTRIBUTE: &str = "rel";
pub const TYPE_ATTRIBUTE: &str = "type";

/// A pair of literals delimiting a block whose content is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub begin: &'static str,
    pub end: &'static str,
}

pub const COMMENT_BLOCK: Block = Block {
    begin: COMMENT_BEGIN,
    end: COMMENT_END,
};

pub const NOINDEX_BLOCK: Block = Block {
    begin: NOINDEX_BEGIN,
    end: NOINDEX_END,
};

pub const NOINDEX_COMMENT_BLOCK: Block = Block {
    begin: NOINDEX_COMMENT_BEGIN,
    end: NOINDEX_COMMENT_END,
};
