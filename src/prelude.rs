// prelude.rs - Convenient re-exports for the search API.
//
//! # Prelude
//!
//! ```
//! use linkscan::prelude::*;
//!
//! let anchors = find_anchors(r#"<a href="/">Home</a>"#).unwrap();
//! assert_eq!(anchors[0].inner_html, "Home");
//! ```

pub use crate::anchor::AnchorRecord;
pub use crate::engine::{
    count_external_links, find_anchors, find_tags, AnchorSearch, SearchBuilder, SearchFlags,
    TagSearch,
};
pub use crate::error::SearchError;
pub use crate::outcome::{SearchOutcome, TagRecord};
pub use crate::tag::RawTagSpan;
