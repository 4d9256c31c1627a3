//! # Linkscan
//!
//! Anchor-tag extraction from raw HTML, built on a Turbo Boyer-Moore
//! substring search over a fixed Latin + Cyrillic alphabet.
//!
//! Linkscan does not parse HTML. It locates the literal delimiters `<a` and
//! `</a>` (and their uppercase spelling), pairs them with a stack, skips
//! anything inside comments and `noindex` blocks, and tokenizes the
//! attributes of each opening tag. Malformed markup is tolerated: stray
//! closers and unclosed openers are dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use linkscan::prelude::*;
//!
//! let html = r#"<p><a href="/about">About</a> <A HREF="https://example.com" TARGET="_blank">Out</A></p>"#;
//! let anchors = find_anchors(html).unwrap();
//! assert_eq!(anchors.len(), 2);
//! assert_eq!(anchors[0].href.as_deref(), Some("/about"));
//! assert!(!anchors[0].is_external);
//! assert_eq!(anchors[1].target.as_deref(), Some("_blank"));
//! assert!(anchors[1].is_external);
//! ```
//!
//! For fine-grained control, use [`AnchorSearch::builder`]:
//!
//! ```rust
//! use linkscan::prelude::*;
//!
//! let search = AnchorSearch::builder()
//!     .strict(true)
//!     .exclude_comments(false)
//!     .build();
//! let outcome = search.search(r#"<!-- <a href="/old">old</a> --><a href="/new">new</a>"#);
//! assert_eq!(outcome.records().map(<[_]>::len), Some(2));
//! ```
//!
//! Other tags go through [`TagSearch`] or [`find_tags`]:
//!
//! ```rust
//! let spans = linkscan::find_tags(r#"<img src="/a.png"/>"#, "<img", "/>").unwrap();
//! assert_eq!(spans[0].attributes.get("src"), Some("/a.png"));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`alphabet`] | Code point to alphabet index map |
//! | [`tables`] | Shift tables and the process-wide table cache |
//! | [`matcher`] | Turbo Boyer-Moore search |
//! | [`sort`] | Hybrid shell/merge sort for marker lists |
//! | [`terms`] | Delimiter and attribute-name literals |
//! | [`exclusion`] | Comment and `noindex` ranges |
//! | [`attributes`] | Attribute tokenizer |
//! | [`tag`] | Delimiter pairing into tag spans |
//! | [`anchor`] | Anchor record projection |
//! | [`outcome`] | Search outcome and union |
//! | [`engine`] | Entry points and options |
//! | [`error`] | Error type |

pub mod alphabet;
pub mod anchor;
pub mod attributes;
pub mod engine;
pub mod error;
pub mod exclusion;
pub mod matcher;
pub mod outcome;
pub mod prelude;
pub mod sort;
pub mod tables;
pub mod tag;
pub mod terms;

pub use anchor::AnchorRecord;
pub use engine::{
    count_external_links, find_anchors, find_tags, AnchorSearch, SearchBuilder, SearchFlags,
    TagSearch,
};
pub use error::SearchError;
pub use outcome::{SearchOutcome, TagRecord};
pub use tag::RawTagSpan;
