// error.rs - Error type for anchor and tag search.

use std::fmt;

/// Error type for the search entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An argument was empty or whitespace-only.
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
    /// Strict pairing found a different number of opening and closing
    /// delimiters.
    Markup {
        open: String,
        close: String,
        opening: usize,
        closing: usize,
    },
    /// A search outcome reported failure (markup errors or an internal
    /// fault, possibly several joined together).
    Failed { message: String },
}

impl SearchError {
    pub(crate) fn invalid_argument(name: &'static str, reason: &'static str) -> Self {
        SearchError::InvalidArgument { name, reason }
    }

    pub(crate) fn markup(open: &str, close: &str, opening: usize, closing: usize) -> Self {
        SearchError::Markup {
            open: open.to_owned(),
            close: close.to_owned(),
            opening,
            closing,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidArgument { name, reason } => {
                write!(f, "invalid argument: `{}` {}", name, reason)
            }
            SearchError::Markup {
                open,
                close,
                opening,
                closing,
            } => write!(
                f,
                "invalid markup: {} `{}` openers vs {} `{}` closers",
                opening, open, closing, close
            ),
            SearchError::Failed { message } => write!(f, "search failed: {}", message),
        }
    }
}

impl std::error::Error for SearchError {}
