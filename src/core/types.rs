//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Title`] - Validated outline entry title
//! - [`LogicalPage`] - Positive 1-based logical page number
//! - [`PageOffset`] - Signed per-document page correction
//! - [`NodeId`] - Session id token (`n<k>`)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use spine::core::types::{LogicalPage, NodeId, PageOffset, Title};
//!
//! // Valid constructions
//! let title = Title::new("Chapter 1").unwrap();
//! let page = LogicalPage::new(4).unwrap();
//! let id = NodeId::parse("n3").unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(Title::new("   ").is_err());
//! assert!(LogicalPage::new(0).is_err());
//! assert!(NodeId::parse("3").is_err());
//!
//! // Offset arithmetic
//! let offset = PageOffset::new(2);
//! assert_eq!(offset.actual(page), 6);
//! assert_eq!(offset.logical(6), 4);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid title: {0}")]
    InvalidTitle(String),

    #[error("invalid page: {0}")]
    InvalidPage(String),

    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// A validated outline entry title.
///
/// Titles cannot be empty or consist only of whitespace. The original
/// text, including interior whitespace, is preserved as given.
///
/// # Example
///
/// ```
/// use spine::core::types::Title;
///
/// let title = Title::new("1. Introduction").unwrap();
/// assert_eq!(title.as_str(), "1. Introduction");
///
/// assert!(Title::new("").is_err());
/// assert!(Title::new("  \t ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Create a new validated title.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTitle` if the text is empty or whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, TypeError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TypeError::InvalidTitle("title cannot be empty".into()));
        }
        Ok(Self(text))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positive 1-based logical page number.
///
/// The logical page is the page as the user thinks of it (printed chapter
/// numbering). It is translated to the document's real page through a
/// [`PageOffset`].
///
/// # Example
///
/// ```
/// use spine::core::types::LogicalPage;
///
/// let page = LogicalPage::new(12).unwrap();
/// assert_eq!(page.get(), 12);
///
/// assert!(LogicalPage::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LogicalPage(u32);

impl LogicalPage {
    /// Create a new validated logical page.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPage` if the page is not positive.
    pub fn new(page: u32) -> Result<Self, TypeError> {
        if page == 0 {
            return Err(TypeError::InvalidPage(
                "page must be a positive integer".into(),
            ));
        }
        Ok(Self(page))
    }

    /// Get the page number.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for LogicalPage {
    type Error = TypeError;

    fn try_from(page: u32) -> Result<Self, Self::Error> {
        Self::new(page)
    }
}

impl From<LogicalPage> for u32 {
    fn from(page: LogicalPage) -> Self {
        page.0
    }
}

impl std::fmt::Display for LogicalPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed per-document page correction.
///
/// `actual = logical + offset`. There is no range restriction at the model
/// level; out-of-range results are caught by the export validator against
/// the document's real page count.
///
/// # Example
///
/// ```
/// use spine::core::types::{LogicalPage, PageOffset};
///
/// let offset = PageOffset::new(-3);
/// let page = LogicalPage::new(10).unwrap();
/// assert_eq!(offset.actual(page), 7);
/// assert_eq!(offset.logical(7), 10);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PageOffset(i64);

impl PageOffset {
    /// Create an offset. Any signed value is valid.
    pub fn new(offset: i64) -> Self {
        Self(offset)
    }

    /// The zero offset (no correction).
    pub fn zero() -> Self {
        Self(0)
    }

    /// Whether this is the zero offset.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Get the raw offset value.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Translate a logical page to the actual 1-based page.
    pub fn actual(self, logical: LogicalPage) -> i64 {
        i64::from(logical.get()) + self.0
    }

    /// Translate an actual 1-based page back to the logical page.
    pub fn logical(self, actual: i64) -> i64 {
        actual - self.0
    }

    /// Translate a logical page to the 0-based page index used by
    /// export destinations.
    pub fn page_index(self, logical: LogicalPage) -> i64 {
        self.actual(logical) - 1
    }
}

impl std::fmt::Display for PageOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session id token addressing a node independent of position.
///
/// Ids are written `n<k>` where `k` is the node's 1-based pre-order ordinal
/// in the current tree. They are session-local and reassigned after every
/// structural edit, so they are derived from current tree order on demand
/// rather than stored. The fixed `n` prefix keeps ids syntactically
/// distinguishable from positional paths: a bare integer is always a path.
///
/// # Example
///
/// ```
/// use spine::core::types::NodeId;
///
/// let id = NodeId::parse("n7").unwrap();
/// assert_eq!(id.ordinal(), 7);
/// assert_eq!(id.to_string(), "n7");
///
/// // A bare integer is a path segment, never an id
/// assert!(NodeId::parse("7").is_err());
/// assert!(NodeId::parse("n0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create an id from a 1-based pre-order ordinal.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidId` if the ordinal is zero.
    pub fn from_ordinal(ordinal: u32) -> Result<Self, TypeError> {
        if ordinal == 0 {
            return Err(TypeError::InvalidId("id ordinal must be positive".into()));
        }
        Ok(Self(ordinal))
    }

    /// Parse an id token of the form `n<k>`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidId` if the token lacks the `n` prefix or
    /// does not carry a positive integer.
    pub fn parse(token: &str) -> Result<Self, TypeError> {
        let digits = token
            .strip_prefix('n')
            .ok_or_else(|| TypeError::InvalidId(format!("id must look like n3, got '{token}'")))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidId(format!(
                "id must look like n3, got '{token}'"
            )));
        }
        let ordinal: u32 = digits
            .parse()
            .map_err(|_| TypeError::InvalidId(format!("id out of range: '{token}'")))?;
        Self::from_ordinal(ordinal)
    }

    /// Get the 1-based pre-order ordinal.
    pub fn ordinal(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod title {
        use super::*;

        #[test]
        fn valid_titles() {
            assert!(Title::new("Introduction").is_ok());
            assert!(Title::new("1. Methods & Materials").is_ok());
            assert!(Title::new("  padded  ").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert!(Title::new("").is_err());
        }

        #[test]
        fn whitespace_only_rejected() {
            assert!(Title::new("   ").is_err());
            assert!(Title::new("\t\n").is_err());
        }

        #[test]
        fn preserves_original_text() {
            let title = Title::new("  A  B  ").unwrap();
            assert_eq!(title.as_str(), "  A  B  ");
        }

        #[test]
        fn serde_roundtrip() {
            let title = Title::new("Appendix").unwrap();
            let json = serde_json::to_string(&title).unwrap();
            let parsed: Title = serde_json::from_str(&json).unwrap();
            assert_eq!(title, parsed);
        }

        #[test]
        fn serde_rejects_empty() {
            assert!(serde_json::from_str::<Title>("\"\"").is_err());
        }
    }

    mod logical_page {
        use super::*;

        #[test]
        fn positive_pages_ok() {
            assert!(LogicalPage::new(1).is_ok());
            assert!(LogicalPage::new(9999).is_ok());
        }

        #[test]
        fn zero_rejected() {
            assert!(LogicalPage::new(0).is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let page = LogicalPage::new(42).unwrap();
            let json = serde_json::to_string(&page).unwrap();
            assert_eq!(json, "42");
            let parsed: LogicalPage = serde_json::from_str(&json).unwrap();
            assert_eq!(page, parsed);
        }

        #[test]
        fn serde_rejects_zero() {
            assert!(serde_json::from_str::<LogicalPage>("0").is_err());
        }
    }

    mod page_offset {
        use super::*;

        #[test]
        fn default_is_zero() {
            assert!(PageOffset::default().is_zero());
            assert_eq!(PageOffset::default(), PageOffset::zero());
        }

        #[test]
        fn actual_adds_offset() {
            let page = LogicalPage::new(5).unwrap();
            assert_eq!(PageOffset::new(2).actual(page), 7);
            assert_eq!(PageOffset::new(-2).actual(page), 3);
            assert_eq!(PageOffset::zero().actual(page), 5);
        }

        #[test]
        fn logical_subtracts_offset() {
            assert_eq!(PageOffset::new(2).logical(7), 5);
            assert_eq!(PageOffset::new(-10).logical(1), 11);
        }

        #[test]
        fn actual_can_go_nonpositive() {
            let page = LogicalPage::new(1).unwrap();
            assert_eq!(PageOffset::new(-5).actual(page), -4);
        }

        #[test]
        fn page_index_is_zero_based() {
            let page = LogicalPage::new(1).unwrap();
            assert_eq!(PageOffset::new(2).page_index(page), 2);
            assert_eq!(PageOffset::zero().page_index(page), 0);
        }

        #[test]
        fn roundtrip() {
            for offset in [-100, -1, 0, 1, 37] {
                let offset = PageOffset::new(offset);
                for page in [1u32, 2, 500] {
                    let page = LogicalPage::new(page).unwrap();
                    assert_eq!(offset.logical(offset.actual(page)), i64::from(page.get()));
                }
            }
        }

        #[test]
        fn serde_is_transparent() {
            let offset = PageOffset::new(-3);
            assert_eq!(serde_json::to_string(&offset).unwrap(), "-3");
        }
    }

    mod node_id {
        use super::*;

        #[test]
        fn parse_valid() {
            assert_eq!(NodeId::parse("n1").unwrap().ordinal(), 1);
            assert_eq!(NodeId::parse("n42").unwrap().ordinal(), 42);
        }

        #[test]
        fn bare_integer_rejected() {
            assert!(NodeId::parse("3").is_err());
        }

        #[test]
        fn zero_ordinal_rejected() {
            assert!(NodeId::parse("n0").is_err());
            assert!(NodeId::from_ordinal(0).is_err());
        }

        #[test]
        fn junk_rejected() {
            assert!(NodeId::parse("").is_err());
            assert!(NodeId::parse("n").is_err());
            assert!(NodeId::parse("n1a").is_err());
            assert!(NodeId::parse("nn3").is_err());
            assert!(NodeId::parse("n-1").is_err());
        }

        #[test]
        fn display_roundtrip() {
            let id = NodeId::from_ordinal(7).unwrap();
            assert_eq!(id.to_string(), "n7");
            assert_eq!(NodeId::parse(&id.to_string()).unwrap(), id);
        }
    }
}
