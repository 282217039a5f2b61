//! Extraction result type.

use serde::{Deserialize, Serialize};

/// Title/abstract/content split of a document.
///
/// `title` and `abstract_text` are either a non-empty trimmed string or
/// `None`; `content` is always present and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document title
    pub title: Option<String>,

    /// Abstract / summary
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,

    /// Body text, paragraphs separated by a blank line
    pub content: String,
}

impl ExtractionResult {
    /// Create a result, trimming fields and dropping empty optional ones.
    pub fn new(
        title: Option<String>,
        abstract_text: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: non_empty(title),
            abstract_text: non_empty(abstract_text),
            content: content.into().trim().to_string(),
        }
    }

    /// The result for an unreadable document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.abstract_text.is_none() && self.content.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
