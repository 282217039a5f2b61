//! Paragraph and inline-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline spans in the paragraph
    pub content: Vec<InlineContent>,

    /// Paragraph style id (w:pStyle), if any
    pub style_id: Option<String>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add plain text to the paragraph.
    ///
    /// Adjacent text spans are merged so that a paragraph split across many
    /// runs stays a single span.
    pub fn add_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(InlineContent::Text(last)) = self.content.last_mut() {
            last.push_str(&text);
        } else {
            self.content.push(InlineContent::Text(text));
        }
    }

    /// Add an inline span.
    pub fn push(&mut self, inline: InlineContent) {
        match inline {
            InlineContent::Text(text) => self.add_text(text),
            other => self.content.push(other),
        }
    }

    /// Get plain text content of the paragraph.
    ///
    /// Hyperlinks contribute their visible text; footnotes are appended
    /// after a single space.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.content {
            match inline {
                InlineContent::Text(text) => out.push_str(text),
                InlineContent::Link { text } => out.push_str(text),
                InlineContent::Footnote(text) => {
                    out.push(' ');
                    out.push_str(text);
                }
                InlineContent::LineBreak => out.push('\n'),
                InlineContent::Tab => out.push('\t'),
            }
        }
        out
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum InlineContent {
    /// Run text
    Text(String),

    /// A hyperlink (visible text only)
    Link {
        /// Link text
        text: String,
    },

    /// Text of a referenced footnote
    Footnote(String),

    /// A line break (w:br, w:cr)
    LineBreak,

    /// A tab (w:tab)
    Tab,
}

/// Information about a list item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Nesting level (0 = top level)
    pub level: u8,

    /// Numbering definition id (w:numId)
    pub num_id: Option<String>,
}

impl ListInfo {
    /// Create list info for the given nesting level.
    pub fn new(level: u8) -> Self {
        Self {
            level,
            num_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.push(InlineContent::Link {
            text: "world".to_string(),
        });
        p.add_text("!");
        p.push(InlineContent::Footnote("See notes.".to_string()));

        assert_eq!(p.plain_text(), "Hello world! See notes.");
    }

    #[test]
    fn test_adjacent_runs_merge() {
        let mut p = Paragraph::new();
        p.add_text("Abs");
        p.add_text("tract:");
        assert_eq!(p.content.len(), 1);
        assert_eq!(p.plain_text(), "Abstract:");
    }

    #[test]
    fn test_empty_paragraph() {
        let mut p = Paragraph::new();
        assert!(p.is_empty());
        p.push(InlineContent::Tab);
        assert!(p.is_empty());
        p.add_text("x");
        assert!(!p.is_empty());
    }
}
