//! Document-level types.

use super::Block;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed DOCX document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Package metadata (docProps/core.xml)
    pub metadata: Metadata,

    /// Body blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of body blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of tables in the body.
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }

    /// Number of headings in the body.
    pub fn heading_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .count()
    }
}

/// Core document properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title (dc:title)
    pub title: Option<String>,

    /// Document subject (dc:subject)
    pub subject: Option<String>,

    /// Document author (dc:creator)
    pub creator: Option<String>,

    /// Keywords (cp:keywords)
    pub keywords: Option<String>,

    /// Description / comments (dc:description)
    pub description: Option<String>,

    /// Last editor (cp:lastModifiedBy)
    pub last_modified_by: Option<String>,

    /// Creation date (dcterms:created)
    pub created: Option<DateTime<Utc>>,

    /// Last modification date (dcterms:modified)
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Title property, if it holds something worth using as a field value.
    ///
    /// Templates often leave a placeholder such as "Document Title" in the
    /// property, so any value containing the word "title" is rejected.
    pub fn usable_title(&self) -> Option<&str> {
        let title = self.title.as_deref()?.trim();
        if title.is_empty() || title.to_lowercase().contains("title") {
            return None;
        }
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_document_counts() {
        let mut doc = Document::new();
        doc.add_block(Block::heading(Paragraph::with_text("Intro"), 1));
        doc.add_block(Block::Paragraph(Paragraph::with_text("Body")));
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.heading_count(), 1);
        assert_eq!(doc.table_count(), 0);
    }

    #[test]
    fn test_usable_title() {
        let mut metadata = Metadata::default();
        assert_eq!(metadata.usable_title(), None);

        metadata.title = Some("  Rust in Production ".to_string());
        assert_eq!(metadata.usable_title(), Some("Rust in Production"));

        metadata.title = Some("Document Title".to_string());
        assert_eq!(metadata.usable_title(), None);

        metadata.title = Some("   ".to_string());
        assert_eq!(metadata.usable_title(), None);
    }
}
