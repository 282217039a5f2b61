//! Body-level block types.

use super::{ListInfo, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A block-level element in the document body.
///
/// Images, page breaks and section properties are not represented; the
/// parser drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading or title paragraph
    Heading {
        /// Heading text
        paragraph: Paragraph,
        /// Heading level (0 = document title, 1-9 = outline levels)
        level: u8,
    },

    /// A regular paragraph
    Paragraph(Paragraph),

    /// A numbered or bulleted list item
    ListItem {
        /// Item text
        paragraph: Paragraph,
        /// Numbering information
        list: ListInfo,
    },

    /// A table
    Table(Table),
}

impl Block {
    /// Create a heading block.
    pub fn heading(paragraph: Paragraph, level: u8) -> Self {
        Block::Heading {
            paragraph,
            level: level.min(9),
        }
    }

    /// Create a list item block.
    pub fn list_item(paragraph: Paragraph, list: ListInfo) -> Self {
        Block::ListItem { paragraph, list }
    }

    /// The paragraph behind a text block, if any.
    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Heading { paragraph, .. }
            | Block::Paragraph(paragraph)
            | Block::ListItem { paragraph, .. } => Some(paragraph),
            Block::Table(_) => None,
        }
    }

    /// Check if the block carries no visible text.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Table(table) => table.is_empty(),
            _ => self.paragraph().map_or(true, Paragraph::is_empty),
        }
    }
}
