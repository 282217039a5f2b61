//! Plain text flattening of the block model.

use crate::model::{Block, Document};

/// Separator written after headings and paragraphs.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Marker written in front of list items.
const LIST_MARKER: &str = "- ";

/// Flatten a document into the paragraph text stream.
///
/// Headings and paragraphs are followed by a blank line, list items are
/// written as `- item` lines, and every table row becomes one line of
/// ` | `-joined cell texts followed by a blank line after the table.
pub fn to_text(doc: &Document) -> String {
    let mut out = String::new();

    for block in &doc.blocks {
        match block {
            Block::Heading { paragraph, .. } | Block::Paragraph(paragraph) => {
                out.push_str(&paragraph.plain_text());
                out.push_str(BLOCK_SEPARATOR);
            }
            Block::ListItem { paragraph, .. } => {
                out.push_str(LIST_MARKER);
                out.push_str(&paragraph.plain_text());
                out.push('\n');
            }
            Block::Table(table) => {
                for row in &table.rows {
                    let line = row.plain_text();
                    if !line.is_empty() {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
                out.push('\n');
            }
        }
    }

    out
}
