//! Document model types for DOCX content representation.
//!
//! This module defines the intermediate representation that bridges
//! package parsing and text flattening. Only the structure that matters
//! for text extraction is kept: block kinds, inline spans, and tables.

mod block;
mod document;
mod paragraph;
mod table;

pub use block::Block;
pub use document::{Document, Metadata};
pub use paragraph::{InlineContent, ListInfo, Paragraph};
pub use table::{Table, TableCell, TableRow};
