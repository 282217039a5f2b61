//! DOCX parsing module.

mod core_props;
mod docx_parser;
mod options;
mod package;
mod raw_text;
mod xml;

pub use core_props::parse_core_properties;
pub use docx_parser::DocxParser;
pub use options::{ErrorMode, ParseOptions};
pub use package::DocxPackage;
pub use raw_text::{raw_paragraphs, raw_text};
