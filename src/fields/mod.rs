//! Field detection over flattened document text.

mod labels;
mod result;
mod splitter;

pub use labels::LabelSet;
pub use result::ExtractionResult;
pub use splitter::{normalize_text, split_lines, FieldSplitter};
