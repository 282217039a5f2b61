//! Rendering module for flattening documents and serializing results.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
