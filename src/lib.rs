//! # docfields
//!
//! Title, abstract and body extraction from Word (DOCX) documents.
//!
//! The library opens a DOCX package, flattens its body into paragraph text
//! and splits that text into three fields using label lines such as
//! `Abstract:` / `Resumen` and `Content:` / `Contenido`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfields::extract_fields;
//!
//! let fields = extract_fields("article.docx");
//! println!("title:    {:?}", fields.title);
//! println!("abstract: {:?}", fields.abstract_text);
//! println!("content:  {}", fields.content);
//! ```
//!
//! ## Features
//!
//! - **Best-effort**: unreadable or malformed documents yield empty fields,
//!   never an error
//! - **Two text strategies**: block model walk with a raw XML fallback
//! - **Bilingual labels**: English and Spanish out of the box, custom label
//!   sets loadable from JSON
//! - **Parallel batches**: uses Rayon for many files
//! - **Publication drafts**: helpers for feeding fields and uploaded images
//!   into a publication record

pub mod detect;
pub mod error;
pub mod extract;
pub mod fields;
pub mod model;
pub mod parser;
pub mod publication;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, is_docx_bytes};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, FieldExtractor, Strategy};
pub use fields::{ExtractionResult, FieldSplitter, LabelSet};
pub use model::{
    Block, Document, InlineContent, ListInfo, Metadata, Paragraph, Table, TableCell, TableRow,
};
pub use parser::{DocxPackage, DocxParser, ErrorMode, ParseOptions};
pub use publication::{
    image_records, upload_draft, upload_into, ImageDraft, ImageHost, ImageRecord, PublicationDraft,
    UploadRequest, UploadedImage,
};
pub use render::JsonFormat;

use std::path::{Path, PathBuf};

/// Extract `{title, abstract, content}` from a DOCX file.
///
/// Never fails: a missing, corrupt or empty document yields
/// [`ExtractionResult::empty`].
///
/// # Example
///
/// ```no_run
/// use docfields::extract_fields;
///
/// let fields = extract_fields("paper.docx");
/// if let Some(title) = &fields.title {
///     println!("{}", title);
/// }
/// ```
pub fn extract_fields<P: AsRef<Path>>(path: P) -> ExtractionResult {
    FieldExtractor::new().extract(path)
}

/// Extract fields with custom options.
///
/// Returns an error only when the options carry an invalid label set.
///
/// # Example
///
/// ```no_run
/// use docfields::{extract_fields_with_options, ExtractOptions, LabelSet};
///
/// let options = ExtractOptions::new().with_labels(LabelSet::english());
/// let fields = extract_fields_with_options("paper.docx", options)?;
/// # Ok::<(), docfields::Error>(())
/// ```
pub fn extract_fields_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    let extractor = FieldExtractor::with_options(options)?;
    Ok(extractor.extract(path))
}

/// Extract fields from DOCX bytes.
pub fn extract_fields_from_bytes(data: &[u8]) -> ExtractionResult {
    FieldExtractor::new().extract_bytes(data)
}

/// Extract fields from several files in parallel, keeping input order.
pub fn extract_many<I, P>(paths: I) -> Vec<(PathBuf, ExtractionResult)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    FieldExtractor::new().extract_many(paths)
}

/// Extract fields from a file without blocking the async runtime.
///
/// # Example
///
/// ```no_run
/// # async fn run() {
/// let fields = docfields::extract_fields_async("paper.docx").await;
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn extract_fields_async<P: AsRef<Path>>(path: P) -> ExtractionResult {
    let path = path.as_ref().to_path_buf();
    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            return ExtractionResult::empty();
        }
    };

    match tokio::task::spawn_blocking(move || FieldExtractor::new().extract_bytes(&data)).await {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Extraction task for {} failed: {}", path.display(), e);
            ExtractionResult::empty()
        }
    }
}

/// Parse a DOCX file into the block model.
///
/// # Example
///
/// ```no_run
/// use docfields::parse_file;
///
/// let doc = parse_file("paper.docx")?;
/// println!("Blocks: {}", doc.block_count());
/// # Ok::<(), docfields::Error>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxParser::open(path)?.parse()
}

/// Parse a DOCX file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    DocxParser::open_with_options(path, options)?.parse()
}

/// Parse DOCX bytes into the block model.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    DocxParser::from_bytes(data)?.parse()
}

/// Flatten a DOCX file into paragraph text.
///
/// Uses the same strategies as field extraction; fails only when the
/// package itself cannot be opened.
///
/// # Example
///
/// ```no_run
/// let text = docfields::extract_text("paper.docx")?;
/// println!("{}", text);
/// # Ok::<(), docfields::Error>(())
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let extractor = FieldExtractor::new();
    let parser = DocxParser::open_with_options(path, extractor.options().parse.clone())?;
    Ok(extractor.flattened_text(&parser))
}

/// Serialize extracted fields to JSON.
pub fn fields_to_json(fields: &ExtractionResult, format: JsonFormat) -> Result<String> {
    render::to_json(fields, format)
}
