//! DOCX format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// ZIP magic for an empty archive: PK\x05\x06
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Main document part of a WordprocessingML package.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Core properties part (Dublin Core metadata).
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Footnotes part.
pub const FOOTNOTES_PART: &str = "word/footnotes.xml";

/// Check whether the data starts with a ZIP container signature.
///
/// # Returns
/// * `Ok(())` if the data looks like a ZIP container
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<()> {
    if data.len() < ZIP_MAGIC.len() {
        return Err(Error::UnknownFormat);
    }

    if data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC) {
        Ok(())
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check whether a file starts with a ZIP container signature.
///
/// # Example
/// ```no_run
/// use docfields::detect::detect_format_from_path;
///
/// detect_format_from_path("article.docx").unwrap();
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::UnknownFormat,
        _ => Error::Io(e),
    })?;
    detect_format_from_bytes(&header)
}

/// Check if a file looks like a DOCX package.
///
/// Only the container signature is checked; a ZIP without a
/// `word/document.xml` part is still reported as `true` here and fails
/// later when the package is opened.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
