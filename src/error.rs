//! Error types for the docfields library.

use std::io;
use thiserror::Error;

/// Result type alias for docfields operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a document package.
///
/// The top-level field extractor never returns these; it logs them and
/// degrades to empty fields. They surface through the lower-level API
/// ([`DocxPackage`](crate::parser::DocxPackage),
/// [`DocxParser`](crate::parser::DocxParser)) and the image host seam.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a ZIP-based OOXML package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The ZIP container could not be read.
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A package part is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// A label vocabulary is empty or does not compile.
    #[error("Invalid label set: {0}")]
    InvalidLabels(String),

    /// The image host rejected an upload or delete.
    #[error("Image host error: {0}")]
    Upload(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => Error::MissingPart(err.to_string()),
            _ => Error::Zip(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidLabels(err.to_string())
    }
}
