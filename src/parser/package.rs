//! OOXML package access.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::detect::{
    detect_format_from_bytes, CORE_PROPERTIES_PART, FOOTNOTES_PART, MAIN_DOCUMENT_PART,
};
use crate::error::{Error, Result};

/// The XML parts of a DOCX package that text extraction needs.
///
/// Parts are read eagerly when the package is opened so that both
/// extraction strategies work from the same in-memory copy.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    document_xml: String,
    footnotes_xml: Option<String>,
    core_xml: Option<String>,
}

impl DocxPackage {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Open a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let document_xml = read_part(&mut archive, MAIN_DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(MAIN_DOCUMENT_PART.to_string()))?;
        let footnotes_xml = read_part(&mut archive, FOOTNOTES_PART)?;
        let core_xml = read_part(&mut archive, CORE_PROPERTIES_PART)?;

        log::debug!(
            "Opened package: {} bytes of document XML, footnotes: {}, core properties: {}",
            document_xml.len(),
            footnotes_xml.is_some(),
            core_xml.is_some()
        );

        Ok(Self {
            document_xml,
            footnotes_xml,
            core_xml,
        })
    }

    /// Open a DOCX package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// The main document part (`word/document.xml`).
    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }

    /// The footnotes part, if the package has one.
    pub fn footnotes_xml(&self) -> Option<&str> {
        self.footnotes_xml.as_deref()
    }

    /// The core properties part, if the package has one.
    pub fn core_xml(&self) -> Option<&str> {
        self.core_xml.as_deref()
    }
}

/// Read a part as text. A missing part is `Ok(None)`.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let text = String::from_utf8_lossy(&bytes);
    Ok(Some(text.trim_start_matches('\u{feff}').to_string()))
}
