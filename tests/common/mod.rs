//! Helpers for building DOCX packages in tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Builder for a minimal WordprocessingML package.
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    document_xml: Option<String>,
    core_title: Option<String>,
    footnotes: Vec<(u32, String)>,
    skip_document: bool,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain paragraph.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&para(text));
        self
    }

    /// Paragraph with a style id, e.g. `Heading1` or `Title`.
    pub fn styled(mut self, style: &str, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            style,
            escape(text)
        ));
        self
    }

    /// Numbered list item.
    pub fn list_item(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            escape(text)
        ));
        self
    }

    /// Table with the given rows of cell texts.
    pub fn table(mut self, rows: &[&[&str]]) -> Self {
        self.body.push_str("<w:tbl>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in row.iter() {
                self.body.push_str(&format!("<w:tc>{}</w:tc>", para(cell)));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    /// Paragraph ending with a footnote reference.
    pub fn with_footnote(mut self, text: &str, note: &str) -> Self {
        let id = self.footnotes.len() as u32 + 1;
        self.body.push_str(&format!(
            r#"<w:p><w:r><w:t>{}</w:t></w:r><w:r><w:footnoteReference w:id="{}"/></w:r></w:p>"#,
            escape(text),
            id
        ));
        self.footnotes.push((id, note.to_string()));
        self
    }

    /// Raw XML appended to the body.
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Replace the whole main document part.
    pub fn document_xml(mut self, xml: &str) -> Self {
        self.document_xml = Some(xml.to_string());
        self
    }

    /// Leave out `word/document.xml`.
    pub fn without_document(mut self) -> Self {
        self.skip_document = true;
        self
    }

    /// Set the `dc:title` core property.
    pub fn core_title(mut self, title: &str) -> Self {
        self.core_title = Some(title.to_string());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
            .unwrap();

        if !self.skip_document {
            let xml = self.document_xml.unwrap_or_else(|| {
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
                    WML_NS, self.body
                )
            });
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        if !self.footnotes.is_empty() {
            let mut xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><w:footnotes xmlns:w="{}"><w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote>"#,
                WML_NS
            );
            for (id, note) in &self.footnotes {
                xml.push_str(&format!(
                    r#"<w:footnote w:id="{}">{}</w:footnote>"#,
                    id,
                    para(note)
                ));
            }
            xml.push_str("</w:footnotes>");
            zip.start_file("word/footnotes.xml", options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        if let Some(title) = &self.core_title {
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
                escape(title)
            );
            zip.start_file("docProps/core.xml", options).unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    /// Write the package into a temporary directory.
    pub fn write_to(self, dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Paragraphs for each line of `text`.
pub fn docx_from_lines(text: &str) -> Vec<u8> {
    text.lines()
        .fold(DocxBuilder::new(), |builder, line| builder.paragraph(line))
        .build()
}

fn para(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
