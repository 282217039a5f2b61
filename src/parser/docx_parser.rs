//! DOCX document parser building the block model from WordprocessingML.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::detect::{CORE_PROPERTIES_PART, FOOTNOTES_PART};
use crate::error::Result;
use crate::model::{
    Block, Document, InlineContent, ListInfo, Metadata, Paragraph, Table, TableCell, TableRow,
};

use super::core_props::parse_core_properties;
use super::options::{ErrorMode, ParseOptions};
use super::package::DocxPackage;
use super::xml;

/// Elements whose subtree carries no body text (drawings, embedded
/// objects, field instructions, tracked deletions).
const SKIPPED_ELEMENTS: &[&[u8]] = &[
    b"drawing",
    b"pict",
    b"object",
    b"AlternateContent",
    b"instrText",
    b"delText",
];

/// DOCX document parser.
pub struct DocxParser {
    package: DocxPackage,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let package = DocxPackage::open(path)?;
        Ok(Self::from_package(package, options))
    }

    /// Parse a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a DOCX package from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let package = DocxPackage::from_bytes(data)?;
        Ok(Self::from_package(package, options))
    }

    /// Parse a DOCX package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a DOCX package from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Self> {
        let package = DocxPackage::from_reader(reader)?;
        Ok(Self::from_package(package, options))
    }

    /// Wrap an already opened package.
    pub fn from_package(package: DocxPackage, options: ParseOptions) -> Self {
        Self { package, options }
    }

    /// The underlying package.
    pub fn package(&self) -> &DocxPackage {
        &self.package
    }

    /// Parse the document and return the block model.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        document.metadata = self.metadata()?;

        let footnotes = if self.options.include_footnotes {
            self.optional_part(self.package.footnotes_xml(), FOOTNOTES_PART, parse_footnotes)?
        } else {
            HashMap::new()
        };

        document.blocks = BodyBuilder::new(&footnotes).build(self.package.document_xml())?;
        log::debug!(
            "Parsed {} blocks ({} footnotes available)",
            document.block_count(),
            footnotes.len()
        );

        Ok(document)
    }

    /// Parse only the core properties.
    pub fn metadata(&self) -> Result<Metadata> {
        self.optional_part(
            self.package.core_xml(),
            CORE_PROPERTIES_PART,
            parse_core_properties,
        )
    }

    fn optional_part<T: Default>(
        &self,
        xml: Option<&str>,
        part: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        let Some(xml) = xml else {
            return Ok(T::default());
        };
        match parse(xml) {
            Ok(value) => Ok(value),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping malformed {}: {}", part, e);
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Heading level for a paragraph style id.
///
/// Word writes localized style ids, e.g. `Heading1` in English and
/// `Ttulo1` in Spanish. `Title` maps to level 0.
fn heading_level(style_id: &str) -> Option<u8> {
    let id = style_id.to_lowercase();
    const TITLE_IDS: [&str; 4] = ["title", "ttulo", "titulo", "título"];
    const HEADING_PREFIXES: [&str; 4] = ["heading", "ttulo", "titulo", "título"];

    if TITLE_IDS.contains(&id.as_str()) {
        return Some(0);
    }
    HEADING_PREFIXES.iter().find_map(|prefix| {
        id.strip_prefix(prefix)
            .and_then(|rest| rest.trim().parse::<u8>().ok())
    })
}

/// Parse `word/footnotes.xml` into a map of footnote id to text.
///
/// Separator and continuation footnotes (those with a `w:type`) are skipped.
fn parse_footnotes(xml_content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml_content);
    let mut notes = HashMap::new();
    let mut current: Option<(String, String)> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"footnote" if xml::attr(e, b"type").is_none() => {
                    current = xml::attr(e, b"id").map(|id| (id, String::new()));
                }
                b"p" => {
                    if let Some((_, text)) = current.as_mut() {
                        if !text.is_empty() {
                            text.push(' ');
                        }
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&xml::text(e));
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"footnote" => {
                    if let Some((id, text)) = current.take() {
                        let text = text.trim();
                        if !text.is_empty() {
                            notes.insert(id, text.to_string());
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(notes)
}

#[derive(Default)]
struct ParagraphState {
    paragraph: Paragraph,
    heading: Option<u8>,
    list: Option<ListInfo>,
}

#[derive(Default)]
struct TableState {
    table: Table,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

/// Event-driven builder turning `w:body` content into blocks.
struct BodyBuilder<'a> {
    footnotes: &'a HashMap<String, String>,
    blocks: Vec<Block>,
    paragraph: Option<ParagraphState>,
    tables: Vec<TableState>,
    link: Option<String>,
    in_run: bool,
    in_text: bool,
    skip_depth: usize,
}

impl<'a> BodyBuilder<'a> {
    fn new(footnotes: &'a HashMap<String, String>) -> Self {
        Self {
            footnotes,
            blocks: Vec::new(),
            paragraph: None,
            tables: Vec::new(),
            link: None,
            in_run: false,
            in_text: false,
            skip_depth: 0,
        }
    }

    fn build(mut self, xml_content: &str) -> Result<Vec<Block>> {
        let mut reader = Reader::from_str(xml_content);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => self.start(e),
                Event::Empty(ref e) => {
                    self.start(e);
                    self.end(e.local_name().as_ref());
                }
                Event::Text(ref e) => {
                    if self.skip_depth == 0 && self.in_text {
                        self.push_text(xml::text(e));
                    }
                }
                Event::End(ref e) => self.end(e.local_name().as_ref()),
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(self.blocks)
    }

    fn start(&mut self, e: &BytesStart<'_>) {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return;
        }

        match e.local_name().as_ref() {
            name if SKIPPED_ELEMENTS.contains(&name) => self.skip_depth = 1,
            b"p" => self.paragraph = Some(ParagraphState::default()),
            b"pStyle" => {
                if let (Some(state), Some(id)) = (self.paragraph.as_mut(), xml::attr(e, b"val")) {
                    state.heading = heading_level(&id);
                    state.paragraph.style_id = Some(id);
                }
            }
            b"numPr" => {
                if let Some(state) = self.paragraph.as_mut() {
                    state.list.get_or_insert_with(ListInfo::default);
                }
            }
            b"ilvl" => {
                let level = xml::attr(e, b"val").and_then(|v| v.parse::<u8>().ok());
                if let Some(list) = self.paragraph.as_mut().and_then(|s| s.list.as_mut()) {
                    list.level = level.unwrap_or(0);
                }
            }
            b"numId" => {
                if let Some(state) = self.paragraph.as_mut() {
                    match xml::attr(e, b"val") {
                        // numId 0 removes inherited numbering
                        Some(id) if id == "0" => state.list = None,
                        Some(id) => {
                            state.list.get_or_insert_with(ListInfo::default).num_id = Some(id);
                        }
                        None => {}
                    }
                }
            }
            b"r" => self.in_run = true,
            b"t" => self.in_text = true,
            b"tab" if self.in_run => self.push_inline(InlineContent::Tab),
            b"br" if self.in_run => {
                let kind = xml::attr(e, b"type");
                if !matches!(kind.as_deref(), Some("page") | Some("column")) {
                    self.push_inline(InlineContent::LineBreak);
                }
            }
            b"cr" if self.in_run => self.push_inline(InlineContent::LineBreak),
            b"footnoteReference" => {
                let note = xml::attr(e, b"id").and_then(|id| self.footnotes.get(&id).cloned());
                if let Some(note) = note {
                    self.push_inline(InlineContent::Footnote(note));
                }
            }
            b"hyperlink" => self.link = Some(String::new()),
            b"tbl" => self.tables.push(TableState::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.row = Some(TableRow::default());
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.cell = Some(TableCell::default());
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => self.in_run = false,
            b"hyperlink" => {
                self.flush_link();
                self.link = None;
            }
            b"p" => self.finish_paragraph(),
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(cell) = table.cell.take() {
                        table.row.get_or_insert_with(TableRow::default).add_cell(cell);
                    }
                }
            }
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    if let Some(row) = table.row.take() {
                        table.table.add_row(row);
                    }
                }
            }
            b"tbl" => self.finish_table(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: String) {
        if let Some(link) = self.link.as_mut() {
            link.push_str(&text);
        } else if let Some(state) = self.paragraph.as_mut() {
            state.paragraph.add_text(text);
        }
    }

    fn push_inline(&mut self, inline: InlineContent) {
        let control = match inline {
            InlineContent::Tab => Some('\t'),
            InlineContent::LineBreak => Some('\n'),
            _ => None,
        };
        if let (Some(link), Some(ch)) = (self.link.as_mut(), control) {
            link.push(ch);
            return;
        }
        if self.link.is_some() {
            self.flush_link();
        }
        if let Some(state) = self.paragraph.as_mut() {
            state.paragraph.push(inline);
        }
    }

    /// Move buffered hyperlink text into the paragraph, keeping the link open.
    fn flush_link(&mut self) {
        let Some(text) = self.link.replace(String::new()).filter(|t| !t.is_empty()) else {
            return;
        };
        if let Some(state) = self.paragraph.as_mut() {
            state.paragraph.push(InlineContent::Link { text });
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(state) = self.paragraph.take() else {
            return;
        };
        self.link = None;
        self.in_run = false;
        self.in_text = false;

        if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
            cell.add_paragraph(state.paragraph);
            return;
        }

        if state.paragraph.is_empty() {
            return;
        }

        let block = match (state.heading, state.list) {
            (Some(level), _) => Block::heading(state.paragraph, level),
            (None, Some(list)) => Block::list_item(state.paragraph, list),
            (None, None) => Block::Paragraph(state.paragraph),
        };
        self.blocks.push(block);
    }

    fn finish_table(&mut self) {
        let Some(state) = self.tables.pop() else {
            return;
        };

        match self.tables.last_mut() {
            // Nested tables are flattened into the enclosing cell, one
            // paragraph per row.
            Some(parent) => {
                let cell = parent.cell.get_or_insert_with(TableCell::default);
                for row in &state.table.rows {
                    let text = row.plain_text();
                    if !text.is_empty() {
                        cell.add_paragraph(Paragraph::with_text(text));
                    }
                }
            }
            None => {
                if !state.table.is_empty() {
                    self.blocks.push(Block::Table(state.table));
                }
            }
        }
    }
}
