//! Best-effort field extraction from DOCX files.
//!
//! The extractor never fails: unreadable packages, malformed XML and
//! documents without labels all degrade to empty or absent fields, with the
//! cause logged through the `log` facade.

use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::fields::{ExtractionResult, FieldSplitter, LabelSet};
use crate::parser::{raw_text, DocxPackage, DocxParser, ParseOptions};
use crate::render;

/// Which text extraction strategies to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Block model first, raw XML scan when it fails or yields nothing
    #[default]
    Auto,
    /// Block model only
    ObjectModel,
    /// Raw XML scan only
    RawXml,
}

/// Options for field extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Options for the block model parse
    pub parse: ParseOptions,

    /// Label vocabularies
    pub labels: LabelSet,

    /// Text extraction strategies
    pub strategy: Strategy,

    /// Whether to prefer the core `title` property over the first line
    pub use_property_title: bool,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the label vocabularies.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Set the extraction strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the core title property.
    pub fn with_property_title(mut self, enabled: bool) -> Self {
        self.use_property_title = enabled;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::new().lenient(),
            labels: LabelSet::default(),
            strategy: Strategy::Auto,
            use_property_title: true,
        }
    }
}

/// Extracts `{title, abstract, content}` from DOCX documents.
///
/// # Example
///
/// ```no_run
/// use docfields::FieldExtractor;
///
/// let extractor = FieldExtractor::new();
/// let fields = extractor.extract("article.docx");
/// println!("{:?}", fields.title);
/// ```
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    options: ExtractOptions,
    splitter: FieldSplitter,
}

impl FieldExtractor {
    /// Create an extractor with the default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            splitter: FieldSplitter::default(),
        }
    }

    /// Create an extractor with custom options.
    ///
    /// Fails only if the label set is invalid.
    pub fn with_options(options: ExtractOptions) -> Result<Self> {
        let splitter = FieldSplitter::new(&options.labels)?;
        Ok(Self { options, splitter })
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract fields from a file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> ExtractionResult {
        let path = path.as_ref();
        match DocxPackage::open(path) {
            Ok(package) => self.extract_package(package),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                ExtractionResult::empty()
            }
        }
    }

    /// Extract fields from in-memory package bytes.
    pub fn extract_bytes(&self, data: &[u8]) -> ExtractionResult {
        match DocxPackage::from_bytes(data) {
            Ok(package) => self.extract_package(package),
            Err(e) => {
                log::warn!("Cannot read package bytes: {}", e);
                ExtractionResult::empty()
            }
        }
    }

    /// Extract fields from a reader.
    pub fn extract_reader<R: Read>(&self, reader: R) -> ExtractionResult {
        match DocxPackage::from_reader(reader) {
            Ok(package) => self.extract_package(package),
            Err(e) => {
                log::warn!("Cannot read package: {}", e);
                ExtractionResult::empty()
            }
        }
    }

    /// Extract fields from an opened package.
    pub fn extract_package(&self, package: DocxPackage) -> ExtractionResult {
        let parser = DocxParser::from_package(package, self.options.parse.clone());

        let text = self.flattened_text(&parser);
        let title = if self.options.use_property_title {
            self.property_title(&parser)
        } else {
            None
        };

        self.splitter.split(&text, title.as_deref())
    }

    /// Extract several files in parallel; results keep the input order.
    pub fn extract_many<I, P>(&self, paths: I) -> Vec<(PathBuf, ExtractionResult)>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();

        paths
            .into_par_iter()
            .map(|path| {
                let result = self.extract(&path);
                (path, result)
            })
            .collect()
    }

    /// The paragraph text stream, first non-empty strategy wins.
    pub fn flattened_text(&self, parser: &DocxParser) -> String {
        let text = match self.options.strategy {
            Strategy::Auto => object_model_text(parser).or_else(|| raw_xml_text(parser)),
            Strategy::ObjectModel => object_model_text(parser),
            Strategy::RawXml => raw_xml_text(parser),
        };
        text.unwrap_or_default()
    }

    fn property_title(&self, parser: &DocxParser) -> Option<String> {
        match parser.metadata() {
            Ok(metadata) => {
                let title = metadata.usable_title().map(String::from);
                if title.is_none() && metadata.title.is_some() {
                    log::debug!("Ignoring placeholder title property {:?}", metadata.title);
                }
                title
            }
            Err(e) => {
                log::debug!("Core properties unavailable: {}", e);
                None
            }
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn object_model_text(parser: &DocxParser) -> Option<String> {
    match parser.parse() {
        Ok(document) => {
            let text = render::to_text(&document);
            if text.trim().is_empty() {
                log::debug!("Block model produced no text");
                None
            } else {
                Some(text)
            }
        }
        Err(e) => {
            log::debug!("Block model extraction failed: {}", e);
            None
        }
    }
}

fn raw_xml_text(parser: &DocxParser) -> Option<String> {
    match raw_text(parser.package()) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Raw XML extraction failed: {}", e);
            None
        }
    }
}
