//! Integration tests for field extraction from DOCX packages.

mod common;

use common::{docx_from_lines, DocxBuilder, WML_NS};
use docfields::{
    extract_fields, extract_fields_from_bytes, extract_fields_with_options, extract_many,
    ExtractOptions, ExtractionResult, FieldExtractor, LabelSet, Strategy,
};
use tempfile::TempDir;

#[test]
fn test_labelled_title_abstract_content() {
    let data = docx_from_lines("Title: Foo\nAbstract: Bar\nContent: Baz");
    let result = extract_fields_from_bytes(&data);

    assert_eq!(
        result,
        ExtractionResult::new(Some("Foo".to_string()), Some("Bar".to_string()), "Baz")
    );
}

#[test]
fn test_spanish_abstract_until_introduction() {
    let data = docx_from_lines(
        "Mi artículo\nResumen:\nLínea uno\nLínea dos\nIntroducción\nCuerpo del texto",
    );
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.title.as_deref(), Some("Mi artículo"));
    assert_eq!(result.abstract_text.as_deref(), Some("Línea uno\nLínea dos"));
    assert_eq!(result.content, "Introducción\n\nCuerpo del texto");
    assert!(!result.content.contains("Línea uno"));
}

#[test]
fn test_decomposed_accents_still_match_labels() {
    let data = docx_from_lines("Artículo\nResumen\nUno\nIntroduccio\u{301}n\nFin");
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.abstract_text.as_deref(), Some("Uno"));
    assert_eq!(result.content, "Introducción\n\nFin");
}

#[test]
fn test_no_labels_first_line_is_title() {
    let data = docx_from_lines("Hello World\nSecond line");
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.title.as_deref(), Some("Hello World"));
    assert_eq!(result.abstract_text, None);
    assert_eq!(result.content, "Second line");
}

#[test]
fn test_corrupt_file_yields_empty_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"PK\x03\x04 this is not really a zip").unwrap();

    assert_eq!(extract_fields(&path), ExtractionResult::empty());
    assert_eq!(
        extract_fields(dir.path().join("missing.docx")),
        ExtractionResult::empty()
    );
}

#[test]
fn test_package_without_document_part() {
    let data = DocxBuilder::new().without_document().build();
    assert!(extract_fields_from_bytes(&data).is_empty());
}

#[test]
fn test_extraction_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = DocxBuilder::new()
        .styled("Title", "A Study")
        .paragraph("Abstract")
        .paragraph("Short summary.")
        .paragraph("Content")
        .paragraph("Body text.")
        .write_to(&dir, "study.docx");

    let first = extract_fields(&path);
    let second = extract_fields(&path);
    assert_eq!(first, second);
    assert_eq!(first.title.as_deref(), Some("A Study"));
    assert_eq!(first.abstract_text.as_deref(), Some("Short summary."));
    assert_eq!(first.content, "Body text.");
}

#[test]
fn test_placeholder_title_property_is_ignored() {
    let data = DocxBuilder::new()
        .core_title("Document Title")
        .paragraph("Real heading")
        .paragraph("Body")
        .build();
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.title.as_deref(), Some("Real heading"));
    assert_eq!(result.content, "Body");
}

#[test]
fn test_title_property_preferred() {
    let data = DocxBuilder::new()
        .core_title("Quarterly Report")
        .paragraph("Hello")
        .paragraph("World")
        .build();

    let result = extract_fields_from_bytes(&data);
    assert_eq!(result.title.as_deref(), Some("Quarterly Report"));
    assert_eq!(result.content, "Hello\n\nWorld");

    let extractor =
        FieldExtractor::with_options(ExtractOptions::new().with_property_title(false)).unwrap();
    let result = extractor.extract_bytes(&data);
    assert_eq!(result.title.as_deref(), Some("Hello"));
    assert_eq!(result.content, "World");
}

#[test]
fn test_table_row_joined_with_pipes() {
    let data = DocxBuilder::new()
        .paragraph("Intro")
        .table(&[&["A", "B"]])
        .build();
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.title.as_deref(), Some("Intro"));
    assert_eq!(result.content, "A | B");
}

#[test]
fn test_lists_and_footnotes_reach_content() {
    let data = DocxBuilder::new()
        .paragraph("Notes")
        .list_item("one")
        .list_item("two")
        .with_footnote("Claim", "Source 2024")
        .build();
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.content, "- one\n\n- two\n\nClaim Source 2024");
}

fn malformed_document() -> String {
    format!(
        r#"<w:document xmlns:w="{}"><w:body><w:p><w:r><w:t>Recovered title</w:t></w:r></w:p><w:p><w:r><w:t>Recovered body</w:t></w:r></w:p></w:section></w:body></w:document>"#,
        WML_NS
    )
}

#[test]
fn test_raw_scan_fallback_on_malformed_body() {
    let data = DocxBuilder::new()
        .document_xml(&malformed_document())
        .build();
    let result = extract_fields_from_bytes(&data);

    assert_eq!(result.title.as_deref(), Some("Recovered title"));
    assert_eq!(result.content, "Recovered body");
}

#[test]
fn test_single_strategy_options() {
    let data = DocxBuilder::new()
        .document_xml(&malformed_document())
        .build();

    let model_only =
        FieldExtractor::with_options(ExtractOptions::new().with_strategy(Strategy::ObjectModel))
            .unwrap();
    assert!(model_only.extract_bytes(&data).is_empty());

    let raw_only =
        FieldExtractor::with_options(ExtractOptions::new().with_strategy(Strategy::RawXml))
            .unwrap();
    assert_eq!(
        raw_only.extract_bytes(&data).title.as_deref(),
        Some("Recovered title")
    );
}

#[test]
fn test_custom_labels_from_json() {
    let labels = LabelSet::from_json(
        r#"{"abstract_start": ["summary"], "abstract_end": ["body"], "content": ["body"]}"#,
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let path = DocxBuilder::new()
        .paragraph("Paper")
        .paragraph("Summary: Quick overview")
        .paragraph("Body:")
        .paragraph("Details")
        .write_to(&dir, "paper.docx");

    let result =
        extract_fields_with_options(&path, ExtractOptions::new().with_labels(labels)).unwrap();
    assert_eq!(result.title.as_deref(), Some("Paper"));
    assert_eq!(result.abstract_text.as_deref(), Some("Quick overview"));
    assert_eq!(result.content, "Details");
}

#[test]
fn test_extract_many_keeps_order() {
    let dir = TempDir::new().unwrap();
    let first = DocxBuilder::new()
        .paragraph("First")
        .write_to(&dir, "a.docx");
    let missing = dir.path().join("missing.docx");
    let third = DocxBuilder::new()
        .paragraph("Third")
        .paragraph("Body")
        .write_to(&dir, "c.docx");

    let results = extract_many([&first, &missing, &third]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, first);
    assert_eq!(results[0].1.title.as_deref(), Some("First"));
    assert!(results[1].1.is_empty());
    assert_eq!(results[2].1.content, "Body");
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_extract_fields_async() {
    let dir = TempDir::new().unwrap();
    let path = DocxBuilder::new()
        .paragraph("Async title")
        .paragraph("Body")
        .write_to(&dir, "async.docx");

    let result = docfields::extract_fields_async(&path).await;
    assert_eq!(result.title.as_deref(), Some("Async title"));

    let missing = docfields::extract_fields_async(dir.path().join("none.docx")).await;
    assert!(missing.is_empty());
}
