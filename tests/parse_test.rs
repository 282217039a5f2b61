//! Integration tests for package parsing and text flattening.

mod common;

use common::DocxBuilder;
use docfields::render::to_text;
use docfields::{parse_bytes, parse_file, Block, DocxPackage, DocxParser, Error, ParseOptions};
use tempfile::TempDir;

#[test]
fn test_block_kinds() {
    let data = DocxBuilder::new()
        .styled("Heading1", "Intro")
        .paragraph("Text")
        .list_item("item")
        .table(&[&["A", "B"], &["C", "D"]])
        .build();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(doc.block_count(), 4);
    assert_eq!(doc.heading_count(), 1);
    assert_eq!(doc.table_count(), 1);
    assert!(matches!(doc.blocks[0], Block::Heading { level: 1, .. }));
    assert!(matches!(doc.blocks[2], Block::ListItem { .. }));
}

#[test]
fn test_flattened_text_layout() {
    let data = DocxBuilder::new()
        .styled("Ttulo1", "Capítulo")
        .paragraph("Texto")
        .list_item("uno")
        .table(&[&["A", "B"]])
        .build();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(to_text(&doc), "Capítulo\n\nTexto\n\n- uno\nA | B\n\n");
}

#[test]
fn test_drawings_and_deleted_text_are_skipped() {
    let data = DocxBuilder::new()
        .raw(
            r#"<w:p><w:r><w:t>Kept</w:t></w:r><w:r><w:drawing><w:t>Hidden</w:t></w:drawing></w:r><w:del><w:r><w:delText>Gone</w:delText></w:r></w:del></w:p>"#,
        )
        .build();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(to_text(&doc), "Kept\n\n");
}

#[test]
fn test_footnotes_can_be_disabled() {
    let data = DocxBuilder::new().with_footnote("Claim", "Note").build();

    let with = DocxParser::from_bytes(&data).unwrap().parse().unwrap();
    assert_eq!(to_text(&with), "Claim Note\n\n");

    let options = ParseOptions::new().with_footnotes(false);
    let without = DocxParser::from_bytes_with_options(&data, options)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(to_text(&without), "Claim\n\n");
}

#[test]
fn test_core_title_metadata() {
    let dir = TempDir::new().unwrap();
    let path = DocxBuilder::new()
        .core_title("Annual Review")
        .paragraph("Body")
        .write_to(&dir, "review.docx");

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Annual Review"));
    assert_eq!(doc.metadata.usable_title(), Some("Annual Review"));
}

#[test]
fn test_missing_document_part_is_an_error() {
    let data = DocxBuilder::new().without_document().build();
    assert!(matches!(
        DocxPackage::from_bytes(&data),
        Err(Error::MissingPart(_))
    ));
}

#[test]
fn test_not_a_zip() {
    assert!(matches!(
        parse_bytes(b"{\\rtf1 not a docx}"),
        Err(Error::UnknownFormat)
    ));
}
