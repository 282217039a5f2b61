//! Raw paragraph scan over the main document part.
//!
//! This is the fallback used when the block model cannot be built. It only
//! looks at WordprocessingML `p` and `t` elements, tolerates mismatched end
//! tags, and keeps whatever it collected before a hard XML error.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::Result;

use super::package::DocxPackage;
use super::xml::{self, WML_NS};

/// Text of every paragraph in `word/document.xml`, in document order.
///
/// Each entry concatenates all text-run nodes of one paragraph. Paragraphs
/// without text are omitted.
pub fn raw_paragraphs(xml_content: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml_content);
    reader.config_mut().check_end_names = false;

    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        let (ns, event) = match reader.read_resolved_event() {
            Ok(resolved) => resolved,
            Err(e) if !paragraphs.is_empty() || !open.is_empty() => {
                log::warn!("Raw scan stopped early at XML error: {}", e);
                break;
            }
            Err(e) => return Err(e.into()),
        };
        let in_wml = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WML_NS);

        match event {
            Event::Start(ref e) if in_wml => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(ref e) if in_wml => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(text) = open.pop() {
                        push_paragraph(&mut paragraphs, text);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(ref e) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&xml::text(e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    for text in open {
        push_paragraph(&mut paragraphs, text);
    }

    Ok(paragraphs)
}

/// Paragraphs of the package joined with a blank line.
pub fn raw_text(package: &DocxPackage) -> Result<String> {
    Ok(raw_paragraphs(package.document_xml())?.join("\n\n"))
}

fn push_paragraph(paragraphs: &mut Vec<String>, text: String) {
    if !text.trim().is_empty() {
        paragraphs.push(text);
    }
}
