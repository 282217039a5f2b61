//! Core properties (`docProps/core.xml`) parsing.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::Metadata;

use super::xml;

/// Parse the Dublin Core metadata part into [`Metadata`].
pub fn parse_core_properties(xml_content: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml_content);
    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                current = Some(e.local_name().as_ref().to_vec());
                value.clear();
            }
            Event::Text(ref e) => {
                if current.is_some() {
                    value.push_str(&xml::text(e));
                }
            }
            Event::End(_) => {
                if let Some(name) = current.take() {
                    assign(&mut metadata, &name, value.trim());
                }
                value.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

fn assign(metadata: &mut Metadata, name: &[u8], value: &str) {
    if value.is_empty() {
        return;
    }
    let owned = || Some(value.to_string());
    match name {
        b"title" => metadata.title = owned(),
        b"subject" => metadata.subject = owned(),
        b"creator" => metadata.creator = owned(),
        b"keywords" => metadata.keywords = owned(),
        b"description" => metadata.description = owned(),
        b"lastModifiedBy" => metadata.last_modified_by = owned(),
        b"created" => metadata.created = parse_w3cdtf(value),
        b"modified" => metadata.modified = parse_w3cdtf(value),
        _ => {}
    }
}

/// Parse a W3CDTF timestamp as written by Word (`2024-03-01T10:00:00Z`).
fn parse_w3cdtf(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| log::debug!("Ignoring unparseable core property date {:?}: {}", value, e))
        .ok()
}
