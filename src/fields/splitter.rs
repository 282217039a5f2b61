//! Label-driven split of flattened document text into fields.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;

use super::labels::LabelSet;
use super::result::ExtractionResult;

/// Splits a paragraph text stream into title, abstract and content.
///
/// The text is reduced to trimmed non-empty lines, then three passes run
/// in order over the remaining lines:
///
/// 1. the abstract is located by its opening label and removed together
///    with its body lines;
/// 2. the title is taken from the first remaining line (with a leading
///    title label stripped) unless a title was supplied;
/// 3. the content is what follows a content label line, or all remaining
///    lines when there is no such line.
#[derive(Debug, Clone)]
pub struct FieldSplitter {
    title_label: Regex,
    abstract_start: Regex,
    abstract_end: Regex,
    content_label: Regex,
}

impl FieldSplitter {
    /// Compile a splitter for the given labels.
    pub fn new(labels: &LabelSet) -> Result<Self> {
        labels.validate()?;

        Ok(Self {
            title_label: Regex::new(&format!(
                r"(?i)^(?:{})(?:\s*:+|\s+|$)",
                alternation(&labels.title)
            ))?,
            abstract_start: Regex::new(&format!(
                r"(?i)^(?:{})(?:\s*:+\s*|\s+|$)(?P<rest>.*)$",
                alternation(&labels.abstract_start)
            ))?,
            abstract_end: Regex::new(&format!(
                r"(?i)^(?:{})(?:[\s:.]|$)",
                alternation(&labels.abstract_end)
            ))?,
            content_label: Regex::new(&format!(
                r"(?i)^(?:{})\s*(?::+\s*(?P<rest>.*))?$",
                alternation(&labels.content)
            ))?,
        })
    }

    /// Split `text` into fields.
    ///
    /// A non-blank `known_title` (typically the document title property)
    /// takes precedence over the first-line heuristic, and no line is
    /// consumed for the title in that case.
    pub fn split(&self, text: &str, known_title: Option<&str>) -> ExtractionResult {
        let mut lines = split_lines(text);

        let abstract_text = self.take_abstract(&mut lines);
        let title = match known_title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => Some(title.nfc().collect::<String>()),
            None => self.take_title(&mut lines),
        };
        let content = self.take_content(lines);

        ExtractionResult::new(title, abstract_text, content)
    }

    /// Remove the abstract label line and its body; return the abstract.
    ///
    /// Inline text on the label line is the whole abstract and only that
    /// line is removed. Otherwise the following lines up to (excluding)
    /// the first abstract-end label are the body, newline-joined.
    fn take_abstract(&self, lines: &mut Vec<String>) -> Option<String> {
        let (start, inline) = lines.iter().enumerate().find_map(|(i, line)| {
            self.abstract_start.captures(line).map(|caps| {
                let rest = caps.name("rest").map_or("", |m| m.as_str());
                (i, rest.trim().to_string())
            })
        })?;

        if !inline.is_empty() {
            lines.remove(start);
            return Some(inline);
        }

        let end = lines[start + 1..]
            .iter()
            .position(|line| self.abstract_end.is_match(line))
            .map_or(lines.len(), |offset| start + 1 + offset);

        let body: Vec<String> = lines.drain(start..end).skip(1).collect();
        Some(body.join("\n")).filter(|b| !b.is_empty())
    }

    /// Remove leading lines up to and including the title line.
    ///
    /// Lines that are nothing but a title label are skipped.
    fn take_title(&self, lines: &mut Vec<String>) -> Option<String> {
        let mut consumed = 0;
        let mut title = None;

        for line in lines.iter() {
            consumed += 1;

            let candidate = match self.title_label.find(line) {
                Some(label) => line[label.end()..].trim(),
                None => line.as_str(),
            };
            if !candidate.is_empty() {
                title = Some(candidate.to_string());
                break;
            }
        }

        lines.drain(..consumed);
        title
    }

    /// Join the content lines with a blank line.
    fn take_content(&self, lines: Vec<String>) -> String {
        let Some(label) = lines.iter().position(|l| self.content_label.is_match(l)) else {
            return lines.join("\n\n");
        };

        let inline = self
            .content_label
            .captures(&lines[label])
            .and_then(|caps| caps.name("rest"))
            .map(|m| m.as_str().trim().to_string())
            .filter(|rest| !rest.is_empty());

        inline
            .into_iter()
            .chain(lines.into_iter().skip(label + 1))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for FieldSplitter {
    fn default() -> Self {
        Self::new(&LabelSet::default()).expect("built-in label set compiles")
    }
}

/// Normalize line endings (CRLF/CR to LF) and Unicode (NFC).
pub fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").nfc().collect()
}

/// Split text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    normalize_text(text)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Regex alternation of escaped labels, longest first.
fn alternation(labels: &[String]) -> String {
    let mut labels: Vec<String> = labels
        .iter()
        .map(|l| l.trim().nfc().collect::<String>())
        .filter(|l| !l.is_empty())
        .collect();
    labels.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|")
}
