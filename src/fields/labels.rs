//! Label vocabularies used to delimit fields in document text.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Marker words recognized at the start of a line.
///
/// Matching is case-insensitive. The default set covers English and
/// Spanish documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    /// Labels stripped from the front of the title line
    pub title: Vec<String>,

    /// Labels opening the abstract
    pub abstract_start: Vec<String>,

    /// Labels closing a multi-line abstract (the line itself is kept)
    pub abstract_end: Vec<String>,

    /// Labels introducing the body
    pub content: Vec<String>,
}

impl LabelSet {
    /// Create the default English + Spanish label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// English labels only.
    pub fn english() -> Self {
        Self {
            title: labels(&["title"]),
            abstract_start: labels(&["abstract"]),
            abstract_end: labels(&["introduction", "content"]),
            content: labels(&["content"]),
        }
    }

    /// Spanish labels only.
    pub fn spanish() -> Self {
        Self {
            title: labels(&["título"]),
            abstract_start: labels(&["resumen"]),
            abstract_end: labels(&["introducción", "contenido"]),
            content: labels(&["contenido"]),
        }
    }

    /// Merge another label set into this one, skipping duplicates.
    pub fn merge(mut self, other: LabelSet) -> Self {
        extend_unique(&mut self.title, other.title);
        extend_unique(&mut self.abstract_start, other.abstract_start);
        extend_unique(&mut self.abstract_end, other.abstract_end);
        extend_unique(&mut self.content, other.content);
        self
    }

    /// Set the title labels.
    pub fn with_title_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the abstract opening labels.
    pub fn with_abstract_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abstract_start = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the labels that end a multi-line abstract.
    pub fn with_abstract_end_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abstract_end = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the content labels.
    pub fn with_content_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Load a label set from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let labels: LabelSet = serde_json::from_str(json)
            .map_err(|e| Error::InvalidLabels(format!("label file: {}", e)))?;
        labels.validate()?;
        Ok(labels)
    }

    /// Check that every vocabulary has at least one non-blank label.
    pub fn validate(&self) -> Result<()> {
        for (name, list) in [
            ("title", &self.title),
            ("abstract_start", &self.abstract_start),
            ("abstract_end", &self.abstract_end),
            ("content", &self.content),
        ] {
            if list.iter().all(|l| l.trim().is_empty()) {
                return Err(Error::InvalidLabels(format!("no {} labels", name)));
            }
        }
        Ok(())
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::english().merge(Self::spanish())
    }
}

fn labels(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn extend_unique(target: &mut Vec<String>, extra: Vec<String>) {
    for label in extra {
        if !target.iter().any(|l| l.eq_ignore_ascii_case(&label)) {
            target.push(label);
        }
    }
}
