use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

const MAX_ID_SEGMENT_LEN: usize = 50;

/// A chunk of anatomy text prepared for embedding and indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: FragmentId,
    pub source: String,
    pub section: String,
    pub subsection: String,
    pub page_number: u32,
    pub text: String,
    pub metadata: FragmentMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentMetadata {
    pub file_name: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub word_count: usize,
}

/// Vector id accepted by Pinecone: ASCII letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(String);

impl FragmentId {
    pub fn compose(source: &str, section: &str, sequence: usize) -> Self {
        Self(format!(
            "{}_{}_{:03}",
            ascii_id_segment(source),
            ascii_id_segment(section),
            sequence
        ))
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces free text to an id segment: accents are decomposed and dropped,
/// anything that is not ASCII alphanumeric, `_` or `-` is removed, `-` becomes
/// `_`, and a segment that does not start with a letter gets an `f_` prefix.
pub fn ascii_id_segment(text: &str) -> String {
    let kept: String = text
        .nfkd()
        .filter(|c| (c.is_ascii() && c.is_alphanumeric()) || *c == '_' || *c == '-')
        .map(|c| if c == '-' { '_' } else { c })
        .collect();

    let prefixed = match kept.chars().next() {
        Some(first) if !first.is_ascii_alphabetic() => format!("f_{kept}"),
        _ => kept,
    };

    prefixed.chars().take(MAX_ID_SEGMENT_LEN).collect()
}

impl Fragment {
    pub fn word_count(&self) -> usize {
        self.metadata.word_count
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
