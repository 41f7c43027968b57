use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Embedding, Fragment};

/// Fragments paired index-by-index with their embeddings, plus per-source
/// totals. Persisted locally between the embed and upload stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsArtifact {
    pub model: String,
    pub dimension: usize,
    pub fragments: Vec<Fragment>,
    pub embeddings: Vec<Embedding>,
    pub source_stats: BTreeMap<String, SourceStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub fragments: usize,
    pub words: usize,
}

impl SourceStats {
    pub fn tally<'a>(fragments: impl IntoIterator<Item = &'a Fragment>) -> BTreeMap<String, Self> {
        let mut stats: BTreeMap<String, Self> = BTreeMap::new();
        for fragment in fragments {
            let entry = stats.entry(fragment.source.clone()).or_default();
            entry.fragments += 1;
            entry.words += fragment.word_count();
        }
        stats
    }
}

impl EmbeddingsArtifact {
    pub fn new(model: String, fragments: Vec<Fragment>, embeddings: Vec<Embedding>) -> Self {
        let dimension = embeddings.first().map(Embedding::dimensions).unwrap_or(0);
        let source_stats = SourceStats::tally(&fragments);
        Self {
            model,
            dimension,
            fragments,
            embeddings,
            source_stats,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.fragments.len() == self.embeddings.len()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
