use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, IndexStats, SearchFilter, SearchResult, VectorStore,
    VectorStoreError,
};
use crate::domain::{Embedding, UNKNOWN_SOURCE};

use super::connect_index;

pub struct RetrievalService<V>
where
    V: VectorStore,
{
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<V>,
    top_k: usize,
}

impl<V> RetrievalService<V>
where
    V: VectorStore,
{
    pub fn new(embedder: Arc<dyn Embedder>, vector_store: Arc<V>, top_k: usize) -> Self {
        Self {
            embedder,
            vector_store,
            top_k,
        }
    }

    pub async fn connect(&self) -> Result<IndexStats, RetrievalError> {
        connect_index(self.vector_store.as_ref())
            .await
            .map_err(RetrievalError::Search)
    }

    /// Returns matches exactly as ranked by the index.
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        let top_k = top_k.unwrap_or(self.top_k);
        tracing::info!(
            query_chars = query.chars().count(),
            top_k,
            source = ?filter.source,
            "searching"
        );

        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = self
            .vector_store
            .search(&query_embedding, top_k, filter)
            .await
            .map_err(RetrievalError::Search)?;

        tracing::info!(matches = results.len(), "search complete");
        Ok(results)
    }

    /// Distinct `source` values seen among the first `sample_k` vectors, in
    /// first-seen order. Vectors without a stored source are skipped.
    pub async fn available_sources(
        &self,
        dimension: usize,
        sample_k: usize,
    ) -> Result<Vec<String>, RetrievalError> {
        let sample = Embedding::uniform(dimension);
        let results = self
            .vector_store
            .search(&sample, sample_k, &SearchFilter::any())
            .await
            .map_err(RetrievalError::Search)?;

        let mut sources: Vec<String> = Vec::new();
        for result in results {
            let source = result.fragment.source;
            if source.is_empty() || source == UNKNOWN_SOURCE || sources.contains(&source) {
                continue;
            }
            sources.push(source);
        }

        Ok(sources)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
}
