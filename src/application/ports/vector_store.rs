use async_trait::async_trait;

use super::{IndexStats, SearchFilter, SearchResult, VectorStoreError};
use crate::domain::{Embedding, Fragment};

#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn index_exists(&self) -> Result<bool, VectorStoreError>;

    async fn describe_stats(&self) -> Result<IndexStats, VectorStoreError>;

    async fn upsert(
        &self,
        fragments: &[Fragment],
        embeddings: &[Embedding],
    ) -> Result<usize, VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn delete_all(&self) -> Result<(), VectorStoreError>;
}
