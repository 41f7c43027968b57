use std::sync::Arc;

use crate::application::ports::{IndexStats, VectorStore, VectorStoreError};

use super::connect_index;

pub struct CleanupService<V>
where
    V: VectorStore,
{
    vector_store: Arc<V>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupReport {
    pub before: IndexStats,
    pub after: IndexStats,
}

impl CleanupReport {
    pub fn removed(&self) -> u64 {
        self.before
            .total_vector_count
            .saturating_sub(self.after.total_vector_count)
    }
}

impl<V> CleanupService<V>
where
    V: VectorStore,
{
    pub fn new(vector_store: Arc<V>) -> Self {
        Self { vector_store }
    }

    pub async fn connect(&self) -> Result<IndexStats, VectorStoreError> {
        connect_index(self.vector_store.as_ref()).await
    }

    /// Deletes every vector. `before` is the snapshot the caller confirmed
    /// against.
    pub async fn clear(&self, before: IndexStats) -> Result<CleanupReport, VectorStoreError> {
        tracing::warn!(
            total_vector_count = before.total_vector_count,
            "deleting all vectors"
        );
        self.vector_store.delete_all().await?;

        let after = self.vector_store.describe_stats().await?;
        let report = CleanupReport { before, after };
        tracing::info!(removed = report.removed(), "index cleared");
        Ok(report)
    }
}
