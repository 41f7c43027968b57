use crate::application::ports::{IndexStats, VectorStore, VectorStoreError};

/// Confirms the index exists and returns its current statistics.
pub async fn connect_index<V>(vector_store: &V) -> Result<IndexStats, VectorStoreError>
where
    V: VectorStore + ?Sized,
{
    if !vector_store.index_exists().await? {
        return Err(VectorStoreError::IndexNotFound(
            "configured index does not exist".to_string(),
        ));
    }

    let stats = vector_store.describe_stats().await?;
    tracing::info!(
        total_vector_count = stats.total_vector_count,
        dimension = ?stats.dimension,
        "connected to index"
    );
    Ok(stats)
}
