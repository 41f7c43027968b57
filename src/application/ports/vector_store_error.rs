#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("index not found: {0}")]
    IndexNotFound(String),
    #[error("invalid client configuration: {0}")]
    InvalidConfiguration(String),
    #[error("stats request failed: {0}")]
    StatsFailed(String),
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
