use async_trait::async_trait;

use crate::domain::SourceDocument;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_pages(&self, document: &SourceDocument)
    -> Result<Vec<PageText>, FileLoaderError>;
}

/// Cleaned text of one non-blank page, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
