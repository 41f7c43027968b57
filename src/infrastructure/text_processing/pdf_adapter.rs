use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError, PageText};
use crate::domain::SourceDocument;

use super::text_sanitizer::clean_page_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_raw_pages(path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let pages = (0..page_count)
            .filter_map(|page_index| {
                let text = doc.extract_text(page_index).unwrap_or_default();
                (!text.trim().is_empty()).then(|| PageText {
                    page_number: (page_index + 1) as u32,
                    text,
                })
            })
            .collect();

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, document),
        fields(source = %document.source_name, path = %document.path.display())
    )]
    async fn extract_pages(
        &self,
        document: &SourceDocument,
    ) -> Result<Vec<PageText>, FileLoaderError> {
        if !document.path.is_file() {
            return Err(FileLoaderError::Io {
                path: document.path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        let path: PathBuf = document.path.clone();

        let raw_pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_raw_pages(&path)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = raw_pages.len(), "PDF text extraction complete");

        let pages: Vec<PageText> = raw_pages
            .into_iter()
            .map(|page| PageText {
                page_number: page.page_number,
                text: clean_page_text(&page.text),
            })
            .filter(|page| !page.text.is_empty())
            .collect();

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.file_name()));
        }

        Ok(pages)
    }
}
