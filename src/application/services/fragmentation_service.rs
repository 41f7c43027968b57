use std::sync::Arc;

use crate::application::ports::{
    FileLoader, FileLoaderError, SectionParser, TextSplitter, TextSplitterError,
};
use crate::domain::{Fragment, FragmentId, FragmentMetadata, SourceDocument};

pub struct FragmentationService<F, T: ?Sized>
where
    F: FileLoader,
    T: TextSplitter,
{
    file_loader: Arc<F>,
    section_parser: Arc<dyn SectionParser>,
    text_splitter: Arc<T>,
}

impl<F, T: ?Sized> FragmentationService<F, T>
where
    F: FileLoader,
    T: TextSplitter,
{
    pub fn new(
        file_loader: Arc<F>,
        section_parser: Arc<dyn SectionParser>,
        text_splitter: Arc<T>,
    ) -> Self {
        Self {
            file_loader,
            section_parser,
            text_splitter,
        }
    }

    /// Fragments every document in order. A document that fails is logged and
    /// skipped; sequence numbers keep increasing across documents so ids stay
    /// unique for the whole run.
    pub async fn fragment_corpus(
        &self,
        documents: &[SourceDocument],
    ) -> Result<Vec<Fragment>, FragmentationError> {
        let mut fragments = Vec::new();
        let mut next_sequence = 1;

        for document in documents {
            match self.fragment_document(document, next_sequence).await {
                Ok(mut produced) => {
                    next_sequence += produced.len();
                    tracing::info!(
                        source = %document.source_name,
                        fragments = produced.len(),
                        "document fragmented"
                    );
                    fragments.append(&mut produced);
                }
                Err(e) => {
                    tracing::error!(
                        source = %document.source_name,
                        path = %document.path.display(),
                        error = %e,
                        "document skipped"
                    );
                }
            }
        }

        if fragments.is_empty() {
            return Err(FragmentationError::NoFragments);
        }

        Ok(fragments)
    }

    #[tracing::instrument(skip(self, document), fields(source = %document.source_name))]
    pub async fn fragment_document(
        &self,
        document: &SourceDocument,
        first_sequence: usize,
    ) -> Result<Vec<Fragment>, FragmentationError> {
        let pages = self
            .file_loader
            .extract_pages(document)
            .await
            .map_err(FragmentationError::FileLoading)?;

        let file_name = document.file_name();
        let mut sequence = first_sequence;
        let mut fragments = Vec::new();

        for page in pages {
            for section in self.section_parser.parse(&page.text) {
                if section.content.trim().is_empty() {
                    continue;
                }

                let chunks = self
                    .text_splitter
                    .split(&section.content)
                    .await
                    .map_err(FragmentationError::Splitting)?;
                let total_chunks = chunks.len();

                for (chunk_index, text) in chunks.into_iter().enumerate() {
                    if text.trim().is_empty() {
                        continue;
                    }

                    fragments.push(Fragment {
                        id: FragmentId::compose(&document.source_name, &section.title, sequence),
                        source: document.source_name.clone(),
                        section: section.title.clone(),
                        subsection: section.subsection.clone(),
                        page_number: page.page_number,
                        metadata: FragmentMetadata {
                            file_name: file_name.clone(),
                            chunk_index: chunk_index + 1,
                            total_chunks,
                            word_count: text.split_whitespace().count(),
                        },
                        text,
                    });
                    sequence += 1;
                }
            }
        }

        Ok(fragments)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FragmentationError {
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("no fragments could be produced from the corpus")]
    NoFragments,
}
