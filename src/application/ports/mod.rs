mod artifact_store;
mod embedder;
mod file_loader;
mod index_stats;
mod search_result;
mod section_parser;
mod text_splitter;
mod vector_store;
mod vector_store_error;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError, PageText};
pub use index_stats::IndexStats;
pub use search_result::{SearchFilter, SearchResult};
pub use section_parser::SectionParser;
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
