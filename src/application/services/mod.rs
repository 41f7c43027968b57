mod cleanup_service;
mod embedding_service;
mod fragmentation_service;
mod index_connection;
mod retrieval_service;
mod upload_service;

pub use cleanup_service::{CleanupReport, CleanupService};
pub use embedding_service::{EmbeddingError, EmbeddingService};
pub use fragmentation_service::{FragmentationError, FragmentationService};
pub use index_connection::connect_index;
pub use retrieval_service::{RetrievalError, RetrievalService};
pub use upload_service::{UploadError, UploadReport, UploadService};
