mod credentials;
mod embedding;
mod embeddings_artifact;
mod fragment;
mod section;
mod source_document;

pub use credentials::{API_KEY_VAR, CredentialSet, HOST_VAR, INDEX_NAME_VAR};
pub use embedding::Embedding;
pub use embeddings_artifact::{EmbeddingsArtifact, SourceStats};
pub use fragment::{Fragment, FragmentId, FragmentMetadata, ascii_id_segment};
pub use section::{DEFAULT_SECTION, DEFAULT_SUBSECTION, Section};
pub use source_document::{DocumentKind, MANUAL_SOURCE_NAME, SourceDocument, UNKNOWN_SOURCE};
