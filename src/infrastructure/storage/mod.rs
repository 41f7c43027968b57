mod corpus_scanner;
mod local_artifact_store;

pub use corpus_scanner::{CORPUS_DIR, CorpusError, scan_corpus};
pub use local_artifact_store::LocalArtifactStore;
