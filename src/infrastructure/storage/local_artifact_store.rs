use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::{EmbeddingsArtifact, Fragment};

/// Pretty-printed JSON files on the local filesystem.
pub struct LocalArtifactStore {
    fragments_path: PathBuf,
    embeddings_path: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(fragments_path: PathBuf, embeddings_path: PathBuf) -> Self {
        Self {
            fragments_path,
            embeddings_path,
        }
    }

    async fn write_json<T: Serialize + ?Sized>(
        path: &Path,
        value: &T,
    ) -> Result<(), ArtifactStoreError> {
        let io_error = |source| ArtifactStoreError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| {
            ArtifactStoreError::InvalidFormat {
                path: path.display().to_string(),
                source,
            }
        })?;

        tokio::fs::write(path, bytes).await.map_err(io_error)?;
        tracing::info!(path = %path.display(), "artifact written");
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactStoreError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ArtifactStoreError::NotFound(path.display().to_string()));
            }
            Err(source) => {
                return Err(ArtifactStoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "artifact read");

        serde_json::from_slice(&bytes).map_err(|source| ArtifactStoreError::InvalidFormat {
            path: path.display().to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn save_fragments(&self, fragments: &[Fragment]) -> Result<(), ArtifactStoreError> {
        Self::write_json(&self.fragments_path, fragments).await
    }

    async fn load_fragments(&self) -> Result<Vec<Fragment>, ArtifactStoreError> {
        Self::read_json(&self.fragments_path).await
    }

    async fn save_embeddings(
        &self,
        artifact: &EmbeddingsArtifact,
    ) -> Result<(), ArtifactStoreError> {
        Self::write_json(&self.embeddings_path, artifact).await
    }

    async fn load_embeddings(&self) -> Result<EmbeddingsArtifact, ArtifactStoreError> {
        Self::read_json(&self.embeddings_path).await
    }
}
