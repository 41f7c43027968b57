use anyhow::Context;

use crate::application::ports::ArtifactStore;
use crate::application::services::EmbeddingService;
use crate::presentation::bootstrap::{build_artifact_store, build_embedder};
use crate::presentation::config::Settings;

#[tracing::instrument(skip_all)]
pub async fn run_embed(settings: &Settings) -> anyhow::Result<()> {
    let store = build_artifact_store(&settings.paths);
    let fragments = store
        .load_fragments()
        .await
        .context("loading fragments; run `ana fragment` first")?;
    tracing::info!(fragments = fragments.len(), "fragments loaded");

    let embedder = build_embedder(settings)?;
    let service = EmbeddingService::new(embedder, settings.embeddings.batch_size);
    let artifact = service.embed_fragments(fragments).await?;

    store
        .save_embeddings(&artifact)
        .await
        .context("saving embeddings")?;
    tracing::info!(
        model = %artifact.model,
        embeddings = artifact.len(),
        dimension = artifact.dimension,
        output = %settings.paths.embeddings_file.display(),
        "embeddings saved"
    );

    println!(
        "Embeddings generados: {} (dimensión {}) -> {}",
        artifact.len(),
        artifact.dimension,
        settings.paths.embeddings_file.display()
    );
    Ok(())
}
