use std::io::Write;

use anyhow::Context;

use crate::application::ports::ArtifactStore;
use crate::application::services::UploadService;
use crate::presentation::bootstrap::{build_artifact_store, vector_store_from_env};
use crate::presentation::config::Settings;
use crate::presentation::console::render_upload_report;

#[tracing::instrument(skip(settings))]
pub async fn run_upload(settings: &Settings, batch_size: Option<usize>) -> anyhow::Result<()> {
    let vector_store = vector_store_from_env(&settings.pinecone)?;

    let artifact = build_artifact_store(&settings.paths)
        .load_embeddings()
        .await
        .context("loading embeddings; run `ana embed` first")?;

    let service = UploadService::new(
        vector_store,
        batch_size.unwrap_or(settings.pinecone.upsert_batch_size),
        settings.embeddings.dimension,
    );
    let report = service.upload(artifact).await?;

    let mut stdout = std::io::stdout().lock();
    render_upload_report(&mut stdout, &report)?;
    stdout.flush()?;
    Ok(())
}
