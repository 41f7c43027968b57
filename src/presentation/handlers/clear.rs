use std::io::{self, BufRead, Write};

use crate::application::ports::VectorStore;
use crate::application::services::{CleanupReport, CleanupService};
use crate::presentation::bootstrap::vector_store_from_env;
use crate::presentation::config::Settings;
use crate::presentation::console::{render_cleanup_report, render_stats};
use crate::presentation::prompt::confirm;

#[derive(Debug, thiserror::Error)]
pub enum ClearError {
    #[error("operation cancelled")]
    Cancelled,
    #[error(transparent)]
    VectorStore(#[from] crate::application::ports::VectorStoreError),
    #[error("console: {0}")]
    Io(#[from] io::Error),
}

/// Shows current statistics, asks for confirmation unless `assume_yes`, then
/// empties the index.
pub async fn clear_index<V, R, W>(
    service: &CleanupService<V>,
    assume_yes: bool,
    input: &mut R,
    out: &mut W,
) -> Result<CleanupReport, ClearError>
where
    V: VectorStore,
    R: BufRead,
    W: Write,
{
    let before = service.connect().await?;
    render_stats(out, &before)?;

    if !assume_yes {
        writeln!(
            out,
            "\nSe eliminarán {} vectores del índice.",
            before.total_vector_count
        )?;
        if !confirm(input, out)? {
            writeln!(out, "Operación cancelada.")?;
            return Err(ClearError::Cancelled);
        }
    }

    let report = service.clear(before).await?;
    writeln!(out)?;
    render_cleanup_report(out, &report)?;
    Ok(report)
}

pub async fn run_clear(settings: &Settings, assume_yes: bool) -> anyhow::Result<()> {
    let vector_store = vector_store_from_env(&settings.pinecone)?;
    let service = CleanupService::new(vector_store);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    clear_index(&service, assume_yes, &mut input, &mut out).await?;
    Ok(())
}
