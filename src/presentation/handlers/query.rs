use std::io::{self, Write};

use crate::application::ports::{SearchFilter, VectorStore};
use crate::application::services::{RetrievalError, RetrievalService};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::bootstrap::{build_embedder, vector_store_from_env};
use crate::presentation::config::Settings;
use crate::presentation::console::render_results;
use crate::presentation::interactive::InteractiveSession;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error("console: {0}")]
    Io(#[from] io::Error),
}

/// Runs one search and prints it. Nothing is written unless the search
/// succeeds.
pub async fn execute_query<V, W>(
    service: &RetrievalService<V>,
    query: &str,
    top_k: Option<usize>,
    filter: &SearchFilter,
    out: &mut W,
) -> Result<usize, QueryError>
where
    V: VectorStore,
    W: Write,
{
    tracing::debug!(query = %sanitize_prompt(query), "single query");
    let results = service.search(query, top_k, filter).await?;

    render_results(out, &results)?;
    out.flush()?;
    Ok(results.len())
}

pub async fn run_query(
    settings: &Settings,
    query: Option<String>,
    top_k: Option<usize>,
    source: Option<String>,
) -> anyhow::Result<()> {
    let vector_store = vector_store_from_env(&settings.pinecone)?;
    let embedder = build_embedder(settings)?;
    let service = RetrievalService::new(embedder, vector_store, settings.search.top_k);
    let stats = service.connect().await?;

    let filter = source.map(SearchFilter::by_source).unwrap_or_default();

    if let Some(query) = query {
        execute_query(&service, &query, top_k, &filter, &mut io::stdout().lock()).await?;
        return Ok(());
    }

    let sources = if filter.is_empty() {
        let dimension = stats.dimension.unwrap_or(settings.embeddings.dimension);
        match service
            .available_sources(dimension, settings.search.source_sample_k)
            .await
        {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!(error = %e, "could not list sources, searching all of them");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    println!("Chatbot de Anatomía Funcional Humana");
    println!("Vectores en el índice: {}", stats.total_vector_count);

    let session = InteractiveSession::new(&service, sources, top_k).with_filter(filter);
    let stdin = io::stdin();
    let answered = session
        .run(&mut stdin.lock(), &mut io::stdout().lock())
        .await?;
    tracing::info!(answered, "interactive session ended");
    Ok(())
}
