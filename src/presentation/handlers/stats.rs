use crate::application::services::connect_index;
use crate::presentation::bootstrap::vector_store_from_env;
use crate::presentation::config::Settings;
use crate::presentation::console::render_stats;

pub async fn run_stats(settings: &Settings) -> anyhow::Result<()> {
    let vector_store = vector_store_from_env(&settings.pinecone)?;
    let stats = connect_index(vector_store.as_ref()).await?;
    render_stats(&mut std::io::stdout().lock(), &stats)?;
    Ok(())
}
