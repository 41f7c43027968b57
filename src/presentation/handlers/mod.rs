mod clear;
mod embed;
mod fragment;
mod query;
mod stats;
mod upload;

pub use clear::{ClearError, clear_index, run_clear};
pub use embed::run_embed;
pub use fragment::run_fragment;
pub use query::{QueryError, execute_query, run_query};
pub use stats::run_stats;
pub use upload::run_upload;

use super::cli::Command;
use super::config::Settings;

pub async fn dispatch(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Fragment => run_fragment(settings).await,
        Command::Embed => run_embed(settings).await,
        Command::Upload { batch_size } => run_upload(settings, batch_size).await,
        Command::Query {
            query,
            top_k,
            source,
        } => run_query(settings, query, top_k, source).await,
        Command::Clear { yes } => run_clear(settings, yes).await,
        Command::Stats => run_stats(settings).await,
    }
}
