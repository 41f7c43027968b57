use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Semantic search over the functional anatomy corpus.
#[derive(Debug, Parser)]
#[command(name = "ana", version, about)]
pub struct Cli {
    /// Extra settings file layered over ana.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract, clean and chunk the corpus PDFs into the fragments file
    Fragment,
    /// Compute embeddings for every fragment
    Embed,
    /// Upsert the embeddings artifact into the index
    Upload {
        /// Vectors per upsert request
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Search the index; interactive when no query is given
    Query {
        query: Option<String>,
        #[arg(long, short = 'k')]
        top_k: Option<usize>,
        /// Only return fragments from this source
        #[arg(long)]
        source: Option<String>,
    },
    /// Delete every vector in the index
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print index statistics
    Stats,
}
