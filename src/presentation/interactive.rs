use std::io::{self, BufRead, Write};

use crate::application::ports::{SearchFilter, VectorStore};
use crate::application::services::{RetrievalError, RetrievalService};
use crate::infrastructure::observability::sanitize_prompt;

use super::console::{render_results, render_source_menu};

pub const QUERY_PROMPT: &str = "\nIngrese su consulta (o 'salir' para terminar): ";
const EXIT_COMMAND: &str = "salir";

#[derive(Debug, thiserror::Error)]
pub enum InteractiveError {
    #[error("console: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

/// Maps a menu answer to a filter. Option 1 and anything unparsable or out of
/// range mean all sources.
pub fn parse_source_choice(answer: &str, sources: &[String]) -> SearchFilter {
    match answer.trim().parse::<usize>() {
        Ok(choice) if choice >= 2 && choice - 2 < sources.len() => {
            SearchFilter::by_source(sources[choice - 2].clone())
        }
        _ => SearchFilter::any(),
    }
}

/// Read-query, pick-source, print loop over arbitrary console streams.
pub struct InteractiveSession<'a, V>
where
    V: VectorStore,
{
    service: &'a RetrievalService<V>,
    sources: Vec<String>,
    top_k: Option<usize>,
    default_filter: SearchFilter,
}

impl<'a, V> InteractiveSession<'a, V>
where
    V: VectorStore,
{
    pub fn new(service: &'a RetrievalService<V>, sources: Vec<String>, top_k: Option<usize>) -> Self {
        Self {
            service,
            sources,
            top_k,
            default_filter: SearchFilter::any(),
        }
    }

    /// Filter used when there is no source menu to ask from.
    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.default_filter = filter;
        self
    }

    /// Runs until `salir` or end of input and returns how many queries were
    /// answered. A failed search ends the session with its error.
    pub async fn run<R, W>(&self, input: &mut R, out: &mut W) -> Result<usize, InteractiveError>
    where
        R: BufRead,
        W: Write,
    {
        let mut answered = 0;

        loop {
            write!(out, "{QUERY_PROMPT}")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                break;
            };
            let query = line.trim();

            if query.eq_ignore_ascii_case(EXIT_COMMAND) {
                break;
            }
            if query.is_empty() {
                continue;
            }

            let filter = if self.sources.is_empty() {
                self.default_filter.clone()
            } else {
                render_source_menu(out, &self.sources)?;
                let answer = read_line(input)?.unwrap_or_default();
                parse_source_choice(&answer, &self.sources)
            };

            tracing::debug!(query = %sanitize_prompt(query), "interactive query");
            let results = self.service.search(query, self.top_k, &filter).await?;
            render_results(out, &results)?;
            answered += 1;
        }

        writeln!(out, "¡Hasta luego!")?;
        Ok(answered)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
