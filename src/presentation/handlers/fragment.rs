use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Context;

use crate::application::ports::ArtifactStore;
use crate::application::services::FragmentationService;
use crate::infrastructure::storage::scan_corpus;
use crate::infrastructure::text_processing::{
    HeadingSectionParser, PdfAdapter, WordWindowSplitter,
};
use crate::presentation::bootstrap::build_artifact_store;
use crate::presentation::config::Settings;

#[tracing::instrument(skip_all)]
pub async fn run_fragment(settings: &Settings) -> anyhow::Result<()> {
    let documents = scan_corpus(&settings.paths.data_dir).context("scanning corpus")?;
    if documents.is_empty() {
        tracing::warn!(data_dir = %settings.paths.data_dir.display(), "no PDF files found");
    }

    let chunking = &settings.chunking;
    let splitter = WordWindowSplitter::new(
        chunking.max_tokens,
        chunking.overlap_ratio,
        chunking.tokens_per_word,
    )
    .context("invalid chunking settings")?;
    tracing::info!(
        max_words = splitter.max_words(),
        overlap_words = splitter.overlap_words(),
        documents = documents.len(),
        "fragmenting corpus"
    );

    let service = FragmentationService::new(
        Arc::new(PdfAdapter::new()),
        Arc::new(HeadingSectionParser::new()),
        Arc::new(splitter),
    );
    let fragments = service.fragment_corpus(&documents).await?;

    let store = build_artifact_store(&settings.paths);
    store
        .save_fragments(&fragments)
        .await
        .context("saving fragments")?;

    let words: usize = fragments.iter().map(|f| f.word_count()).sum();
    let sources: BTreeSet<&str> = fragments.iter().map(|f| f.source.as_str()).collect();
    let sections: BTreeSet<(&str, &str)> = fragments
        .iter()
        .map(|f| (f.source.as_str(), f.section.as_str()))
        .collect();
    tracing::info!(
        fragments = fragments.len(),
        words,
        sources = sources.len(),
        sections = sections.len(),
        output = %settings.paths.fragments_file.display(),
        "fragments saved"
    );
    for source in sources {
        let (count, source_words) = fragments
            .iter()
            .filter(|f| f.source == source)
            .fold((0usize, 0usize), |(n, w), f| (n + 1, w + f.word_count()));
        tracing::info!(source, fragments = count, words = source_words, "source summary");
    }

    println!(
        "Fragmentos generados: {} ({} palabras) -> {}",
        fragments.len(),
        words,
        settings.paths.fragments_file.display()
    );
    Ok(())
}
