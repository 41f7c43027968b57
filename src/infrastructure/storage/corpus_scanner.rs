use std::path::{Path, PathBuf};

use crate::domain::{DocumentKind, SourceDocument};

pub const CORPUS_DIR: &str = "ana_fun";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus directory not found: {0}")]
    NotFound(String),
    #[error("failed to list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Lists the slide decks and manual PDFs under `<data_dir>/ana_fun`, slides
/// first, each group sorted by file name.
pub fn scan_corpus(data_dir: &Path) -> Result<Vec<SourceDocument>, CorpusError> {
    let root = data_dir.join(CORPUS_DIR);
    if !root.is_dir() {
        return Err(CorpusError::NotFound(root.display().to_string()));
    }

    let mut documents = Vec::new();
    for kind in [DocumentKind::Slides, DocumentKind::Manual] {
        let dir = root.join(kind.directory());
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "corpus subdirectory missing");
            continue;
        }

        let pdfs = list_pdfs(&dir)?;
        tracing::info!(dir = %dir.display(), files = pdfs.len(), "corpus subdirectory scanned");
        documents.extend(pdfs.into_iter().map(|path| SourceDocument::new(path, kind)));
    }

    Ok(documents)
}

fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let io_error = |source| CorpusError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    Ok(pdfs)
}
