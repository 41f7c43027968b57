use std::path::PathBuf;

pub const MANUAL_SOURCE_NAME: &str = "Complemento Anatomía Funcional Humana";

/// Stands in for a stored vector whose metadata carries no source.
pub const UNKNOWN_SOURCE: &str = "desconocido";

#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub source_name: String,
    pub kind: DocumentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Slides,
    Manual,
}

impl DocumentKind {
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Slides => "diapos",
            Self::Manual => "man",
        }
    }
}

impl SourceDocument {
    pub fn new(path: PathBuf, kind: DocumentKind) -> Self {
        let source_name = match kind {
            DocumentKind::Slides => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("Diapositivas - {stem}")
            }
            DocumentKind::Manual => MANUAL_SOURCE_NAME.to_string(),
        };

        Self {
            path,
            source_name,
            kind,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
