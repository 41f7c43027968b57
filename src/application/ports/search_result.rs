use crate::domain::Fragment;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub fragment: Fragment,
    pub score: f32,
}

/// Metadata constraints applied by the index before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub source: Option<String>,
}

impl SearchFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn by_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }
}
