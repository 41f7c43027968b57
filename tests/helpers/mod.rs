#![allow(dead_code)]

use std::sync::Mutex;

use ana_chatbot::application::ports::{
    Embedder, EmbedderError, IndexStats, SearchFilter, SearchResult, VectorStore,
    VectorStoreError,
};
use ana_chatbot::domain::{Embedding, Fragment, FragmentId, FragmentMetadata};

pub const TEST_DIMENSION: usize = 8;

pub fn fragment(id: &str, source: &str, text: &str) -> Fragment {
    Fragment {
        id: FragmentId::from_raw(id),
        source: source.to_string(),
        section: "Músculos".to_string(),
        subsection: "General".to_string(),
        page_number: 1,
        text: text.to_string(),
        metadata: FragmentMetadata {
            file_name: "tema1.pdf".to_string(),
            chunk_index: 1,
            total_chunks: 1,
            word_count: text.split_whitespace().count(),
        },
    }
}

pub fn stats_with(total: u64, dimension: usize) -> IndexStats {
    IndexStats {
        total_vector_count: total,
        dimension: Some(dimension),
        ..IndexStats::default()
    }
}

/// Returns a fixed vector per text and records the size of every batch.
pub struct MockEmbedder {
    pub dimension: usize,
    pub batches: Mutex<Vec<usize>>,
    pub fail: bool,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            batches: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(TEST_DIMENSION)
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        if self.fail {
            return Err(EmbedderError::InferenceFailed("mock failure".to_string()));
        }
        Ok(Embedding::new(vec![0.5; self.dimension]))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if self.fail {
            return Err(EmbedderError::InferenceFailed("mock failure".to_string()));
        }
        self.batches.lock().unwrap().push(texts.len());
        Ok(texts
            .iter()
            .map(|_| Embedding::new(vec![0.5; self.dimension]))
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}

/// In-memory index double. Responses are configured up front and every call
/// is recorded for assertions.
pub struct MockVectorStore {
    pub exists: bool,
    pub stats: Mutex<IndexStats>,
    pub results: Vec<SearchResult>,
    pub search_error: Option<fn() -> VectorStoreError>,
    pub fail_on_batch: Option<usize>,
    pub upserted_batches: Mutex<Vec<usize>>,
    pub filters: Mutex<Vec<SearchFilter>>,
    pub top_ks: Mutex<Vec<usize>>,
    pub deletes: Mutex<usize>,
}

impl MockVectorStore {
    pub fn new(stats: IndexStats) -> Self {
        Self {
            exists: true,
            stats: Mutex::new(stats),
            results: Vec::new(),
            search_error: None,
            fail_on_batch: None,
            upserted_batches: Mutex::new(Vec::new()),
            filters: Mutex::new(Vec::new()),
            top_ks: Mutex::new(Vec::new()),
            deletes: Mutex::new(0),
        }
    }

    pub fn with_results(mut self, results: Vec<SearchResult>) -> Self {
        self.results = results;
        self
    }

    pub fn failing_search(mut self, error: fn() -> VectorStoreError) -> Self {
        self.search_error = Some(error);
        self
    }

    pub fn missing_index(mut self) -> Self {
        self.exists = false;
        self
    }

    pub fn failing_batch(mut self, batch: usize) -> Self {
        self.fail_on_batch = Some(batch);
        self
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.upserted_batches.lock().unwrap().clone()
    }

    pub fn recorded_filters(&self) -> Vec<SearchFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn recorded_top_ks(&self) -> Vec<usize> {
        self.top_ks.lock().unwrap().clone()
    }

    pub fn delete_count(&self) -> usize {
        *self.deletes.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl VectorStore for MockVectorStore {
    async fn index_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(self.exists)
    }

    async fn describe_stats(&self) -> Result<IndexStats, VectorStoreError> {
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn upsert(
        &self,
        fragments: &[Fragment],
        _embeddings: &[Embedding],
    ) -> Result<usize, VectorStoreError> {
        let mut batches = self.upserted_batches.lock().unwrap();
        if self.fail_on_batch == Some(batches.len() + 1) {
            return Err(VectorStoreError::UpsertFailed("mock batch failure".to_string()));
        }
        batches.push(fragments.len());
        self.stats.lock().unwrap().total_vector_count += fragments.len() as u64;
        Ok(fragments.len())
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        self.filters.lock().unwrap().push(filter.clone());
        self.top_ks.lock().unwrap().push(top_k);
        if let Some(error) = self.search_error {
            return Err(error());
        }
        Ok(self.results.clone())
    }

    async fn delete_all(&self) -> Result<(), VectorStoreError> {
        *self.deletes.lock().unwrap() += 1;
        self.stats.lock().unwrap().total_vector_count = 0;
        Ok(())
    }
}
