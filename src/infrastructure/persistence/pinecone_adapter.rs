use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::application::ports::{
    IndexStats, SearchFilter, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{
    CredentialSet, DEFAULT_SECTION, DEFAULT_SUBSECTION, Embedding, Fragment, FragmentId,
    FragmentMetadata, UNKNOWN_SOURCE,
};

const API_KEY_HEADER: &str = "api-key";
const API_VERSION_HEADER: &str = "x-pinecone-api-version";

/// Connection parameters that are not secrets.
#[derive(Debug, Clone)]
pub struct PineconeOptions {
    pub control_plane_url: String,
    pub api_version: String,
    pub namespace: String,
}

/// Pinecone over its REST API: index lookup on the control plane, vector
/// operations on the index host.
pub struct PineconeAdapter {
    client: Client,
    control_plane_url: String,
    index_host: String,
    index_name: String,
    namespace: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpsertRequest<'a> {
    vectors: Vec<VectorPayload<'a>>,
    namespace: &'a str,
}

#[derive(Serialize)]
struct VectorPayload<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: FragmentPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    namespace: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<FragmentPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(default)]
    namespaces: BTreeMap<String, NamespaceSummary>,
    dimension: Option<usize>,
    #[serde(default)]
    total_vector_count: u64,
    metric: Option<String>,
    vector_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamespaceSummary {
    #[serde(default)]
    vector_count: u64,
}

/// Flat metadata stored next to each vector. Missing keys read back as
/// defaults so a sparse record still yields a result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct FragmentPayload {
    text: String,
    source: String,
    section: String,
    subsection: String,
    #[serde(deserialize_with = "whole_number")]
    page_number: u32,
    file_name: String,
    #[serde(deserialize_with = "whole_number")]
    chunk_index: usize,
    #[serde(deserialize_with = "whole_number")]
    total_chunks: usize,
    #[serde(deserialize_with = "whole_number")]
    word_count: usize,
}

/// Pinecone stores metadata numbers as floats and returns `3.0` for `3`.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(D::Error::custom(format!("expected a whole number, got {value}")));
    }
    T::try_from(value as u64).map_err(|_| D::Error::custom(format!("{value} is out of range")))
}

impl Default for FragmentPayload {
    fn default() -> Self {
        Self {
            text: String::new(),
            source: UNKNOWN_SOURCE.to_string(),
            section: DEFAULT_SECTION.to_string(),
            subsection: DEFAULT_SUBSECTION.to_string(),
            page_number: 0,
            file_name: String::new(),
            chunk_index: 0,
            total_chunks: 0,
            word_count: 0,
        }
    }
}

impl From<&Fragment> for FragmentPayload {
    fn from(fragment: &Fragment) -> Self {
        Self {
            text: fragment.text.trim().to_string(),
            source: fragment.source.clone(),
            section: fragment.section.clone(),
            subsection: fragment.subsection.clone(),
            page_number: fragment.page_number,
            file_name: fragment.metadata.file_name.clone(),
            chunk_index: fragment.metadata.chunk_index,
            total_chunks: fragment.metadata.total_chunks,
            word_count: fragment.metadata.word_count,
        }
    }
}

impl FragmentPayload {
    fn into_fragment(self, id: String) -> Fragment {
        Fragment {
            id: FragmentId::from_raw(id),
            source: self.source,
            section: self.section,
            subsection: self.subsection,
            page_number: self.page_number,
            text: self.text,
            metadata: FragmentMetadata {
                file_name: self.file_name,
                chunk_index: self.chunk_index,
                total_chunks: self.total_chunks,
                word_count: self.word_count,
            },
        }
    }
}

impl PineconeAdapter {
    pub fn new(
        credentials: &CredentialSet,
        options: PineconeOptions,
    ) -> Result<Self, VectorStoreError> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(credentials.api_key()).map_err(|_| {
            VectorStoreError::InvalidConfiguration("API key is not a valid header value".into())
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(
            API_VERSION_HEADER,
            HeaderValue::from_str(&options.api_version).map_err(|_| {
                VectorStoreError::InvalidConfiguration(format!(
                    "invalid API version: {}",
                    options.api_version
                ))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| VectorStoreError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            control_plane_url: normalize_base_url(&options.control_plane_url),
            index_host: normalize_base_url(credentials.host()),
            index_name: credentials.index_name().to_string(),
            namespace: options.namespace,
        })
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}/{}", self.index_host, path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, VectorStoreError> {
        self.client
            .post(self.data_url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| VectorStoreError::ServiceUnavailable(e.to_string()))
    }

    /// Maps auth and availability failures to their own categories and
    /// anything else through `on_error`.
    async fn ensure_success(
        response: Response,
        on_error: fn(String) -> VectorStoreError,
    ) -> Result<Response, VectorStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = format!("HTTP {status}: {body}");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                VectorStoreError::AuthenticationFailed(detail)
            }
            StatusCode::TOO_MANY_REQUESTS => VectorStoreError::ServiceUnavailable(detail),
            s if s.is_server_error() => VectorStoreError::ServiceUnavailable(detail),
            _ => on_error(detail),
        })
    }
}

/// Index hosts are often copied without a scheme from the console.
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[async_trait]
impl VectorStore for PineconeAdapter {
    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn index_exists(&self) -> Result<bool, VectorStoreError> {
        let response = self
            .client
            .get(format!("{}/indexes/{}", self.control_plane_url, self.index_name))
            .send()
            .await
            .map_err(|e| VectorStoreError::ServiceUnavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            info!(index = %self.index_name, "index not found");
            return Ok(false);
        }

        Self::ensure_success(response, VectorStoreError::InvalidResponse).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(index = %self.index_name))]
    async fn describe_stats(&self) -> Result<IndexStats, VectorStoreError> {
        let response = self.post_json("describe_index_stats", &json!({})).await?;
        let response = Self::ensure_success(response, VectorStoreError::StatsFailed).await?;

        let stats: StatsResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse(e.to_string()))?;

        Ok(IndexStats {
            total_vector_count: stats.total_vector_count,
            dimension: stats.dimension,
            metric: stats.metric,
            vector_type: stats.vector_type,
            namespaces: stats
                .namespaces
                .into_iter()
                .map(|(name, summary)| (name, summary.vector_count))
                .collect(),
        })
    }

    #[instrument(skip(self, fragments, embeddings), fields(index = %self.index_name, count = fragments.len()))]
    async fn upsert(
        &self,
        fragments: &[Fragment],
        embeddings: &[Embedding],
    ) -> Result<usize, VectorStoreError> {
        if fragments.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "fragments and embeddings count mismatch".to_string(),
            ));
        }

        let vectors = fragments
            .iter()
            .zip(embeddings)
            .map(|(fragment, embedding)| VectorPayload {
                id: fragment.id.as_str(),
                values: &embedding.values,
                metadata: FragmentPayload::from(fragment),
            })
            .collect();

        let request = UpsertRequest {
            vectors,
            namespace: &self.namespace,
        };

        let response = self.post_json("vectors/upsert", &request).await?;
        let response = Self::ensure_success(response, VectorStoreError::UpsertFailed).await?;

        let upserted: UpsertResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse(e.to_string()))?;

        info!(index = %self.index_name, count = upserted.upserted_count, "vectors_upserted");
        Ok(upserted.upserted_count)
    }

    #[instrument(skip(self, embedding), fields(index = %self.index_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let request = QueryRequest {
            vector: &embedding.values,
            top_k,
            include_metadata: true,
            include_values: false,
            namespace: &self.namespace,
            filter: filter
                .source
                .as_ref()
                .map(|source| json!({ "source": { "$eq": source } })),
        };

        let response = self.post_json("query", &request).await?;
        let response = Self::ensure_success(response, VectorStoreError::SearchFailed).await?;

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::InvalidResponse(e.to_string()))?;

        Ok(query_response
            .matches
            .into_iter()
            .map(|m| SearchResult {
                fragment: m.metadata.unwrap_or_default().into_fragment(m.id),
                score: m.score,
            })
            .collect())
    }

    #[instrument(skip(self), fields(index = %self.index_name, namespace = %self.namespace))]
    async fn delete_all(&self) -> Result<(), VectorStoreError> {
        let body = json!({ "deleteAll": true, "namespace": self.namespace });
        let response = self.post_json("vectors/delete", &body).await?;
        Self::ensure_success(response, VectorStoreError::DeleteFailed).await?;

        info!(index = %self.index_name, "vectors_deleted");
        Ok(())
    }
}
