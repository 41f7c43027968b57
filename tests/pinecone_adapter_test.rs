use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use ana_chatbot::application::ports::{SearchFilter, VectorStore, VectorStoreError};
use ana_chatbot::application::services::connect_index;
use ana_chatbot::domain::{
    CredentialSet, DEFAULT_SECTION, DEFAULT_SUBSECTION, Embedding, Fragment, FragmentId,
    FragmentMetadata, UNKNOWN_SOURCE,
};
use ana_chatbot::infrastructure::persistence::{
    PineconeAdapter, PineconeOptions, normalize_base_url,
};

const TEST_API_KEY: &str = "test-key";
const TEST_INDEX: &str = "ana";

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn bodies_for(&self, path: &str) -> Vec<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("api-key").and_then(|v| v.to_str().ok()) == Some(TEST_API_KEY)
        && headers.contains_key("x-pinecone-api-version")
}

async fn describe_index(
    headers: HeaderMap,
    Path(name): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }
    if name != TEST_INDEX {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})));
    }
    (StatusCode::OK, Json(json!({"name": name, "dimension": 8})))
}

async fn describe_stats(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    recorded
        .bodies
        .lock()
        .unwrap()
        .push(("stats".to_string(), body));
    (
        StatusCode::OK,
        Json(json!({
            "namespaces": {"": {"vectorCount": 42}},
            "dimension": 8,
            "indexFullness": 0.0,
            "totalVectorCount": 42,
            "metric": "cosine",
            "vectorType": "dense"
        })),
    )
}

async fn upsert(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let count = body["vectors"].as_array().map(Vec::len).unwrap_or(0);
    recorded
        .bodies
        .lock()
        .unwrap()
        .push(("upsert".to_string(), body));
    (StatusCode::OK, Json(json!({"upsertedCount": count})))
}

async fn query(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded
        .bodies
        .lock()
        .unwrap()
        .push(("query".to_string(), body));
    (
        StatusCode::OK,
        Json(json!({
            "matches": [
                {
                    "id": "Diapositivas_Tema_1_Musculos_001",
                    "score": 0.91,
                    "metadata": {
                        "text": "El bíceps braquial flexiona el codo.",
                        "source": "Diapositivas - Tema 1",
                        "section": "Músculos",
                        "subsection": "brazo anterior",
                        "page_number": 3.0,
                        "file_name": "Tema 1.pdf",
                        "chunk_index": 1.0,
                        "total_chunks": 2.0,
                        "word_count": 6.0
                    }
                },
                {
                    "id": "sin_metadatos",
                    "score": 0.42
                }
            ],
            "namespace": ""
        })),
    )
}

async fn delete(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorded
        .bodies
        .lock()
        .unwrap()
        .push(("delete".to_string(), body));
    (StatusCode::OK, Json(json!({})))
}

async fn spawn_pinecone() -> (String, Recorded) {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/indexes/{name}", get(describe_index))
        .route("/describe_index_stats", post(describe_stats))
        .route("/vectors/upsert", post(upsert))
        .route("/query", post(query))
        .route("/vectors/delete", post(delete))
        .with_state(recorded.clone());

    (spawn(router).await, recorded)
}

async fn spawn_failing(status: StatusCode) -> String {
    let router = Router::new()
        .route("/indexes/{name}", get(move || async move { status }))
        .route("/describe_index_stats", post(move || async move { status }))
        .route("/query", post(move || async move { status }));
    spawn(router).await
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn adapter(base_url: &str, api_key: &str, index: &str) -> PineconeAdapter {
    let credentials = CredentialSet::new(api_key.to_string(), base_url.to_string(), index.to_string());
    PineconeAdapter::new(
        &credentials,
        PineconeOptions {
            control_plane_url: base_url.to_string(),
            api_version: "2025-01".to_string(),
            namespace: String::new(),
        },
    )
    .unwrap()
}

fn fragment(id: &str, text: &str) -> Fragment {
    Fragment {
        id: FragmentId::from_raw(id),
        source: "Complemento Anatomía Funcional Humana".to_string(),
        section: "Articulaciones".to_string(),
        subsection: "General".to_string(),
        page_number: 7,
        text: text.to_string(),
        metadata: FragmentMetadata {
            file_name: "manual.pdf".to_string(),
            chunk_index: 1,
            total_chunks: 1,
            word_count: text.split_whitespace().count(),
        },
    }
}

#[tokio::test]
async fn given_existing_index_when_connecting_then_stats_are_mapped() {
    let (url, _) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let stats = connect_index(&store).await.unwrap();

    assert_eq!(stats.total_vector_count, 42);
    assert_eq!(stats.dimension, Some(8));
    assert_eq!(stats.metric.as_deref(), Some("cosine"));
    assert_eq!(stats.vector_type.as_deref(), Some("dense"));
    assert_eq!(stats.namespaces.get(""), Some(&42));
}

#[tokio::test]
async fn given_unknown_index_when_connecting_then_index_not_found() {
    let (url, recorded) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, "otro");

    let result = connect_index(&store).await;

    assert!(matches!(result, Err(VectorStoreError::IndexNotFound(_))));
    assert!(recorded.bodies_for("stats").is_empty());
}

#[tokio::test]
async fn given_wrong_api_key_when_checking_index_then_authentication_failed() {
    let (url, _) = spawn_pinecone().await;
    let store = adapter(&url, "wrong-key", TEST_INDEX);

    let result = store.index_exists().await;

    assert!(matches!(result, Err(VectorStoreError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn given_forbidden_response_when_searching_then_authentication_failed() {
    let url = spawn_failing(StatusCode::FORBIDDEN).await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store
        .search(&Embedding::new(vec![0.1; 8]), 3, &SearchFilter::any())
        .await;

    assert!(matches!(result, Err(VectorStoreError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn given_server_error_when_searching_then_service_unavailable() {
    let url = spawn_failing(StatusCode::INTERNAL_SERVER_ERROR).await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store
        .search(&Embedding::new(vec![0.1; 8]), 3, &SearchFilter::any())
        .await;

    assert!(matches!(result, Err(VectorStoreError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_rate_limited_when_describing_stats_then_service_unavailable() {
    let url = spawn_failing(StatusCode::TOO_MANY_REQUESTS).await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store.describe_stats().await;

    assert!(matches!(result, Err(VectorStoreError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_bad_request_when_describing_stats_then_stats_failed() {
    let url = spawn_failing(StatusCode::BAD_REQUEST).await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store.describe_stats().await;

    assert!(matches!(result, Err(VectorStoreError::StatsFailed(_))));
}

#[tokio::test]
async fn given_unreachable_host_when_searching_then_service_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store
        .search(&Embedding::new(vec![0.1; 8]), 3, &SearchFilter::any())
        .await;

    assert!(matches!(result, Err(VectorStoreError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn given_query_response_when_searching_then_matches_keep_order_and_metadata() {
    let (url, _) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let results = store
        .search(&Embedding::new(vec![0.1; 8]), 2, &SearchFilter::any())
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    let first = &results[0];
    assert_eq!(first.fragment.id.as_str(), "Diapositivas_Tema_1_Musculos_001");
    assert_eq!(first.fragment.source, "Diapositivas - Tema 1");
    assert_eq!(first.fragment.subsection, "brazo anterior");
    assert_eq!(first.fragment.page_number, 3);
    assert_eq!(first.fragment.metadata.total_chunks, 2);
    assert!((first.score - 0.91).abs() < 1e-6);

    let second = &results[1];
    assert_eq!(second.fragment.id.as_str(), "sin_metadatos");
    assert_eq!(second.fragment.source, UNKNOWN_SOURCE);
    assert_eq!(second.fragment.section, DEFAULT_SECTION);
    assert_eq!(second.fragment.subsection, DEFAULT_SUBSECTION);
}

#[tokio::test]
async fn given_source_filter_when_searching_then_request_carries_metadata_filter() {
    let (url, recorded) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    store
        .search(
            &Embedding::new(vec![0.1; 8]),
            5,
            &SearchFilter::by_source("Diapositivas - Tema 1"),
        )
        .await
        .unwrap();
    store
        .search(&Embedding::new(vec![0.1; 8]), 5, &SearchFilter::any())
        .await
        .unwrap();

    let bodies = recorded.bodies_for("query");
    assert_eq!(bodies[0]["topK"], 5);
    assert_eq!(bodies[0]["includeMetadata"], true);
    assert_eq!(
        bodies[0]["filter"],
        json!({"source": {"$eq": "Diapositivas - Tema 1"}})
    );
    assert!(bodies[1].get("filter").is_none());
}

#[tokio::test]
async fn given_fragments_when_upserting_then_metadata_is_flat_and_count_returned() {
    let (url, recorded) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);
    let fragments = vec![
        fragment("man_Articulaciones_001", "  La rodilla es una articulación sinovial.  "),
        fragment("man_Articulaciones_002", "El menisco amortigua la carga."),
    ];
    let embeddings = vec![Embedding::new(vec![0.1; 8]), Embedding::new(vec![0.2; 8])];

    let count = store.upsert(&fragments, &embeddings).await.unwrap();

    assert_eq!(count, 2);
    let bodies = recorded.bodies_for("upsert");
    let vector = &bodies[0]["vectors"][0];
    assert_eq!(vector["id"], "man_Articulaciones_001");
    assert_eq!(vector["values"].as_array().unwrap().len(), 8);
    assert_eq!(
        vector["metadata"]["text"],
        "La rodilla es una articulación sinovial."
    );
    assert_eq!(vector["metadata"]["page_number"], 7);
    assert_eq!(vector["metadata"]["file_name"], "manual.pdf");
    assert_eq!(vector["metadata"]["word_count"], 6);
}

#[tokio::test]
async fn given_mismatched_inputs_when_upserting_then_no_request_is_sent() {
    let (url, recorded) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    let result = store
        .upsert(&[fragment("a", "texto")], &[])
        .await;

    assert!(matches!(result, Err(VectorStoreError::UpsertFailed(_))));
    assert!(recorded.bodies_for("upsert").is_empty());
}

#[tokio::test]
async fn given_index_when_deleting_all_then_delete_all_flag_is_sent() {
    let (url, recorded) = spawn_pinecone().await;
    let store = adapter(&url, TEST_API_KEY, TEST_INDEX);

    store.delete_all().await.unwrap();

    let bodies = recorded.bodies_for("delete");
    assert_eq!(bodies, vec![json!({"deleteAll": true, "namespace": ""})]);
}

#[test]
fn given_host_without_scheme_when_normalizing_then_https_is_added() {
    assert_eq!(
        normalize_base_url("ana-abc123.svc.pinecone.io/"),
        "https://ana-abc123.svc.pinecone.io"
    );
    assert_eq!(
        normalize_base_url("http://localhost:5080"),
        "http://localhost:5080"
    );
}
