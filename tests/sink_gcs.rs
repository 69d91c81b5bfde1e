// GcsSink against a local stand-in for the Cloud Storage upload endpoint.
//
// A tiny Axum server on 127.0.0.1:0 records each upload so the request shape
// (path, query, auth header, body) can be checked without touching Google.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use plagcheck::sink::{GcsSink, ResultSink};

#[derive(Debug, Clone)]
struct Upload {
    bucket: String,
    query: HashMap<String, String>,
    auth: Option<String>,
    body: String,
}

type Uploads = Arc<Mutex<Vec<Upload>>>;

async fn record_upload(
    State(uploads): State<Uploads>,
    Path(bucket): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> StatusCode {
    if bucket == "forbidden" {
        return StatusCode::FORBIDDEN;
    }
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    uploads.lock().unwrap().push(Upload {
        bucket,
        query,
        auth,
        body,
    });
    StatusCode::OK
}

async fn spawn_fake_gcs() -> (String, Uploads) {
    let uploads: Uploads = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/upload/storage/v1/b/{bucket}/o", post(record_upload))
        .with_state(uploads.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), uploads)
}

#[tokio::test]
async fn store_uploads_value_under_key() {
    let (base, uploads) = spawn_fake_gcs().await;
    let sink = GcsSink::new(&base, "scores", Some("secret-token".to_string())).unwrap();

    sink.store("20261019T120000.000000Z/result.txt", "0.875")
        .await
        .unwrap();

    let uploads = uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    let upload = &uploads[0];
    assert_eq!(upload.bucket, "scores");
    assert_eq!(upload.query["uploadType"], "media");
    assert_eq!(upload.query["name"], "20261019T120000.000000Z/result.txt");
    assert_eq!(upload.auth.as_deref(), Some("Bearer secret-token"));
    assert_eq!(upload.body, "0.875");
}

#[tokio::test]
async fn store_without_token_sends_no_auth_header() {
    let (base, uploads) = spawn_fake_gcs().await;
    let sink = GcsSink::new(&base, "scores", None).unwrap();

    sink.store("run/time.txt", "0.001").await.unwrap();

    let uploads = uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].auth.is_none());
}

#[tokio::test]
async fn store_surfaces_http_errors() {
    let (base, uploads) = spawn_fake_gcs().await;
    let sink = GcsSink::new(&base, "forbidden", None).unwrap();

    let err = sink.store("run/time.txt", "0.001").await.unwrap_err();
    assert!(err.to_string().contains("403"), "{err}");
    assert!(uploads.lock().unwrap().is_empty());
}
