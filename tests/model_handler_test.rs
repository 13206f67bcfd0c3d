use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use novaforte_backend::app::app::App;
use novaforte_backend::config::StorageConfig;
use novaforte_backend::service::model_service::ModelServiceImpl;
use novaforte_backend::service::quote_service::QuoteServiceImpl;
use novaforte_backend::util::email::{EmailError, Mailer, OutgoingEmail};
use novaforte_backend::util::storage::ModelStore;

const BOUNDARY: &str = "X-NOVAFORTE-TEST-BOUNDARY";

/// The model routes never send mail; any dispatch here is a bug.
struct PanicMailer;

#[async_trait]
impl Mailer for PanicMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), EmailError> {
        panic!("model routes must not dispatch email");
    }
}

fn file_part(name: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn close_parts(mut body: Vec<u8>) -> Vec<u8> {
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(host: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/models")
        .header("host", host)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn setup_app() -> (Router, tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let storage_config = StorageConfig {
        upload_dir: dir.path().join("uploads"),
        models_dir: dir.path().join("models"),
    };
    let store = Arc::new(ModelStore::new(storage_config.clone()));
    store.ensure_directories().await.unwrap();

    let quote_service = Arc::new(QuoteServiceImpl::new(
        &storage_config,
        Arc::new(PanicMailer),
        "notify@example.com".to_string(),
    ));
    let model_service = Arc::new(ModelServiceImpl::new(&storage_config, store));
    let router = App::create_router(quote_service, model_service, &storage_config);
    let models_dir = storage_config.models_dir.clone();
    (router, dir, models_dir)
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_upload_and_fetch_model_round_trip() {
    let (app, _dir, _models_dir) = setup_app().await;

    let glb_bytes = b"glTF fake binary payload";
    let body = close_parts(file_part("model", "jaw scan.glb", glb_bytes));
    let resp = app
        .clone()
        .oneshot(upload_request("localhost:4000", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Model uploaded successfully");
    assert_eq!(json["model"]["name"], "jaw scan.glb");

    let stored_name = json["model"]["filename"].as_str().unwrap().to_string();
    assert!(stored_name.ends_with(".glb"));

    // The returned URL embeds the percent-encoded stored name
    let url = json["model"]["url"].as_str().unwrap();
    assert_eq!(
        url,
        &format!(
            "http://localhost:4000/models/{}",
            urlencoding::encode(&stored_name)
        )
    );

    // Fetching the file back yields exactly the uploaded bytes
    let fetch = Request::builder()
        .method("GET")
        .uri(format!("/models/{}", urlencoding::encode(&stored_name)))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(fetch).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    assert_eq!(&bytes[..], glb_bytes);
}

#[tokio::test]
async fn test_model_upload_requires_file() {
    let (app, _dir, _models_dir) = setup_app().await;

    let body = close_parts(Vec::new());
    let resp = app
        .oneshot(upload_request("localhost:4000", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "No file uploaded");
}

#[tokio::test]
async fn test_model_upload_rejects_disallowed_extension() {
    let (app, _dir, _models_dir) = setup_app().await;

    let body = close_parts(file_part("model", "preview.png", b"png bytes"));
    let resp = app
        .oneshot(upload_request("localhost:4000", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(
        json["message"],
        "Only .glb and .gltf files are allowed for 3D viewer"
    );
}

#[tokio::test]
async fn test_listing_reflects_directory_contents() {
    let (app, _dir, models_dir) = setup_app().await;

    let list = |app: Router| async move {
        let req = Request::builder()
            .method("GET")
            .uri("/api/models")
            .header("host", "localhost:4000")
            .body(Body::empty())
            .unwrap();
        body_json(app.oneshot(req).await.unwrap()).await
    };

    let json = list(app.clone()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["models"].as_array().unwrap().len(), 0);

    std::fs::write(models_dir.join("demo.gltf"), b"gltf json").unwrap();
    std::fs::write(models_dir.join("notes.txt"), b"not a model").unwrap();
    std::fs::write(models_dir.join("my model.glb"), b"glb").unwrap();

    let json = list(app.clone()).await;
    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 2);
    let filenames: Vec<&str> = models
        .iter()
        .map(|m| m["filename"].as_str().unwrap())
        .collect();
    assert!(filenames.contains(&"demo.gltf"));
    assert!(filenames.contains(&"my model.glb"));

    let spaced = models
        .iter()
        .find(|m| m["filename"] == "my model.glb")
        .unwrap();
    assert_eq!(
        spaced["url"],
        "http://localhost:4000/models/my%20model.glb"
    );

    // Listing again returns the same snapshot
    let again = list(app).await;
    assert_eq!(again["models"], json["models"]);
}

#[tokio::test]
async fn test_listing_behind_render_proxy_uses_https() {
    let (app, _dir, models_dir) = setup_app().await;
    std::fs::write(models_dir.join("demo.glb"), b"glb").unwrap();

    let req = Request::builder()
        .method("GET")
        .uri("/api/models")
        .header("host", "novaforte.onrender.com")
        .body(Body::empty())
        .unwrap();
    let json = body_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(
        json["models"][0]["url"],
        "https://novaforte.onrender.com/models/demo.glb"
    );
}

#[tokio::test]
async fn test_listing_unreadable_directory_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage_config = StorageConfig {
        upload_dir: dir.path().join("uploads"),
        models_dir: dir.path().join("missing"),
    };
    // Directories deliberately not created
    let store = Arc::new(ModelStore::new(storage_config.clone()));
    let quote_service = Arc::new(QuoteServiceImpl::new(
        &storage_config,
        Arc::new(PanicMailer),
        "notify@example.com".to_string(),
    ));
    let model_service = Arc::new(ModelServiceImpl::new(&storage_config, store));
    let app = App::create_router(quote_service, model_service, &storage_config);

    let req = Request::builder()
        .method("GET")
        .uri("/api/models")
        .header("host", "localhost:4000")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Error reading models folder");
}
