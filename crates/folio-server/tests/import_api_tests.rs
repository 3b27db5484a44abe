//! Integration tests for the import API
//!
//! These tests verify:
//! - Gallery imports default to test mode and honor `testMode: false`
//! - Video imports process the whole dataset
//! - Per-record failures still answer 200 with a summary
//! - An unloadable dataset answers 500 with `error` and `details`
//! - CORS preflight is answered with the permissive headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use folio_import::{
    liveness::UrlChecker,
    models::EntityDefaults,
    parser::records_from_lines,
    source::{FileSource, RecordSource, StaticSource},
    store::MemoryStore,
    Importer,
};
use folio_server::{api, config::CorsConfig, features::FeatureState};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tower::ServiceExt; // for `oneshot`
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

async fn media_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path_regex("^/ok/.+"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    server
}

fn gallery_source(media: &MockServer, count: usize) -> Arc<dyn RecordSource> {
    let uri = media.uri();
    Arc::new(StaticSource::new(records_from_lines((1..=count).map(|i| {
        format!("{uri}/ok/t{i}.jpg,\"Work {i}\",20{i:02},{uri}/ok/f{i}.jpg")
    }))))
}

fn video_source(media: &MockServer) -> Arc<dyn RecordSource> {
    let uri = media.uri();
    Arc::new(StaticSource::new(records_from_lines([
        format!("A,{uri}/ok/a.mp4"),
        format!("B,{uri}/missing/b.mp4"),
        "no-url-here".to_string(),
    ])))
}

fn create_test_app(
    store: Arc<MemoryStore>,
    gallery_source: Arc<dyn RecordSource>,
    video_source: Arc<dyn RecordSource>,
) -> Router {
    let checker = UrlChecker::new(Duration::from_millis(300)).expect("checker");
    let importer = Importer::new(checker, store, EntityDefaults::default(), 2);

    let state = FeatureState {
        importer: Arc::new(importer),
        gallery_source,
        video_source,
    };

    api::create_router(state, &CorsConfig::default())
}

async fn post(app: Router, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_gallery_import_defaults_to_test_mode() {
    let media = media_server().await;
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone(), gallery_source(&media, 5), video_source(&media));

    let (status, json) = post(app, "/api/v1/import/gallery", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"]["total"], 2);
    assert_eq!(json["results"]["successful"], 2);
    assert_eq!(json["results"]["failed"], 0);
    assert!(json["message"].as_str().unwrap().contains("test mode"));
    assert_eq!(store.artworks().len(), 2);
}

#[tokio::test]
async fn test_gallery_import_full_mode() {
    let media = media_server().await;
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone(), gallery_source(&media, 5), video_source(&media));

    let (status, json) = post(
        app,
        "/api/v1/import/gallery",
        Body::from(r#"{"testMode": false}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"]["total"], 5);
    assert_eq!(json["results"]["successful"], 5);
    assert_eq!(json["results"]["errors"].as_array().unwrap().len(), 0);
    assert_eq!(store.artworks()[4].year, Some(2005));
}

#[tokio::test]
async fn test_gallery_import_with_garbage_body_runs_test_mode() {
    let media = media_server().await;
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store, gallery_source(&media, 5), video_source(&media));

    let (status, json) = post(app, "/api/v1/import/gallery", Body::from("not json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"]["total"], 2);
}

#[tokio::test]
async fn test_video_import_reports_partial_failures_as_ok() {
    let media = media_server().await;
    let store = Arc::new(MemoryStore::new());
    let app = create_test_app(store.clone(), gallery_source(&media, 1), video_source(&media));

    let (status, json) = post(app, "/api/v1/import/videos", Body::empty()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Video import completed");
    assert_eq!(json["results"]["total"], 3);
    assert_eq!(json["results"]["successful"], 1);
    assert_eq!(json["results"]["failed"], 2);
    assert_eq!(json["results"]["errors"][0], "B: Video URL is invalid");
    assert_eq!(
        json["results"]["errors"][1],
        "Row 3: expected at least 2 fields, found 1"
    );
    assert_eq!(store.videos().len(), 1);
}

#[tokio::test]
async fn test_unloadable_dataset_answers_500() {
    let media = media_server().await;
    let store = Arc::new(MemoryStore::new());
    let missing: Arc<dyn RecordSource> = Arc::new(FileSource::new("/no/such/videos.csv"));
    let app = create_test_app(store, gallery_source(&media, 1), missing);

    let (status, json) = post(app, "/api/v1/import/videos", Body::empty()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Import failed");
    assert!(json["details"].as_str().unwrap().contains("/no/such/videos.csv"));
}

#[tokio::test]
async fn test_cors_preflight_is_permissive() {
    let media = media_server().await;
    let app = create_test_app(
        Arc::new(MemoryStore::new()),
        gallery_source(&media, 1),
        video_source(&media),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/import/gallery")
                .header(header::ORIGIN, "https://folio.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(
                    header::ACCESS_CONTROL_REQUEST_HEADERS,
                    "authorization, x-client-info, apikey, content-type",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "missing {name} in {allowed}");
    }
}

#[tokio::test]
async fn test_health_check() {
    let media = media_server().await;
    let app = create_test_app(
        Arc::new(MemoryStore::new()),
        gallery_source(&media, 1),
        video_source(&media),
    );

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}
