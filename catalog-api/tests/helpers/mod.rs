//! Shared test utilities for catalog-api integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use catalog_api::{build_router, AppState};
use catalog_common::db::init_database;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub const BOUNDARY: &str = "catalog-test-boundary";

/// Test application backed by an in-memory database and a temp upload dir
///
/// The TempDir must be kept alive for the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub static_dir: TempDir,
}

pub async fn test_app() -> TestApp {
    test_app_with_cors(false).await
}

pub async fn test_app_with_cors(cors_permissive: bool) -> TestApp {
    let pool = init_database("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    let static_dir = TempDir::new().expect("Failed to create temp dir");

    let state = AppState::new(pool.clone(), static_dir.path())
        .with_permissive_cors(cors_permissive);

    TestApp {
        router: build_router(state),
        pool,
        static_dir,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a multipart/form-data request with a single part
pub fn multipart_upload(field: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
    let mut body = multipart_part(field, filename, content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    multipart_request(body)
}

/// Like [`multipart_upload`] but the body stops before the closing boundary
pub fn multipart_truncated(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    multipart_request(multipart_part(field, Some(filename), content))
}

fn multipart_part(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: audio/mpeg\r\n\r\n",
            BOUNDARY, disposition
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload-audio/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect()
        .await
        .expect("Should read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}
