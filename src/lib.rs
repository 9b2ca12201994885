//! Plant Maintenance Library
//!
//! Breakdown work orders with their manpower and material ledgers, unit and
//! spare-part rosters, production logging and cost reports, persisted as
//! local JSON documents.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod commands;
pub mod common;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

use std::path::Path;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub use state::{AppState, PlantState};

pub const HELLO_MESSAGE: &str = "Hello from the plant maintenance backend!";

async fn hello() -> Json<Value> {
    Json(json!({ "message": HELLO_MESSAGE }))
}

/// HTTP surface: the bundled front-end from `static_dir` (unknown paths get
/// its `index.html`) plus a liveness endpoint.
pub fn app_router(static_dir: &Path) -> Router {
    let front_end =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/hello", get(hello))
        .fallback_service(front_end)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn hello_endpoint_answers() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_body(app_router(dir.path()), "/api/hello").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], HELLO_MESSAGE);
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let app = app_router(dir.path());

        let (status, body) = get_body(app.clone(), "/reports/monthly").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("root"));

        let (_, body) = get_body(app, "/app.js").await;
        assert_eq!(body, "console.log(1)");
    }
}
