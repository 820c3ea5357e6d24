//! Shared router harness for the integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use swoosh_api::{build_router, AppState};
use swoosh_common::config::{self, AppConfig};
use swoosh_db::{BotStore, MemoryStore};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "swoosh-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
}

pub fn test_config(uploads: &TempDir) -> AppConfig {
    let mut cfg = config::defaults().unwrap();
    cfg.server.public_url = "https://bots.example.com/".into();
    cfg.auth.session_secret = Some("integration-test-secret".into());
    cfg.uploads.dir = uploads.path().to_string_lossy().into_owned();
    cfg
}

pub fn app() -> TestApp {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn app_with_store(store: Arc<dyn BotStore>) -> TestApp {
    let uploads = tempfile::tempdir().unwrap();
    let state = AppState::new(test_config(&uploads), store);
    TestApp {
        router: build_router(state),
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>, HeaderMap) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), headers)
    }

    pub async fn json(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body, _) = self.send(req).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    pub async fn verify(&self, token: &str) -> String {
        let (status, body) = self
            .json(
                Request::post("/api/bots/verify-token")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "token": token }).to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["sessionToken"].as_str().unwrap().to_string()
    }

    pub async fn generate(&self, session: Option<&str>, form: Vec<Part>) -> (StatusCode, Value) {
        let mut req = Request::post("/api/bots/generate").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(session) = session {
            req = req.header(header::AUTHORIZATION, format!("Bearer {session}"));
        }
        self.json(req.body(Body::from(multipart(form))).unwrap()).await
    }
}

pub enum Part {
    Text(&'static str, &'static str),
    File {
        name: &'static str,
        filename: &'static str,
        content_type: &'static str,
        data: Vec<u8>,
    },
}

pub fn multipart(parts: Vec<Part>) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(&data);
                out.extend_from_slice(b"\r\n");
            }
        }
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    out
}

pub fn night_owl() -> Vec<Part> {
    vec![
        Part::Text("name", "Night Owl"),
        Part::Text("serverLink", "https://discord.gg/x"),
    ]
}

pub fn bearer(path: &str, session: &str) -> Request<Body> {
    Request::get(path)
        .header(header::AUTHORIZATION, format!("Bearer {session}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_bearer(path: &str, session: &str) -> Request<Body> {
    Request::post(path)
        .header(header::AUTHORIZATION, format!("Bearer {session}"))
        .body(Body::empty())
        .unwrap()
}
