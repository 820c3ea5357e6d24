//! HTML pages, assets, health and fallbacks.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};

use common::{app, night_owl};

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[tokio::test]
async fn wizard_pages_render() {
    let app = app();

    for (path, page) in [
        ("/", "landing"),
        ("/loading", "loading"),
        ("/setup", "setup"),
        ("/success", "success"),
    ] {
        let (status, body, headers) = app.send(get(path)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = text(body);
        assert!(html.contains(&format!(r#"data-page="{page}""#)), "{path}");
        assert!(html.contains("/assets/wizard.js"));
    }

    let (_, body, _) = app.send(get("/loading")).await;
    assert!(text(body).contains(r#"data-delay="3000""#));

    let (_, body, _) = app.send(get("/setup")).await;
    assert!(text(body).contains(r#"data-max-bytes="1048576""#));
}

#[tokio::test]
async fn assets_are_served_with_types() {
    let app = app();

    let (status, body, headers) = app.send(get("/assets/site.css")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/css"));
    assert!(text(body).contains(".toast"));

    let (status, body, headers) = app.send(get("/assets/wizard.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/javascript"));
    assert!(text(body).contains("/api/bots/verify-token"));
}

#[tokio::test]
async fn bot_page_is_server_rendered() {
    let app = app();
    let session = app.verify("tok-page").await;
    let (status, _) = app.generate(Some(&session), night_owl()).await;
    assert_eq!(status, StatusCode::OK);

    for path in ["/nightowl", "/NightOwl"] {
        let (status, body, headers) = app.send(get(path)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(headers.get(header::SET_COOKIE).is_none());
        let html = text(body);
        assert!(html.contains("<h1>Night Owl</h1>"));
        assert!(html.contains("Add to Your Server"));
        assert!(html.contains("Bot Commands"));
        assert!(html.contains("Powered by Swoosh Bots"));
        assert!(html.contains(r#"href="https://discord.gg/x""#));
    }
}

#[tokio::test]
async fn unknown_pages_are_html_404s() {
    let app = app();

    for path in ["/ghost", "/some/deep/path"] {
        let (status, body, _) = app.send(get(path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        let html = text(body);
        assert!(html.contains("Bot Not Found"));
        assert!(html.contains("Back to Home"));
    }

    let (status, body) = app.json(get("/uploads/missing.png")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_null());
}

#[tokio::test]
async fn unknown_api_paths_are_json_404s() {
    let app = app();
    let (status, body) = app.json(get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = app();
    let (status, body) = app.json(get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "swoosh");
    assert_eq!(body["store"], "memory");
    assert!(body["uptime"].as_u64().is_some());
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = app();
    let (_, _, headers) = app.send(get("/")).await;
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    let csp = headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("script-src 'self'"));
}
