#![cfg(feature = "server")]

mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{resolver_for, spawn_stub};
use deeplink_preview::server::{router, AppState};
use deeplink_preview::{LinkPreview, LinkResolver, RedirectPage, Resolution};
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

/// Returns the same resolution for every request.
struct FixedResolver(Resolution);

#[async_trait]
impl LinkResolver for FixedResolver {
    async fn resolve(&self, _raw_url: Option<&str>) -> Resolution {
        self.0.clone()
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn resolution(title: &str, image: &str, target: Option<&str>) -> Resolution {
    Resolution {
        preview: LinkPreview {
            title: title.to_string(),
            description: "YouTube · A".to_string(),
            image: image.to_string(),
            source_url: target.unwrap_or_default().to_string(),
        },
        target_url: target.map(str::to_string),
    }
}

#[tokio::test]
async fn test_page_renders_meta_tags_and_redirect() {
    let stub = spawn_stub(
        StatusCode::OK,
        r#"{"title":"T","author_name":"A","thumbnail_url":"img"}"#,
    )
    .await;
    let app = router(AppState::new(resolver_for(
        &stub.url,
        &stub.url,
        Duration::from_secs(5),
    )));

    let (status, html) = get(app, "/?q=https%3A%2F%2Fyoutu.be%2Fabc123%3Ft%3D5").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>T</title>"));
    assert!(html.contains(r#"<meta property="og:title" content="T">"#));
    assert!(html.contains(r#"<meta property="og:description" content="YouTube · A">"#));
    assert!(html.contains(r#"<meta property="og:image" content="img">"#));
    assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
    assert!(html.contains(r#"<img src="img""#));
    assert!(html.contains("Open link directly"));
    assert!(html.contains(
        r#"window.location.replace("intent://youtu.be/abc123&app=desktop#Intent;package=com.google.android.youtube;scheme=vnd.youtube;end")"#
    ));
    assert_eq!(html.matches("window.location.replace").count(), 1);
}

#[tokio::test]
async fn test_page_without_target_renders_placeholders_only() {
    let app = router(AppState::new(FixedResolver(Resolution::default())));

    let (status, html) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Redirect Page</title>"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("Open link directly"));
    assert!(!html.contains("window.location.replace"));
}

#[tokio::test]
async fn test_page_escapes_metadata() {
    let app = router(AppState::new(FixedResolver(resolution(
        "<b>Tom & Jerry</b>",
        "",
        Some("https://example.com/x"),
    ))));

    let (_, html) = get(app, "/?q=anything").await;

    assert!(!html.contains("<b>Tom"));
    assert!(html.contains("&lt;b&gt;Tom &amp; Jerry"));
    assert!(!html.contains("<img"));
    assert!(html.contains(r#"window.location.replace("https://example.com/x")"#));
}

#[tokio::test]
async fn test_repeated_q_uses_first_value() {
    let app = router(AppState::new(resolver_for(
        "http://127.0.0.1:9/oembed",
        "http://127.0.0.1:9/oembed",
        Duration::from_secs(5),
    )));

    let (status, html) = get(app, "/?q=https%3A%2F%2Fexample.com%2Fpage&q=x").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"window.location.replace("https://example.com/page")"#));
}

#[tokio::test]
async fn test_malformed_query_renders_placeholder_page() {
    let app = router(AppState::new(FixedResolver(Resolution::default())));

    let (status, html) = get(app, "/?q=%FF%FE").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Redirect Page</title>"));
}

#[tokio::test]
async fn test_healthz() {
    let app = router(AppState::new(FixedResolver(Resolution::default())));
    let (status, body) = get(app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[test]
fn test_redirect_page_destination_matches_redirector() {
    let page = RedirectPage::new(resolution(
        "sm9",
        "",
        Some("https://www.nicovideo.jp/watch/sm9"),
    ));
    assert_eq!(
        page.destination,
        deeplink_preview::build_destination(Some("https://www.nicovideo.jp/watch/sm9"))
    );

    let html = page.render_html().unwrap();
    assert!(html.contains("utm_content=sm9"));
}
