#![allow(dead_code)]

use axum::extract::RawQuery;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use deeplink_preview::{Fetcher, FetcherConfig, OEmbedEndpoints, Resolver};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// A local oEmbed endpoint returning a canned response and recording the
/// query string of every request it receives.
pub struct StubEndpoint {
    pub url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl StubEndpoint {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_query(&self) -> Option<String> {
        self.requests.lock().unwrap().last().cloned()
    }
}

pub async fn spawn_stub(status: StatusCode, body: &'static str) -> StubEndpoint {
    spawn_stub_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_stub_with_delay(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> StubEndpoint {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let app = Router::new().route(
        "/oembed",
        get(move |RawQuery(query): RawQuery| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(query.unwrap_or_default());
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubEndpoint {
        url: format!("http://{addr}/oembed"),
        requests,
    }
}

/// An address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/oembed")
}

pub fn resolver_for(youtube: &str, spotify: &str, timeout: Duration) -> Resolver {
    let endpoints = OEmbedEndpoints::new(youtube, spotify).unwrap();
    let fetcher = Fetcher::new_with_config(
        FetcherConfig::default()
            .with_endpoints(endpoints)
            .with_timeout(timeout),
    )
    .unwrap();
    Resolver::with_fetcher(fetcher)
}
