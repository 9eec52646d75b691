use crate::{
    log_preview_card, Fetcher, FetcherConfig, LinkResolver, RedirectPage, Resolver,
    DEFAULT_LOOKUP_TIMEOUT,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub lookup_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ServerConfig {
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    fn fetcher_config(&self) -> FetcherConfig {
        let config = FetcherConfig::default().with_timeout(self.lookup_timeout);
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn LinkResolver>,
}

impl AppState {
    pub fn new(resolver: impl LinkResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// First `q` value of the query string. Repeated `q` parameters keep the
/// first occurrence; the rest are ignored.
pub fn shared_url(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.as_str())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_page))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// GET /?q=<shared-url>
///
/// A missing or unreadable `q` is not an error; the page renders with
/// placeholders and without a redirect.
#[instrument(level = "debug", skip(state))]
pub async fn redirect_page(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params = match query {
        Ok(Query(params)) => params,
        Err(e) => {
            warn!(error = %e, "Unreadable query string, rendering placeholder page");
            Vec::new()
        }
    };

    let resolution = state.resolver.resolve(shared_url(&params)).await;
    let page = RedirectPage::new(resolution);
    log_preview_card(&page.preview, page.destination.as_deref());

    match page.render_html() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            e.log();
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Binds `config.bind_addr` and serves until ctrl-c.
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = Fetcher::new_with_config(config.fetcher_config())?;
    let app = router(AppState::new(Resolver::with_fetcher(fetcher)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
