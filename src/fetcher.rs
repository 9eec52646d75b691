use crate::{PreviewError, Provider};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const YOUTUBE_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
pub const SPOTIFY_OEMBED_ENDPOINT: &str = "https://open.spotify.com/oembed";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Only `title` is required; the other fields may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct OEmbedResponse {
    pub title: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
}

/// Base URLs of the oEmbed services, one per provider that has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OEmbedEndpoints {
    pub youtube: String,
    pub spotify: String,
}

impl Default for OEmbedEndpoints {
    fn default() -> Self {
        Self {
            youtube: YOUTUBE_OEMBED_ENDPOINT.to_string(),
            spotify: SPOTIFY_OEMBED_ENDPOINT.to_string(),
        }
    }
}

impl OEmbedEndpoints {
    /// Builds endpoints from arbitrary base URLs, e.g. a local stub server.
    pub fn new(youtube: &str, spotify: &str) -> Result<Self, PreviewError> {
        Url::parse(youtube)?;
        Url::parse(spotify)?;
        Ok(Self {
            youtube: youtube.trim_end_matches('?').to_string(),
            spotify: spotify.trim_end_matches('?').to_string(),
        })
    }

    /// The lookup URL for `url`, or `None` when `provider` has no oEmbed service.
    pub fn request_url(&self, provider: Provider, url: &str) -> Option<String> {
        let encoded = urlencoding::encode(url);
        match provider {
            Provider::YouTube => Some(format!("{}?url={}&format=json", self.youtube, encoded)),
            Provider::Spotify => Some(format!("{}?url={}", self.spotify, encoded)),
            Provider::Niconico | Provider::Unknown => None,
        }
    }
}

pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub endpoints: OEmbedEndpoints,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("deeplink_preview/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            endpoints: OEmbedEndpoints::default(),
        }
    }
}

impl FetcherConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: OEmbedEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// oEmbed client. Every lookup is a single attempt bounded by the client timeout.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    endpoints: OEmbedEndpoints,
}

impl Fetcher {
    pub fn new() -> Result<Self, PreviewError> {
        debug!("Fetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::default())
    }

    pub fn new_with_config(config: FetcherConfig) -> Result<Self, PreviewError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PreviewError::ClientBuildError(e.to_string()))?;

        Ok(Self {
            client,
            endpoints: config.endpoints,
        })
    }

    pub fn with_client(client: Client, endpoints: OEmbedEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &OEmbedEndpoints {
        &self.endpoints
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_oembed(
        &self,
        provider: Provider,
        url: &str,
    ) -> Result<OEmbedResponse, PreviewError> {
        let oembed_url = self
            .endpoints
            .request_url(provider, url)
            .ok_or(PreviewError::NoLookupService(provider))?;

        debug!(oembed_url = %oembed_url, "Fetching oEmbed data");

        let response = self
            .client
            .get(&oembed_url)
            .send()
            .await
            .map_err(|e| transport_error(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::LookupUnavailable {
                provider,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(provider, e))?;

        let oembed: OEmbedResponse =
            serde_json::from_str(&body).map_err(|e| PreviewError::LookupParseFailure {
                provider,
                message: e.to_string(),
            })?;

        debug!(title = %oembed.title, "Successfully fetched oEmbed data");
        Ok(oembed)
    }
}

fn transport_error(provider: Provider, e: reqwest::Error) -> PreviewError {
    if e.is_timeout() {
        PreviewError::LookupTimeout {
            provider,
            message: e.to_string(),
        }
    } else {
        PreviewError::LookupTransportFailure {
            provider,
            message: e.to_string(),
        }
    }
}
