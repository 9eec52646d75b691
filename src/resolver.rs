use crate::{classify, video_id, Fetcher, LinkPreview, PreviewError, Provider, Resolution};
use async_trait::async_trait;
use tracing::{debug, instrument};

pub const NICONICO_TITLE_PREFIX: &str = "ニコニコ動画 - ";
pub const NICONICO_DESCRIPTION: &str = "ニコニコ動画で視聴";
pub const SPOTIFY_FALLBACK_PROVIDER_NAME: &str = "Music";

/// Turns a raw shared URL into preview metadata and a redirect target.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, raw_url: Option<&str>) -> Resolution;
}

#[derive(Clone)]
pub struct Resolver {
    fetcher: Fetcher,
}

impl Resolver {
    pub fn new() -> Result<Self, PreviewError> {
        Ok(Self::with_fetcher(Fetcher::new()?))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Provider-specific metadata for `url`.
    ///
    /// `Ok(None)` means the provider has no lookup and the defaults stand;
    /// `Err` carries the reason a lookup failed.
    #[instrument(level = "debug", skip(self))]
    pub async fn lookup(
        &self,
        provider: Provider,
        url: &str,
    ) -> Result<Option<LinkPreview>, PreviewError> {
        let mut preview = LinkPreview::for_url(url);

        match provider {
            Provider::YouTube => {
                let oembed = self.fetcher.fetch_oembed(provider, url).await?;
                preview.title = oembed.title;
                preview.description =
                    format!("YouTube · {}", oembed.author_name.unwrap_or_default());
                preview.image = oembed.thumbnail_url.unwrap_or_default();
                Ok(Some(preview))
            }
            Provider::Spotify => {
                let oembed = self.fetcher.fetch_oembed(provider, url).await?;
                let provider_name = oembed
                    .provider_name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| SPOTIFY_FALLBACK_PROVIDER_NAME.to_string());
                preview.title = oembed.title;
                preview.description = format!("Spotify · {}", provider_name);
                preview.image = oembed.thumbnail_url.unwrap_or_default();
                Ok(Some(preview))
            }
            Provider::Niconico => {
                let id = video_id(url);
                preview.title = format!("{}{}", NICONICO_TITLE_PREFIX, id);
                preview.description = NICONICO_DESCRIPTION.to_string();
                Ok(Some(preview))
            }
            Provider::Unknown => Ok(None),
        }
    }
}

#[async_trait]
impl LinkResolver for Resolver {
    #[instrument(level = "debug", skip(self))]
    async fn resolve(&self, raw_url: Option<&str>) -> Resolution {
        let Some(raw_url) = raw_url.filter(|url| !url.is_empty()) else {
            debug!("No target URL supplied, using placeholder preview");
            return Resolution::default();
        };

        let provider = classify(raw_url);
        debug!(provider = %provider, "Classified target URL");

        let preview = match self.lookup(provider, raw_url).await {
            Ok(Some(preview)) => preview,
            Ok(None) => LinkPreview::for_url(raw_url),
            Err(e) => {
                e.log();
                LinkPreview::for_url(raw_url)
            }
        };

        Resolution {
            preview,
            target_url: Some(raw_url.to_string()),
        }
    }
}
