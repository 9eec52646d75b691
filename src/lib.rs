mod error;
mod fetcher;
mod logging;
#[cfg(feature = "server")]
mod page;
mod preview;
mod provider;
mod redirector;
mod resolver;
#[cfg(feature = "server")]
pub mod server;
mod utils;

pub use error::PreviewError;
pub use fetcher::{
    Fetcher, FetcherConfig, OEmbedEndpoints, OEmbedResponse, DEFAULT_LOOKUP_TIMEOUT,
    SPOTIFY_OEMBED_ENDPOINT, YOUTUBE_OEMBED_ENDPOINT,
};
pub use logging::log_preview_card;
#[cfg(feature = "logging")]
pub use logging::{setup_logging, LogConfig, LogLevelGuard};
#[cfg(feature = "server")]
pub use page::RedirectPage;
pub use preview::{LinkPreview, Resolution, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE};
pub use provider::{classify, video_id, ClassificationRule, Provider, CLASSIFICATION_RULES};
pub use redirector::{build_destination, NavigationGuard};
pub use resolver::{LinkResolver, Resolver, NICONICO_DESCRIPTION, NICONICO_TITLE_PREFIX};
