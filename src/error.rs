use crate::Provider;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("{provider} lookup unavailable: HTTP {status}")]
    LookupUnavailable { provider: Provider, status: u16 },

    #[error("{provider} lookup failed: {message}")]
    LookupTransportFailure { provider: Provider, message: String },

    #[error("{provider} lookup timed out: {message}")]
    LookupTimeout { provider: Provider, message: String },

    #[error("{provider} lookup returned malformed metadata: {message}")]
    LookupParseFailure { provider: Provider, message: String },

    #[error("{0} has no oEmbed service")]
    NoLookupService(Provider),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuildError(String),

    #[error("Failed to render page: {0}")]
    TemplateError(String),
}

impl PreviewError {
    /// Failures the resolver downgrades to placeholder metadata.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            PreviewError::LookupUnavailable { .. }
                | PreviewError::LookupTransportFailure { .. }
                | PreviewError::LookupTimeout { .. }
                | PreviewError::LookupParseFailure { .. }
        )
    }

    pub fn log(&self) {
        match self {
            PreviewError::UrlParseError(e) => {
                warn!(error = %e, "URL parsing failed");
            }
            PreviewError::LookupUnavailable { provider, status } => {
                warn!(provider = %provider, status = status, "Metadata lookup unavailable");
            }
            PreviewError::LookupTransportFailure { provider, message } => {
                warn!(provider = %provider, error = %message, "Metadata lookup request failed");
            }
            PreviewError::LookupTimeout { provider, message } => {
                warn!(provider = %provider, error = %message, "Metadata lookup timed out");
            }
            PreviewError::LookupParseFailure { provider, message } => {
                warn!(
                    provider = %provider,
                    error = %message,
                    "Metadata lookup returned an unreadable body"
                );
            }
            PreviewError::NoLookupService(provider) => {
                warn!(provider = %provider, "No metadata lookup exists for provider");
            }
            PreviewError::ClientBuildError(e) => {
                error!(error = %e, "HTTP client construction failed");
            }
            PreviewError::TemplateError(e) => {
                error!(error = %e, "Page rendering failed");
            }
        }
    }
}
