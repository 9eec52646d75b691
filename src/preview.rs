use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_TITLE: &str = "Redirect Page";
pub const PLACEHOLDER_DESCRIPTION: &str = "Redirecting shortly...";

/// Social-preview metadata for one shared link.
///
/// Every field is always present; missing data is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    pub title: String,
    pub description: String,
    pub image: String,
    pub source_url: String,
}

impl Default for LinkPreview {
    fn default() -> Self {
        Self {
            title: PLACEHOLDER_TITLE.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            image: String::new(),
            source_url: String::new(),
        }
    }
}

impl LinkPreview {
    pub fn for_url(raw_url: &str) -> Self {
        Self {
            source_url: raw_url.to_string(),
            ..Self::default()
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

/// Output of the resolver: the preview plus the URL the redirector acts on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub preview: LinkPreview,
    pub target_url: Option<String>,
}
