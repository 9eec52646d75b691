use std::fmt;

/// Content platform a shared URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    YouTube,
    Spotify,
    Niconico,
    #[default]
    Unknown,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::YouTube => "YouTube",
            Provider::Spotify => "Spotify",
            Provider::Niconico => "Niconico",
            Provider::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub token: &'static str,
    pub provider: Provider,
}

impl ClassificationRule {
    /// Case-sensitive substring match on the raw string. The token may sit
    /// anywhere, e.g. `https://x.com/youtube-ish` is a YouTube link.
    pub fn matches(&self, url: &str) -> bool {
        url.contains(self.token)
    }
}

/// Evaluated top to bottom, first match wins.
pub const CLASSIFICATION_RULES: [ClassificationRule; 3] = [
    ClassificationRule {
        token: "youtu",
        provider: Provider::YouTube,
    },
    ClassificationRule {
        token: "spotify",
        provider: Provider::Spotify,
    },
    ClassificationRule {
        token: "nicovideo",
        provider: Provider::Niconico,
    },
];

pub fn classify(url: &str) -> Provider {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(url))
        .map(|rule| rule.provider)
        .unwrap_or_default()
}

/// Last `/`-separated segment of `url` with any trailing `?query` removed.
///
/// `https://www.nicovideo.jp/watch/sm12345?ref=x` yields `sm12345`.
pub fn video_id(url: &str) -> &str {
    let last = url.rsplit('/').next().unwrap_or(url);
    last.split('?').next().unwrap_or(last)
}
