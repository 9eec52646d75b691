use crate::{classify, video_id, Provider};
use tracing::debug;

pub const YOUTUBE_INTENT_SUFFIX: &str =
    "&app=desktop#Intent;package=com.google.android.youtube;scheme=vnd.youtube;end";
pub const SPOTIFY_APP_LINK_PREFIX: &str = "https://spotify.app.link/?product=open&$full_url=";
pub const NICONICO_FORCE_APP_LINK: &str = "https://sp.nicovideo.jp/force-app-link/watch/";
pub const NICONICO_APP_LINK_BASE: &str = "https://nicovideo.applink.nicovideo.jp/";

/// Where the user agent should be sent for `target_url`.
///
/// Absent or empty input yields `None`. Every provider produces a
/// destination; unrecognized links pass through unchanged.
pub fn build_destination(target_url: Option<&str>) -> Option<String> {
    let target = target_url.filter(|url| !url.is_empty())?;
    let provider = classify(target);
    debug!(provider = %provider, "Building redirect destination");

    let destination = match provider {
        Provider::YouTube => youtube_intent(target),
        // The target is appended raw, unencoded.
        Provider::Spotify => format!("{}{}", SPOTIFY_APP_LINK_PREFIX, target),
        Provider::Niconico => niconico_app_link(video_id(target)),
        // Passed through whatever its scheme, `javascript:` included; the
        // page navigates to it as-is.
        Provider::Unknown => target.to_string(),
    };
    Some(destination)
}

/// Android intent URI for the YouTube app. The query string is dropped,
/// timestamps and playlist parameters included.
fn youtube_intent(target: &str) -> String {
    let intent = target.replacen("https://", "intent://", 1);
    let without_query = intent.split('?').next().unwrap_or(&intent);
    format!("{}{}", without_query, YOUTUBE_INTENT_SUFFIX)
}

fn niconico_app_link(id: &str) -> String {
    let inner = format!("{}{}", NICONICO_FORCE_APP_LINK, id);
    format!(
        "{base}?link={link}\
         &utm_source=nicovideo_spweb\
         &utm_campaign=message_overseas\
         &pt=13724\
         &ct=spweb_watch_message_overseas\
         &utm_medium=watch\
         &apn=jp.nicovideo.android\
         &ibi=jp.co.dwango.nicoplayer\
         &isi=307764057\
         &utm_content={id}",
        base = NICONICO_APP_LINK_BASE,
        link = urlencoding::encode(&inner),
        id = id,
    )
}

/// One-shot navigation effect run once the rendered content is ready.
///
/// Fires on the transition of the target from absent to present and again
/// only when the target changes; repeating the same target is a no-op.
#[derive(Debug, Default)]
pub struct NavigationGuard {
    navigated: Option<String>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_content_ready(&mut self, target_url: Option<&str>) -> Option<String> {
        let target = target_url.filter(|url| !url.is_empty())?;
        if self.navigated.as_deref() == Some(target) {
            return None;
        }
        let destination = build_destination(Some(target))?;
        self.navigated = Some(target.to_string());
        Some(destination)
    }

    pub fn last_target(&self) -> Option<&str> {
        self.navigated.as_deref()
    }
}
