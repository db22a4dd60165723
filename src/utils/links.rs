use std::fmt;

use crate::errors::SummaryError;

const WATCH_MARKER: &str = "watch?v=";
const SHORT_LINK_MARKER: &str = "youtu.be/";

pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// A YouTube video identifier pulled out of a URL the resolver recognizes.
///
/// Only two shapes are accepted:
/// - `...watch?v=<id>`, the id ending at the next `&`
/// - `...youtu.be/<id>`, the id ending at the next `?`
///
/// The id itself is not validated beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference(String);

impl VideoReference {
    /// Resolve a video URL into its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidUrlKind`] when the URL matches neither
    /// known shape or the identifier would be empty.
    pub fn parse(url: &str) -> Result<Self, SummaryError> {
        extract_video_id(url)
            .map(Self)
            .ok_or_else(|| SummaryError::InvalidUrlKind(format!("unrecognized URL {url:?}")))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video.
    #[must_use]
    pub fn watch_url(&self) -> String {
        self.watch_url_on(YOUTUBE_BASE_URL)
    }

    /// Watch page for this video on another host, e.g. a mirror.
    #[must_use]
    pub fn watch_url_on(&self, base_url: &str) -> String {
        format!("{base_url}/{WATCH_MARKER}{}", self.0)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    let id = match (url.split_once(WATCH_MARKER), url.split_once(SHORT_LINK_MARKER)) {
        (Some((_, rest)), _) => rest.split('&').next(),
        (None, Some((_, rest))) => rest.split('?').next(),
        (None, None) => None,
    }?;

    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_round_trips_through_parse() {
        let video = VideoReference::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(
            video.watch_url(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(VideoReference::parse(&video.watch_url()).unwrap(), video);
    }

    #[test]
    fn watch_url_on_uses_given_host() {
        let video = VideoReference::parse("https://youtu.be/abc").unwrap();
        assert_eq!(
            video.watch_url_on("http://127.0.0.1:9000"),
            "http://127.0.0.1:9000/watch?v=abc"
        );
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=&t=3"), None);
        assert_eq!(extract_video_id("https://youtu.be/?t=10"), None);
    }
}
