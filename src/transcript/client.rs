//! Transcript provider client
//!
//! Reads caption tracks the same way the YouTube web player does: the watch
//! page embeds `ytInitialPlayerResponse`, whose caption tracks point at a
//! timedtext XML document with one `<text>` element per cue.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::core::models::TranscriptSegment;
use crate::errors::SummaryError;
use crate::utils::VideoReference;
use crate::utils::links::YOUTUBE_BASE_URL;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Source of caption segments for a video.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the ordered caption segments for `video`.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::TranscriptUnavailable`] when the video has no
    /// captions, is private, or does not exist.
    async fn fetch_transcript(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<TranscriptSegment>, SummaryError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    #[serde(default)]
    pub language_code: String,
    pub name: Option<TrackName>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    pub simple_text: Option<String>,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextRun {
    pub text: String,
}

impl CaptionTrack {
    fn display_name(&self) -> String {
        match &self.name {
            Some(TrackName {
                simple_text: Some(text),
                ..
            }) => text.clone(),
            Some(TrackName { runs, .. }) => runs.iter().map(|r| r.text.as_str()).collect(),
            None => String::new(),
        }
    }

    fn is_english(&self) -> bool {
        let code = self.language_code.to_ascii_lowercase();
        code == "en"
            || code.starts_with("en-")
            || self.display_name().to_lowercase().contains("english")
    }
}

/// Transcript provider backed by YouTube's public watch page and timedtext
/// endpoints.
pub struct YouTubeTranscriptClient {
    http: Client,
    base_url: String,
}

impl YouTubeTranscriptClient {
    /// Client for the public `www.youtube.com` site.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self, SummaryError> {
        Self::with_base_url(YOUTUBE_BASE_URL)
    }

    /// Client whose watch pages are served from `base_url`. Caption track
    /// URLs are absolute and used as the player response gives them.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SummaryError> {
        let http = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| SummaryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str, what: &str) -> Result<String, SummaryError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| unavailable(format!("failed to fetch {what}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("{what} returned status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| unavailable(format!("failed to read {what}: {e}")))
    }
}

#[async_trait]
impl TranscriptProvider for YouTubeTranscriptClient {
    async fn fetch_transcript(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<TranscriptSegment>, SummaryError> {
        let html = self
            .get_text(&video.watch_url_on(&self.base_url), "watch page")
            .await?;
        let tracks = caption_tracks_from_html(&html)?;
        let track = select_track(&tracks)
            .ok_or_else(|| unavailable(format!("no caption tracks for video {video}")))?;

        info!(
            video_id = %video,
            language = %track.language_code,
            track_count = tracks.len(),
            "Fetching caption track"
        );

        let xml = self.get_text(&track.base_url, "caption track").await?;
        let segments = parse_timedtext(&xml);
        debug!(video_id = %video, segments = segments.len(), "Parsed caption track");

        Ok(segments)
    }
}

fn unavailable(message: String) -> SummaryError {
    SummaryError::TranscriptUnavailable(message)
}

/// Pull the caption track list out of a watch page.
///
/// # Errors
///
/// Returns [`SummaryError::TranscriptUnavailable`] when the page carries no
/// player response, the video is not playable, or captions are disabled.
pub fn caption_tracks_from_html(html: &str) -> Result<Vec<CaptionTrack>, SummaryError> {
    static PLAYER_RESPONSE_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r"ytInitialPlayerResponse\s*=\s*\{")
            .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
    });

    let start = PLAYER_RESPONSE_RE
        .find(html)
        .map(|m| m.end() - 1)
        .ok_or_else(|| unavailable("watch page has no player response".to_string()))?;

    // Deserialize only the first JSON value; the script keeps going after it.
    let player_json = serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| unavailable("player response is empty".to_string()))?
        .map_err(|e| unavailable(format!("malformed player response: {e}")))?;

    let player: PlayerResponse = serde_json::from_value(player_json)
        .map_err(|e| unavailable(format!("unexpected player response shape: {e}")))?;

    if let Some(PlayabilityStatus {
        status: Some(status),
        reason,
    }) = &player.playability_status
        && status != "OK"
    {
        let reason = reason.as_deref().unwrap_or("no reason given");
        return Err(unavailable(format!("video is not playable ({status}): {reason}")));
    }

    let tracks = player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(unavailable("captions are disabled for this video".to_string()));
    }

    Ok(tracks)
}

/// Prefer an English track, otherwise take whatever is listed first.
#[must_use]
pub fn select_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.is_english())
        .or_else(|| tracks.first())
}

/// Parse a timedtext XML document into caption segments.
///
/// Fractional start times are truncated to whole seconds. Cues that are empty
/// once entities are decoded and whitespace is collapsed are dropped.
#[must_use]
pub fn parse_timedtext(xml: &str) -> Vec<TranscriptSegment> {
    static TEXT_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r#"(?s)<text\b([^>]*)>(.*?)</text>"#)
            .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
    });
    static START_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r#"\bstart="([0-9.]+)""#)
            .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
    });

    TEXT_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());

            let offset_seconds = START_RE
                .captures(attrs)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .filter(|s| s.is_finite() && *s >= 0.0)
                .map_or(0, |s| s.trunc() as u64);

            let text = decode_html_entities(body)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            (!text.is_empty()).then(|| TranscriptSegment::new(offset_seconds, text))
        })
        .collect()
}

/// Decode the named entities timedtext uses plus any numeric reference
/// (`&#8217;`, `&#x27;`). `&amp;` goes first because cue text is frequently
/// double-escaped (`&amp;#39;`).
#[must_use]
pub fn decode_html_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 5] = [
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&nbsp;", " "),
    ];
    static NUMERIC_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")
            .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
    });

    let named = ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        });

    NUMERIC_RE
        .replace_all(&named, |caps: &regex::Captures<'_>| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse().ok(),
                (None, None) => None,
            };
            // Out-of-range references stay as written.
            code.and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, name: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://example.test/{code}"),
            language_code: code.to_string(),
            name: Some(TrackName {
                simple_text: Some(name.to_string()),
                runs: Vec::new(),
            }),
        }
    }

    #[test]
    fn select_track_prefers_english() {
        let tracks = vec![track("de", "Deutsch"), track("en-GB", "English (UK)")];
        assert_eq!(select_track(&tracks).unwrap().language_code, "en-GB");
    }

    #[test]
    fn select_track_matches_english_by_name() {
        let tracks = vec![track("fr", "Français"), track("a.xx", "English (auto-generated)")];
        assert_eq!(select_track(&tracks).unwrap().language_code, "a.xx");
    }

    #[test]
    fn select_track_falls_back_to_first() {
        let tracks = vec![track("ja", "日本語"), track("ko", "한국어")];
        assert_eq!(select_track(&tracks).unwrap().language_code, "ja");
        assert!(select_track(&[]).is_none());
    }
}
