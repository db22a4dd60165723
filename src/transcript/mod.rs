//! Caption retrieval and transcript formatting

pub mod client;
pub mod formatter;

pub use client::{TranscriptProvider, YouTubeTranscriptClient};
pub use formatter::{fetch_formatted_transcript, format_segments, format_timestamp};
