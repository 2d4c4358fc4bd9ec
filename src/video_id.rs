#![forbid(unsafe_code)]

//! Pulls the video identifier out of a URL copied from YouTube Studio.

use regex::Regex;
use std::sync::LazyLock;

pub const STUDIO_URL_EXAMPLE: &str = "https://studio.youtube.com/video/krtVKlwt-1o";

static STUDIO_VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://studio\.youtube\.com/video/([a-zA-Z0-9_-]+)")
        .expect("studio URL pattern is valid")
});

/// Returns the identifier following `https://studio.youtube.com/video/` in
/// `input`, wherever the pattern occurs. The first match wins.
pub fn extract_video_id(input: &str) -> Option<&str> {
    STUDIO_VIDEO_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}
