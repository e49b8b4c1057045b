//! Video reference resolution
//!
//! Parses arbitrary user-supplied video URLs into a canonical identifier and
//! derives embeddable, thumbnail, and playlist URLs from it. Resolution is
//! permissive by contract: anything unresolvable yields `None`, never an
//! error, and the caller renders "no embeddable content" instead.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// Canonical video ids are 11 characters of this alphabet.
static ID_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_-]{11}").expect("hardcoded pattern is valid"));

/// One-or-two digit minutes, colon, exactly two digit seconds.
static START_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("hardcoded pattern is valid"));

// =============================================================================
// Identifier
// =============================================================================

/// Canonical token extracted from a video URL, sanitized to `[A-Za-z0-9_-]`
/// so it can be spliced into generated URLs without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Sanitize a raw candidate by dropping every character outside the id
    /// alphabet. Returns `None` when nothing survives.
    fn sanitize(candidate: &str) -> Option<Self> {
        let cleaned: String = candidate
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Extract the canonical identifier from a video URL.
///
/// Accepts long-form URLs (`youtube.com`/`www.youtube.com` with the id in
/// the `v` query parameter), short-form URLs (`youtu.be` with the id as the
/// path), and, for bare ids or strings that do not parse as URLs at all, a
/// permissive fallback that picks out the first 11-character id token.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    let candidate = match Url::parse(input) {
        Ok(parsed) => match parsed.host_str() {
            Some("www.youtube.com") | Some("youtube.com") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("youtu.be") => Some(parsed.path().trim_start_matches('/').to_string()),
            _ => None,
        },
        Err(_) => ID_TOKEN.find(input).map(|m| m.as_str().to_string()),
    };

    VideoId::sanitize(&candidate?)
}

/// Parse a `m:ss` / `mm:ss` offset into seconds.
///
/// Any other shape yields zero, which downstream treats as "no offset".
/// There is no bounds check against real video length.
pub fn offset_seconds(offset: &str) -> u32 {
    let Some(caps) = START_OFFSET.captures(offset.trim()) else {
        return 0;
    };

    // Both groups are all-digit and at most two characters, so they always
    // fit a u32.
    let minutes: u32 = caps[1].parse().unwrap_or(0);
    let seconds: u32 = caps[2].parse().unwrap_or(0);
    minutes * 60 + seconds
}

// =============================================================================
// Derived URLs
// =============================================================================

/// Build the canonical embeddable URL for a video reference.
///
/// A start offset that parses to a positive second count is appended as a
/// `start` parameter; invalid or zero offsets are ignored silently.
pub fn embed_url(input: &str, start_offset: Option<&str>) -> Option<String> {
    let id = resolve_video_id(input)?;
    let start = start_offset.map(offset_seconds).unwrap_or(0);

    if start > 0 {
        Some(format!("{EMBED_BASE}/{id}?start={start}"))
    } else {
        Some(format!("{EMBED_BASE}/{id}"))
    }
}

/// Build the deterministic thumbnail URL keyed by the identifier.
pub fn thumbnail_url(input: &str) -> Option<String> {
    let id = resolve_video_id(input)?;
    Some(format!("{THUMBNAIL_BASE}/{id}/hqdefault.jpg"))
}

/// Build one embeddable URL playing the whole sequence.
///
/// Every URL is resolved and unresolvable ones are dropped. The first
/// resolved identifier becomes the embed target and the rest ride along in
/// the `playlist` parameter, order preserved, duplicates kept. `None` when
/// nothing resolves.
pub fn playlist_url<S: AsRef<str>>(inputs: &[S]) -> Option<String> {
    let ids: Vec<VideoId> = inputs
        .iter()
        .filter_map(|input| resolve_video_id(input.as_ref()))
        .collect();

    let (first, rest) = ids.split_first()?;
    if rest.is_empty() {
        return Some(format!("{EMBED_BASE}/{first}"));
    }

    let tail: Vec<&str> = rest.iter().map(|id| id.as_str()).collect();
    Some(format!("{EMBED_BASE}/{first}?playlist={}", tail.join(",")))
}
