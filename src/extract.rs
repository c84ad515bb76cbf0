// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identifier extraction: turn free-form text (URL or bare id) into a
//! canonical video or channel id.
//!
//! Extraction is pure; a failed parse is a normal value, never an error.

use std::sync::LazyLock;

use regex::Regex;

/// Video ids are exactly 11 characters: A-Z, a-z, 0-9, hyphen, underscore.
static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Channel ids are 24 characters starting with the literal "UC".
static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22}$").unwrap());

/// URL markers that are followed by a video id, in match priority order.
const VIDEO_MARKERS: &[&str] = &["watch?v=", "youtu.be/", "/embed/"];

/// URL marker followed by a canonical channel id.
const CHANNEL_MARKER: &str = "/channel/";

/// Channel reference shapes that cannot be resolved to a canonical id
/// without a network lookup.
const CUSTOM_CHANNEL_MARKERS: &[&str] = &["/c/", "/user/", "/@"];

/// A recognized identifier, or a negative result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Video(String),
    Channel(String),
    Unrecognized,
}

/// Extract a canonical video or channel id from free-form input.
///
/// Accepts a bare channel id, `watch?v=` / `youtu.be/` / `/embed/` video
/// URLs, and `/channel/` URLs. Custom channel shapes (`/c/`, `/user/`,
/// `/@handle`) are declined rather than guessed; callers may map those to a
/// configured fallback channel.
pub fn extract(raw: &str) -> Identifier {
    let input = raw.trim();
    if input.is_empty() {
        return Identifier::Unrecognized;
    }

    if CHANNEL_ID_RE.is_match(input) {
        return Identifier::Channel(input.to_string());
    }

    for marker in VIDEO_MARKERS {
        if let Some(token) = token_after(input, marker) {
            if VIDEO_ID_RE.is_match(&token) {
                return Identifier::Video(token);
            }
        }
    }

    if let Some(token) = token_after(input, CHANNEL_MARKER) {
        if CHANNEL_ID_RE.is_match(&token) {
            return Identifier::Channel(token);
        }
    }

    Identifier::Unrecognized
}

/// True when the input uses a channel reference shape that needs a network
/// lookup to canonicalize.
pub fn is_custom_channel_ref(input: &str) -> bool {
    CUSTOM_CHANNEL_MARKERS
        .iter()
        .any(|marker| input.contains(marker))
}

/// True for an exactly-valid 11-character video id.
pub fn is_video_id(candidate: &str) -> bool {
    VIDEO_ID_RE.is_match(candidate)
}

/// True for an exactly-valid 24-character "UC"-prefixed channel id.
pub fn is_channel_id(candidate: &str) -> bool {
    CHANNEL_ID_RE.is_match(candidate)
}

/// The token following `marker`, truncated at the first `&`, `?` or `/`.
fn token_after(input: &str, marker: &str) -> Option<String> {
    let start = input.find(marker)? + marker.len();
    let rest = &input[start..];
    let end = rest.find(['&', '?', '/']).unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Identifier::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn watch_url_with_extra_params() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s"),
            Identifier::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn short_url() {
        assert_eq!(
            extract("https://youtu.be/dQw4w9WgXcQ"),
            Identifier::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn short_url_with_tracking_param() {
        assert_eq!(
            extract("https://youtu.be/M9bq_alk-sw?si=B_RZg_I-lLaa7UU-"),
            Identifier::Video("M9bq_alk-sw".to_string())
        );
    }

    #[test]
    fn embed_url() {
        assert_eq!(
            extract("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Identifier::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn bare_channel_id() {
        assert_eq!(
            extract("UCBJycsmduvYEL83R_U4JriQ"),
            Identifier::Channel("UCBJycsmduvYEL83R_U4JriQ".to_string())
        );
    }

    #[test]
    fn channel_url() {
        assert_eq!(
            extract("https://www.youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ"),
            Identifier::Channel("UCBJycsmduvYEL83R_U4JriQ".to_string())
        );
    }

    #[test]
    fn channel_url_with_trailing_path() {
        assert_eq!(
            extract("https://www.youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ/videos"),
            Identifier::Channel("UCBJycsmduvYEL83R_U4JriQ".to_string())
        );
    }

    #[test]
    fn not_a_url() {
        assert_eq!(extract("not a url"), Identifier::Unrecognized);
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(extract(""), Identifier::Unrecognized);
        assert_eq!(extract("   "), Identifier::Unrecognized);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            extract("  https://youtu.be/dQw4w9WgXcQ  "),
            Identifier::Video("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn video_id_wrong_length_rejected() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=tooshort"),
            Identifier::Unrecognized
        );
        assert_eq!(
            extract("https://youtu.be/waytoolongforavideoid"),
            Identifier::Unrecognized
        );
    }

    #[test]
    fn channel_id_without_uc_prefix_rejected() {
        assert_eq!(
            extract("https://www.youtube.com/channel/XXBJycsmduvYEL83R_U4JriQ"),
            Identifier::Unrecognized
        );
    }

    #[test]
    fn custom_channel_shapes_unrecognized() {
        assert_eq!(
            extract("https://www.youtube.com/c/SomeChannel"),
            Identifier::Unrecognized
        );
        assert_eq!(
            extract("https://www.youtube.com/user/SomeUser"),
            Identifier::Unrecognized
        );
        assert_eq!(
            extract("https://www.youtube.com/@somehandle"),
            Identifier::Unrecognized
        );
    }

    #[test]
    fn custom_channel_shape_detection() {
        assert!(is_custom_channel_ref("https://www.youtube.com/c/SomeChannel"));
        assert!(is_custom_channel_ref("https://www.youtube.com/@somehandle"));
        assert!(!is_custom_channel_ref(
            "https://www.youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ"
        ));
    }

    #[test]
    fn id_predicates() {
        assert!(is_video_id("dQw4w9WgXcQ"));
        assert!(!is_video_id("dQw4w9WgXc"));
        assert!(is_channel_id("UCBJycsmduvYEL83R_U4JriQ"));
        assert!(!is_channel_id("UCBJycsmduvYEL83R_U4Jri"));
    }
}
