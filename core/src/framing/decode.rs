//! framing/decode.rs
//! Frame tag matching and bounded tag recovery.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{FIELD_SEPARATOR, FRAME_INDEX_WIDTH, FRAME_TAG, LOG_PREVIEW_CHARS};
use crate::framing::types::{Frame, FrameError, FrameFormat};
use crate::utils::preview;

// `(?s)` so the text group spans line breaks; `[0-9]` rather than `\d`,
// which would also accept non-ASCII digits.
static CURRENT_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)\A{FRAME_TAG}:([0-9]{{{FRAME_INDEX_WIDTH}}}):(.*)\z"
    ))
    .expect("valid current frame pattern")
});

static LEGACY_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A([0-9]+):(.*)\z").expect("valid legacy frame pattern")
});

/// A pure matcher: `Some(frame)` when the raw string is in its format.
pub type FrameMatcher = fn(&str) -> Option<Frame>;

/// Matchers in priority order.
pub const FRAME_MATCHERS: &[FrameMatcher] = &[match_current, match_legacy];

/// `IDX:` + exactly three digits + `:` + everything that follows.
pub fn match_current(raw: &str) -> Option<Frame> {
    let caps = CURRENT_FRAME.captures(raw)?;
    let index = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str();
    Some(Frame::new(index, text, FrameFormat::Current))
}

/// Leading digits + `:` + everything that follows.
///
/// Ambiguous when payload text itself starts with digits and a colon;
/// only consulted after `match_current`.
pub fn match_legacy(raw: &str) -> Option<Frame> {
    let caps = LEGACY_FRAME.captures(raw)?;
    // Digit runs too long for usize are not a usable index.
    let index = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str();
    Some(Frame::new(index, text, FrameFormat::Legacy))
}

/// Run the matchers in priority order.
pub fn parse_frame(raw: &str) -> Result<Frame, FrameError> {
    FRAME_MATCHERS
        .iter()
        .find_map(|matcher| matcher(raw))
        .ok_or_else(|| FrameError::Unrecognized {
            preview: preview(raw, LOG_PREVIEW_CHARS),
        })
}

/// True when the string starts with the current tag literal and a separator.
#[inline]
pub fn has_frame_tag(raw: &str) -> bool {
    raw.strip_prefix(FRAME_TAG)
        .is_some_and(|rest| rest.starts_with(FIELD_SEPARATOR))
}

/// Manual recovery for tagged strings the strict pattern rejected.
///
/// Splits on the first two separators and accepts the result only when the
/// first part is exactly the tag literal and the second reads as an integer
/// (surrounding whitespace tolerated). Everything after the second separator
/// is the chunk text.
pub fn recover_frame(raw: &str) -> Option<Frame> {
    let mut parts = raw.splitn(3, FIELD_SEPARATOR);
    let tag = parts.next()?;
    let index = parts.next()?;
    let text = parts.next()?;

    if tag != FRAME_TAG {
        return None;
    }
    let index = index.trim().parse().ok()?;

    Some(Frame::new(index, text, FrameFormat::Recovered))
}
