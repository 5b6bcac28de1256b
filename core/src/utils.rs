//! utils.rs
//! Small shared helpers.

use std::path::Path;

use crate::constants::{recommended_chunk, DEFAULT_ARRAY_SUFFIX};

/// First `max_chars` characters of `s`, with an ellipsis when truncated.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// Broad script class of a payload, used to pick a chunk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextProfile {
    PlainAscii,
    Mixed,
    Cjk,
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF     // kana
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified
        | 0xAC00..=0xD7AF   // hangul
        | 0xF900..=0xFAFF   // CJK compatibility
        | 0xFF00..=0xFFEF   // full-width forms
    )
}

/// Classify text: all ASCII, mostly CJK, or anything in between.
pub fn text_profile(text: &str) -> TextProfile {
    if text.is_ascii() {
        return TextProfile::PlainAscii;
    }

    let (mut total, mut cjk) = (0usize, 0usize);
    for c in text.chars() {
        total += 1;
        if is_cjk(c) {
            cjk += 1;
        }
    }

    if cjk * 2 >= total {
        TextProfile::Cjk
    } else {
        TextProfile::Mixed
    }
}

/// Characters per symbol that comfortably fit a version-40 symbol at level L.
pub fn recommended_chunk_size(text: &str) -> usize {
    match text_profile(text) {
        TextProfile::PlainAscii => recommended_chunk::PLAIN_ASCII,
        TextProfile::Mixed      => recommended_chunk::MIXED,
        TextProfile::Cjk        => recommended_chunk::CJK,
    }
}

/// `<dir>/<stem>_qr_array.png` next to the source file.
pub fn default_array_path(source: &Path) -> std::path::PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "payload".to_string());
    let name = format!("{stem}{DEFAULT_ARRAY_SUFFIX}");
    match source.parent() {
        Some(parent) => parent.join(name),
        None => name.into(),
    }
}
