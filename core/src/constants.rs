//! constants.rs
//! Wire literals, defaults and capacity tables shared by every layer.

/// Tag literal of the current frame format (`IDX:nnn:<text>`).
pub const FRAME_TAG: &str = "IDX";

/// Separator used by frames and envelopes alike.
pub const FIELD_SEPARATOR: char = ':';

/// Digits used for the index of a current-format frame.
pub const FRAME_INDEX_WIDTH: usize = 3;

/// Highest index the current frame format can carry (`IDX:999:`).
pub const MAX_FRAME_INDEX: usize = 999;

/// Envelope prefix for UTF-8 text payloads.
pub const ENVELOPE_TEXT_PREFIX: &str = "QRTEXT:";

/// Envelope prefix for base64-encoded binary payloads.
pub const ENVELOPE_FILE_PREFIX: &str = "QRFILE:";

/// Byte-order marker prepended to recovered text files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Defaults when the caller leaves a knob unset
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_VERSION_CAP: u8 = 40;
/// Largest symbol version an optical code can have.
pub const MAX_SYMBOL_VERSION: u8 = 40;

/// Pixels between neighbouring symbols (keeps finder patterns apart).
pub const DEFAULT_SPACING: u32 = 20;
/// Pixels around the whole grid.
pub const DEFAULT_MARGIN: u32 = 0;

/// Suffix used to derive the composite image name from a source file.
pub const DEFAULT_ARRAY_SUFFIX: &str = "_qr_array.png";

/// Name pattern for per-chunk scratch artifacts.
pub const SCRATCH_PREFIX: &str = "symbol_";

/// Characters kept in log previews of scanned strings.
pub const LOG_PREVIEW_CHARS: usize = 30;

/// Symbol capacities at error-correction level L, version 40.
pub mod capacity {
    pub const NUMERIC: usize = 7089;
    pub const ALPHANUMERIC: usize = 4296;
    pub const BINARY: usize = 2953;
    pub const KANJI: usize = 1817;
    /// Conservative estimate for arbitrary UTF-8 text.
    pub const UTF8: usize = 850;
}

/// Recommended characters per symbol, by payload script.
pub mod recommended_chunk {
    pub const PLAIN_ASCII: usize = 850;
    pub const MIXED: usize = 700;
    pub const CJK: usize = 500;
}
