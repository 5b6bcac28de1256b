//! pipeline/decode.rs
//! Composite image -> scanned strings -> payload.
//!
//! Stages run `Scanning -> Parsing -> Reassembling -> Unwrapping -> Done`.
//! A failure in any stage ends the call with [`DecodeFailure`], which records
//! the stage that failed. There are no internal retries, and no output file
//! is committed unless every stage succeeded.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codec::{ScanOptions, SymbolCodec};
use crate::config::TransferConfig;
use crate::constants::{LOG_PREVIEW_CHARS, UTF8_BOM};
use crate::envelope::{self, EnvelopeError, EnvelopeKind, RecoveredPayload};
use crate::pipeline::encode::partial_sibling;
use crate::reassembly::{ParsedScan, Reassembled, Reassembler, ReassemblyStats};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{ErrorKind, TransferError};
use crate::utils::preview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStage {
    Scanning,
    Parsing,
    Reassembling,
    Unwrapping,
    /// File mode only: committing the recovered file.
    Writing,
    Done,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::Scanning     => "scanning",
            DecodeStage::Parsing      => "parsing",
            DecodeStage::Reassembling => "reassembling",
            DecodeStage::Unwrapping   => "unwrapping",
            DecodeStage::Writing      => "writing",
            DecodeStage::Done         => "done",
        };
        f.write_str(name)
    }
}

/// Terminal failed state of a decode call.
#[derive(Debug, Error)]
#[error("decode failed while {stage}: {error}")]
pub struct DecodeFailure {
    pub stage: DecodeStage,
    #[source]
    pub error: TransferError,
}

impl DecodeFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Raw text mode result.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub stats: ReassemblyStats,
    pub snapshot: TelemetrySnapshot,
}

/// Envelope mode result, still in memory.
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    pub payload: RecoveredPayload,
    pub stats: ReassemblyStats,
    pub snapshot: TelemetrySnapshot,
}

/// File mode result.
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub path: PathBuf,
    pub kind: EnvelopeKind,
    /// Filename as carried by the envelope.
    pub filename: String,
    pub bytes_written: usize,
    pub stats: ReassemblyStats,
    pub snapshot: TelemetrySnapshot,
}

/// Stage bookkeeping shared by every decode entry point.
struct DecodeSession {
    stage: DecodeStage,
    counters: TelemetryCounters,
    timer: TelemetryTimer,
}

impl DecodeSession {
    fn new() -> Self {
        Self {
            stage: DecodeStage::Scanning,
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    /// Enter `stage`, run `f`, charge its time to `timed`.
    fn run<T>(
        &mut self,
        stage: DecodeStage,
        timed: Stage,
        f: impl FnOnce(&mut TelemetryCounters) -> Result<T, TransferError>,
    ) -> Result<T, DecodeFailure> {
        self.stage = stage;
        let t = Instant::now();
        let out = f(&mut self.counters);
        self.timer.add_stage_time(timed, t.elapsed());

        out.map_err(|error| {
            warn!(target: "pipeline", %stage, kind = ?error.kind(), %error, "decode failed");
            DecodeFailure { stage, error }
        })
    }

    fn finish(mut self) -> TelemetrySnapshot {
        self.stage = DecodeStage::Done;
        self.timer.finish();
        debug!(target: "pipeline", stage = %self.stage, elapsed_ms = self.timer.elapsed().as_secs_f64() * 1_000.0, "decode finished");
        TelemetrySnapshot::from(&self.counters, &self.timer)
    }

    fn scan(
        &mut self,
        image: &RgbImage,
        codec: &dyn SymbolCodec,
        config: &TransferConfig,
    ) -> Result<Vec<String>, DecodeFailure> {
        self.run(DecodeStage::Scanning, Stage::Scan, |counters| {
            let options = ScanOptions { visual_debug: config.visual_debug };
            let raw = codec.scan(image, &options)?;
            counters.add_scanned(&raw);

            info!(target: "pipeline", symbols = raw.len(), visual_debug = config.visual_debug, "composite scanned");
            for (i, s) in raw.iter().enumerate() {
                debug!(target: "pipeline", i, preview = %preview(s, LOG_PREVIEW_CHARS), "scanned symbol");
            }

            if raw.is_empty() {
                return Err(TransferError::UnreadableImage);
            }
            Ok(raw)
        })
    }

    fn reassemble(
        &mut self,
        raw: &[String],
        config: &TransferConfig,
    ) -> Result<Reassembled, DecodeFailure> {
        let reassembler = Reassembler::from_config(config);

        let parsed: ParsedScan = self.run(DecodeStage::Parsing, Stage::Parse, |_| {
            Ok(reassembler.classify(raw))
        })?;

        self.run(DecodeStage::Reassembling, Stage::Reassemble, |counters| {
            let reassembled = reassembler.assemble(parsed)?;
            counters.add_reassembly(&reassembled.stats);
            counters.add_reassembled(reassembled.text.len());
            Ok(reassembled)
        })
    }

    fn unwrap_envelope(&mut self, text: &str) -> Result<RecoveredPayload, DecodeFailure> {
        self.run(DecodeStage::Unwrapping, Stage::Unwrap, |counters| {
            let payload = envelope::unwrap(text)?;
            counters.add_payload(payload.bytes.len());
            counters.add_envelope(payload.kind.prefix().len() + payload.filename.len() + 1);
            Ok(payload)
        })
    }
}

/// Raw text mode: scan, parse and reassemble; no envelope is expected.
pub fn decode_text(
    image: &RgbImage,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<DecodedText, DecodeFailure> {
    let mut session = DecodeSession::new();
    let raw = session.scan(image, codec, config)?;
    let Reassembled { text, stats } = session.reassemble(&raw, config)?;
    session.counters.add_payload(text.len());

    Ok(DecodedText {
        text,
        stats,
        snapshot: session.finish(),
    })
}

/// Envelope mode, in memory.
pub fn decode_payload(
    image: &RgbImage,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<DecodedPayload, DecodeFailure> {
    let mut session = DecodeSession::new();
    let (payload, stats) = decode_enveloped(&mut session, image, codec, config)?;

    Ok(DecodedPayload {
        payload,
        stats,
        snapshot: session.finish(),
    })
}

/// Load a composite from disk (PNG, JPEG, BMP, WEBP or TIFF).
pub fn load_composite(path: &Path) -> Result<RgbImage, TransferError> {
    Ok(image::open(path)?.to_rgb8())
}

/// Envelope mode, reading the composite from `image_path`.
pub fn decode_image_file(
    image_path: &Path,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<DecodedPayload, DecodeFailure> {
    let mut session = DecodeSession::new();
    let image = session.run(DecodeStage::Scanning, Stage::Read, |_| load_composite(image_path))?;
    let (payload, stats) = decode_enveloped(&mut session, &image, codec, config)?;

    Ok(DecodedPayload {
        payload,
        stats,
        snapshot: session.finish(),
    })
}

/// File mode: decode `image_path` and write the recovered file into
/// `output_dir` under the envelope's filename.
///
/// Only the final component of the carried filename is used. Text payloads
/// get a UTF-8 byte-order marker when `config.text_bom` is set; binary bytes
/// are written verbatim.
pub fn decode_file(
    image_path: &Path,
    output_dir: &Path,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<DecodedFile, DecodeFailure> {
    let mut session = DecodeSession::new();
    let image = session.run(DecodeStage::Scanning, Stage::Read, |_| load_composite(image_path))?;
    let (payload, stats) = decode_enveloped(&mut session, &image, codec, config)?;

    let bom = payload.kind == EnvelopeKind::Text && config.text_bom;
    let (path, bytes_written) = session.run(DecodeStage::Writing, Stage::Write, |_| {
        let name = safe_file_name(&payload.filename)?;
        let path = output_dir.join(name);
        let written = write_recovered(&path, &payload.bytes, bom)?;
        Ok((path, written))
    })?;

    info!(
        target: "pipeline",
        path = %path.display(),
        kind = %payload.kind,
        bytes = bytes_written,
        "recovered file written"
    );

    Ok(DecodedFile {
        path,
        kind: payload.kind,
        filename: payload.filename,
        bytes_written,
        stats,
        snapshot: session.finish(),
    })
}

fn decode_enveloped(
    session: &mut DecodeSession,
    image: &RgbImage,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<(RecoveredPayload, ReassemblyStats), DecodeFailure> {
    let raw = session.scan(image, codec, config)?;
    let reassembled = session.reassemble(&raw, config)?;
    let payload = session.unwrap_envelope(&reassembled.text)?;
    Ok((payload, reassembled.stats))
}

/// Final path component of a carried filename; rejects `..`, roots and empties.
fn safe_file_name(filename: &str) -> Result<&str, TransferError> {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| EnvelopeError::InvalidFilename(filename.to_string()).into())
}

/// Write to a hidden sibling, then rename into place.
fn write_recovered(path: &Path, bytes: &[u8], bom: bool) -> Result<usize, TransferError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = partial_sibling(path);
    let result = (|| -> std::io::Result<usize> {
        let mut file = fs::File::create(&tmp)?;
        let mut written = 0;
        if bom {
            file.write_all(UTF8_BOM)?;
            written += UTF8_BOM.len();
        }
        file.write_all(bytes)?;
        written += bytes.len();
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, path)?;
        Ok(written)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&tmp);
        e.into()
    })
}
