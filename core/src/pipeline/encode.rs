//! pipeline/encode.rs
//! Payload -> chunks -> frames -> symbols -> composite grid.
//!
//! Responsibilities:
//! - Split, tag and render in index order (rendering fans out to workers)
//! - Map codec capacity failures to the chunk that caused them
//! - Stage symbol artifacts when a scratch directory is configured
//! - Save the composite next to the source file in file mode
//!
//! Non-responsibilities:
//! - Symbol bit layout (codec backend)
//! - Grid geometry (layout)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use crossbeam::channel::bounded;
use image::{ImageFormat, RgbImage};
use tracing::{debug, info, warn};

use crate::chunking::{split_text, Chunk};
use crate::codec::{CodecError, SymbolCodec};
use crate::config::TransferConfig;
use crate::envelope::{self, EnvelopeKind};
use crate::framing::encode_frames;
use crate::layout::{compose, Composite};
use crate::pipeline::parallelism::ParallelismProfile;
use crate::pipeline::scratch::ScratchArtifacts;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::TransferError;
use crate::utils::default_array_path;

/// Result of one encode call.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub composite: Composite,
    /// Tagged frame strings, index order.
    pub frames: Vec<String>,
    pub snapshot: TelemetrySnapshot,
}

impl EncodeOutcome {
    pub fn chunk_count(&self) -> usize {
        self.frames.len()
    }
}

/// Result of a file-mode encode call.
#[derive(Debug, Clone)]
pub struct EncodedFile {
    /// Where the composite image was saved.
    pub output: PathBuf,
    pub kind: EnvelopeKind,
    pub outcome: EncodeOutcome,
}

/// Raw text mode: the text is chunked as-is, without an envelope.
pub fn encode_text(
    text: &str,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<EncodeOutcome, TransferError> {
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    counters.add_payload(text.len());
    encode_wire(text, codec, config, &mut counters, &mut timer)
}

/// Envelope mode: wrap `bytes` under `filename`, then encode the envelope.
pub fn encode_bytes(
    filename: &str,
    bytes: &[u8],
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<EncodeOutcome, TransferError> {
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    let wire = wrap_payload(filename, bytes, &mut counters, &mut timer)?;
    encode_wire(&wire, codec, config, &mut counters, &mut timer)
}

/// File mode: read `source`, wrap it under its file name, encode, and save
/// the composite to `output` (default `<stem>_qr_array.png` beside the source).
pub fn encode_file(
    source: &Path,
    output: Option<&Path>,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
) -> Result<EncodedFile, TransferError> {
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();

    let t = Instant::now();
    let bytes = fs::read(source)?;
    timer.add_stage_time(Stage::Read, t.elapsed());

    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(target: "pipeline", source = %source.display(), bytes = bytes.len(), "encoding file");

    let kind = envelope::classify(&bytes);
    let wire = wrap_payload(&filename, &bytes, &mut counters, &mut timer)?;
    let mut outcome = encode_wire(&wire, codec, config, &mut counters, &mut timer)?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_array_path(source));

    let t = Instant::now();
    save_composite(&outcome.composite.canvas, &output)?;
    timer.add_stage_time(Stage::Write, t.elapsed());

    info!(
        target: "pipeline",
        output = %output.display(),
        chunks = outcome.chunk_count(),
        rows = outcome.composite.spec.rows,
        cols = outcome.composite.spec.cols,
        "composite saved"
    );

    timer.finish();
    outcome.snapshot = TelemetrySnapshot::from(&counters, &timer);
    Ok(EncodedFile { output, kind, outcome })
}

/// Save a composite, creating parent directories. The image is written to a
/// hidden sibling first and renamed into place.
pub fn save_composite(canvas: &RgbImage, path: &Path) -> Result<(), TransferError> {
    let format = ImageFormat::from_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = partial_sibling(path);
    if let Err(e) = canvas.save_with_format(&tmp, format) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// `<dir>/.<name>.partial`
pub(crate) fn partial_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.partial"))
}

fn wrap_payload(
    filename: &str,
    bytes: &[u8],
    counters: &mut TelemetryCounters,
    timer: &mut TelemetryTimer,
) -> Result<String, TransferError> {
    let t = Instant::now();
    let wire = envelope::wrap(filename, bytes)?;
    timer.add_stage_time(Stage::Wrap, t.elapsed());

    let kind = envelope::classify(bytes);
    counters.add_payload(bytes.len());
    counters.add_envelope(kind.prefix().len() + filename.len() + 1);
    debug!(target: "pipeline", %kind, filename, len = wire.len(), "payload wrapped");
    Ok(wire)
}

fn encode_wire(
    wire: &str,
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
    counters: &mut TelemetryCounters,
    timer: &mut TelemetryTimer,
) -> Result<EncodeOutcome, TransferError> {
    config.validate()?;

    let t = Instant::now();
    let chunks = split_text(wire, config.chunk_size)?;
    timer.add_stage_time(Stage::Split, t.elapsed());
    if chunks.is_empty() {
        return Err(TransferError::EmptyPayload);
    }

    // Every frame is tagged before any symbol is rendered.
    let t = Instant::now();
    let frames = encode_frames(&chunks)?;
    timer.add_stage_time(Stage::Frame, t.elapsed());
    for (chunk, frame) in chunks.iter().zip(&frames) {
        counters.add_frame(chunk.text.len(), frame.len());
    }
    debug!(target: "pipeline", chunks = chunks.len(), chunk_size = config.chunk_size, "payload framed");

    let mut scratch = config
        .scratch_dir
        .as_deref()
        .map(ScratchArtifacts::new)
        .transpose()?;

    let profile = ParallelismProfile::from_config(config, frames.len());
    let t = Instant::now();
    let images = render_symbols(&chunks, &frames, codec, config, profile, scratch.as_mut())?;
    timer.add_stage_time(Stage::Render, t.elapsed());
    counters.add_rendered(images.len());

    let t = Instant::now();
    let composite = compose(&images, config.rows, config.cols, &config.layout)?;
    timer.add_stage_time(Stage::Compose, t.elapsed());

    drop(scratch);

    timer.finish();
    Ok(EncodeOutcome {
        composite,
        frames,
        snapshot: TelemetrySnapshot::from(counters, timer),
    })
}

/// Render every frame on a worker pool; images come back in index order.
///
/// The first failure received aborts the call. Dropping the result receiver
/// unblocks the workers, and the feeder stops once the workers are gone.
fn render_symbols(
    chunks: &[Chunk],
    frames: &[String],
    codec: &dyn SymbolCodec,
    config: &TransferConfig,
    profile: ParallelismProfile,
    mut scratch: Option<&mut ScratchArtifacts>,
) -> Result<Vec<RgbImage>, TransferError> {
    let ec_level = config.ec_level;
    let version_cap = config.version_cap;

    debug!(
        target: "pipeline",
        workers = profile.worker_count,
        inflight = profile.inflight_symbols,
        symbols = frames.len(),
        "rendering symbols"
    );

    thread::scope(|scope| {
        let (job_tx, job_rx) = bounded::<(usize, &str)>(profile.inflight_symbols);
        let (out_tx, out_rx) =
            bounded::<(usize, Result<RgbImage, CodecError>)>(profile.inflight_symbols);

        // ---- Workers ----
        for _ in 0..profile.worker_count {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || {
                for (index, text) in rx.iter() {
                    let rendered = codec.render(text, ec_level, version_cap);
                    if tx.send((index, rendered)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(out_tx);

        // ---- Feeder ----
        scope.spawn(move || {
            for (index, frame) in frames.iter().enumerate() {
                if job_tx.send((index, frame.as_str())).is_err() {
                    break;
                }
            }
        });

        // ---- Ordered collector ----
        let mut pending: BTreeMap<usize, RgbImage> = BTreeMap::new();
        let mut ordered = Vec::with_capacity(frames.len());

        for (index, rendered) in out_rx.iter() {
            let image = rendered.map_err(|e| match e {
                CodecError::DataTooLarge { .. } => {
                    let chars = chunks.get(index).map(Chunk::char_len).unwrap_or(0);
                    warn!(target: "pipeline", index, chars, version_cap, "chunk exceeds symbol capacity");
                    TransferError::ChunkTooLarge { index, chars, version_cap }
                }
                other => other.into(),
            })?;
            pending.insert(index, image);

            while let Some(image) = pending.remove(&ordered.len()) {
                if let Some(scratch) = scratch.as_deref_mut() {
                    scratch.persist(ordered.len(), &image)?;
                }
                ordered.push(image);
            }
        }

        if ordered.len() != frames.len() {
            return Err(TransferError::Pipeline("render workers exited before every symbol was returned"));
        }
        Ok(ordered)
    })
}
