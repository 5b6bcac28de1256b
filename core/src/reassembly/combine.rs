//! reassembly/combine.rs
//! Classification and ordered concatenation of scanned frames.

use std::collections::btree_map::{BTreeMap, Entry};

use tracing::{debug, warn};

use crate::config::{DuplicatePolicy, GapPolicy, TransferConfig};
use crate::constants::LOG_PREVIEW_CHARS;
use crate::framing::{has_frame_tag, parse_frame, recover_frame, FrameFormat};
use crate::reassembly::types::{ParsedScan, Reassembled, ReassemblyError, ReassemblyStats};
use crate::utils::preview;

/// Stateless reassembler carrying the duplicate and gap policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reassembler {
    pub duplicate_policy: DuplicatePolicy,
    pub gap_policy: GapPolicy,
}

impl Reassembler {
    pub fn new(duplicate_policy: DuplicatePolicy, gap_policy: GapPolicy) -> Self {
        Self { duplicate_policy, gap_policy }
    }

    pub fn from_config(config: &TransferConfig) -> Self {
        Self::new(config.duplicate_policy, config.gap_policy)
    }

    /// Parsing stage.
    ///
    /// Each string goes through the frame matchers (current, then legacy).
    /// When every scanned string starts with the tag literal, strings the
    /// strict matcher rejected get one more try through manual recovery.
    /// A lone string nothing accepts is taken verbatim.
    pub fn classify<S: AsRef<str>>(&self, raw: &[S]) -> ParsedScan {
        let all_tagged = !raw.is_empty() && raw.iter().all(|s| has_frame_tag(s.as_ref()));
        let mut parsed = ParsedScan {
            scanned: raw.len(),
            ..ParsedScan::default()
        };

        for s in raw {
            let s = s.as_ref();
            match parse_frame(s) {
                Ok(frame) => {
                    debug!(target: "reassembly", index = frame.index, format = %frame.format, len = frame.text.len(), "frame matched");
                    parsed.frames.push(frame);
                }
                Err(_) => match all_tagged.then(|| recover_frame(s)).flatten() {
                    Some(frame) => {
                        debug!(target: "reassembly", index = frame.index, "frame recovered by manual split");
                        parsed.frames.push(frame);
                    }
                    None => {
                        warn!(target: "reassembly", preview = %preview(s, LOG_PREVIEW_CHARS), "cannot parse frame index");
                        parsed.unparsed.push(s.to_string());
                    }
                },
            }
        }

        if parsed.frames.is_empty() && parsed.scanned == 1 {
            debug!(target: "reassembly", "single untagged symbol, taking content verbatim");
            parsed.verbatim = parsed.unparsed.pop();
        }

        parsed
    }

    /// Reassembling stage. Needs the whole scan; never streams.
    pub fn assemble(&self, parsed: ParsedScan) -> Result<Reassembled, ReassemblyError> {
        let mut stats = ReassemblyStats {
            scanned: parsed.scanned,
            frames_current: parsed.count(FrameFormat::Current),
            frames_legacy: parsed.count(FrameFormat::Legacy),
            frames_recovered: parsed.count(FrameFormat::Recovered),
            unparsed: parsed.unparsed.len(),
            ..ReassemblyStats::default()
        };

        if let Some(text) = parsed.verbatim {
            stats.verbatim = true;
            stats.chunks = 1;
            return Ok(Reassembled { text, stats });
        }

        if parsed.frames.is_empty() {
            return Err(match parsed.unparsed.first() {
                None => ReassemblyError::Empty,
                Some(first) => ReassemblyError::ParseFailure {
                    scanned: parsed.scanned,
                    preview: preview(first, LOG_PREVIEW_CHARS),
                },
            });
        }

        if !parsed.unparsed.is_empty() {
            warn!(target: "reassembly", dropped = parsed.unparsed.len(), "unparsed strings ignored");
        }

        let mut by_index: BTreeMap<usize, String> = BTreeMap::new();
        for frame in parsed.frames {
            match by_index.entry(frame.index) {
                Entry::Vacant(slot) => {
                    slot.insert(frame.text);
                }
                Entry::Occupied(mut slot) => {
                    stats.duplicates += 1;
                    warn!(target: "reassembly", index = frame.index, policy = ?self.duplicate_policy, "duplicate chunk index");
                    match self.duplicate_policy {
                        DuplicatePolicy::LastWins => {
                            slot.insert(frame.text);
                        }
                        DuplicatePolicy::FirstWins => {}
                        DuplicatePolicy::Reject => {
                            return Err(ReassemblyError::DuplicateIndex { index: frame.index });
                        }
                    }
                }
            }
        }

        // All frame formats index from 0.
        let last = match by_index.keys().next_back() {
            Some(last) => *last,
            None => return Err(ReassemblyError::Empty),
        };
        let span = last.saturating_add(1);
        let found = by_index.len();

        if found != span {
            match self.gap_policy {
                GapPolicy::Reject => return Err(ReassemblyError::Gap { found, span }),
                GapPolicy::Allow => {
                    warn!(target: "reassembly", found, span, "index set has gaps, concatenating anyway");
                }
            }
        }

        stats.chunks = found;
        let text: String = by_index.into_values().collect();

        debug!(target: "reassembly", chunks = found, chars = text.chars().count(), "payload reassembled");

        Ok(Reassembled { text, stats })
    }

    /// Parse, then assemble.
    pub fn combine<S: AsRef<str>>(&self, raw: &[S]) -> Result<Reassembled, ReassemblyError> {
        self.assemble(self.classify(raw))
    }
}

/// Reassemble with the default policies (last-write-wins, reject gaps).
pub fn combine<S: AsRef<str>>(raw: &[S]) -> Result<String, ReassemblyError> {
    Reassembler::default().combine(raw).map(|r| r.text)
}
