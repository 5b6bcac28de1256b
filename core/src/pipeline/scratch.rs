//! pipeline/scratch.rs
//! Per-chunk symbol images staged on disk during one encode call.
//!
//! The guard owns every file it wrote and removes them when dropped, so
//! artifacts disappear on success and on every error path alike.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, warn};

use crate::constants::SCRATCH_PREFIX;
use crate::types::TransferError;

#[derive(Debug)]
pub struct ScratchArtifacts {
    dir: PathBuf,
    paths: Vec<PathBuf>,
}

impl ScratchArtifacts {
    /// Create (if needed) the scratch directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TransferError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, paths: Vec::new() })
    }

    /// `<dir>/symbol_NNN.png`
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{SCRATCH_PREFIX}{index:03}.png"))
    }

    /// Write one symbol image and take ownership of the file.
    pub fn persist(&mut self, index: usize, image: &RgbImage) -> Result<(), TransferError> {
        let path = self.path_for(index);
        // Track before writing: a half-written file is still ours to delete.
        self.paths.push(path.clone());
        image.save_with_format(&path, image::ImageFormat::Png)?;
        Ok(())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Remove every artifact written so far.
    pub fn clear(&mut self) {
        let count = self.paths.len();
        for path in self.paths.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(target: "pipeline", path = %path.display(), error = %e, "failed to remove scratch artifact"),
            }
        }
        if count > 0 {
            debug!(target: "pipeline", count, dir = %self.dir.display(), "scratch artifacts removed");
        }
    }
}

impl Drop for ScratchArtifacts {
    fn drop(&mut self) {
        self.clear();
    }
}
