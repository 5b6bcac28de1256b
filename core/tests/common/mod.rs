//! Deterministic in-memory symbol codec for pipeline tests.
//!
//! A symbol is a white square whose side is a multiple of 8 px:
//! - (0,0) marker `[0,0,255]`
//! - (1,0) side `[hi, lo, 1]`
//! - (2,0),(3,0) byte length `[b2, b1, 2]`, `[b0, 0, 3]`
//! - data from pixel 4 on, row-major, one byte per pixel as `[b, 255-b, 0]`
//!
//! Only the marker has R=G=0 and B=255, so the scanner can find every
//! symbol by looking for it.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use image::{Rgb, RgbImage};
use qrgrid_core::codec::{CodecError, EcLevel, ScanOptions, SymbolCodec};

const MARKER: Rgb<u8> = Rgb([0, 0, 255]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const HEADER_PIXELS: usize = 4;

pub struct PixelCodec {
    /// Bytes one symbol may hold per unit of version cap.
    pub bytes_per_version: usize,
    pub renders: AtomicUsize,
    pub visual_debug_scans: AtomicUsize,
}

impl PixelCodec {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(bytes_per_version: usize) -> Self {
        Self {
            bytes_per_version,
            renders: AtomicUsize::new(0),
            visual_debug_scans: AtomicUsize::new(0),
        }
    }

    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

fn side_for(len: usize) -> u32 {
    let mut side = 8u32;
    while (side as usize) * (side as usize) < HEADER_PIXELS + len {
        side += 8;
    }
    side
}

fn pixel_at(side: u32, k: usize) -> (u32, u32) {
    ((k as u32) % side, (k as u32) / side)
}

impl SymbolCodec for PixelCodec {
    fn render(&self, text: &str, _ec_level: EcLevel, version_cap: u8) -> Result<RgbImage, CodecError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let bytes = text.as_bytes();
        let capacity = version_cap as usize * self.bytes_per_version;
        if bytes.len() > capacity {
            return Err(CodecError::DataTooLarge { len: bytes.len(), version_cap });
        }

        let side = side_for(bytes.len());
        let len = bytes.len() as u32;
        let mut img = RgbImage::from_pixel(side, side, WHITE);
        img.put_pixel(0, 0, MARKER);
        img.put_pixel(1, 0, Rgb([(side >> 8) as u8, side as u8, 1]));
        img.put_pixel(2, 0, Rgb([(len >> 16) as u8, (len >> 8) as u8, 2]));
        img.put_pixel(3, 0, Rgb([len as u8, 0, 3]));
        for (i, b) in bytes.iter().enumerate() {
            let (x, y) = pixel_at(side, HEADER_PIXELS + i);
            img.put_pixel(x, y, Rgb([*b, 255 - *b, 0]));
        }
        Ok(img)
    }

    fn scan(&self, image: &RgbImage, options: &ScanOptions) -> Result<Vec<String>, CodecError> {
        if options.visual_debug {
            self.visual_debug_scans.fetch_add(1, Ordering::SeqCst);
        }

        let mut found = Vec::new();
        for (x0, y0, px) in image.enumerate_pixels() {
            if *px != MARKER {
                continue;
            }
            if let Some(text) = read_symbol(image, x0, y0) {
                found.push(text);
            }
        }
        // Scanners report symbols in no particular order.
        found.reverse();
        if found.len() > 2 {
            found.rotate_left(1);
        }
        Ok(found)
    }
}

fn read_symbol(image: &RgbImage, x0: u32, y0: u32) -> Option<String> {
    let get = |x: u32, y: u32| image.get_pixel_checked(x0 + x, y0 + y).copied();

    let Rgb([hi, lo, 1]) = get(1, 0)? else { return None };
    let side = ((hi as u32) << 8) | lo as u32;
    let Rgb([b2, b1, 2]) = get(2, 0)? else { return None };
    let Rgb([b0, 0, 3]) = get(3, 0)? else { return None };
    let len = ((b2 as usize) << 16) | ((b1 as usize) << 8) | b0 as usize;

    let mut bytes = Vec::with_capacity(len);
    for i in 0..len {
        let (x, y) = pixel_at(side, HEADER_PIXELS + i);
        let Rgb([b, _, _]) = get(x, y)?;
        bytes.push(b);
    }
    String::from_utf8(bytes).ok()
}

/// Codec whose scanner returns a fixed list, regardless of the image.
pub struct FixedScan(pub Vec<String>);

impl FixedScan {
    pub fn of(raw: &[&str]) -> Self {
        Self(raw.iter().map(|s| s.to_string()).collect())
    }
}

impl SymbolCodec for FixedScan {
    fn render(&self, _text: &str, _ec_level: EcLevel, _version_cap: u8) -> Result<RgbImage, CodecError> {
        Err(CodecError::Render("fixed scan codec cannot render".into()))
    }

    fn scan(&self, _image: &RgbImage, _options: &ScanOptions) -> Result<Vec<String>, CodecError> {
        Ok(self.0.clone())
    }
}

pub fn blank_image() -> RgbImage {
    RgbImage::from_pixel(16, 16, WHITE)
}
