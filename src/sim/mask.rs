//! Pixel-occupancy bitmaps for exact sprite overlap tests
//!
//! A mask is one bit per pixel, packed row-major into `u64` words. Overlap
//! tests are a pure function of both bitmaps and the integer offset between
//! their origins, so the same inputs always give the same answer.

use glam::IVec2;

use crate::error::AssetError;

/// Alpha values above this count as opaque when deriving a mask from pixels
pub const ALPHA_THRESHOLD: u8 = 127;

const WORD_BITS: u32 = 64;

/// Immutable-after-construction pixel bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl CollisionMask {
    /// Create an empty (fully transparent) mask
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Create a fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        mask.fill_rect(0, 0, width, height);
        mask
    }

    /// Derive a mask from an RGBA8 buffer: a pixel is set when its alpha
    /// exceeds `threshold`.
    pub fn from_rgba(
        width: u32,
        height: u32,
        pixels: &[u8],
        threshold: u8,
    ) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(AssetError::PixelBuffer {
                width,
                height,
                len: pixels.len(),
                expected,
            });
        }

        let mut mask = Self::new(width, height);
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            if px[3] > threshold {
                let x = (i % width as usize) as u32;
                let y = (i / width as usize) as u32;
                mask.set(x, y, true);
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of opaque pixels
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> (usize, u64) {
        let word = y as usize * self.words_per_row + (x / WORD_BITS) as usize;
        (word, 1u64 << (x % WORD_BITS))
    }

    /// Whether the pixel at (x, y) is opaque. Out-of-range reads are transparent.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.index(x, y);
        self.bits[word] & bit != 0
    }

    /// Set or clear one pixel. Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, bit) = self.index(x, y);
        if opaque {
            self.bits[word] |= bit;
        } else {
            self.bits[word] &= !bit;
        }
    }

    /// Mark a rectangle opaque, clipped to the mask
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set(px, py, true);
            }
        }
    }

    /// First opaque pixel shared by both masks, with `other`'s origin placed
    /// at `offset` in this mask's coordinates.
    ///
    /// Scans row-major in this mask's space; the returned point is in this
    /// mask's coordinates.
    pub fn overlap_point(&self, other: &CollisionMask, offset: IVec2) -> Option<IVec2> {
        // Intersection of the two rectangles in our coordinate space
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            let oy = (y - offset.y) as u32;
            for x in x0..x1 {
                let ox = (x - offset.x) as u32;
                if self.get(x as u32, y as u32) && other.get(ox, oy) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }

    /// Whether any opaque pixels coincide
    #[inline]
    pub fn overlaps(&self, other: &CollisionMask, offset: IVec2) -> bool {
        self.overlap_point(other, offset).is_some()
    }
}
