/// Color segmentation
///
/// Converts RGBA frames into a binary ball mask by thresholding in HSV
/// space. HSV values use the 8-bit convention (hue 0-180, saturation and
/// value 0-255) so thresholds tuned against other tooling carry over
/// unchanged.
use image::{GrayImage, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// An HSV triple on the 8-bit scale: hue in 0..=180, saturation and value in
/// 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Inclusive per-channel HSV range used for segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Default range for a white ball under real-world lighting: any hue,
    /// low saturation, bright value.
    pub fn white_ball() -> Self {
        Self::new(Hsv::new(0, 0, 150), Hsv::new(180, 80, 255))
    }

    pub fn contains(&self, c: Hsv) -> bool {
        self.lower.h <= c.h
            && c.h <= self.upper.h
            && self.lower.s <= c.s
            && c.s <= self.upper.s
            && self.lower.v <= c.v
            && c.v <= self.upper.v
    }

    /// True when every lower bound is at or below its upper bound.
    pub fn is_ordered(&self) -> bool {
        self.lower.h <= self.upper.h
            && self.lower.s <= self.upper.s
            && self.lower.v <= self.upper.v
    }
}

/// Convert an RGB pixel to 8-bit HSV (hue halved into 0..=180).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = (max * 255.0).round() as u8;
    let s = if max == 0.0 {
        0
    } else {
        ((delta / max) * 255.0).round() as u8
    };

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };
    let h = (h_deg / 2.0).round().min(180.0) as u8;

    Hsv { h, s, v }
}

/// Segment a frame into a binary mask: 255 where the pixel's HSV lies inside
/// `range`, 0 elsewhere. Rows are processed in parallel.
pub fn ball_mask(frame: &RgbaImage, range: &HsvRange) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let src = frame.as_raw();
    let row_px = width as usize;

    mask.as_flat_samples_mut()
        .samples
        .par_chunks_mut(row_px)
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * row_px * 4;
            for x in 0..row_px {
                let i = row_start + x * 4;
                let hsv = rgb_to_hsv(src[i], src[i + 1], src[i + 2]);
                row[x] = if range.contains(hsv) { 255 } else { 0 };
            }
        });

    mask
}
