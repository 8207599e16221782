//! Presents the fixed-size frame on a window surface of whatever physical size it has.
//!
//! This is a display step that runs after the frame is complete. Raycasting and
//! compositing stay on one thread; only the upscale to the surface is split
//! across rows with rayon, and a same-size present is a plain copy.

use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::frame::Frame;

/// Precomputed mapping from surface pixels to frame neighbors + weights
pub struct Stretch {
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl Stretch {
    pub fn new(src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> Self {
        let (x0, x1, wx) = axis_lut(src_w, dst_w);
        let (y0, y1, wy) = axis_lut(src_h, dst_h);
        Self {
            src_w,
            src_h,
            dst_w,
            dst_h,
            x0,
            x1,
            wx,
            y0,
            y1,
            wy,
        }
    }

    /// True if this table already maps `frame` onto a `dst_w` x `dst_h` surface.
    pub fn fits(&self, frame: &Frame, dst_w: usize, dst_h: usize) -> bool {
        self.src_w == frame.width()
            && self.src_h == frame.height()
            && self.dst_w == dst_w
            && self.dst_h == dst_h
    }

    /// Bilinear stretch of `frame` into `dst` (row stride `dst_w`).
    /// Rows are processed in parallel for cache friendly writes.
    pub fn blit(&self, frame: &Frame, dst: &mut [u32]) {
        let src = frame.pixels();
        let sw = self.src_w;

        if self.src_w == self.dst_w && self.src_h == self.dst_h {
            dst.copy_from_slice(src);
            return;
        }

        dst.par_chunks_mut(self.dst_w)
            .enumerate()
            .for_each(|(y, dst_row)| {
                let wy = self.wy[y] as u32;
                let row0 = self.y0[y] * sw;
                let row1 = self.y1[y] * sw;

                for (x, out) in dst_row.iter_mut().enumerate() {
                    let x0 = self.x0[x];
                    let x1 = self.x1[x];
                    let wx = self.wx[x] as u32;

                    let top = lerp_color_u32(src[row0 + x0], src[row0 + x1], wx);
                    let bot = lerp_color_u32(src[row1 + x0], src[row1 + x1], wx);
                    *out = lerp_color_u32(top, bot, wy);
                }
            });
    }
}

/// Per destination index: lower source index, upper source index, 8.8 fixed-point weight.
fn axis_lut(src: usize, dst: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let scale = src as f32 / dst as f32;
    let last = src.saturating_sub(1) as isize;
    let mut lo = vec![0; dst];
    let mut hi = vec![0; dst];
    let mut w = vec![0; dst];
    for i in 0..dst {
        let f = i as f32 * scale;
        let l = (f.floor() as isize).clamp(0, last);
        lo[i] = l as usize;
        hi[i] = (l + 1).clamp(0, last) as usize;
        w[i] = ((f - l as f32) * 256.0).round().clamp(0.0, 256.0) as u16;
    }
    (lo, hi, w)
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // Interpolate R and B together (00RR00BB), with mask 0x00FF00FF,
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    // Interpolate G separately (0000GG00), with mask 0x0000FF00
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g
}
