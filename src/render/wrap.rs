//! Toroidal wraparound addressing for region copies.
//!
//! A requested source rectangle may start outside the surface or be larger than it. The
//! sampler splits it into axis-aligned runs that stay inside the surface, so the copy repeats
//! the surface as if it tiled the plane.

use smallvec::SmallVec;

use crate::foundation::core::IRect;
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::math::scale_trunc;

/// One copy: an in-bounds source rectangle and where it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyPass {
    pub src: IRect,
    pub dst: IRect,
}

pub type CopyPasses = SmallVec<[CopyPass; 4]>;

/// A run along one axis: `(source start, length, offset from the requested start)`.
type Run = (i32, i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrappingSampler {
    width: i32,
    height: i32,
}

impl WrappingSampler {
    /// Sampler for a `width x height` surface.
    pub fn new(width: u32, height: u32) -> StrataResult<Self> {
        if width == 0 || height == 0 {
            return Err(StrataError::invalid_argument(format!(
                "sampler extents must be > 0 (got {width}x{height})"
            )));
        }
        Ok(Self {
            width: width.min(i32::MAX as u32) as i32,
            height: height.min(i32::MAX as u32) as i32,
        })
    }

    /// Wrap `(x, y)` into `[0, width) x [0, height)`. Negative inputs wrap from the far edge.
    pub fn normalize(&self, x: i32, y: i32) -> (i32, i32) {
        (x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    /// Split `src` into copy passes placed at `(dest_x, dest_y)`, with destination extents
    /// multiplied by `scale`. Only passes whose destination overlaps `clip` are emitted, so
    /// the pass count is bounded by the clip area rather than the requested region.
    ///
    /// Passes are row-major: with at most one wrap per axis this is top-left, top-right,
    /// bottom-left, bottom-right. Offsets accumulate before truncation, so scaled passes stay
    /// edge-to-edge.
    pub fn passes(
        &self,
        src: IRect,
        dest_x: i32,
        dest_y: i32,
        scale: f64,
        clip: IRect,
    ) -> CopyPasses {
        let mut out = CopyPasses::new();
        if src.is_empty() || clip.is_empty() || !(scale.is_finite() && scale > 0.0) {
            return out;
        }

        let (sx, sy) = self.normalize(src.x, src.y);
        let x_window = visible_offsets(dest_x, src.w, scale, clip.x, clip.right());
        let y_window = visible_offsets(dest_y, src.h, scale, clip.y, clip.bottom());
        let cols = split_axis(sx, src.w, self.width, x_window);
        let rows = split_axis(sy, src.h, self.height, y_window);

        for &(row_src, row_len, row_off) in &rows {
            let dy0 = scale_trunc(row_off, scale);
            let dy1 = scale_trunc(row_off + row_len, scale);
            for &(col_src, col_len, col_off) in &cols {
                let dx0 = scale_trunc(col_off, scale);
                let dx1 = scale_trunc(col_off + col_len, scale);
                if dx1 <= dx0 || dy1 <= dy0 {
                    continue;
                }
                let dst = IRect::new(
                    dest_x.saturating_add(dx0),
                    dest_y.saturating_add(dy0),
                    dx1 - dx0,
                    dy1 - dy0,
                );
                if !overlaps(dst, clip) {
                    continue;
                }
                out.push(CopyPass {
                    src: IRect::new(col_src, row_src, col_len, row_len),
                    dst,
                });
            }
        }
        out
    }
}

fn overlaps(a: IRect, b: IRect) -> bool {
    i64::from(a.x) < b.right()
        && i64::from(b.x) < a.right()
        && i64::from(a.y) < b.bottom()
        && i64::from(b.y) < a.bottom()
}

/// Source offsets in `[0, len)` whose destination may land in `[clip_start, clip_end)`, padded
/// by one on each side for truncation.
fn visible_offsets(dest: i32, len: i32, scale: f64, clip_start: i32, clip_end: i64) -> (i32, i32) {
    let len_f = f64::from(len);
    let lo = ((f64::from(clip_start) - f64::from(dest)) / scale).floor() - 1.0;
    let hi = ((clip_end as f64 - f64::from(dest)) / scale).ceil() + 1.0;
    (lo.clamp(0.0, len_f) as i32, hi.clamp(0.0, len_f) as i32)
}

/// Split `[start, start + len)` into runs inside `[0, extent)`, wrapping at `extent` as many
/// times as needed, keeping only runs that intersect the offset window `[lo, hi)`. Runs are
/// never cropped. `start` must already be normalized.
fn split_axis(start: i32, len: i32, extent: i32, (lo, hi): (i32, i32)) -> SmallVec<[Run; 2]> {
    let mut runs = SmallVec::new();
    let hi = hi.min(len);
    if lo >= hi {
        return runs;
    }
    let first = (extent - start).min(len);
    // Skip whole periods that end before the window.
    let (mut pos, mut done) = if lo < first {
        (start, 0)
    } else {
        (0, first + (lo - first) / extent * extent)
    };
    while done < hi {
        let run = (len - done).min(extent - pos);
        runs.push((pos, run, done));
        done += run;
        pos = 0;
    }
    runs
}

#[cfg(test)]
#[path = "../../tests/unit/render/wrap.rs"]
mod tests;
