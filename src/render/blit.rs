//! Copy primitives: every draw in the crate bottoms out in [`blit`] or [`blit_fill`].

use crate::blend::BlendEquation;
use crate::foundation::core::{Color, IRect};
use crate::foundation::error::{StrataError, StrataResult};
use crate::render::context::ScaleMode;
use crate::render::store::PixelStore;
use crate::render::wrap::CopyPass;

/// Clip `rect` against a `width x height` target. `None` when nothing remains.
fn clip(rect: IRect, width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
    if rect.is_empty() {
        return None;
    }
    let limit = i64::from(i32::MAX);
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(i64::from(width)).min(limit) as i32;
    let y1 = rect.bottom().min(i64::from(height)).min(limit) as i32;
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

pub(crate) fn blit_passes(
    src: &PixelStore,
    passes: &[CopyPass],
    dst: &mut PixelStore,
    eq: BlendEquation,
    filter: ScaleMode,
) -> StrataResult<()> {
    for pass in passes {
        blit(src, pass.src, dst, pass.dst, eq, filter)?;
    }
    Ok(())
}

/// Copy `src_rect` of `src` onto `dst_rect` of `dst` through `eq`.
///
/// The source rectangle must lie inside `src`; the destination is clipped. When the two
/// rectangles differ in size the source is resampled with `filter`.
pub(crate) fn blit(
    src: &PixelStore,
    src_rect: IRect,
    dst: &mut PixelStore,
    dst_rect: IRect,
    eq: BlendEquation,
    filter: ScaleMode,
) -> StrataResult<()> {
    if src_rect.is_empty() || dst_rect.is_empty() {
        return Ok(());
    }
    if !src_rect.is_within(src.width(), src.height()) {
        return Err(StrataError::render_state(format!(
            "copy source {src_rect:?} outside {}x{} surface",
            src.width(),
            src.height()
        )));
    }
    let Some((x0, y0, x1, y1)) = clip(dst_rect, dst.width(), dst.height()) else {
        return Ok(());
    };

    let src_stride = src.width() as usize * 4;
    let dst_stride = dst.width() as usize * 4;
    let n = (x1 - x0) as usize;
    let unscaled = src_rect.w == dst_rect.w && src_rect.h == dst_rect.h;

    let mut row = Vec::new();
    for y in y0..y1 {
        let d_off = (y as usize) * dst_stride + (x0 as usize) * 4;
        let d_row = &mut dst.data_mut()[d_off..d_off + n * 4];
        if unscaled {
            let sy = (src_rect.y + (y - dst_rect.y)) as usize;
            let sx = (src_rect.x + (x0 - dst_rect.x)) as usize;
            let s_off = sy * src_stride + sx * 4;
            eq.apply_row(d_row, &src.data()[s_off..s_off + n * 4]);
        } else {
            row.clear();
            for x in x0..x1 {
                row.extend_from_slice(&sample(src, src_rect, dst_rect, x, y, filter));
            }
            eq.apply_row(d_row, &row);
        }
    }
    Ok(())
}

/// Fill `rect` of `dst` with a constant color through `eq`.
pub(crate) fn blit_fill(dst: &mut PixelStore, rect: IRect, color: Color, eq: BlendEquation) {
    let Some((x0, y0, x1, y1)) = clip(rect, dst.width(), dst.height()) else {
        return;
    };
    let n = (x1 - x0) as usize;
    let row = color.to_array().repeat(n);
    let stride = dst.width() as usize * 4;
    for y in y0..y1 {
        let off = (y as usize) * stride + (x0 as usize) * 4;
        eq.apply_row(&mut dst.data_mut()[off..off + n * 4], &row);
    }
}

/// Sample the source pixel that destination pixel `(x, y)` maps to.
fn sample(src: &PixelStore, s: IRect, d: IRect, x: i32, y: i32, filter: ScaleMode) -> [u8; 4] {
    let sx_scale = f64::from(s.w) / f64::from(d.w);
    let sy_scale = f64::from(s.h) / f64::from(d.h);
    // Destination pixel centers, in source-rect-relative coordinates.
    let u = (f64::from(x - d.x) + 0.5) * sx_scale;
    let v = (f64::from(y - d.y) + 0.5) * sy_scale;

    match filter {
        ScaleMode::Nearest => {
            let sx = s.x + (u.floor() as i32).clamp(0, s.w - 1);
            let sy = s.y + (v.floor() as i32).clamp(0, s.h - 1);
            texel(src, sx, sy)
        }
        ScaleMode::Linear => {
            let u = (u - 0.5).clamp(0.0, f64::from(s.w - 1));
            let v = (v - 0.5).clamp(0.0, f64::from(s.h - 1));
            let (u0, v0) = (u.floor() as i32, v.floor() as i32);
            let (u1, v1) = ((u0 + 1).min(s.w - 1), (v0 + 1).min(s.h - 1));
            let (fu, fv) = (u - f64::from(u0), v - f64::from(v0));

            let p00 = texel(src, s.x + u0, s.y + v0);
            let p10 = texel(src, s.x + u1, s.y + v0);
            let p01 = texel(src, s.x + u0, s.y + v1);
            let p11 = texel(src, s.x + u1, s.y + v1);

            let mut out = [0u8; 4];
            for i in 0..4 {
                let top = f64::from(p00[i]) * (1.0 - fu) + f64::from(p10[i]) * fu;
                let bottom = f64::from(p01[i]) * (1.0 - fu) + f64::from(p11[i]) * fu;
                out[i] = (top * (1.0 - fv) + bottom * fv).round().clamp(0.0, 255.0) as u8;
            }
            out
        }
    }
}

fn texel(src: &PixelStore, x: i32, y: i32) -> [u8; 4] {
    let idx = ((y as usize) * (src.width() as usize) + (x as usize)) * 4;
    let px = &src.data()[idx..idx + 4];
    [px[0], px[1], px[2], px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
