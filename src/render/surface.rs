use std::path::Path;

use crate::assets::codec;
use crate::blend::BlendMode;
use crate::camera::Camera;
use crate::foundation::core::{Color, IRect, Point, SurfaceId};
use crate::foundation::error::{StrataError, StrataResult};
use crate::foundation::math::scale_trunc;
use crate::render::blit::{blit, blit_fill, blit_passes};
use crate::render::context::{Graphics, ScaleMode, TargetId};
use crate::render::store::PixelStore;
use crate::render::wrap::{CopyPass, WrappingSampler};

/// An off-screen render target that exclusively owns its pixel store.
///
/// Move-only: the store is released exactly once, when the surface drops.
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    store: PixelStore,
}

impl Surface {
    /// Allocate a blank (fully transparent) surface.
    pub fn new(gfx: &mut Graphics, width: u32, height: u32) -> StrataResult<Self> {
        let store = PixelStore::alloc(width, height, gfx.opts().max_surface_bytes)?;
        Ok(Self::adopt(gfx, store))
    }

    /// Wrap decoded straight-alpha RGBA8 pixels (`width * height * 4` bytes).
    pub fn from_rgba(
        gfx: &mut Graphics,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> StrataResult<Self> {
        let store = PixelStore::from_vec(width, height, pixels, gfx.opts().max_surface_bytes)?;
        Ok(Self::adopt(gfx, store))
    }

    pub(crate) fn adopt(gfx: &mut Graphics, store: PixelStore) -> Self {
        let id = gfx.register_surface(&store);
        Self { id, store }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn store(&self) -> &PixelStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut PixelStore {
        &mut self.store
    }

    /// Swap in a new backing store; the old one is returned to the caller to drop.
    pub(crate) fn replace_store(&mut self, store: PixelStore) -> PixelStore {
        std::mem::replace(&mut self.store, store)
    }

    pub(crate) fn into_store(self) -> PixelStore {
        self.store
    }
}

/// Middle row and middle column of a surface, as read back from its store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugSamples {
    pub middle_row: Vec<Color>,
    pub middle_column: Vec<Color>,
}

/// Operations every surface variant supports.
pub trait Drawable {
    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    fn width(&self) -> u32 {
        self.surface().store().width()
    }

    fn height(&self) -> u32 {
        self.surface().store().height()
    }

    fn target_id(&self) -> TargetId {
        TargetId::Surface(self.surface().id())
    }

    /// Set every pixel to `color`, bypassing blending.
    fn clear(&mut self, gfx: &mut Graphics, color: Color) {
        let _scope = gfx.bind_target(self.target_id());
        self.surface_mut().store_mut().fill(color);
    }

    /// Draw a solid rectangle into this surface.
    fn fill_rect(&mut self, gfx: &mut Graphics, rect: IRect, color: Color, mode: BlendMode) {
        let mut scope = gfx.bind_target(self.target_id());
        blit_fill(self.surface_mut().store_mut(), rect, color, mode.equation());
        scope.record_draw(1);
    }

    /// Draw the whole surface onto the display at `(x, y)`, or at the camera-mapped position
    /// and scale when a camera is given.
    fn render(
        &self,
        gfx: &mut Graphics,
        x: i32,
        y: i32,
        camera: Option<&Camera>,
        mode: BlendMode,
    ) -> StrataResult<()> {
        let (sx, sy, scale) = placement(x, y, camera)?;
        let src = IRect::new(0, 0, self.width() as i32, self.height() as i32);
        let pass = CopyPass {
            src,
            dst: IRect::new(sx, sy, scale_trunc(src.w, scale), scale_trunc(src.h, scale)),
        };
        draw_to_display(self.surface().store(), &[pass], gfx, mode)
    }

    /// Draw a region of this surface onto the display, wrapping source addressing.
    fn render_region(
        &self,
        gfx: &mut Graphics,
        src: IRect,
        dest_x: i32,
        dest_y: i32,
        camera: Option<&Camera>,
        mode: BlendMode,
    ) -> StrataResult<()> {
        let (sx, sy, scale) = placement(dest_x, dest_y, camera)?;
        let (w, h) = gfx.display().dimensions();
        let passes = sampler(self)?.passes(src, sx, sy, scale, bounds(w, h));
        draw_to_display(self.surface().store(), &passes, gfx, mode)
    }

    /// Copy the whole surface into `target` at `(dest_x, dest_y)`.
    fn render_to<T: Drawable + ?Sized>(
        &self,
        gfx: &mut Graphics,
        target: &mut T,
        dest_x: i32,
        dest_y: i32,
        mode: BlendMode,
    ) -> StrataResult<()> {
        let src = IRect::new(0, 0, self.width() as i32, self.height() as i32);
        let pass = CopyPass {
            src,
            dst: IRect::new(dest_x, dest_y, src.w, src.h),
        };
        draw_to_surface(self.surface().store(), &[pass], gfx, target, mode)
    }

    /// Copy a region of this surface into `target`, wrapping source addressing.
    fn render_region_to<T: Drawable + ?Sized>(
        &self,
        gfx: &mut Graphics,
        target: &mut T,
        src: IRect,
        dest_x: i32,
        dest_y: i32,
        mode: BlendMode,
    ) -> StrataResult<()> {
        let clip = bounds(target.width(), target.height());
        let passes = sampler(self)?.passes(src, dest_x, dest_y, 1.0, clip);
        draw_to_surface(self.surface().store(), &passes, gfx, target, mode)
    }

    /// Read back raw pixels: copied with blending disabled into a fresh transparent buffer.
    fn read_pixels(&self, gfx: &mut Graphics) -> StrataResult<image::RgbaImage> {
        let store = readback(self.surface().store(), gfx)?;
        Ok(store.to_image())
    }

    /// Read back and encode as PNG. Failures are logged and reported as `false`.
    fn save(&self, gfx: &mut Graphics, path: &Path) -> bool {
        let result = readback(self.surface().store(), gfx).and_then(|store| {
            codec::encode_rgba8_file(store.data(), store.width(), store.height(), path)
        });
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to save surface");
                false
            }
        }
    }

    fn debug_samples(&self, gfx: &mut Graphics) -> StrataResult<DebugSamples> {
        let store = readback(self.surface().store(), gfx)?;
        let (w, h) = store.dimensions();
        let (mid_x, mid_y) = (w / 2, h / 2);
        let samples = DebugSamples {
            middle_row: (0..w).filter_map(|x| store.pixel(x, mid_y)).collect(),
            middle_column: (0..h).filter_map(|y| store.pixel(mid_x, y)).collect(),
        };
        tracing::debug!(
            id = self.surface().id().get(),
            w,
            h,
            row = ?samples.middle_row,
            column = ?samples.middle_column,
            "surface samples"
        );
        Ok(samples)
    }
}

impl Drawable for Surface {
    fn surface(&self) -> &Surface {
        self
    }

    fn surface_mut(&mut self) -> &mut Surface {
        self
    }
}

fn sampler<D: Drawable + ?Sized>(d: &D) -> StrataResult<WrappingSampler> {
    WrappingSampler::new(d.width(), d.height())
}

/// Full-surface rectangle, used as the clip for wrapped copies.
fn bounds(width: u32, height: u32) -> IRect {
    let clamp = |v: u32| v.min(i32::MAX as u32) as i32;
    IRect::new(0, 0, clamp(width), clamp(height))
}

/// Screen position and scale for a display draw.
fn placement(x: i32, y: i32, camera: Option<&Camera>) -> StrataResult<(i32, i32, f64)> {
    match camera {
        None => Ok((x, y, 1.0)),
        Some(cam) => {
            if !cam.has_valid_zoom() {
                return Err(StrataError::render_state(format!(
                    "camera zoom must be finite and > 0 (got {})",
                    cam.zoom
                )));
            }
            let (sx, sy) = cam.world_to_screen(Point::new(f64::from(x), f64::from(y)));
            Ok((sx, sy, cam.zoom))
        }
    }
}

fn draw_to_display(
    src: &PixelStore,
    passes: &[CopyPass],
    gfx: &mut Graphics,
    mode: BlendMode,
) -> StrataResult<()> {
    let mut scope = gfx.bind_target(TargetId::Display);
    let filter = scope.opts().scale_mode;
    blit_passes(src, passes, scope.display_mut(), mode.equation(), filter)?;
    scope.record_draw(passes.len());
    Ok(())
}

fn draw_to_surface<T: Drawable + ?Sized>(
    src: &PixelStore,
    passes: &[CopyPass],
    gfx: &mut Graphics,
    target: &mut T,
    mode: BlendMode,
) -> StrataResult<()> {
    let mut scope = gfx.bind_target(target.target_id());
    let filter = scope.opts().scale_mode;
    blit_passes(
        src,
        passes,
        target.surface_mut().store_mut(),
        mode.equation(),
        filter,
    )?;
    scope.record_draw(passes.len());
    Ok(())
}

/// Copy `src` with blending disabled into a freshly allocated, transparent store bound as a
/// temporary target.
pub(crate) fn readback(src: &PixelStore, gfx: &mut Graphics) -> StrataResult<PixelStore> {
    let (w, h) = src.dimensions();
    let mut out = Surface::new(gfx, w, h)?;
    let full = IRect::new(0, 0, w as i32, h as i32);
    {
        let _scope = gfx.bind_target(out.target_id());
        blit(
            src,
            full,
            out.store_mut(),
            full,
            BlendMode::None.equation(),
            ScaleMode::Nearest,
        )?;
    }
    Ok(out.into_store())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
