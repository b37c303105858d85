use std::path::Path;

use crate::assets::codec::{self, DecodedImage};
use crate::blend::BlendMode;
use crate::foundation::core::Color;
use crate::foundation::error::{StrataError, StrataResult};
use crate::render::context::{Graphics, ScaleMode};
use crate::render::store::{self, PixelStore};
use crate::render::surface::{Drawable, Surface, readback};

/// A surface that also keeps a CPU-side pixel snapshot for point queries.
///
/// The snapshot is captured at construction and is not kept in sync with later draws; call
/// [`Texture::refresh_snapshot`] to re-capture it.
#[derive(Debug)]
pub struct Texture {
    surface: Surface,
    snapshot: PixelStore,
}

impl Texture {
    /// Blank, fully transparent texture.
    pub fn new(gfx: &mut Graphics, width: u32, height: u32) -> StrataResult<Self> {
        let surface = Surface::new(gfx, width, height)?;
        Self::with_snapshot(surface)
    }

    /// Texture over straight-alpha RGBA8 pixels.
    pub fn from_rgba(
        gfx: &mut Graphics,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> StrataResult<Self> {
        let surface = Surface::from_rgba(gfx, width, height, pixels)?;
        Self::with_snapshot(surface)
    }

    pub fn from_decoded(gfx: &mut Graphics, img: DecodedImage) -> StrataResult<Self> {
        Self::from_rgba(gfx, img.width, img.height, img.rgba8)
    }

    /// Decode an image file into a texture.
    pub fn from_file(gfx: &mut Graphics, path: &Path) -> StrataResult<Self> {
        let img = codec::decode_file(path)?;
        tracing::debug!(path = %path.display(), w = img.width, h = img.height, "texture loaded");
        Self::from_decoded(gfx, img)
    }

    fn with_snapshot(surface: Surface) -> StrataResult<Self> {
        let snapshot = surface.store().try_clone()?;
        Ok(Self { surface, snapshot })
    }

    /// Pixel at `(x, y)` from the construction-time snapshot.
    pub fn get_pixel(&self, x: i32, y: i32) -> StrataResult<Color> {
        let (w, h) = (self.width(), self.height());
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            return Err(StrataError::invalid_argument(format!(
                "pixel ({x}, {y}) outside {w}x{h} texture"
            )));
        }
        self.snapshot.pixel(x as u32, y as u32).ok_or_else(|| {
            StrataError::invalid_argument(format!(
                "pixel ({x}, {y}) outside {}x{} snapshot",
                self.snapshot.width(),
                self.snapshot.height()
            ))
        })
    }

    /// Re-capture the CPU snapshot from the live pixel store.
    pub fn refresh_snapshot(&mut self, gfx: &mut Graphics) -> StrataResult<()> {
        self.snapshot = readback(self.surface.store(), gfx)?;
        Ok(())
    }

    /// Multiply this texture by `mask`, channel by channel.
    ///
    /// The mask is stamped onto a fresh composite with [`BlendMode::None`], then this texture is
    /// stamped over it with [`BlendMode::Multiply`], and the composite's store replaces this
    /// texture's. The mask's alpha scales the result alpha (0 gives 0), and its color scales
    /// the result color too: use white wherever the texture's color must be kept. `mask` must
    /// have the same size; on any error `self` is left untouched.
    #[tracing::instrument(skip_all, fields(w = self.width(), h = self.height()))]
    pub fn apply_mask(&mut self, gfx: &mut Graphics, mask: &Texture) -> StrataResult<()> {
        if (self.width(), self.height()) != (mask.width(), mask.height()) {
            return Err(StrataError::invalid_argument(format!(
                "mask is {}x{}, texture is {}x{}",
                mask.width(),
                mask.height(),
                self.width(),
                self.height()
            )));
        }

        let mut composite = Surface::new(gfx, self.width(), self.height())?;
        mask.render_to(gfx, &mut composite, 0, 0, BlendMode::None)?;
        self.render_to(gfx, &mut composite, 0, 0, BlendMode::Multiply)?;

        self.surface.replace_store(composite.into_store());
        Ok(())
    }

    /// Rescale to `width x height`.
    ///
    /// Pixels are read back unblended, resampled with `mode` and uploaded as the new store; the
    /// snapshot is re-captured from the result. A same-size resize copies pixels unchanged.
    #[tracing::instrument(skip(self, gfx), fields(from_w = self.width(), from_h = self.height()))]
    pub fn resize(
        &mut self,
        gfx: &mut Graphics,
        width: u32,
        height: u32,
        mode: ScaleMode,
    ) -> StrataResult<()> {
        let max_bytes = gfx.opts().max_surface_bytes;
        store::byte_len(width, height, max_bytes)?;

        let current = readback(self.surface.store(), gfx)?;
        let resized = if current.dimensions() == (width, height) {
            current
        } else {
            let scaled = image::imageops::resize(&current.to_image(), width, height, mode.filter());
            PixelStore::from_image(scaled, max_bytes)?
        };

        let snapshot = resized.try_clone()?;
        self.surface.replace_store(resized);
        self.snapshot = snapshot;
        Ok(())
    }
}

impl Drawable for Texture {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
