use std::ops::{Deref, DerefMut};
use std::path::Path;

use anyhow::Context as _;

use crate::blend::BlendMode;
use crate::foundation::core::{Color, IRect, SurfaceId};
use crate::foundation::error::StrataResult;
use crate::render::blit::blit_fill;
use crate::render::store::PixelStore;

/// Sampling filter used when a copy's destination size differs from its source size.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Nearest source pixel.
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Linear,
}

impl ScaleMode {
    pub(crate) fn filter(self) -> image::imageops::FilterType {
        match self {
            ScaleMode::Nearest => image::imageops::FilterType::Nearest,
            ScaleMode::Linear => image::imageops::FilterType::Triangle,
        }
    }
}

/// Context-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphicsOpts {
    /// Filter for scaled draws (camera zoom).
    pub scale_mode: ScaleMode,
    /// Largest pixel store, in bytes, any single surface may allocate.
    pub max_surface_bytes: usize,
    /// Color [`Graphics::clear_display`] fills the display with.
    pub clear_rgba: [u8; 4],
}

impl Default for GraphicsOpts {
    fn default() -> Self {
        Self {
            scale_mode: ScaleMode::Linear,
            max_surface_bytes: 256 * 1024 * 1024,
            clear_rgba: [0, 0, 0, 255],
        }
    }
}

impl GraphicsOpts {
    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    pub fn with_max_surface_bytes(mut self, max_surface_bytes: usize) -> Self {
        self.max_surface_bytes = max_surface_bytes;
        self
    }

    pub fn with_clear_rgba(mut self, clear: [u8; 4]) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> StrataResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read graphics options '{}'", path.display()))?;
        let opts = serde_json::from_str(&text)
            .with_context(|| format!("parse graphics options '{}'", path.display()))?;
        Ok(opts)
    }
}

/// Where draws currently land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// The display framebuffer owned by [`Graphics`].
    Display,
    /// A surface's own pixel store.
    Surface(SurfaceId),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GraphicsStats {
    pub surfaces_allocated: u64,
    pub bytes_allocated: u64,
    pub draw_calls: u64,
    pub copy_passes: u64,
    pub target_binds: u64,
    pub frames_presented: u64,
}

/// A presented frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha. Always `false` here.
    pub premultiplied: bool,
    /// 0-based index of this frame among presented frames.
    pub index: u64,
}

/// Immediate-mode drawing context.
///
/// Owns the display framebuffer, the active render target and the configuration every
/// surface operation reads. Operations take it explicitly; none of this is global.
pub struct Graphics {
    opts: GraphicsOpts,
    display: PixelStore,
    active: TargetId,
    next_surface: u64,
    stats: GraphicsStats,
}

impl Graphics {
    pub fn new(width: u32, height: u32, opts: GraphicsOpts) -> StrataResult<Self> {
        let mut display = PixelStore::alloc(width, height, opts.max_surface_bytes)?;
        display.fill(Color::from_array(opts.clear_rgba));
        tracing::debug!(width, height, ?opts, "graphics context created");
        Ok(Self {
            opts,
            display,
            active: TargetId::Display,
            next_surface: 0,
            stats: GraphicsStats::default(),
        })
    }

    pub fn opts(&self) -> &GraphicsOpts {
        &self.opts
    }

    pub fn stats(&self) -> GraphicsStats {
        self.stats.clone()
    }

    /// The target draws currently write into. Outside of an operation this is always
    /// [`TargetId::Display`].
    pub fn active_target(&self) -> TargetId {
        self.active
    }

    pub fn display(&self) -> &PixelStore {
        &self.display
    }

    pub(crate) fn display_mut(&mut self) -> &mut PixelStore {
        &mut self.display
    }

    /// Fill the display with the configured clear color.
    pub fn clear_display(&mut self) {
        let color = Color::from_array(self.opts.clear_rgba);
        let mut scope = self.bind_target(TargetId::Display);
        scope.display_mut().fill(color);
    }

    /// Draw a solid rectangle on the display. Out-of-range parts are clipped.
    pub fn fill_rect(&mut self, rect: IRect, color: Color, mode: BlendMode) {
        let mut scope = self.bind_target(TargetId::Display);
        blit_fill(scope.display_mut(), rect, color, mode.equation());
        scope.record_draw(1);
    }

    /// Hand the display contents to the presentation layer.
    pub fn present(&mut self) -> FrameRGBA {
        let index = self.stats.frames_presented;
        self.stats.frames_presented = self.stats.frames_presented.saturating_add(1);
        FrameRGBA {
            width: self.display.width(),
            height: self.display.height(),
            data: self.display.data().to_vec(),
            premultiplied: false,
            index,
        }
    }

    pub(crate) fn register_surface(&mut self, store: &PixelStore) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface = self.next_surface.saturating_add(1);
        self.stats.surfaces_allocated = self.stats.surfaces_allocated.saturating_add(1);
        self.stats.bytes_allocated = self
            .stats
            .bytes_allocated
            .saturating_add(store.byte_len() as u64);
        tracing::trace!(id = id.0, w = store.width(), h = store.height(), "surface allocated");
        id
    }

    /// Make `target` the active render target until the returned scope drops.
    pub(crate) fn bind_target(&mut self, target: TargetId) -> TargetScope<'_> {
        let previous = self.active;
        self.active = target;
        self.stats.target_binds = self.stats.target_binds.saturating_add(1);
        TargetScope {
            gfx: self,
            previous,
        }
    }

    pub(crate) fn record_draw(&mut self, passes: usize) {
        self.stats.draw_calls = self.stats.draw_calls.saturating_add(1);
        self.stats.copy_passes = self.stats.copy_passes.saturating_add(passes as u64);
    }
}

/// Restores the previously active render target on drop, including early `?` returns.
pub(crate) struct TargetScope<'g> {
    gfx: &'g mut Graphics,
    previous: TargetId,
}

impl Deref for TargetScope<'_> {
    type Target = Graphics;

    fn deref(&self) -> &Graphics {
        self.gfx
    }
}

impl DerefMut for TargetScope<'_> {
    fn deref_mut(&mut self) -> &mut Graphics {
        self.gfx
    }
}

impl Drop for TargetScope<'_> {
    fn drop(&mut self) {
        self.gfx.active = self.previous;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
