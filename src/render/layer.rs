use crate::blend::BlendMode;
use crate::foundation::error::StrataResult;
use crate::render::context::Graphics;
use crate::render::surface::{Drawable, Surface};

/// A blank render target for accumulating paint strokes.
#[derive(Debug)]
pub struct Layer {
    surface: Surface,
}

impl Layer {
    pub fn new(gfx: &mut Graphics, width: u32, height: u32) -> StrataResult<Self> {
        let surface = Surface::new(gfx, width, height)?;
        tracing::debug!(id = surface.id().get(), width, height, "layer created");
        Ok(Self { surface })
    }

    /// Composite this layer onto `target` exactly once.
    ///
    /// The layer is first isolated into a transparent scratch layer with [`BlendMode::None`],
    /// and the scratch layer is then drawn onto `target` with [`BlendMode::Alpha`]. Flattening
    /// several layers in sequence gives the same pixels as source-over of each in turn.
    #[tracing::instrument(skip_all, fields(src = self.surface.id().get(), dst = target.surface.id().get()))]
    pub fn flatten_to(&self, gfx: &mut Graphics, target: &mut Layer) -> StrataResult<()> {
        let mut scratch = Layer::new(gfx, self.width(), self.height())?;
        self.render_to(gfx, &mut scratch, 0, 0, BlendMode::None)?;
        scratch.render_to(gfx, target, 0, 0, BlendMode::Alpha)
    }
}

impl Drawable for Layer {
    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
