//! Strata is an immediate-mode 2D pixel compositing engine.
//!
//! Surfaces are off-screen render targets drawn into one another through fixed-function blend
//! equations:
//!
//! - [`Texture`]: a surface with a CPU pixel snapshot, alpha masking and rescaling
//! - [`Layer`]: a surface for stacking paint strokes, flattened with [`Layer::flatten_to`]
//! - [`Graphics`]: the drawing context that owns the display and the active render target
//!
//! All pixels are straight (non-premultiplied) RGBA8.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod blend;
pub mod camera;
pub mod render;

pub use crate::assets::codec::DecodedImage;
pub use crate::blend::{BlendEquation, BlendFactor, BlendMode, BlendOp, resolve};
pub use crate::camera::Camera;
pub use crate::foundation::core::{Color, IRect, Point, SurfaceId, Vec2};
pub use crate::foundation::error::{StrataError, StrataResult};
pub use crate::render::context::{
    FrameRGBA, Graphics, GraphicsOpts, GraphicsStats, ScaleMode, TargetId,
};
pub use crate::render::layer::Layer;
pub use crate::render::store::PixelStore;
pub use crate::render::surface::{DebugSamples, Drawable, Surface};
pub use crate::render::texture::Texture;
pub use crate::render::wrap::{CopyPass, CopyPasses, WrappingSampler};
