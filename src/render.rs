//! Surfaces, the drawing context and the copy primitives behind them.

pub(crate) mod blit;
pub mod context;
pub mod layer;
pub mod store;
pub mod surface;
pub mod texture;
pub mod wrap;
