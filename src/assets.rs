//! Image decode/encode at the edge of the engine.

pub mod codec;
