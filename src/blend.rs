//! Fixed-function blend equations.
//!
//! Every [`BlendMode`] resolves to a constant [`BlendEquation`]: a `(src factor, dst factor, op)`
//! triple for the color channels and another for alpha. Pixels entering an equation are straight
//! (non-premultiplied) RGBA8.

use std::fmt;

use crate::foundation::math::{lerp_sum_div255, mul_div255_u8};

use BlendFactor::{DstAlpha, DstColor, One, OneMinusSrcAlpha, SrcAlpha, Zero};

/// Named compositing mode applied for the duration of a single draw call.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Overwrite the destination, alpha included.
    None,
    /// Straight-alpha source-over.
    #[default]
    Alpha,
    /// Add alpha-weighted source color; destination alpha is kept.
    Additive,
    /// Per-channel product, alpha included.
    Multiply,
    /// Blend color, but replace destination alpha with source alpha.
    ///
    /// Used when stamping a brush whose own alpha must define the result exactly, so repeated
    /// stamps never accumulate alpha.
    AlphaPreserve,
    /// Source-over with `One / OneMinusSrcAlpha` alpha accumulation.
    ///
    /// Superseded for layer stacking by [`crate::Layer::flatten_to`]; kept for callers that
    /// composite straight-alpha strokes in a single pass.
    LayerComposite,
}

impl BlendMode {
    pub const ALL: [BlendMode; 6] = [
        BlendMode::None,
        BlendMode::Alpha,
        BlendMode::Additive,
        BlendMode::Multiply,
        BlendMode::AlphaPreserve,
        BlendMode::LayerComposite,
    ];

    /// Resolve this mode to its constant equation.
    pub const fn equation(self) -> BlendEquation {
        resolve(self)
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlendMode::None => "none",
            BlendMode::Alpha => "alpha",
            BlendMode::Additive => "additive",
            BlendMode::Multiply => "multiply",
            BlendMode::AlphaPreserve => "alpha_preserve",
            BlendMode::LayerComposite => "layer_composite",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    SrcColor,
    DstColor,
    DstAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendOp {
    Add,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlendEquation {
    pub color_src: BlendFactor,
    pub color_dst: BlendFactor,
    pub color_op: BlendOp,
    pub alpha_src: BlendFactor,
    pub alpha_dst: BlendFactor,
    pub alpha_op: BlendOp,
}

impl BlendEquation {
    const fn new(
        color: (BlendFactor, BlendFactor),
        alpha: (BlendFactor, BlendFactor),
    ) -> Self {
        Self {
            color_src: color.0,
            color_dst: color.1,
            color_op: BlendOp::Add,
            alpha_src: alpha.0,
            alpha_dst: alpha.1,
            alpha_op: BlendOp::Add,
        }
    }

    /// Blend one straight-alpha source pixel over one destination pixel.
    pub fn apply(&self, src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
        let mut out = [0u8; 4];
        for i in 0..3 {
            let fs = factor_value(self.color_src, src, dst, i);
            let fd = factor_value(self.color_dst, src, dst, i);
            out[i] = combine(self.color_op, src[i], fs, dst[i], fd);
        }
        let fs = factor_value(self.alpha_src, src, dst, 3);
        let fd = factor_value(self.alpha_dst, src, dst, 3);
        out[3] = combine(self.alpha_op, src[3], fs, dst[3], fd);
        out
    }

    /// Blend `src` over `dst` pixel-by-pixel. Both slices hold tightly packed RGBA8.
    pub(crate) fn apply_row(&self, dst: &mut [u8], src: &[u8]) {
        if *self == NONE {
            dst.copy_from_slice(src);
            return;
        }
        for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            let out = self.apply([s[0], s[1], s[2], s[3]], [d[0], d[1], d[2], d[3]]);
            d.copy_from_slice(&out);
        }
    }
}

const NONE: BlendEquation = BlendEquation::new((One, Zero), (One, Zero));
const ALPHA: BlendEquation =
    BlendEquation::new((SrcAlpha, OneMinusSrcAlpha), (One, OneMinusSrcAlpha));
const ADDITIVE: BlendEquation = BlendEquation::new((SrcAlpha, One), (Zero, One));
const MULTIPLY: BlendEquation = BlendEquation::new((DstColor, Zero), (DstAlpha, Zero));
const ALPHA_PRESERVE: BlendEquation =
    BlendEquation::new((One, OneMinusSrcAlpha), (One, Zero));
const LAYER_COMPOSITE: BlendEquation =
    BlendEquation::new((SrcAlpha, OneMinusSrcAlpha), (One, OneMinusSrcAlpha));

/// Map a blend mode to its equation. Total and side-effect free.
pub const fn resolve(mode: BlendMode) -> BlendEquation {
    match mode {
        BlendMode::None => NONE,
        BlendMode::Alpha => ALPHA,
        BlendMode::Additive => ADDITIVE,
        BlendMode::Multiply => MULTIPLY,
        BlendMode::AlphaPreserve => ALPHA_PRESERVE,
        BlendMode::LayerComposite => LAYER_COMPOSITE,
    }
}

fn factor_value(f: BlendFactor, src: [u8; 4], dst: [u8; 4], channel: usize) -> u8 {
    match f {
        BlendFactor::Zero => 0,
        BlendFactor::One => 255,
        BlendFactor::SrcAlpha => src[3],
        BlendFactor::OneMinusSrcAlpha => 255 - src[3],
        BlendFactor::SrcColor => src[channel],
        BlendFactor::DstColor => dst[channel],
        BlendFactor::DstAlpha => dst[3],
    }
}

fn combine(op: BlendOp, s: u8, fs: u8, d: u8, fd: u8) -> u8 {
    match op {
        BlendOp::Add => match (fs, fd) {
            (255, 0) => s,
            (0, 255) => d,
            (_, 0) => mul_div255_u8(u16::from(s), u16::from(fs)),
            _ => lerp_sum_div255(s, fs, d, fd),
        },
    }
}

#[cfg(test)]
#[path = "../tests/unit/blend.rs"]
mod tests;
