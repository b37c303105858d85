use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{StrataError, StrataResult};

/// Decoded raster in straight-alpha RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

impl DecodedImage {
    /// Build from premultiplied RGBA8, undoing the premultiplication.
    pub fn from_premultiplied(width: u32, height: u32, mut rgba8: Vec<u8>) -> StrataResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8.len() != expected {
            return Err(StrataError::invalid_argument(format!(
                "expected {expected} bytes for {width}x{height} rgba8, got {}",
                rgba8.len()
            )));
        }
        unpremultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }
}

pub fn decode_image(bytes: &[u8]) -> StrataResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StrataError::codec(format!("decode image from memory: {e}")))?;
    Ok(into_decoded(dyn_img))
}

pub fn decode_file(path: &Path) -> StrataResult<DecodedImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let dyn_img = image::load_from_memory(&bytes)
        .map_err(|e| StrataError::codec(format!("decode '{}': {e}", path.display())))?;
    Ok(into_decoded(dyn_img))
}

fn into_decoded(dyn_img: image::DynamicImage) -> DecodedImage {
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    }
}

/// Encode straight-alpha RGBA8 pixels as a PNG file.
pub fn encode_rgba8_file(pixels: &[u8], width: u32, height: u32, path: &Path) -> StrataResult<()> {
    image::save_buffer_with_format(
        path,
        pixels,
        width,
        height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| StrataError::codec(format!("encode '{}': {e}", path.display())))
}

pub fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/codec.rs"]
mod tests;
