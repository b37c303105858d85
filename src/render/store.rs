use crate::foundation::core::Color;
use crate::foundation::error::{StrataError, StrataResult};

/// Backing pixels of a surface: straight-alpha RGBA8, tightly packed, row-major.
///
/// Not `Clone`: a store has exactly one owner, and dropping the owner releases it.
#[derive(Debug)]
pub struct PixelStore {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Byte length of a `width x height` RGBA8 buffer, or an allocation error when it overflows or
/// exceeds `max_bytes`.
pub(crate) fn byte_len(width: u32, height: u32, max_bytes: usize) -> StrataResult<usize> {
    if width == 0 || height == 0 {
        return Err(StrataError::invalid_argument(format!(
            "surface dimensions must be > 0 (got {width}x{height})"
        )));
    }
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or_else(|| StrataError::allocation(format!("{width}x{height} surface overflows")))?;
    if len > max_bytes {
        return Err(StrataError::allocation(format!(
            "{width}x{height} surface needs {len} bytes, limit is {max_bytes}"
        )));
    }
    Ok(len)
}

impl PixelStore {
    /// Allocate a fully transparent store.
    pub(crate) fn alloc(width: u32, height: u32, max_bytes: usize) -> StrataResult<Self> {
        let len = byte_len(width, height, max_bytes)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            StrataError::allocation(format!("reserve {len} bytes for {width}x{height}: {e}"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Adopt an existing RGBA8 buffer.
    pub(crate) fn from_vec(
        width: u32,
        height: u32,
        data: Vec<u8>,
        max_bytes: usize,
    ) -> StrataResult<Self> {
        let len = byte_len(width, height, max_bytes)?;
        if data.len() != len {
            return Err(StrataError::invalid_argument(format!(
                "expected {len} bytes for {width}x{height} rgba8, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_image(img: image::RgbaImage, max_bytes: usize) -> StrataResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_vec(width, height, img.into_raw(), max_bytes)
    }

    /// Copy into a freshly reserved store of the same size.
    pub(crate) fn try_clone(&self) -> StrataResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len()).map_err(|e| {
            StrataError::allocation(format!(
                "reserve {} bytes for {}x{} copy: {e}",
                self.data.len(),
                self.width,
                self.height
            ))
        })?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    pub(crate) fn fill(&mut self, color: Color) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
            image::Rgba([
                self.data[idx],
                self.data[idx + 1],
                self.data[idx + 2],
                self.data[idx + 3],
            ])
        })
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/store.rs"]
mod tests;
