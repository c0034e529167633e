use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{StudioError, StudioResult};

/// Immutable straight-alpha RGBA8 pixel grid, row-major with row 0 at the image top.
///
/// Cloning is cheap; the sample storage is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba8: Arc<[u8]>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 samples. Fails on zero dimensions or a length mismatch.
    pub fn new(width: u32, height: u32, rgba8: impl Into<Arc<[u8]>>) -> StudioResult<Self> {
        let rgba8 = rgba8.into();
        if width == 0 || height == 0 {
            return Err(StudioError::invalid_image(format!(
                "pixel buffer must be non-empty (got {width}x{height})"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| StudioError::invalid_image("pixel buffer dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(StudioError::invalid_image(format!(
                "pixel buffer length {} does not match {width}x{height} RGBA8 ({expected})",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8,
        })
    }

    /// Solid-color buffer, mostly useful for tests and previews.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> StudioResult<Self> {
        let n = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `height / width`.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    /// Raw RGBA8 samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8
    }

    /// RGBA of the pixel at `(col, row)`, or `None` outside the grid.
    pub fn pixel(&self, col: u32, row: u32) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = ((row as usize) * (self.width as usize) + col as usize) * 4;
        let px = self.rgba8.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode an encoded image (PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> StudioResult<PixelBuffer> {
    if bytes.is_empty() {
        return Err(StudioError::invalid_image("image byte stream is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| StudioError::invalid_image(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/pixels.rs"]
mod tests;
