use crate::foundation::error::{StudioError, StudioResult};
use crate::mesh::pixels::PixelBuffer;

/// Brightness of the pixel at `(col, row)`: mean of R, G, B in `[0, 255]`.
pub fn brightness_at(pixels: &PixelBuffer, col: u32, row: u32) -> Option<f32> {
    let [r, g, b, _a] = pixels.pixel(col, row)?;
    Some((f32::from(r) + f32::from(g) + f32::from(b)) / 3.0)
}

/// Brightness at normalized grid coordinates.
///
/// `u` maps to columns left to right; `v` is flipped so that `v = 1` reads the top image
/// row. The closed edges `u = 1` and `v = 0` read the last column and bottom row.
/// Coordinates outside `[0, 1]` (or NaN) return `None`, which callers treat as
/// "no displacement".
pub fn sample(pixels: &PixelBuffer, u: f64, v: f64) -> Option<f32> {
    let (col, row) = texel_index(pixels, u, v).ok()?;
    brightness_at(pixels, col, row)
}

fn texel_index(pixels: &PixelBuffer, u: f64, v: f64) -> StudioResult<(u32, u32)> {
    // NaN fails both range checks.
    if !((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v))
        || pixels.width() == 0
        || pixels.height() == 0
    {
        return Err(StudioError::out_of_range(format!(
            "uv ({u}, {v}) outside the {}x{} image",
            pixels.width(),
            pixels.height()
        )));
    }
    let last_col = pixels.width() - 1;
    let last_row = pixels.height() - 1;
    let col = ((u * f64::from(pixels.width())).floor() as u32).min(last_col);
    let row = (((1.0 - v) * f64::from(pixels.height())).floor() as u32).min(last_row);
    Ok((col, row))
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/sampler.rs"]
mod tests;
