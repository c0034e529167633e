use rayon::prelude::*;

use crate::foundation::error::{StudioError, StudioResult};
use crate::mesh::grid::GridMesh;
use crate::mesh::job::CancelToken;
use crate::mesh::pixels::PixelBuffer;
use crate::mesh::sampler;
use crate::mesh::transfer::GenMode;

/// Resolution and extent settings for relief synthesis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// World-space width of the generated plane; height follows the image aspect.
    pub world_width: f32,
    /// Column segments in [`GenMode::Standard`].
    pub standard_segments: u32,
    /// Column segments in [`GenMode::Human`] (finer, for facial detail).
    pub human_segments: u32,
    /// Largest grid accepted; tall, narrow images past this are rejected as invalid.
    pub max_vertices: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            world_width: 10.0,
            standard_segments: 250,
            human_segments: 350,
            max_vertices: 4_000_000,
        }
    }
}

impl SynthConfig {
    /// Check ranges.
    pub fn validate(&self) -> StudioResult<()> {
        if !(self.world_width.is_finite() && self.world_width > 0.0) {
            return Err(StudioError::validation("synth world_width must be > 0"));
        }
        if self.standard_segments == 0 || self.human_segments == 0 {
            return Err(StudioError::validation("synth segments must be >= 1"));
        }
        if self.max_vertices == 0 {
            return Err(StudioError::validation("synth max_vertices must be >= 1"));
        }
        Ok(())
    }

    /// Column segments for `mode`.
    pub fn segments_for(&self, mode: GenMode) -> u32 {
        match mode {
            GenMode::Standard => self.standard_segments,
            GenMode::Human => self.human_segments,
        }
    }
}

/// Build a displaced relief grid from `pixels`.
pub fn synthesize(
    pixels: &PixelBuffer,
    mode: GenMode,
    config: &SynthConfig,
) -> StudioResult<GridMesh> {
    synthesize_with_cancel(pixels, mode, config, &CancelToken::new())
}

/// [`synthesize`], checking `cancel` between rows.
///
/// A cancelled run fails with [`StudioError::Cancelled`] and yields no mesh.
#[tracing::instrument(skip(pixels, config, cancel), fields(w = pixels.width(), h = pixels.height()))]
pub fn synthesize_with_cancel(
    pixels: &PixelBuffer,
    mode: GenMode,
    config: &SynthConfig,
    cancel: &CancelToken,
) -> StudioResult<GridMesh> {
    config.validate()?;
    if pixels.width() == 0 || pixels.height() == 0 || pixels.as_bytes().is_empty() {
        return Err(StudioError::invalid_image("pixel source has no samples"));
    }

    let aspect = pixels.aspect_ratio();
    let segs_x = config.segments_for(mode);
    let segs_y_f = f64::from(segs_x) * aspect;
    let vertices = (f64::from(segs_x) + 1.0) * (segs_y_f.floor().max(1.0) + 1.0);
    if vertices > config.max_vertices as f64 {
        return Err(StudioError::invalid_image(format!(
            "{}x{} image needs {vertices} vertices at {segs_x} segments (limit {})",
            pixels.width(),
            pixels.height(),
            config.max_vertices
        )));
    }
    let segs_y = (segs_y_f.floor() as u32).max(1);
    let width = config.world_width;
    let height = (f64::from(width) * aspect) as f32;

    let mut grid = GridMesh::flat(width, height, segs_x, segs_y)?;
    let cols = grid.columns();

    grid.mesh
        .positions
        .par_chunks_mut(cols)
        .enumerate()
        .try_for_each(|(iy, row)| {
            if cancel.is_cancelled() {
                return Err(StudioError::cancelled("mesh synthesis cancelled"));
            }
            let v = iy as f64 / segs_y_f;
            for (ix, p) in row.iter_mut().enumerate() {
                let u = ix as f64 / f64::from(segs_x);
                if let Some(brightness) = sampler::sample(pixels, u, v) {
                    p.z = mode.displacement(brightness);
                }
            }
            Ok(())
        })?;

    if cancel.is_cancelled() {
        return Err(StudioError::cancelled("mesh synthesis cancelled"));
    }
    grid.mesh.recompute_normals();

    tracing::debug!(
        vertices = grid.mesh.vertex_count(),
        segs_x,
        segs_y,
        ?mode,
        "relief mesh synthesized"
    );
    Ok(grid)
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/synth.rs"]
mod tests;
