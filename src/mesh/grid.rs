use crate::foundation::core::Vec3;
use crate::foundation::error::{StudioError, StudioResult};

/// Triangle mesh with per-vertex normals.
///
/// When `indices` is `None`, consecutive position triples form triangles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshData {
    /// Vertex positions in object space.
    pub positions: Vec<Vec3>,
    /// Unit normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Optional triangle list indices.
    pub indices: Option<Vec<u32>>,
}

impl MeshData {
    /// Build a mesh and compute its normals.
    pub fn new(positions: Vec<Vec3>, indices: Option<Vec<u32>>) -> StudioResult<Self> {
        let mut mesh = Self {
            normals: Vec::new(),
            positions,
            indices,
        };
        mesh.validate()?;
        mesh.recompute_normals();
        Ok(mesh)
    }

    /// Check that the index list forms whole triangles over existing vertices.
    ///
    /// The fields are public, so meshes built by hand or deserialized skip [`MeshData::new`];
    /// call this before trusting their topology.
    pub fn validate(&self) -> StudioResult<()> {
        let Some(idx) = &self.indices else {
            return Ok(());
        };
        if idx.len() % 3 != 0 {
            return Err(StudioError::validation(
                "mesh index count must be a multiple of 3",
            ));
        }
        if let Some(&bad) = idx.iter().find(|&&i| i as usize >= self.positions.len()) {
            return Err(StudioError::validation(format!(
                "mesh index {bad} out of range for {} vertices",
                self.positions.len()
            )));
        }
        Ok(())
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Recompute normals as the area-weighted average of adjacent face normals.
    ///
    /// Vertices with no (or only degenerate) adjacent faces get `+Z`. Triangles that
    /// reference a missing vertex are skipped.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        let mut accumulate = |i0: usize, i1: usize, i2: usize| {
            let (Some(&p0), Some(&p1), Some(&p2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                return;
            };
            // Unnormalized: magnitude is twice the triangle area.
            let face = (p1 - p0).cross(p2 - p0);
            acc[i0] += face;
            acc[i1] += face;
            acc[i2] += face;
        };

        match &self.indices {
            Some(idx) => {
                for tri in idx.chunks_exact(3) {
                    accumulate(tri[0] as usize, tri[1] as usize, tri[2] as usize);
                }
            }
            None => {
                let tris = self.positions.len() / 3;
                for t in 0..tris {
                    accumulate(3 * t, 3 * t + 1, 3 * t + 2);
                }
            }
        }

        self.normals = acc
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
            .collect();
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

/// Regular heightfield grid: `(segs_x + 1) * (segs_y + 1)` vertices, row-major.
///
/// Row 0 is the top edge (`y = +height/2`); column 0 the left edge (`x = -width/2`).
/// Topology depends only on the segment counts, never on displacement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridMesh {
    /// Column segments.
    pub segs_x: u32,
    /// Row segments.
    pub segs_y: u32,
    /// World-space extent along X.
    pub width: f32,
    /// World-space extent along Y.
    pub height: f32,
    /// Geometry.
    pub mesh: MeshData,
}

impl GridMesh {
    /// Flat grid centered on the origin with all `z = 0`.
    pub fn flat(width: f32, height: f32, segs_x: u32, segs_y: u32) -> StudioResult<Self> {
        if segs_x == 0 || segs_y == 0 {
            return Err(StudioError::validation("grid segments must be >= 1"));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(StudioError::validation("grid extent must be > 0"));
        }

        let cols = segs_x as usize + 1;
        let rows = segs_y as usize + 1;
        let seg_w = width / segs_x as f32;
        let seg_h = height / segs_y as f32;

        let mut positions = Vec::with_capacity(cols * rows);
        for iy in 0..rows {
            let y = height / 2.0 - iy as f32 * seg_h;
            for ix in 0..cols {
                positions.push(Vec3::new(ix as f32 * seg_w - width / 2.0, y, 0.0));
            }
        }

        let indices = grid_indices(segs_x, segs_y);
        let mesh = MeshData::new(positions, Some(indices))?;
        Ok(Self {
            segs_x,
            segs_y,
            width,
            height,
            mesh,
        })
    }

    /// Vertices per row.
    pub fn columns(&self) -> usize {
        self.segs_x as usize + 1
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.segs_y as usize + 1
    }

    /// Flat index of the vertex at `(ix, iy)`.
    pub fn vertex_index(&self, ix: usize, iy: usize) -> usize {
        iy * self.columns() + ix
    }
}

fn grid_indices(segs_x: u32, segs_y: u32) -> Vec<u32> {
    let cols = segs_x + 1;
    let mut out = Vec::with_capacity(segs_x as usize * segs_y as usize * 6);
    for iy in 0..segs_y {
        for ix in 0..segs_x {
            let a = ix + cols * iy;
            let b = ix + cols * (iy + 1);
            let c = (ix + 1) + cols * (iy + 1);
            let d = (ix + 1) + cols * iy;
            out.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/grid.rs"]
mod tests;
