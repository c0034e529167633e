use crate::foundation::core::{ObjectId, PLANE_REST_ROT_X, Pose, Rgb8, Vec3};
use crate::foundation::error::{StudioError, StudioResult};
use crate::mesh::grid::{GridMesh, MeshData};

/// Largest bounding-box dimension an external asset is scaled to on import.
pub const EXTERNAL_FIT_SIZE: f32 = 5.0;

/// Offset applied to a duplicate so it does not overlap its source.
pub const DUPLICATE_OFFSET_X: f32 = 2.0;

/// Surface parameters the host maps onto its material system.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    /// Base color.
    pub color: Rgb8,
    /// Roughness in `[0, 1]`.
    pub roughness: f32,
    /// Metalness in `[0, 1]`.
    pub metalness: f32,
    /// Emissive highlight; black means none. Driven by the mood engine.
    pub emissive: Rgb8,
    /// Render as wireframe.
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Rgb8::WHITE,
            roughness: 0.5,
            metalness: 0.1,
            emissive: Rgb8::BLACK,
            wireframe: false,
        }
    }
}

/// One renderable piece of an object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Part {
    /// Part label (e.g. node name from the source asset).
    pub name: String,
    /// Owned geometry, if any. Parts without geometry are pure grouping nodes.
    pub mesh: Option<MeshData>,
    /// Surface parameters.
    pub material: Material,
}

impl Part {
    /// Part that owns `mesh`.
    pub fn with_mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            material: Material::default(),
        }
    }

    /// Grouping part with no geometry.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            material: Material::default(),
        }
    }

    /// Whether the host would render this part.
    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Provenance class of an object; drives plane-only animation terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Relief plane produced by mesh synthesis.
    GeneratedPlane,
    /// Externally loaded, possibly multi-part asset.
    ExternalAsset,
}

/// Animation anchor captured on the first animated tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BasePose {
    /// Rest X.
    pub x: f32,
    /// Rest Y.
    pub y: f32,
}

/// A scene entry: geometry, materials, pose, and animation anchor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneObject {
    /// Stable identity.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Provenance class.
    pub kind: ObjectKind,
    /// Root part; owns geometry for generated planes.
    pub root: Part,
    /// Immediate sub-parts (external assets).
    pub children: Vec<Part>,
    /// Lazily captured animation anchor.
    pub base_pose: Option<BasePose>,
    /// Current transform.
    pub pose: Pose,
    /// Opaque provenance: embedded image reference or asset path.
    pub source: String,
    original_positions: Option<Vec<Vec3>>,
}

impl SceneObject {
    /// Wrap a synthesized relief grid. The finished positions are snapshotted for reset.
    pub fn generated(
        id: ObjectId,
        name: impl Into<String>,
        grid: GridMesh,
        source: impl Into<String>,
    ) -> Self {
        let original = grid.mesh.positions.clone();
        Self {
            id,
            name: name.into(),
            kind: ObjectKind::GeneratedPlane,
            root: Part::with_mesh("relief", grid.mesh),
            children: Vec::new(),
            base_pose: None,
            pose: Pose::plane_rest(),
            source: source.into(),
            original_positions: Some(original),
        }
    }

    /// Wrap an externally loaded asset made of `parts`.
    pub fn external(
        id: ObjectId,
        name: impl Into<String>,
        parts: Vec<Part>,
        source: impl Into<String>,
    ) -> Self {
        let mut obj = Self {
            id,
            name: name.into(),
            kind: ObjectKind::ExternalAsset,
            root: Part::group("root"),
            children: parts,
            base_pose: None,
            pose: Pose::default(),
            source: source.into(),
            original_positions: None,
        };
        obj.original_positions = obj.geometry().map(|m| m.positions.clone());
        obj
    }

    /// Whether this is a synthesized relief plane.
    pub fn is_plane(&self) -> bool {
        self.kind == ObjectKind::GeneratedPlane
    }

    /// Snapshot of the geometry taken at creation.
    pub fn original_positions(&self) -> Option<&[Vec3]> {
        self.original_positions.as_deref()
    }

    /// Geometry addressed by modifiers: the root mesh, else the first immediate child
    /// part that owns one.
    pub fn geometry(&self) -> Option<&MeshData> {
        self.root
            .mesh
            .as_ref()
            .or_else(|| self.children.iter().find_map(|p| p.mesh.as_ref()))
    }

    /// Mutable [`SceneObject::geometry`].
    pub fn geometry_mut(&mut self) -> Option<&mut MeshData> {
        if self.root.mesh.is_some() {
            return self.root.mesh.as_mut();
        }
        self.children.iter_mut().find_map(|p| p.mesh.as_mut())
    }

    /// Root and children that own geometry.
    pub fn renderable_parts_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        std::iter::once(&mut self.root)
            .chain(self.children.iter_mut())
            .filter(|p| p.is_renderable())
    }

    /// Root and children that own geometry.
    pub fn renderable_parts(&self) -> impl Iterator<Item = &Part> {
        std::iter::once(&self.root)
            .chain(self.children.iter())
            .filter(|p| p.is_renderable())
    }

    /// Restore rest rotation and unit scale, keeping position.
    pub fn reset_pose(&mut self) {
        let rot_x = if self.is_plane() { PLANE_REST_ROT_X } else { 0.0 };
        self.pose.rotation = Vec3::new(rot_x, 0.0, 0.0);
        self.pose.scale = Vec3::ONE;
    }

    /// Restore geometry from the creation snapshot and recompute normals.
    pub fn reset_geometry(&mut self) -> StudioResult<()> {
        let id = self.id;
        let Some(original) = self.original_positions.clone() else {
            return Err(StudioError::unsupported_geometry(format!(
                "object {id} has no geometry snapshot"
            )));
        };
        let mesh = self.geometry_mut().ok_or_else(|| {
            StudioError::unsupported_geometry(format!("object {id} has no vertex buffer"))
        })?;
        mesh.validate()?;
        if mesh.positions.len() != original.len() {
            return Err(StudioError::validation(format!(
                "object {id} vertex count changed ({} -> {})",
                original.len(),
                mesh.positions.len()
            )));
        }
        mesh.positions = original;
        mesh.recompute_normals();
        Ok(())
    }

    /// Independent copy under a new id, shifted along X with its own materials.
    pub fn duplicate(&self, id: ObjectId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.name = format!("{} (Copy)", self.name);
        copy.pose.position.x += DUPLICATE_OFFSET_X;
        copy.base_pose = None;
        copy
    }

    /// Scale uniformly so the largest bounding dimension is [`EXTERNAL_FIT_SIZE`], center
    /// horizontally on the origin, and rest the bottom on `y = 0`.
    ///
    /// No-op for objects without geometry or with zero extent.
    pub fn fit_to_floor(&mut self) {
        let Some((lo, hi)) = self.combined_bounds() else {
            return;
        };
        let size = hi - lo;
        let max_dim = size.max_element();
        if !(max_dim.is_finite() && max_dim > 0.0) {
            return;
        }
        let factor = EXTERNAL_FIT_SIZE / max_dim;
        let center = (lo + hi) * 0.5;
        self.pose.scale = Vec3::splat(factor);
        self.pose.position = -center * factor;
        self.pose.position.y += size.y * factor * 0.5;
    }

    fn combined_bounds(&self) -> Option<(Vec3, Vec3)> {
        self.renderable_parts()
            .filter_map(|p| p.mesh.as_ref().and_then(MeshData::bounds))
            .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
