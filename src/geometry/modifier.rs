use crate::foundation::core::Vec3;
use crate::foundation::error::{StudioError, StudioResult};
use crate::scene::object::SceneObject;

/// Twist rate in radians per unit of height.
pub const TWIST_RATE: f32 = 0.5;
/// Taper rate: relative width lost per unit of height.
pub const TAPER_RATE: f32 = 0.1;

/// On-demand geometric operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Helical rotation about Y, growing linearly with height.
    Twist,
    /// Narrow the silhouette with height.
    Taper,
    /// Mirror the object through its local Z (turns the relief inside out).
    FlipNormals,
}

/// Rotate each vertex's `(x, z)` about Y by `y * TWIST_RATE`.
///
/// Not idempotent: repeated calls keep winding.
pub fn twist(positions: &mut [Vec3]) {
    rotate_about_y(positions, TWIST_RATE);
}

/// Exact inverse of [`twist`] (up to float rounding).
pub fn twist_inverse(positions: &mut [Vec3]) {
    rotate_about_y(positions, -TWIST_RATE);
}

fn rotate_about_y(positions: &mut [Vec3], rate: f32) {
    for p in positions {
        let (sin, cos) = (p.y * rate).sin_cos();
        let x = p.x * cos - p.z * sin;
        let z = p.x * sin + p.z * cos;
        p.x = x;
        p.z = z;
    }
}

/// Scale x by `1 - y * TAPER_RATE`; y and z are untouched.
pub fn taper(positions: &mut [Vec3]) {
    for p in positions {
        p.x *= 1.0 - p.y * TAPER_RATE;
    }
}

/// Apply `kind` to `obj` in place.
///
/// Twist and taper edit the object's addressable geometry (root mesh, else the first
/// immediate child mesh) and recompute its normals. Objects without geometry are left
/// untouched and reported as [`StudioError::UnsupportedGeometry`]; geometry whose index
/// list does not fit its vertices is left untouched and reported as
/// [`StudioError::Validation`].
#[tracing::instrument(skip(obj), fields(id = %obj.id))]
pub fn apply_modifier(kind: ModifierKind, obj: &mut SceneObject) -> StudioResult<()> {
    let op: fn(&mut [Vec3]) = match kind {
        ModifierKind::Twist => twist,
        ModifierKind::Taper => taper,
        ModifierKind::FlipNormals => {
            obj.pose.scale.z = -obj.pose.scale.z;
            return Ok(());
        }
    };

    let id = obj.id;
    let Some(mesh) = obj.geometry_mut() else {
        tracing::warn!(?kind, "modifier target has no vertex buffer");
        return Err(StudioError::unsupported_geometry(format!(
            "cannot {kind:?} object {id}: no addressable vertex buffer"
        )));
    };
    if let Err(err) = mesh.validate() {
        tracing::warn!(?kind, %err, "modifier target has malformed topology");
        return Err(err);
    }

    op(&mut mesh.positions);
    mesh.recompute_normals();
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/modifier.rs"]
mod tests;
