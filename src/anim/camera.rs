use crate::foundation::core::Vec3;

/// Camera transform emitted to the host each tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera should face, when the engine dictates one.
    pub look_at: Option<Vec3>,
}

/// Engine-side camera state.
///
/// `base` is owned by the host (orbit controls, user moves); the engine only layers
/// the cinematic orbit and the shake offset on top of it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraRig {
    /// Host-controlled resting position.
    pub base: Vec3,
    /// Host-controlled look-at target for static mode.
    pub target: Option<Vec3>,
    shake_offset: Vec3,
    last: CameraPose,
}

impl CameraRig {
    /// Rig resting at `base`.
    pub fn new(base: Vec3) -> Self {
        Self {
            base,
            target: None,
            shake_offset: Vec3::ZERO,
            last: CameraPose {
                position: base,
                look_at: None,
            },
        }
    }

    /// Pose emitted by the most recent playing tick.
    pub fn last_pose(&self) -> CameraPose {
        self.last
    }

    /// Current shake offset.
    pub fn shake_offset(&self) -> Vec3 {
        self.shake_offset
    }

    pub(crate) fn set_shake_offset(&mut self, offset: Vec3) {
        self.shake_offset = offset;
    }

    pub(crate) fn commit(&mut self, pose: CameraPose) -> CameraPose {
        self.last = pose;
        pose
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 8.0, 12.0))
    }
}
