use crate::anim::camera::{CameraPose, CameraRig};
use crate::anim::state::{Action, AnimationState, CameraMode};
use crate::foundation::core::{ObjectId, PLANE_REST_ROT_X, Pose, Vec3};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::RandomSource;
use crate::foundation::time::TickTime;
use crate::scene::object::{BasePose, SceneObject};

/// Tunables for camera effects.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimConfig {
    /// Per-tick geometric decay factor of camera shake.
    pub shake_decay: f32,
    /// Intensity below which shake snaps to zero.
    pub shake_epsilon: f32,
    /// Intensity set when a fight jolt shakes the camera.
    pub fight_shake: f32,
    /// Cinematic orbit radius.
    pub orbit_radius: f32,
    /// Cinematic orbit angular rate (radians per second).
    pub orbit_rate: f32,
}

impl Default for AnimConfig {
    fn default() -> Self {
        Self {
            shake_decay: 0.9,
            shake_epsilon: 1e-3,
            fight_shake: 0.2,
            orbit_radius: 12.0,
            orbit_rate: 0.2,
        }
    }
}

impl AnimConfig {
    /// Check ranges.
    pub fn validate(&self) -> StudioResult<()> {
        if !(0.0..1.0).contains(&self.shake_decay) {
            return Err(StudioError::validation("anim shake_decay must be in [0, 1)"));
        }
        if !(self.shake_epsilon >= 0.0) {
            return Err(StudioError::validation("anim shake_epsilon must be >= 0"));
        }
        if !(self.fight_shake >= 0.0) {
            return Err(StudioError::validation("anim fight_shake must be >= 0"));
        }
        if !(self.orbit_radius.is_finite() && self.orbit_rate.is_finite()) {
            return Err(StudioError::validation("anim orbit parameters must be finite"));
        }
        Ok(())
    }
}

/// Everything a tick reads or writes besides the objects themselves.
pub struct TickCtx<'a> {
    /// Session animation controls.
    pub state: &'a mut AnimationState,
    /// Camera rig.
    pub camera: &'a mut CameraRig,
    /// Host-supplied randomness.
    pub rng: &'a mut dyn RandomSource,
    /// Tunables.
    pub config: &'a AnimConfig,
}

/// Pose of one object after a tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectPose {
    /// Object identity.
    pub id: ObjectId,
    /// Transform to render with.
    pub pose: Pose,
}

/// Everything the renderer needs after a tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickOutput {
    /// One pose per object, in scene order.
    pub object_poses: Vec<ObjectPose>,
    /// Camera transform.
    pub camera: CameraPose,
    /// Whether anything advanced this tick.
    pub advanced: bool,
}

/// Advance one frame.
///
/// Poses are sampled from `time.elapsed`, the session state and each object's base pose;
/// the camera shake is the only term carried from tick to tick. When paused or with no
/// objects nothing changes and the previous poses are returned.
pub fn tick(ctx: &mut TickCtx<'_>, objects: &mut [SceneObject], time: TickTime) -> TickOutput {
    if !ctx.state.playing || objects.is_empty() {
        return TickOutput {
            object_poses: collect_poses(objects),
            camera: ctx.camera.last_pose(),
            advanced: false,
        };
    }

    let t = time.elapsed;
    let camera = advance_camera(ctx, t);

    let action = ctx.state.action;
    let speed = f64::from(ctx.state.speed());
    for obj in objects.iter_mut() {
        let base = *obj.base_pose.get_or_insert(BasePose {
            x: obj.pose.position.x,
            y: obj.pose.position.y,
        });
        animate_object(ctx, obj, base, action, t, speed);
    }

    TickOutput {
        object_poses: collect_poses(objects),
        camera,
        advanced: true,
    }
}

fn collect_poses(objects: &[SceneObject]) -> Vec<ObjectPose> {
    objects
        .iter()
        .map(|o| ObjectPose {
            id: o.id,
            pose: o.pose,
        })
        .collect()
}

fn advance_camera(ctx: &mut TickCtx<'_>, t: f64) -> CameraPose {
    let intensity = ctx.state.camera_shake;
    let offset = if intensity > 0.0 {
        let dx = (ctx.rng.next_f64() - 0.5) as f32 * intensity;
        let dy = (ctx.rng.next_f64() - 0.5) as f32 * intensity;
        let decayed = intensity * ctx.config.shake_decay;
        ctx.state.camera_shake = if decayed < ctx.config.shake_epsilon {
            0.0
        } else {
            decayed
        };
        Vec3::new(dx, dy, 0.0)
    } else {
        Vec3::ZERO
    };
    ctx.camera.set_shake_offset(offset);

    let pose = match ctx.state.camera_mode {
        CameraMode::Static => CameraPose {
            position: ctx.camera.base + offset,
            look_at: ctx.camera.target,
        },
        CameraMode::Cinematic => {
            let angle = t * f64::from(ctx.config.orbit_rate);
            let r = f64::from(ctx.config.orbit_radius);
            let orbit = Vec3::new(
                (angle.sin() * r) as f32,
                ctx.camera.base.y,
                (angle.cos() * r) as f32,
            );
            CameraPose {
                position: orbit + offset,
                look_at: Some(Vec3::ZERO),
            }
        }
    };
    ctx.camera.commit(pose)
}

fn animate_object(
    ctx: &mut TickCtx<'_>,
    obj: &mut SceneObject,
    base: BasePose,
    action: Action,
    t: f64,
    speed: f64,
) {
    let base_x = f64::from(base.x);
    let base_y = f64::from(base.y);
    let is_plane = obj.is_plane();
    let pose = &mut obj.pose;

    match action {
        Action::Idle => {
            pose.position.y = (base_y + (t * 1.5).sin() * 0.05) as f32;
        }
        Action::Walk => {
            let phase = t * 4.0 * speed;
            pose.position.y = (base_y + phase.sin().abs() * 0.4) as f32;
            pose.rotation.z = (phase.sin() * 0.1) as f32;
            if is_plane {
                pose.rotation.x = PLANE_REST_ROT_X + ((t * 8.0 * speed).sin() * 0.05) as f32;
            }
        }
        Action::Run => {
            pose.position.y = (base_y + (t * 8.0 * speed).sin().abs() * 0.8) as f32;
            pose.rotation.z = ((t * 6.0 * speed).sin() * 0.15) as f32;
            if is_plane {
                pose.rotation.x = PLANE_REST_ROT_X - 0.3;
            }
        }
        Action::Fight => {
            pose.position.x = (base_x + (ctx.rng.next_f64() - 0.5) * 0.1) as f32;
            let jolt = if ctx.rng.next_f64() > 0.9 { 0.2 } else { 0.0 };
            pose.rotation.z = ((t * 3.0).sin() * 0.2 + jolt) as f32;
            if ctx.rng.next_f64() > 0.99 {
                ctx.state.trigger_shake(ctx.config.fight_shake);
            }
        }
        Action::Shake => {
            pose.position.y = (base_y + (t * 20.0).sin() * 0.05) as f32;
        }
        Action::Vibe => {
            let s = (1.0 + (t * 7.0 * speed).sin() * 0.02) as f32;
            // Keep per-axis sign so a flipped object stays flipped.
            pose.scale = Vec3::new(
                s.copysign(pose.scale.x),
                s.copysign(pose.scale.y),
                s.copysign(pose.scale.z),
            );
        }
    }
}

/// Put generated planes back at their rest tilt, as done whenever the action changes.
pub fn reset_plane_tilt(objects: &mut [SceneObject]) {
    for obj in objects.iter_mut().filter(|o| o.is_plane()) {
        obj.pose.rotation.x = PLANE_REST_ROT_X;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/machine.rs"]
mod tests;
