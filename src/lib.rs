//! Relief is a procedural mesh engine that turns images into animated 3D reliefs.
//!
//! The crate covers the engine half of an interactive relief editor: the host application
//! owns the UI, the renderer and asset import, and hands the engine pixels and meshes.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded image bytes -> [`PixelBuffer`] ([`decode_image`])
//! 2. **Synthesize**: `PixelBuffer + GenMode -> GridMesh`, a regular grid displaced by
//!    brightness ([`synthesize`]), optionally on the rayon pool ([`SynthesisJob`])
//! 3. **Edit**: twist, taper and flip modifiers act on the vertex buffers of a
//!    [`SceneObject`] ([`apply_modifier`])
//! 4. **Animate**: every frame [`tick`] derives object and camera poses from the active
//!    [`Action`], elapsed time and each object's base pose
//! 5. **Theme**: [`set_mood`] recolors the mood light and per-part emissive highlights
//!
//! [`Studio`] wires all of the above into one session object with object management.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No globals**: all session state travels through [`Studio`] or an explicit [`TickCtx`].
//! - **Deterministic-by-default**: randomness comes from a [`RandomSource`]; with a seeded
//!   [`Rng64`] and a [`FixedStepClock`] a session replays bit-identically.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod anim;
mod config;
mod foundation;
mod geometry;
mod mesh;
mod mood;
mod scene;
mod session;

pub use anim::camera::{CameraPose, CameraRig};
pub use anim::machine::{AnimConfig, ObjectPose, TickCtx, TickOutput, reset_plane_tilt, tick};
pub use anim::state::{Action, AnimationState, CameraMode};
pub use config::StudioConfig;
pub use foundation::core::{ObjectId, PLANE_REST_ROT_X, Pose, Rgb8, Vec3};
pub use foundation::error::{StudioError, StudioResult};
pub use foundation::math::{RandomSource, Rng64, ScriptedRandom};
pub use foundation::time::{FixedStepClock, Fps, FrameIndex, TickTime};
pub use geometry::modifier::{
    ModifierKind, TAPER_RATE, TWIST_RATE, apply_modifier, taper, twist, twist_inverse,
};
pub use mesh::grid::{GridMesh, MeshData};
pub use mesh::job::{CancelToken, JobPoll, SynthesisJob};
pub use mesh::pixels::{PixelBuffer, decode_image};
pub use mesh::sampler::{brightness_at, sample as sample_heightfield};
pub use mesh::synth::{SynthConfig, synthesize, synthesize_with_cancel};
pub use mesh::transfer::{GenMode, HUMAN_BLACK_FLOOR};
pub use mood::{ANGRY_SHAKE, MOOD_LIGHT_INTENSITY, Mood, MoodLight, set_mood};
pub use scene::arena::Scene;
pub use scene::object::{
    BasePose, DUPLICATE_OFFSET_X, EXTERNAL_FIT_SIZE, Material, ObjectKind, Part, SceneObject,
};
pub use session::studio::{JobId, JobOutcome, MaterialPatch, Studio};
