use std::time::{SystemTime, UNIX_EPOCH};

use crate::anim::camera::CameraRig;
use crate::anim::machine::{self, TickCtx, TickOutput};
use crate::anim::state::{Action, AnimationState, CameraMode};
use crate::config::StudioConfig;
use crate::foundation::core::{ObjectId, Rgb8};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::{RandomSource, Rng64};
use crate::foundation::time::{FixedStepClock, FrameIndex, TickTime};
use crate::geometry::modifier::{self, ModifierKind};
use crate::mesh::grid::GridMesh;
use crate::mesh::job::{JobPoll, SynthesisJob};
use crate::mesh::pixels::PixelBuffer;
use crate::mesh::synth::synthesize;
use crate::mesh::transfer::GenMode;
use crate::mood::{Mood, MoodLight};
use crate::scene::arena::Scene;
use crate::scene::object::{Part, SceneObject};

/// Handle of a background synthesis started with [`Studio::spawn_synthesis`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct JobId(pub u64);

/// Result of one finished background job, reported by [`Studio::poll_jobs`].
#[derive(Debug)]
pub struct JobOutcome {
    /// Which job finished.
    pub job: JobId,
    /// New object id, or why nothing was added.
    pub result: StudioResult<ObjectId>,
}

/// Partial material edit; `None` fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MaterialPatch {
    /// Base color.
    pub color: Option<Rgb8>,
    /// Roughness in `[0, 1]`.
    pub roughness: Option<f32>,
    /// Metalness in `[0, 1]`.
    pub metalness: Option<f32>,
    /// Wireframe toggle.
    pub wireframe: Option<bool>,
}

impl MaterialPatch {
    fn validate(&self) -> StudioResult<()> {
        for (name, v) in [("roughness", self.roughness), ("metalness", self.metalness)] {
            if let Some(v) = v
                && !(0.0..=1.0).contains(&v)
            {
                return Err(StudioError::validation(format!(
                    "material {name} must be in [0, 1] (got {v})"
                )));
            }
        }
        Ok(())
    }
}

struct PendingJob {
    id: JobId,
    source: String,
    job: SynthesisJob,
}

/// Editing session: the one context object every operation goes through.
///
/// Owns the scene arena, animation controls, camera rig, mood light, random source and
/// in-flight synthesis jobs. Nothing here is global; two studios never interact.
pub struct Studio {
    config: StudioConfig,
    scene: Scene,
    state: AnimationState,
    camera: CameraRig,
    light: MoodLight,
    rng: Box<dyn RandomSource>,
    clock: FixedStepClock,
    pending: Vec<PendingJob>,
    next_job: u64,
}

impl Studio {
    /// Session seeded from `config.seed`.
    pub fn new(config: StudioConfig) -> StudioResult<Self> {
        let rng = Rng64::new(config.seed);
        Self::with_random(config, Box::new(rng))
    }

    /// Session drawing randomness from a host-supplied source.
    pub fn with_random(config: StudioConfig, rng: Box<dyn RandomSource>) -> StudioResult<Self> {
        config.validate()?;
        let clock = FixedStepClock::new(config.fps()?);
        Ok(Self {
            camera: CameraRig::new(config.camera_base),
            config,
            scene: Scene::new(),
            state: AnimationState::default(),
            light: MoodLight::default(),
            rng,
            clock,
            pending: Vec::new(),
            next_job: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Scene arena.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Object by id.
    pub fn object(&self, id: ObjectId) -> StudioResult<&SceneObject> {
        self.scene.get(id)
    }

    /// Animation controls.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Camera rig.
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Camera rig, for host-driven moves of the base position.
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    /// Mood light.
    pub fn light(&self) -> &MoodLight {
        &self.light
    }

    /// Frame of the built-in fixed-step clock.
    pub fn frame(&self) -> FrameIndex {
        self.clock.frame()
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    fn next_generated_name(&self) -> String {
        format!("Gen Model {}", self.scene.len() + 1)
    }

    fn insert_generated(&mut self, grid: GridMesh, source: String) -> StudioResult<ObjectId> {
        let id = self.scene.allocate_id(Self::now_ms());
        let name = self.next_generated_name();
        let obj = SceneObject::generated(id, name, grid, source);
        self.scene.insert(obj)
    }

    /// Synthesize a relief plane from `pixels` on the calling thread and add it, selected.
    #[tracing::instrument(skip(self, pixels, source), fields(w = pixels.width(), h = pixels.height()))]
    pub fn add_generated(
        &mut self,
        pixels: &PixelBuffer,
        mode: GenMode,
        source: impl Into<String>,
    ) -> StudioResult<ObjectId> {
        let grid = synthesize(pixels, mode, &self.config.synth)?;
        let id = self.insert_generated(grid, source.into())?;
        tracing::debug!(%id, "added generated plane");
        Ok(id)
    }

    /// Add an externally loaded asset made of `parts`, selected.
    ///
    /// With `fit_external` enabled the asset is scaled to the standard size and rested on
    /// the floor.
    #[tracing::instrument(skip(self, name, parts, source), fields(parts = parts.len()))]
    pub fn add_external(
        &mut self,
        name: impl Into<String>,
        parts: Vec<Part>,
        source: impl Into<String>,
    ) -> StudioResult<ObjectId> {
        let id = self.scene.allocate_id(Self::now_ms());
        let mut obj = SceneObject::external(id, name, parts, source);
        if self.config.fit_external {
            obj.fit_to_floor();
        }
        self.scene.insert(obj)
    }

    /// Remove an object, cancelling nothing else.
    pub fn remove(&mut self, id: ObjectId) -> StudioResult<SceneObject> {
        self.scene.remove(id)
    }

    /// Copy an object under a new id and select the copy.
    pub fn duplicate(&mut self, id: ObjectId) -> StudioResult<ObjectId> {
        let new_id = self.scene.allocate_id(Self::now_ms());
        let copy = self.scene.get(id)?.duplicate(new_id);
        self.scene.insert(copy)
    }

    /// Change or clear the selection.
    pub fn select(&mut self, id: Option<ObjectId>) -> StudioResult<()> {
        self.scene.select(id)
    }

    /// Restore rest rotation and unit scale.
    pub fn reset_pose(&mut self, id: ObjectId) -> StudioResult<()> {
        self.scene.get_mut(id)?.reset_pose();
        Ok(())
    }

    /// Restore the creation-time geometry, undoing every modifier.
    pub fn reset_geometry(&mut self, id: ObjectId) -> StudioResult<()> {
        self.scene.get_mut(id)?.reset_geometry()
    }

    /// Switch the active action; generated planes return to their rest tilt.
    pub fn set_action(&mut self, action: Action) {
        self.state.action = action;
        machine::reset_plane_tilt(self.scene.objects_mut());
    }

    /// Set the speed multiplier (> 0).
    pub fn set_speed(&mut self, speed: f32) -> StudioResult<()> {
        self.state.set_speed(speed)
    }

    /// Flip play/pause and return the new `playing` flag.
    pub fn toggle_playing(&mut self) -> bool {
        self.state.playing = !self.state.playing;
        self.state.playing
    }

    /// Switch camera behavior.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.state.camera_mode = mode;
    }

    /// Edit the material of every renderable part of `id`.
    pub fn set_material(&mut self, id: ObjectId, patch: &MaterialPatch) -> StudioResult<()> {
        patch.validate()?;
        let obj = self.scene.get_mut(id)?;
        for part in obj.renderable_parts_mut() {
            let m = &mut part.material;
            if let Some(c) = patch.color {
                m.color = c;
            }
            if let Some(r) = patch.roughness {
                m.roughness = r;
            }
            if let Some(v) = patch.metalness {
                m.metalness = v;
            }
            if let Some(w) = patch.wireframe {
                m.wireframe = w;
            }
        }
        Ok(())
    }

    /// Set the relief height multiplier (pose `scale.z`), keeping a flip in place.
    pub fn set_height_scale(&mut self, id: ObjectId, height: f32) -> StudioResult<()> {
        if !(height.is_finite() && height > 0.0) {
            return Err(StudioError::validation(format!(
                "height scale must be > 0 (got {height})"
            )));
        }
        let obj = self.scene.get_mut(id)?;
        obj.pose.scale.z = height.copysign(obj.pose.scale.z);
        Ok(())
    }

    /// Start synthesizing `pixels` in the background. The plane is added by a later
    /// [`Studio::poll_jobs`] call.
    pub fn spawn_synthesis(
        &mut self,
        pixels: PixelBuffer,
        mode: GenMode,
        source: impl Into<String>,
    ) -> JobId {
        self.next_job += 1;
        let id = JobId(self.next_job);
        let job = SynthesisJob::spawn(pixels, mode, self.config.synth.clone());
        tracing::debug!(job = id.0, ?mode, "spawned synthesis job");
        self.pending.push(PendingJob {
            id,
            source: source.into(),
            job,
        });
        id
    }

    /// Cancel a pending job. Its result is discarded even if already computed.
    pub fn cancel_job(&mut self, id: JobId) -> StudioResult<()> {
        let job = self
            .pending
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StudioError::not_found(format!("synthesis job {}", id.0)))?;
        job.job.cancel();
        Ok(())
    }

    /// Number of jobs not yet collected by [`Studio::poll_jobs`].
    pub fn pending_jobs(&self) -> usize {
        self.pending.len()
    }

    /// Collect finished jobs, adding their planes to the scene in completion order.
    pub fn poll_jobs(&mut self) -> Vec<JobOutcome> {
        let mut outcomes = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());
        for mut p in std::mem::take(&mut self.pending) {
            match p.job.poll() {
                JobPoll::Pending => still_pending.push(p),
                JobPoll::Ready(res) => outcomes.push((p.id, p.source, res)),
            }
        }
        self.pending = still_pending;

        outcomes
            .into_iter()
            .map(|(job, source, res)| {
                let result = res.and_then(|grid| self.insert_generated(grid, source));
                if let Err(e) = &result {
                    tracing::debug!(job = job.0, error = %e, "synthesis job produced no object");
                }
                JobOutcome { job, result }
            })
            .collect()
    }

    /// Block until every pending job has finished, then collect them.
    pub fn wait_jobs(&mut self) -> Vec<JobOutcome> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .map(|p| {
                let result = p
                    .job
                    .wait()
                    .and_then(|grid| self.insert_generated(grid, p.source));
                JobOutcome { job: p.id, result }
            })
            .collect()
    }

    /// Run a vertex modifier on `id`.
    pub fn apply_modifier(&mut self, id: ObjectId, kind: ModifierKind) -> StudioResult<()> {
        modifier::apply_modifier(kind, self.scene.get_mut(id)?)
    }

    /// Apply a mood to the whole scene.
    pub fn set_mood(&mut self, mood: Mood) {
        crate::mood::set_mood(
            mood,
            self.scene.objects_mut(),
            &mut self.light,
            &mut self.state,
        );
    }

    /// Advance animation to the host-supplied `time`.
    pub fn tick(&mut self, time: TickTime) -> TickOutput {
        let mut ctx = TickCtx {
            state: &mut self.state,
            camera: &mut self.camera,
            rng: &mut *self.rng,
            config: &self.config.anim,
        };
        machine::tick(&mut ctx, self.scene.objects_mut(), time)
    }

    /// Advance the built-in fixed-step clock by one frame and tick.
    pub fn step(&mut self) -> TickOutput {
        let time = self.clock.step();
        self.tick(time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/studio.rs"]
mod tests;
