use crate::foundation::error::{StudioError, StudioResult};
use crate::mood::Mood;

/// Per-object animation behavior.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Gentle bob.
    #[default]
    Idle,
    /// Bipedal bounce with side sway.
    Walk,
    /// Larger bounce, forward lean.
    Run,
    /// Jitter, jolts, and occasional camera shake.
    Fight,
    /// High-frequency tremor.
    Shake,
    /// Breathing scale pulse.
    Vibe,
}

impl Action {
    /// All actions in UI order.
    pub const ALL: [Action; 6] = [
        Action::Idle,
        Action::Walk,
        Action::Run,
        Action::Fight,
        Action::Shake,
        Action::Vibe,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Fight => "fight",
            Self::Shake => "shake",
            Self::Vibe => "vibe",
        }
    }

    /// Parse a name; unknown names degrade to [`Action::Idle`].
    pub fn parse_lossy(s: &str) -> Self {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }
}

/// Camera behavior layered over the host's own camera control.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Camera stays where the host put it.
    #[default]
    Static,
    /// Slow orbit around the origin.
    Cinematic,
}

impl CameraMode {
    /// Parse a name; unknown names degrade to [`CameraMode::Static`].
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("cinematic") {
            Self::Cinematic
        } else {
            Self::Static
        }
    }
}

/// Session-wide animation controls, mutated by discrete user events.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Active action.
    pub action: Action,
    /// Active mood.
    pub mood: Mood,
    speed: f32,
    /// Whether ticks advance anything.
    pub playing: bool,
    /// Current camera shake intensity (>= 0), decays every playing tick.
    pub camera_shake: f32,
    /// Camera behavior.
    pub camera_mode: CameraMode,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            action: Action::Idle,
            mood: Mood::Neutral,
            speed: 1.0,
            playing: true,
            camera_shake: 0.0,
            camera_mode: CameraMode::Static,
        }
    }
}

impl AnimationState {
    /// Speed multiplier (> 0).
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the speed multiplier; must be finite and > 0.
    pub fn set_speed(&mut self, speed: f32) -> StudioResult<()> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(StudioError::validation(format!(
                "animation speed must be > 0 (got {speed})"
            )));
        }
        self.speed = speed;
        Ok(())
    }

    /// Restart the camera shake at `intensity`.
    pub fn trigger_shake(&mut self, intensity: f32) {
        self.camera_shake = intensity.max(0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/state.rs"]
mod tests;
