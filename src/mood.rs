use crate::anim::state::AnimationState;
use crate::foundation::core::{Rgb8, Vec3};
use crate::scene::object::SceneObject;

/// Intensity of the mood light whenever a non-neutral mood is active.
pub const MOOD_LIGHT_INTENSITY: f32 = 3.0;
/// Camera shake kicked off by [`Mood::Angry`].
pub const ANGRY_SHAKE: f32 = 0.5;

/// Global lighting/material theme.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Light off, no highlight.
    #[default]
    Neutral,
    /// Warm orange.
    Happy,
    /// Red, with a camera jolt.
    Angry,
    /// Deep blue.
    Sad,
    /// Teal light, no highlight.
    Cool,
}

impl Mood {
    /// All moods in UI order.
    pub const ALL: [Mood; 5] = [
        Mood::Neutral,
        Mood::Happy,
        Mood::Angry,
        Mood::Sad,
        Mood::Cool,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Cool => "cool",
        }
    }

    /// Parse a name; unknown names degrade to [`Mood::Neutral`].
    pub fn parse_lossy(s: &str) -> Self {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .unwrap_or_default()
    }

    /// `(light color, emissive highlight)`; `None` when the mood turns the light off.
    fn palette(self) -> Option<(Rgb8, Option<Rgb8>)> {
        match self {
            Self::Neutral => None,
            Self::Happy => Some((Rgb8::from_hex(0xffaa00), Some(Rgb8::from_hex(0x221100)))),
            Self::Angry => Some((Rgb8::from_hex(0xff0000), Some(Rgb8::from_hex(0x330000)))),
            Self::Sad => Some((Rgb8::from_hex(0x0055ff), Some(Rgb8::from_hex(0x001133)))),
            Self::Cool => Some((Rgb8::from_hex(0x00ffcc), None)),
        }
    }
}

/// Dynamic point light tinted by the active mood.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MoodLight {
    /// Light color.
    pub color: Rgb8,
    /// Intensity; 0 means off.
    pub intensity: f32,
    /// World position.
    pub position: Vec3,
    /// Falloff distance.
    pub range: f32,
}

impl Default for MoodLight {
    fn default() -> Self {
        Self {
            color: Rgb8::WHITE,
            intensity: 0.0,
            position: Vec3::new(0.0, 5.0, 2.0),
            range: 20.0,
        }
    }
}

/// Apply `mood` to every object and the mood light.
///
/// Always starts from a neutral reset (highlights black, light off), so the result depends
/// only on `mood`, never on earlier calls.
#[tracing::instrument(skip(objects, light, state))]
pub fn set_mood(
    mood: Mood,
    objects: &mut [SceneObject],
    light: &mut MoodLight,
    state: &mut AnimationState,
) {
    state.mood = mood;
    light.intensity = 0.0;
    paint_emissive(objects, Rgb8::BLACK);

    let Some((color, emissive)) = mood.palette() else {
        return;
    };
    light.color = color;
    light.intensity = MOOD_LIGHT_INTENSITY;
    if let Some(emissive) = emissive {
        paint_emissive(objects, emissive);
    }
    if mood == Mood::Angry {
        state.trigger_shake(ANGRY_SHAKE);
    }
}

fn paint_emissive(objects: &mut [SceneObject], color: Rgb8) {
    for part in objects.iter_mut().flat_map(|o| o.renderable_parts_mut()) {
        part.material.emissive = color;
    }
}

#[cfg(test)]
#[path = "../tests/unit/mood.rs"]
mod tests;
