use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::anim::machine::AnimConfig;
use crate::foundation::core::Vec3;
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::time::Fps;
use crate::mesh::synth::SynthConfig;

/// Session-wide tunables, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Mesh synthesis resolution and extent.
    pub synth: SynthConfig,
    /// Camera effect tunables.
    pub anim: AnimConfig,
    /// Seed for the default random source.
    pub seed: u64,
    /// Frame rate numerator used by [`crate::FixedStepClock`] drivers.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Resting camera position.
    pub camera_base: Vec3,
    /// Rescale external assets to the floor on import.
    pub fit_external: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            synth: SynthConfig::default(),
            anim: AnimConfig::default(),
            seed: 1,
            fps_num: 60,
            fps_den: 1,
            camera_base: Vec3::new(0.0, 8.0, 12.0),
            fit_external: true,
        }
    }
}

impl StudioConfig {
    /// Parse from a JSON reader and validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> StudioResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| StudioError::validation(format!("parse studio config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from a JSON string and validate.
    pub fn from_json_str(s: &str) -> StudioResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse from a JSON file on disk and validate.
    pub fn from_path(path: impl AsRef<Path>) -> StudioResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open studio config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Frame rate built from `fps_num / fps_den`.
    pub fn fps(&self) -> StudioResult<Fps> {
        Fps::new(self.fps_num, self.fps_den)
    }

    /// Check every nested section.
    pub fn validate(&self) -> StudioResult<()> {
        self.synth.validate()?;
        self.anim.validate()?;
        self.fps()?;
        if !self.camera_base.is_finite() {
            return Err(StudioError::validation("camera_base must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
