use crate::foundation::error::{StudioError, StudioResult};

/// Absolute 0-based tick index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Ticks-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StudioResult<Self> {
        if den == 0 {
            return Err(StudioError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StudioError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Timing input of one animation tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickTime {
    /// Monotonic seconds since the session clock started.
    pub elapsed: f64,
    /// Seconds since the previous tick.
    pub delta: f64,
}

/// Deterministic clock: elapsed time is derived from an integer frame counter, so
/// replaying the same number of steps always lands on bit-identical times.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepClock {
    fps: Fps,
    frame: FrameIndex,
}

impl FixedStepClock {
    /// Clock positioned at frame 0.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            frame: FrameIndex(0),
        }
    }

    /// Current frame.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Advance one frame and return its timing.
    pub fn step(&mut self) -> TickTime {
        self.frame = FrameIndex(self.frame.0.saturating_add(1));
        TickTime {
            elapsed: self.fps.frames_to_secs(self.frame.0),
            delta: self.fps.frame_duration_secs(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
