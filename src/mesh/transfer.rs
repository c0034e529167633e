/// Brightness below which HUMAN mode stops deepening shadows.
pub const HUMAN_BLACK_FLOOR: f32 = 20.0;

const STANDARD_DEPTH: f32 = 3.5;
const HUMAN_DEPTH: f32 = 2.0;
const HUMAN_GAMMA: f32 = 1.2;

/// Mesh generation mode; selects grid resolution and the brightness-to-depth curve.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GenMode {
    /// Linear relief that keeps hard edges.
    #[default]
    Standard,
    /// Soft relief tuned for faces: clamped blacks, gamma-shaped midtones, finer grid.
    Human,
}

impl GenMode {
    /// Parse a mode name; anything other than `"human"` selects [`GenMode::Standard`].
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("human") {
            Self::Human
        } else {
            Self::Standard
        }
    }

    /// Map brightness in `[0, 255]` to displacement along the plane normal.
    pub fn displacement(self, brightness: f32) -> f32 {
        match self {
            Self::Standard => (brightness / 255.0) * STANDARD_DEPTH,
            Self::Human => {
                let b = brightness.max(HUMAN_BLACK_FLOOR);
                (b / 255.0).powf(HUMAN_GAMMA) * HUMAN_DEPTH
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/transfer.rs"]
mod tests;
