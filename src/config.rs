use crate::{
    core::{Canvas, DEFAULT_INK, DEFAULT_PAPER, Palette, Rgb8},
    error::{StriateError, StriateResult},
};

/// Everything a run needs: drawable size, playback rate, determinism seed and
/// the composition parameters. Serializable so scenes can live in JSON files.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    pub canvas: Canvas,

    /// Display refresh rate the frame sequence targets (one sequencer step
    /// per frame).
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Global determinism seed: the same config always produces the same
    /// animation, byte for byte.
    #[serde(default)]
    pub seed: u64,

    /// Number of ordinary group stripes per generation cycle. The hidden
    /// line is spliced in on top of these.
    #[serde(default = "default_num_groups")]
    pub num_groups: usize,

    #[serde(default = "default_ink")]
    pub ink: Rgb8,

    #[serde(default = "default_paper")]
    pub paper: Rgb8,
}

fn default_fps() -> u32 {
    60
}

fn default_num_groups() -> usize {
    80
}

fn default_ink() -> Rgb8 {
    DEFAULT_INK
}

fn default_paper() -> Rgb8 {
    DEFAULT_PAPER
}

impl SceneConfig {
    pub fn new(canvas: Canvas, seed: u64) -> Self {
        Self {
            canvas,
            fps: default_fps(),
            seed,
            num_groups: default_num_groups(),
            ink: default_ink(),
            paper: default_paper(),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            ink: self.ink,
            paper: self.paper,
        }
    }

    /// A zero-sized canvas is deliberately accepted: generation degrades to
    /// zero-length stripes instead of failing (the host may hand us a
    /// collapsed window).
    pub fn validate(&self) -> StriateResult<()> {
        if self.fps == 0 {
            return Err(StriateError::validation("fps must be > 0"));
        }
        Ok(())
    }
}
