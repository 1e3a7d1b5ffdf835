use std::path::Path;

use crate::{
    config::SceneConfig,
    encode_ffmpeg::FfmpegEncoder,
    error::StriateResult,
    sequencer::{FrameStatus, Sequencer},
    surface::FrameRGBA,
    surface_cpu::CpuSurface,
};

/// Run the whole animation, delivering every rendered frame to `sink` in
/// order. Returns the number of frames produced. The sink receives the full
/// retained canvas each frame, so any frame is a valid standalone image.
#[tracing::instrument(skip(config, sink), fields(width = config.canvas.width, height = config.canvas.height, seed = config.seed))]
pub fn run_to_completion(
    config: &SceneConfig,
    mut sink: impl FnMut(u64, &FrameRGBA) -> StriateResult<()>,
) -> StriateResult<u64> {
    let mut surface = CpuSurface::new(config.canvas)?;
    let mut sequencer = Sequencer::new(config.clone(), &mut surface)?;

    let mut frames = 0u64;
    while sequencer.advance_frame(&mut surface)? == FrameStatus::Running {
        surface.end_frame()?;
        sink(frames, &surface.frame())?;
        frames += 1;
    }

    tracing::debug!(frames, "animation complete");
    Ok(frames)
}

/// Render the animation up to the given frame index and return that frame,
/// or the final frame when `frame` is `None` or past the end of the run.
pub fn render_frame(config: &SceneConfig, frame: Option<u64>) -> StriateResult<FrameRGBA> {
    let mut surface = CpuSurface::new(config.canvas)?;
    let mut sequencer = Sequencer::new(config.clone(), &mut surface)?;

    let mut produced = 0u64;
    while sequencer.advance_frame(&mut surface)? == FrameStatus::Running {
        surface.end_frame()?;
        if frame == Some(produced) {
            return Ok(surface.frame());
        }
        produced += 1;
    }
    Ok(surface.frame())
}

/// Run the animation and encode every frame into an MP4 via the system
/// `ffmpeg` binary. Returns the number of encoded frames.
pub fn render_to_mp4(config: &SceneConfig, out_path: &Path) -> StriateResult<u64> {
    let canvas = config.canvas;
    let mut encoder = FfmpegEncoder::create(
        out_path,
        canvas.width,
        canvas.height,
        config.fps,
        config.paper,
    )?;

    let frames = run_to_completion(config, |_, frame| encoder.encode_frame(frame))?;
    encoder.finish()?;
    Ok(frames)
}
