use std::{
    io::Write as _,
    path::Path,
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    core::Rgb8,
    error::{StriateError, StriateResult},
    surface::FrameRGBA,
};

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Streams the animation's frames to a system `ffmpeg` process as raw RGBA
/// over stdin, producing an H.264 MP4. Shelling out to the binary keeps the
/// crate free of native FFmpeg headers and libraries.
///
/// Frames from the retained canvas are premultiplied; each is flattened over
/// the paper color before encoding so antialiased stroke edges keep the
/// canvas tone instead of darkening toward transparent black.
pub struct FfmpegEncoder {
    width: u32,
    height: u32,
    paper: Rgb8,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    /// Spawn ffmpeg writing to `out_path`, overwriting any previous run's
    /// output. The canvas dimensions become the video dimensions and must be
    /// even.
    pub fn create(
        out_path: &Path,
        width: u32,
        height: u32,
        fps: u32,
        paper: Rgb8,
    ) -> StriateResult<Self> {
        check_video_params(width, height, fps)?;

        if let Some(parent) = out_path.parent() {
            use anyhow::Context as _;
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create mp4 output dir '{}'", parent.display()))?;
        }

        if !is_ffmpeg_on_path() {
            return Err(StriateError::encode(
                "mp4 output needs the `ffmpeg` binary on PATH",
            ));
        }

        let size = format!("{width}x{height}");
        let rate = fps.to_string();
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg("-y")
            .args(["-loglevel", "error"])
            // Input: packed RGBA frames on stdin, no container.
            .args(["-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &size, "-r", &rate])
            .args(["-i", "pipe:0"])
            // Output: silent H.264 in yuv420p for broad player support.
            .args(["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"])
            .args(["-movflags", "+faststart"])
            .arg(out_path);

        let mut child = cmd
            .spawn()
            .map_err(|e| StriateError::encode(format!("spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| StriateError::encode("ffmpeg stdin pipe was not opened"))?;

        Ok(Self {
            width,
            height,
            paper,
            child,
            stdin: Some(stdin),
            scratch: vec![0u8; width as usize * height as usize * 4],
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> StriateResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(StriateError::encode(format!(
                "frame is {}x{} but the stream is {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(StriateError::encode(
                "frame byte length does not match its dimensions",
            ));
        }

        flatten_over(&mut self.scratch, &frame.data, frame.premultiplied, self.paper);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StriateError::encode("encoder already finished"));
        };
        stdin
            .write_all(&self.scratch)
            .map_err(|e| StriateError::encode(format!("pipe frame to ffmpeg: {e}")))
    }

    /// Close the stream and wait for ffmpeg to finalize the file.
    pub fn finish(mut self) -> StriateResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| StriateError::encode(format!("wait for ffmpeg: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StriateError::encode(format!(
                "ffmpeg failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// yuv420p subsamples chroma in 2x2 blocks, so both dimensions must be even.
fn check_video_params(width: u32, height: u32, fps: u32) -> StriateResult<()> {
    if width == 0 || height == 0 {
        return Err(StriateError::encode("video dimensions must be non-zero"));
    }
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        return Err(StriateError::encode(format!(
            "video dimensions must be even for yuv420p, got {width}x{height}"
        )));
    }
    if fps == 0 {
        return Err(StriateError::encode("video frame rate must be non-zero"));
    }
    Ok(())
}

/// Flatten an RGBA frame over the opaque paper color. `dst` and `src` have
/// equal length (checked by the caller); the output is fully opaque.
fn flatten_over(dst: &mut [u8], src: &[u8], premultiplied: bool, paper: Rgb8) {
    debug_assert_eq!(dst.len(), src.len());

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d[..3].copy_from_slice(&s[..3]);
            d[3] = 255;
            continue;
        }

        let inv = 255 - a;
        let (r, g, b) = if premultiplied {
            (u16::from(s[0]), u16::from(s[1]), u16::from(s[2]))
        } else {
            (scale(s[0], a), scale(s[1], a), scale(s[2], a))
        };
        d[0] = (r + scale(paper.r, inv)).min(255) as u8;
        d[1] = (g + scale(paper.g, inv)).min(255) as u8;
        d[2] = (b + scale(paper.b, inv)).min(255) as u8;
        d[3] = 255;
    }
}

fn scale(c: u8, by: u16) -> u16 {
    (u32::from(c) * u32::from(by) / 255) as u16
}
