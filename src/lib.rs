//! Striate grows fields of parallel line stripes on a retained canvas, one
//! stripe per run of display frames, splicing a single thick paper-colored
//! "hidden line" into the sequence partway through to erase what it crosses.
//!
//! The core is [`Sequencer::advance_frame`]: invoked once per display frame,
//! it renders one growth step of the active stripe onto a [`Surface`] and
//! reports when the whole sequence has finished. [`CpuSurface`] rasterizes
//! onto pixels; [`pipeline`] turns a [`SceneConfig`] into frames, PNGs or an
//! MP4.

#![forbid(unsafe_code)]

pub mod composite;
pub mod config;
pub mod core;
pub mod encode_ffmpeg;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod rng;
pub mod sequencer;
pub mod stripe;
pub mod surface;
pub mod surface_cpu;

pub use config::SceneConfig;
pub use crate::core::{
    Canvas, DEFAULT_INK, DEFAULT_PAPER, Palette, Point, REFERENCE_EXTENT, Rgb8, Vec2,
};
pub use encode_ffmpeg::{FfmpegEncoder, is_ffmpeg_on_path};
pub use error::{StriateError, StriateResult};
pub use geometry::{GROWTH_RATE, generate_group, generate_hidden_line};
pub use pipeline::{render_frame, render_to_mp4, run_to_completion};
pub use rng::Rng64;
pub use sequencer::{FrameStatus, HIDDEN_INSERT_FRACTION, Sequencer};
pub use stripe::{Segment, Stripe};
pub use surface::{FrameRGBA, Surface};
pub use surface_cpu::CpuSurface;
