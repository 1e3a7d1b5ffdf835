use crate::{
    core::{Canvas, Point, Rgb8},
    error::StriateResult,
};

/// Drawing surface the animation renders onto.
///
/// Coordinates are centered: the origin is the middle of the drawable area,
/// `x` grows rightward and `y` downward. The surface retains everything drawn
/// to it until the next [`Surface::clear`]; per-frame draws accumulate. The
/// sequencer relies on this — completed stripes are redrawn at full length
/// each frame, and a cleared-per-frame surface would lose all earlier stripes.
pub trait Surface {
    /// Current drawable dimensions.
    fn extent(&self) -> Canvas;

    /// Fill the whole drawable area with a solid color, discarding all
    /// previously drawn content.
    fn clear(&mut self, color: Rgb8) -> StriateResult<()>;

    /// Draw one straight line segment of the given stroke width. Zero-length
    /// or zero-width segments may rasterize to nothing; that is not an error.
    fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb8,
        thickness: f64,
    ) -> StriateResult<()>;
}

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from the CPU surface are premultiplied alpha; the
/// `premultiplied` flag makes this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}
