use crate::{
    composite,
    core::{Canvas, Point, Rgb8},
    error::{StriateError, StriateResult},
    surface::{FrameRGBA, Surface},
};

/// CPU raster surface powered by `vello_cpu`.
///
/// The retained pixmap is the canvas: it is filled once per generation by
/// [`Surface::clear`] and strokes accumulate on it frame after frame.
/// `vello_cpu` renders a recorded scene into a fresh buffer, so each frame's
/// strokes are rasterized into a scratch pixmap and premul-over composited
/// onto the retained one in [`CpuSurface::end_frame`].
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    pending: bool,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> StriateResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| StriateError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| StriateError::render("surface height exceeds u16"))?;

        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            pending: false,
        })
    }

    /// Rasterize the strokes recorded since the last call and composite them
    /// onto the retained canvas. Cheap no-op when nothing was drawn.
    pub fn end_frame(&mut self) -> StriateResult<()> {
        if !self.pending {
            return Ok(());
        }

        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.scratch);
        composite::over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
            1.0,
        )?;
        self.ctx.reset();
        self.pending = false;
        Ok(())
    }

    /// Read back the retained canvas as a premultiplied RGBA8 frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl Surface for CpuSurface {
    fn extent(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgb8) -> StriateResult<()> {
        self.ctx.reset();
        self.pending = false;

        // Opaque fill, so premultiplied equals straight here.
        let px = [color.r, color.g, color.b, 255];
        for chunk in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Ok(())
    }

    fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb8,
        thickness: f64,
    ) -> StriateResult<()> {
        let Some(quad) = stroke_quad(from, to, thickness) else {
            return Ok(());
        };

        // Stripe geometry is center-origin; the pixmap is top-left origin.
        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0,
        )));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, 255,
        ));
        self.ctx.fill_path(&quad);
        self.pending = true;
        Ok(())
    }
}

/// Expand a line segment into the filled quad of its stroked outline (butt
/// caps). Returns `None` for segments that cannot rasterize to anything.
fn stroke_quad(from: Point, to: Point, thickness: f64) -> Option<vello_cpu::kurbo::BezPath> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy);
    if !(len > 0.0) || !(thickness > 0.0) {
        return None;
    }

    let nx = -dy / len * thickness * 0.5;
    let ny = dx / len * thickness * 0.5;

    let mut path = vello_cpu::kurbo::BezPath::new();
    path.move_to(vello_cpu::kurbo::Point::new(from.x + nx, from.y + ny));
    path.line_to(vello_cpu::kurbo::Point::new(to.x + nx, to.y + ny));
    path.line_to(vello_cpu::kurbo::Point::new(to.x - nx, to.y - ny));
    path.line_to(vello_cpu::kurbo::Point::new(from.x - nx, from.y - ny));
    path.close_path();
    Some(path)
}
