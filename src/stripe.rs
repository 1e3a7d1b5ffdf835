use crate::{
    core::{Point, Rgb8},
    error::StriateResult,
    surface::Surface,
};

/// A single straight line. Immutable once generated.
///
/// `growth_length` is the animation budget for the whole stripe the segment
/// belongs to; every segment in one stripe carries the same value.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub thickness: f64,
    pub color: Rgb8,
    pub growth_length: f64,
}

/// A group of segments that grow in unison from zero to their shared
/// `growth_length`, advancing by `growth_rate` canvas units per render step.
#[derive(Clone, Debug)]
pub struct Stripe {
    segments: Vec<Segment>,
    current_growth: f64,
    growth_rate: f64,
    done: bool,
}

impl Stripe {
    pub fn new(segments: Vec<Segment>, growth_rate: f64) -> Self {
        // A zero growth budget (zero-sized canvas) has nothing to animate.
        let done = segments
            .first()
            .map(|s| s.growth_length <= 0.0)
            .unwrap_or(true);
        Self {
            segments,
            current_growth: 0.0,
            growth_rate,
            done,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn current_growth(&self) -> f64 {
        self.current_growth
    }

    pub fn growth_length(&self) -> f64 {
        self.segments
            .first()
            .map(|s| s.growth_length)
            .unwrap_or(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Draw every segment at the current growth ratio, then advance.
    ///
    /// A completed stripe is not a no-op: it keeps redrawing its segments at
    /// full length, which the accumulating surface absorbs harmlessly.
    pub fn render_step(&mut self, surface: &mut dyn Surface) -> StriateResult<()> {
        let max = self.growth_length();
        let ratio = if max > 0.0 {
            (self.current_growth / max).min(1.0)
        } else {
            1.0
        };

        for seg in &self.segments {
            let to = Point::new(
                seg.from.x + (seg.to.x - seg.from.x) * ratio,
                seg.from.y + (seg.to.y - seg.from.y) * ratio,
            );
            surface.stroke_segment(seg.from, to, seg.color, seg.thickness)?;
        }

        if self.current_growth < max {
            self.current_growth += self.growth_rate;
            if self.current_growth >= max {
                self.current_growth = max;
                self.done = true;
            }
        } else {
            self.done = true;
        }
        Ok(())
    }
}
