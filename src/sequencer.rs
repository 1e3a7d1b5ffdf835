use crate::{
    config::SceneConfig,
    core::Canvas,
    error::StriateResult,
    geometry,
    rng::Rng64,
    stripe::Stripe,
    surface::Surface,
};

/// Fraction of the group count after which the hidden line is spliced into
/// the sequence (insertion index = `floor(fraction * num_groups)`).
pub const HIDDEN_INSERT_FRACTION: f64 = 0.7;

/// Outcome of one frame advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// A stripe was rendered; keep invoking frames.
    Running,
    /// Every stripe has finished growing. Terminal until a regeneration
    /// event (resize) rebuilds the sequence.
    Finished,
}

/// Owns the whole animation run: the ordered stripe sequence, the cursor of
/// the stripe currently growing, and the one-shot hidden-line splice.
///
/// The hidden line is held out of the sequence as an `Option` and taken
/// exactly once when the cursor reaches the insertion index; `None` doubles
/// as the "already inserted" flag, so a double insertion cannot be expressed.
pub struct Sequencer {
    config: SceneConfig,
    rng: Rng64,
    stripes: Vec<Stripe>,
    hidden: Option<Stripe>,
    insert_at: usize,
    active: usize,
}

impl Sequencer {
    /// Build a sequencer and synchronously generate the first sequence,
    /// clearing `surface` to the paper color.
    pub fn new(config: SceneConfig, surface: &mut dyn Surface) -> StriateResult<Self> {
        config.validate()?;
        let rng = Rng64::new(config.seed);
        let mut seq = Self {
            config,
            rng,
            stripes: Vec::new(),
            hidden: None,
            insert_at: 0,
            active: 0,
        };
        seq.regenerate(surface)?;
        Ok(seq)
    }

    /// Discard the sequence and all growth state, then generate a fresh one
    /// for the current canvas. Nothing survives: positions are relative to
    /// the canvas center and extent, so stale geometry would be invalid.
    #[tracing::instrument(skip(self, surface), fields(width = self.config.canvas.width, height = self.config.canvas.height))]
    fn regenerate(&mut self, surface: &mut dyn Surface) -> StriateResult<()> {
        let canvas = self.config.canvas;
        let scale = canvas.scale_factor();
        let palette = self.config.palette();

        self.stripes = (0..self.config.num_groups)
            .map(|_| geometry::generate_group(canvas, scale, palette, &mut self.rng))
            .collect();
        self.hidden = Some(geometry::generate_hidden_line(
            canvas,
            scale,
            palette,
            &mut self.rng,
        ));
        self.insert_at = (self.config.num_groups as f64 * HIDDEN_INSERT_FRACTION).floor() as usize;
        self.active = 0;

        surface.clear(palette.paper)
    }

    /// Advance the animation by one display frame: splice the hidden line if
    /// the cursor just reached the insertion index, render one step of the
    /// active stripe, and move the cursor past stripes that completed.
    pub fn advance_frame(&mut self, surface: &mut dyn Surface) -> StriateResult<FrameStatus> {
        if self.active == self.insert_at
            && let Some(hidden) = self.hidden.take()
        {
            self.stripes.insert(self.active, hidden);
        }

        if self.active < self.stripes.len() {
            self.stripes[self.active].render_step(surface)?;
            if self.stripes[self.active].is_complete() {
                self.active += 1;
            }
            Ok(FrameStatus::Running)
        } else {
            Ok(FrameStatus::Finished)
        }
    }

    /// React to a drawable-size change: adopt the new extent and regenerate
    /// everything, resetting the cursor and the insertion one-shot.
    pub fn handle_resize(&mut self, canvas: Canvas, surface: &mut dyn Surface) -> StriateResult<()> {
        self.config.canvas = canvas;
        self.regenerate(surface)
    }

    pub fn is_finished(&self) -> bool {
        self.hidden.is_none() && self.active >= self.stripes.len()
    }

    /// Current length of the sequence (grows by one when the hidden line is
    /// spliced in).
    pub fn sequence_len(&self) -> usize {
        self.stripes.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn insertion_index(&self) -> usize {
        self.insert_at
    }

    /// True until the hidden line has been spliced into the sequence.
    pub fn hidden_pending(&self) -> bool {
        self.hidden.is_some()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point, Rgb8};

    #[derive(Default)]
    struct CountingSurface {
        strokes: usize,
        clears: usize,
    }

    impl Surface for CountingSurface {
        fn extent(&self) -> Canvas {
            Canvas::new(800, 800)
        }

        fn clear(&mut self, _color: Rgb8) -> StriateResult<()> {
            self.clears += 1;
            Ok(())
        }

        fn stroke_segment(
            &mut self,
            _from: Point,
            _to: Point,
            _color: Rgb8,
            _thickness: f64,
        ) -> StriateResult<()> {
            self.strokes += 1;
            Ok(())
        }
    }

    fn config(seed: u64) -> SceneConfig {
        SceneConfig::new(Canvas::new(800, 800), seed)
    }

    #[test]
    fn new_clears_surface_and_prepares_hidden_line() {
        let mut surface = CountingSurface::default();
        let seq = Sequencer::new(config(1), &mut surface).unwrap();
        assert_eq!(surface.clears, 1);
        assert_eq!(seq.sequence_len(), 80);
        assert_eq!(seq.insertion_index(), 56);
        assert!(seq.hidden_pending());
        assert_eq!(seq.active_index(), 0);
    }

    #[test]
    fn hidden_line_splices_exactly_once_at_the_insertion_index() {
        let mut surface = CountingSurface::default();
        let mut seq = Sequencer::new(config(2), &mut surface).unwrap();

        let mut frames = 0u64;
        while seq.advance_frame(&mut surface).unwrap() == FrameStatus::Running {
            frames += 1;
            assert!(frames < 1_000_000, "animation failed to terminate");

            if seq.hidden_pending() {
                assert!(seq.active_index() <= 56);
                assert_eq!(seq.sequence_len(), 80);
            } else {
                assert_eq!(seq.sequence_len(), 81);
            }
        }

        assert!(seq.is_finished());
        assert_eq!(seq.sequence_len(), 81);
        assert!(!seq.hidden_pending());
        assert!(frames >= 81);
    }

    #[test]
    fn cursor_is_monotonic() {
        let mut surface = CountingSurface::default();
        let mut seq = Sequencer::new(config(3), &mut surface).unwrap();
        let mut last = 0;
        while seq.advance_frame(&mut surface).unwrap() == FrameStatus::Running {
            assert!(seq.active_index() >= last);
            last = seq.active_index();
        }
    }

    #[test]
    fn finished_is_terminal_and_idempotent() {
        let mut surface = CountingSurface::default();
        let mut seq = Sequencer::new(config(4), &mut surface).unwrap();
        while seq.advance_frame(&mut surface).unwrap() == FrameStatus::Running {}

        let strokes_at_finish = surface.strokes;
        for _ in 0..3 {
            assert_eq!(
                seq.advance_frame(&mut surface).unwrap(),
                FrameStatus::Finished
            );
        }
        assert_eq!(surface.strokes, strokes_at_finish);
    }

    #[test]
    fn resize_discards_everything_and_restarts() {
        let mut surface = CountingSurface::default();
        let mut seq = Sequencer::new(config(5), &mut surface).unwrap();

        for _ in 0..200 {
            seq.advance_frame(&mut surface).unwrap();
        }
        assert!(seq.active_index() > 0);

        seq.handle_resize(Canvas::new(400, 300), &mut surface).unwrap();
        assert_eq!(surface.clears, 2);
        assert_eq!(seq.active_index(), 0);
        assert_eq!(seq.sequence_len(), 80);
        assert!(seq.hidden_pending());
        assert!(!seq.is_finished());
        assert_eq!(seq.config().canvas, Canvas::new(400, 300));
    }

    #[test]
    fn insertion_index_is_70_percent_of_group_count() {
        for (groups, expected) in [(80usize, 56usize), (10, 7), (1, 0), (3, 2)] {
            let mut surface = CountingSurface::default();
            let mut cfg = config(6);
            cfg.num_groups = groups;
            let seq = Sequencer::new(cfg, &mut surface).unwrap();
            assert_eq!(seq.insertion_index(), expected);
        }
    }

    #[test]
    fn zero_sized_canvas_degrades_instead_of_failing() {
        let mut surface = CountingSurface::default();
        let cfg = SceneConfig::new(Canvas::new(0, 0), 7);
        let mut seq = Sequencer::new(cfg, &mut surface).unwrap();

        // Every stripe has a zero growth budget, so each completes in one
        // frame: 80 groups + the hidden line.
        let mut frames = 0;
        while seq.advance_frame(&mut surface).unwrap() == FrameStatus::Running {
            frames += 1;
            assert!(frames <= 81);
        }
        assert_eq!(frames, 81);
        assert!(seq.is_finished());
    }
}
