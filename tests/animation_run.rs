use striate::{Canvas, FrameStatus, SceneConfig, Sequencer};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn config(seed: u64) -> SceneConfig {
    SceneConfig::new(Canvas::new(200, 200), seed)
}

fn run_digest(config: &SceneConfig) -> (u64, u64) {
    let mut frames = 0u64;
    let mut last = 0u64;
    striate::run_to_completion(config, |_, frame| {
        frames += 1;
        last = digest_u64(&frame.data);
        Ok(())
    })
    .unwrap();
    (frames, last)
}

#[test]
fn full_run_is_deterministic() {
    let config = config(7);
    let (frames_a, digest_a) = run_digest(&config);
    let (frames_b, digest_b) = run_digest(&config);
    assert_eq!(frames_a, frames_b);
    assert_eq!(digest_a, digest_b);
}

#[test]
fn full_run_paints_the_canvas() {
    let config = config(11);
    let frame = striate::render_frame(&config, None).unwrap();
    assert_eq!(frame.data.len(), 200 * 200 * 4);
    assert!(frame.premultiplied);

    let paper = [config.paper.r, config.paper.g, config.paper.b, 255];
    let painted = frame
        .data
        .chunks_exact(4)
        .filter(|chunk| *chunk != paper)
        .count();
    assert!(painted > 0, "no stroke reached the canvas");
}

#[test]
fn frame_count_covers_every_stripe() {
    // 80 groups plus the hidden line, each needing at least one frame.
    let (frames, _) = run_digest(&config(13));
    assert!(frames >= 81, "only {frames} frames");
}

#[test]
fn early_frames_differ_from_the_final_frame() {
    let config = config(17);
    let early = striate::render_frame(&config, Some(0)).unwrap();
    let last = striate::render_frame(&config, None).unwrap();
    assert_ne!(digest_u64(&early.data), digest_u64(&last.data));
}

#[test]
fn sequencer_on_cpu_surface_matches_spliced_length() {
    let config = config(19);
    let mut surface = striate::CpuSurface::new(config.canvas).unwrap();
    let mut sequencer = Sequencer::new(config, &mut surface).unwrap();

    while sequencer.advance_frame(&mut surface).unwrap() == FrameStatus::Running {
        surface.end_frame().unwrap();
    }
    assert_eq!(sequencer.sequence_len(), 81);
    assert!(sequencer.is_finished());
    assert!(!sequencer.hidden_pending());
}

#[test]
fn resize_restarts_on_a_fresh_canvas() {
    let config = config(23);
    let mut surface = striate::CpuSurface::new(config.canvas).unwrap();
    let mut sequencer = Sequencer::new(config.clone(), &mut surface).unwrap();

    for _ in 0..40 {
        sequencer.advance_frame(&mut surface).unwrap();
        surface.end_frame().unwrap();
    }

    // The sequencer carries on against a surface of the new extent.
    let new_canvas = Canvas::new(120, 120);
    let mut surface = striate::CpuSurface::new(new_canvas).unwrap();
    sequencer.handle_resize(new_canvas, &mut surface).unwrap();

    assert_eq!(sequencer.active_index(), 0);
    assert!(sequencer.hidden_pending());

    let paper = [config.paper.r, config.paper.g, config.paper.b, 255];
    assert!(
        surface
            .frame()
            .data
            .chunks_exact(4)
            .all(|chunk| chunk == paper),
        "resize must clear the canvas to paper"
    );
}
