use crate::{
    core::{Canvas, Palette, Point},
    rng::Rng64,
    stripe::{Segment, Stripe},
};

/// Growth advance per render step, in canvas units. Deliberately not scaled:
/// larger canvases take proportionally more frames to fill.
pub const GROWTH_RATE: f64 = 15.0;

const INK_PROBABILITY: f64 = 0.6;
const TILT_PROBABILITY: f64 = 0.5;
const TILT_RAD: f64 = std::f64::consts::FRAC_PI_6; // 30 degrees from horizontal
const LENGTH_RANGE: (f64, f64) = (80.0, 200.0);
const COUNT_RANGE: (f64, f64) = (10.0, 30.0);
const SPACING_RANGE: (f64, f64) = (3.0, 8.0);
const STROKE_WEIGHTS: [f64; 5] = [0.4, 0.8, 1.0, 2.0, 3.5];

const HIDDEN_ANGLE_RAD: f64 = std::f64::consts::FRAC_PI_4; // +/- 45 degrees
const HIDDEN_WEIGHT_RANGE: (f64, f64) = (90.0, 150.0);

/// Generate one ordinary group stripe: a fan of parallel offset copies of a
/// random base segment, sharing one color and one growth budget.
///
/// The base segment starts anywhere on the (center-origin) canvas and runs
/// either at 30° from horizontal or axis-aligned. Copies are offset
/// perpendicular to the segment's dominant axis; stroke weight varies per
/// copy, drawn from a fixed scaled weight table.
pub fn generate_group(canvas: Canvas, scale: f64, palette: Palette, rng: &mut Rng64) -> Stripe {
    let color = if rng.chance(INK_PROBABILITY) {
        palette.ink
    } else {
        palette.paper
    };

    let half_w = f64::from(canvas.width) / 2.0;
    let half_h = f64::from(canvas.height) / 2.0;
    let x1 = rng.in_range(-half_w, half_w);
    let y1 = rng.in_range(-half_h, half_h);

    let sign_x = rng.sign();
    let sign_y = rng.sign();
    let tilted = rng.chance(TILT_PROBABILITY);
    let length = rng.in_range(LENGTH_RANGE.0, LENGTH_RANGE.1) * scale;

    let (h_shift, v_shift) = if tilted {
        (length * sign_x, length * TILT_RAD.tan() * sign_y)
    } else if rng.chance(0.5) {
        (length * sign_x, 0.0)
    } else {
        (0.0, length * sign_y)
    };

    let count = rng.in_range(COUNT_RANGE.0, COUNT_RANGE.1).floor() as usize;
    let spacing = rng.in_range(SPACING_RANGE.0, SPACING_RANGE.1) * scale;
    let horizontal_major = h_shift.abs() > v_shift.abs();

    let mut segments = Vec::with_capacity(count);
    for i in 0..count {
        let offset = i as f64 * spacing;
        // Offset perpendicular to the dominant axis so copies stay parallel.
        let (ox, oy) = if horizontal_major {
            (0.0, offset)
        } else {
            (offset, 0.0)
        };
        segments.push(Segment {
            from: Point::new(x1 + ox, y1 + oy),
            to: Point::new(x1 + h_shift + ox, y1 + v_shift + oy),
            thickness: STROKE_WEIGHTS[rng.index(STROKE_WEIGHTS.len())] * scale,
            color,
            growth_length: length,
        });
    }

    Stripe::new(segments, GROWTH_RATE)
}

/// Generate the hidden-line stripe: a single paper-colored diagonal spanning
/// the full canvas height, far thicker than any group line, so that it erases
/// whatever it crosses when spliced into the sequence.
pub fn generate_hidden_line(canvas: Canvas, scale: f64, palette: Palette, rng: &mut Rng64) -> Stripe {
    let h = f64::from(canvas.height);
    let angle = rng.in_range(-HIDDEN_ANGLE_RAD, HIDDEN_ANGLE_RAD);
    let shift = h * angle.tan();

    let from = Point::new(-shift, -h / 2.0);
    let to = Point::new(shift, h / 2.0);
    let growth_length = from.distance(to);

    let segment = Segment {
        from,
        to,
        thickness: rng.in_range(HIDDEN_WEIGHT_RANGE.0, HIDDEN_WEIGHT_RANGE.1) * scale,
        color: palette.paper,
        growth_length,
    };
    Stripe::new(vec![segment], GROWTH_RATE)
}
