pub use kurbo::{Point, Vec2};

/// Canvas side length (in canvas units) at which the composition renders at
/// its designed proportions. `Canvas::scale_factor` is relative to this.
pub const REFERENCE_EXTENT: f64 = 800.0;

pub const DEFAULT_INK: Rgb8 = Rgb8::new(0, 0, 0);
pub const DEFAULT_PAPER: Rgb8 = Rgb8::new(247, 241, 219);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Multiplier applied to lengths, spacing and stroke weights so the
    /// composition keeps its visual density at any drawable size. Linear in
    /// `width + height`; a zero-sized canvas yields 0 (degenerate, not an
    /// error).
    pub fn scale_factor(self) -> f64 {
        (f64::from(self.width) + f64::from(self.height)) / 2.0 / REFERENCE_EXTENT
    }
}

/// Opaque RGB color. The animation never draws translucent strokes; the
/// erase effect comes from painting in the paper color, not from alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The two colors a generated stripe can take: foreground ink or the paper
/// background (painting in paper over prior strokes is the erase effect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub ink: Rgb8,
    pub paper: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ink: DEFAULT_INK,
            paper: DEFAULT_PAPER,
        }
    }
}
