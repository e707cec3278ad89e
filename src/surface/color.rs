use log::warn;

/// An RGBA color as it crosses the public API: 0-255 per channel. Normalized
/// to 0.0-1.0 floats before anything reaches the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn normalized(&self) -> [f32; 4] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            self.alpha as f32 / 255.0,
        ]
    }
}

pub const RED: Rgba = Rgba::new(255, 0, 0, 255);
pub const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
pub const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
pub const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);
pub const PURPLE: Rgba = Rgba::new(255, 0, 255, 255);
pub const TURQUOISE: Rgba = Rgba::new(0, 255, 255, 255);
pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
pub const ORANGE: Rgba = Rgba::new(255, 128, 0, 255);
pub const BROWN: Rgba = Rgba::new(64, 32, 0, 255);

/// Spreads 1..=4 colors over a rectangle's four corners, ordered
/// bottom-left, top-left, top-right, bottom-right.
///
/// The case table is fixed:
/// - 1 color: every corner the same
/// - 2 colors: alternating pairs, so bottom-left and top-right share color 0
/// - 3 colors: fan pattern; the fourth corner repeats color 1 so both fan
///   triangles carry all three colors
/// - 4 colors: one per corner
///
/// Any other count falls back to opaque white (with a warning) rather than
/// erroring.
pub fn spread_rect_colors(colors: &[Rgba]) -> [[f32; 4]; 4] {
    match colors {
        [c] => [c.normalized(); 4],
        [c0, c1] => [
            c0.normalized(),
            c1.normalized(),
            c0.normalized(),
            c1.normalized(),
        ],
        [c0, c1, c2] => [
            c0.normalized(),
            c1.normalized(),
            c2.normalized(),
            c1.normalized(),
        ],
        [c0, c1, c2, c3] => [
            c0.normalized(),
            c1.normalized(),
            c2.normalized(),
            c3.normalized(),
        ],
        other => {
            warn!(
                "a rectangle takes 1 to 4 colors, got {}; painting it white",
                other.len()
            );
            [WHITE.normalized(); 4]
        }
    }
}

/// Spreads 1..=3 colors over a triangle's vertices. Same contract as
/// [`spread_rect_colors`]: two colors alternate, anything out of range is
/// opaque white.
pub fn spread_triangle_colors(colors: &[Rgba]) -> [[f32; 4]; 3] {
    match colors {
        [c] => [c.normalized(); 3],
        [c0, c1] => [c0.normalized(), c1.normalized(), c0.normalized()],
        [c0, c1, c2] => [c0.normalized(), c1.normalized(), c2.normalized()],
        other => {
            warn!(
                "a triangle takes 1 to 3 colors, got {}; painting it white",
                other.len()
            );
            [WHITE.normalized(); 3]
        }
    }
}
