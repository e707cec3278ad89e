use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A point or 2-vector in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { x: 0.0, y: 0.0 }
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Self::Output {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Position) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Self::Output {
        Position {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul for Position {
    type Output = Position;
    fn mul(self, rhs: Position) -> Self::Output {
        Position {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
        }
    }
}

impl Div for Position {
    type Output = Position;
    fn div(self, rhs: Position) -> Self::Output {
        Position {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
        }
    }
}

impl Mul<f32> for Position {
    type Output = Position;
    fn mul(self, factor: f32) -> Self::Output {
        Position {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Div<f32> for Position {
    type Output = Position;
    fn div(self, factor: f32) -> Self::Output {
        Position {
            x: self.x / factor,
            y: self.y / factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

impl Mul<f32> for Size {
    type Output = Size;
    fn mul(self, rhs: f32) -> Self::Output {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl Mul<Position> for Size {
    type Output = Size;
    fn mul(self, rhs: Position) -> Self::Output {
        Size {
            width: self.width * rhs.x,
            height: self.height * rhs.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.x
            && position.x <= self.x + self.width
            && position.y >= self.y
            && position.y <= self.y + self.height
    }

    pub fn pos(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn set_pos(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }
}

/// Window dimensions in physical pixels, snapshotted when a surface is built.
///
/// All construction-time conversion between pixel coordinates (bottom-left
/// origin), normalized device coordinates, and percent-of-screen units goes
/// through this type, so the conversions stay consistent across surfaces even
/// after the window is resized.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSpace {
    pub width: f32,
    pub height: f32,
}

impl ScreenSpace {
    pub fn new(width: f32, height: f32) -> Self {
        ScreenSpace { width, height }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel point (bottom-left origin) to normalized device coordinates.
    pub fn point_to_ndc(&self, p: Position) -> Position {
        Position {
            x: (p.x / self.width) * 2.0 - 1.0,
            y: (p.y / self.height) * 2.0 - 1.0,
        }
    }

    /// Pixel delta (translation, extent) to an NDC delta. Unlike
    /// [`point_to_ndc`](Self::point_to_ndc) there is no origin shift.
    pub fn delta_to_ndc(&self, d: Position) -> Position {
        Position {
            x: (d.x / self.width) * 2.0,
            y: (d.y / self.height) * 2.0,
        }
    }

    pub fn size_to_ndc(&self, s: Size) -> Size {
        Size {
            width: (s.width / self.width) * 2.0,
            height: (s.height / self.height) * 2.0,
        }
    }

    /// 0-100 percent of screen width/height to pixels.
    pub fn percent_to_pixels(&self, p: Position) -> Position {
        Position {
            x: (p.x / 100.0) * self.width,
            y: (p.y / 100.0) * self.height,
        }
    }

    pub fn pixels_to_percent(&self, p: Position) -> Position {
        Position {
            x: (p.x / self.width) * 100.0,
            y: (p.y / self.height) * 100.0,
        }
    }
}
