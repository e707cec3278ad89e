use crate::utils::Position;

/// The transform state every surface carries: translation, rotation, scale,
/// and the pivot the rotation turns about. All components live in pixel
/// space; conversion to NDC happens only when a uniform is pushed.
///
/// Rotation is held as a (cos, sin) pair, the exact form the vertex stage
/// consumes. `change_rotation_by` adds the delta's cosine and sine to the
/// stored pair componentwise; summing pairs is not the same as rotating by
/// the summed angle, so repeated small deltas drift from exact composition.
#[derive(Debug, Clone, Copy)]
pub struct Transform2D {
    translation: Position,
    rotation: [f32; 2],
    scale: Position,
    pivot: Position,
    about_center: bool,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform2D {
    pub fn new() -> Self {
        Self {
            translation: Position::default(),
            rotation: [1.0, 0.0],
            scale: Position::new(1.0, 1.0),
            pivot: Position::default(),
            about_center: true,
        }
    }

    pub fn translation(&self) -> Position {
        self.translation
    }

    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.translation = Position::new(x, y);
    }

    pub fn change_translation_by(&mut self, dx: f32, dy: f32) {
        self.translation += Position::new(dx, dy);
    }

    /// The (cos, sin) pair handed to the shader.
    pub fn rotation_pair(&self) -> [f32; 2] {
        self.rotation
    }

    /// The effective angle in radians recovered from the stored pair.
    pub fn angle_radians(&self) -> f32 {
        self.rotation[1].atan2(self.rotation[0])
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        let radians = degrees.to_radians();
        self.rotation = [radians.cos(), radians.sin()];
    }

    pub fn change_rotation_by(&mut self, degrees: f32) {
        let radians = degrees.to_radians();
        self.rotation[0] += radians.cos();
        self.rotation[1] += radians.sin();
    }

    pub fn scale(&self) -> Position {
        self.scale
    }

    pub fn set_scale(&mut self, x: f32, y: f32) {
        self.scale = Position::new(x, y);
    }

    pub fn change_scale_by(&mut self, dx: f32, dy: f32) {
        self.scale += Position::new(dx, dy);
    }

    /// Pivot of rotation in pixel space.
    pub fn pivot(&self) -> Position {
        self.pivot
    }

    /// True while the pivot tracks the shape's own centroid.
    pub fn is_about_center(&self) -> bool {
        self.about_center
    }

    /// Pins the pivot to the shape centroid; position queries then need no
    /// rotation correction.
    pub fn set_pivot_to_center(&mut self, centroid: Position) {
        self.pivot = centroid;
        self.about_center = true;
    }

    /// Redirects the pivot to an arbitrary point. Position queries must from
    /// then on rotate the stored position around this point.
    pub fn set_pivot_to_point(&mut self, point: Position) {
        self.pivot = point;
        self.about_center = false;
    }

    /// Rotates `p` around `pivot` by the stored pair.
    pub fn rotate_point(&self, p: Position, pivot: Position) -> Position {
        let d = p - pivot;
        let [cos, sin] = self.rotation;
        Position::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + pivot
    }

    /// Where a pixel-space point actually renders: scaled, rotated about the
    /// pivot when it is not the shape's own centroid, then translated.
    pub fn apply_to_point(&self, p: Position) -> Position {
        let mut out = p * self.scale;
        if !self.about_center {
            out = self.rotate_point(out, self.pivot);
        }
        out + self.translation
    }
}
