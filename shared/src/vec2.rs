/// 2D vector utilities for pitch-space geometry.
/// Coordinates follow screen conventions: x grows to the right, y grows downward.

/// Below this length a vector is treated as degenerate.
pub const EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dot product
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Vector length
pub fn length(v: Vec2) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Add two vectors
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x + b.x, a.y + b.y)
}

/// Subtract vectors (a - b)
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

/// Scale vector by scalar
pub fn scale(v: Vec2, s: f64) -> Vec2 {
    Vec2::new(v.x * s, v.y * s)
}

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    length(sub(a, b))
}

/// Normalize vector to unit length.
/// A degenerate (near-zero) vector normalizes to zero instead of dividing by zero.
pub fn normalize(v: Vec2) -> Vec2 {
    let len = length(v);
    if len < EPSILON {
        return Vec2::ZERO;
    }
    Vec2::new(v.x / len, v.y / len)
}

/// Unit vector pointing from `from` to `to` (zero if the points coincide).
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    normalize(sub(to, from))
}

/// Clockwise perpendicular in screen space: (-y, x)
pub fn perpendicular_cw(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Counterclockwise perpendicular in screen space: (y, -x)
pub fn perpendicular_ccw(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Rotate vector by an angle given in degrees.
pub fn rotate_degrees(v: Vec2, degrees: f64) -> Vec2 {
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a)
}

/// Heading from one point toward another, in degrees (atan2 convention).
pub fn heading_degrees(from: Vec2, to: Vec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// Whether `point` lies within `tolerance` (inclusive) of the infinite line through p1 and p2.
///
/// This is a line test, not a segment test: points beyond either end of p1..p2 still
/// count as "on" the line. Vertical lines are handled separately so the slope is
/// never computed with a zero run.
pub fn point_on_segment(p1: Vec2, p2: Vec2, point: Vec2, tolerance: f64) -> bool {
    let run = p2.x - p1.x;
    if run == 0.0 {
        return (point.x - p1.x).abs() <= tolerance;
    }

    // y = m*x + c, perpendicular distance |m*px - py + c| / sqrt(m^2 + 1)
    let m = (p2.y - p1.y) / run;
    let c = p1.y - m * p1.x;
    let off_line = (m * point.x - point.y + c).abs() / (m * m + 1.0).sqrt();
    off_line <= tolerance
}
