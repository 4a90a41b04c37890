use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

const EDGE_TOLERANCE: f64 = 1e-9;

/// The drawing area, with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Move a circle's center so the whole circle lies inside the canvas.
    ///
    /// On an axis shorter than the diameter the center sits on the midline.
    pub fn clamp_circle(&self, center: Point, radius: f64) -> Point {
        Point::new(
            clamp_axis(center.x, radius, self.width),
            clamp_axis(center.y, radius, self.height),
        )
    }

    /// Whether the whole circle is inside, allowing for rounding at the edges.
    pub fn contains_circle(&self, center: Point, radius: f64) -> bool {
        center.x - radius >= -EDGE_TOLERANCE
            && center.y - radius >= -EDGE_TOLERANCE
            && center.x + radius <= self.width + EDGE_TOLERANCE
            && center.y + radius <= self.height + EDGE_TOLERANCE
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(960.0, 540.0)
    }
}

fn clamp_axis(v: f64, radius: f64, extent: f64) -> f64 {
    if extent < 2.0 * radius {
        extent / 2.0
    } else {
        v.clamp(radius, extent - radius)
    }
}
