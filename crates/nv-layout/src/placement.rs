use crate::geometry::{Canvas, Point};
use crate::scale::RadiusRange;

/// A stable angle for `label`: the sum of its character codes, taken modulo
/// 360 degrees and converted to radians. It ignores character order.
pub fn label_angle(label: &str) -> f64 {
    let hash: u64 = label.chars().map(|c| c as u64).sum();
    ((hash % 360) as f64).to_radians()
}

/// Where an item starts when it was not visible in the previous cycle.
///
/// Larger circles start nearer the canvas center, smaller ones farther out,
/// along the label's hash angle.
pub fn initial_position(label: &str, radius: f64, radii: RadiusRange, canvas: Canvas) -> Point {
    let angle = label_angle(label);
    let relative = if radii.max > 0.0 { radius / radii.max } else { 1.0 };
    let distance = (1.0 - relative).max(0.0) * canvas.min_side() / 2.0;
    let c = canvas.center();
    Point::new(c.x + angle.cos() * distance, c.y + angle.sin() * distance)
}
