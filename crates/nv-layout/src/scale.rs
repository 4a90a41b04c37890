use std::fmt;

use serde::{Deserialize, Serialize};

/// Bubble radius bounds in pixels.
///
/// Probability maps onto `[min, max]` through a square-root scale, so bubble
/// area grows linearly with probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
}

impl RadiusRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn radius(&self, probability: f64) -> f64 {
        self.min + probability.clamp(0.0, 1.0).sqrt() * (self.max - self.min)
    }
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self::new(40.0, 60.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation in RGB space, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Sequential power color scale: probability `p` maps to `t = p^exponent`,
/// then to a color between `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub from: Rgb,
    pub to: Rgb,
    pub exponent: f64,
}

impl ColorRamp {
    /// Interpolation parameter in `[0, 1]`, monotone in probability.
    pub fn value(&self, probability: f64) -> f64 {
        probability.clamp(0.0, 1.0).powf(self.exponent)
    }

    pub fn color(&self, probability: f64) -> Rgb {
        self.from.lerp(self.to, self.value(probability))
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            from: Rgb::new(0x3c, 0xa5, 0xf5),
            to: Rgb::new(0x00, 0x4c, 0x87),
            exponent: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radius_sqrt_scale() {
        let r = RadiusRange::default();
        assert_relative_eq!(r.radius(0.0), 40.0);
        assert_relative_eq!(r.radius(0.25), 50.0);
        assert_relative_eq!(r.radius(1.0), 60.0);
        assert_relative_eq!(r.radius(4.0), 60.0);
    }

    #[test]
    fn test_color_value_is_power_adjusted() {
        let ramp = ColorRamp::default();
        assert_relative_eq!(ramp.value(0.0), 0.0);
        assert_relative_eq!(ramp.value(1.0), 1.0);
        assert_relative_eq!(ramp.value(0.5), 0.5f64.powf(0.4));
        assert!(ramp.value(0.1) > 0.1);
        assert!(ramp.value(0.2) > ramp.value(0.1));
    }

    #[test]
    fn test_color_endpoints() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color(0.0).to_string(), "#3ca5f5");
        assert_eq!(ramp.color(1.0).to_string(), "#004c87");
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgb::new(0, 100, 200).lerp(Rgb::new(100, 0, 0), 0.5);
        assert_eq!(mid, Rgb::new(50, 50, 100));
    }
}
