use std::time::Duration;

use nv_layout::{Canvas, ColorRamp, ForceConfig, RadiusRange, DEFAULT_RELAX_STEPS};

/// Everything about a session that is not a control value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub canvas: Canvas,
    pub radii: RadiusRange,
    pub colors: ColorRamp,
    /// Solver forces. The center is taken from `canvas`.
    pub forces: ForceConfig,
    /// Ticks run synchronously before a frame is returned.
    pub relax_steps: usize,
    /// Quiet period after the last control change before recomputing.
    pub debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            radii: RadiusRange::default(),
            colors: ColorRamp::default(),
            forces: ForceConfig::default(),
            relax_steps: DEFAULT_RELAX_STEPS,
            debounce: Duration::from_millis(5),
        }
    }
}
