use crate::geometry::Point;

/// A circle taking part in relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Drawn radius. The collision radius adds [`ForceConfig::collision_margin`].
    pub radius: f64,
}

impl Body {
    /// A body at rest at `position`.
    pub fn at(position: Point, radius: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            vx: 0.0,
            vy: 0.0,
            radius,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Force parameters for a relaxation solver.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceConfig {
    /// Pairwise charge. Negative values repel.
    pub charge_strength: f64,
    /// Point every body is pulled towards, usually the canvas center.
    pub center: Point,
    /// Fraction of the centroid offset removed per tick.
    pub center_strength: f64,
    /// Horizontal pull towards `center.x`.
    pub x_strength: f64,
    /// Vertical pull towards `center.y`. Stronger than `x_strength` on wide canvases.
    pub y_strength: f64,
    /// Gap kept between neighbouring circles.
    pub collision_margin: f64,
    pub collision_strength: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Rate at which alpha approaches zero.
    pub alpha_decay: f64,
    /// Below this alpha, background ticks stop.
    pub alpha_min: f64,
    /// Alpha restored whenever the body set is replaced.
    pub reheat_alpha: f64,
    /// Seed for the tiny random offsets separating coincident bodies.
    pub jiggle_seed: u64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            charge_strength: -10.0,
            center: Point::default(),
            center_strength: 1.0,
            x_strength: 0.05,
            y_strength: 0.25,
            collision_margin: 2.0,
            collision_strength: 1.0,
            velocity_decay: 0.2,
            alpha_decay: 0.03,
            alpha_min: 0.001,
            reheat_alpha: 0.1,
            jiggle_seed: 0x6e75_636c,
        }
    }
}

/// Callback run after every background tick, with mutable access to the bodies.
pub type TickHook = Box<dyn FnMut(&mut [Body]) + Send>;

/// Iterative force-directed position solver.
///
/// `step` is the synchronous settle used right after the body set changes and
/// never runs the hook. `tick` is the residual settling the host drives on its
/// own schedule, and runs the hook after moving the bodies.
pub trait RelaxationSolver: Send {
    /// Returns the name of this solver.
    fn name(&self) -> &str;

    fn configure(&mut self, forces: ForceConfig);

    /// Replace the whole body set and reheat the simulation.
    fn set_bodies(&mut self, bodies: Vec<Body>);

    /// Advance `n` ticks synchronously.
    fn step(&mut self, n: usize);

    /// Advance one tick and run the hook. Returns `false`, without moving
    /// anything, once the simulation has cooled.
    fn tick(&mut self) -> bool;

    fn on_tick(&mut self, hook: TickHook);

    fn bodies(&self) -> &[Body];

    fn bodies_mut(&mut self) -> &mut [Body];

    fn alpha(&self) -> f64;
}
