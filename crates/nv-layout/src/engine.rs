use log::debug;
use nv_sampler::VisibleItem;
use serde::{Deserialize, Serialize};

use crate::force::ForceSimulation;
use crate::geometry::{Canvas, Point};
use crate::placement::initial_position;
use crate::scale::{ColorRamp, RadiusRange, Rgb};
use crate::solver::{Body, ForceConfig, RelaxationSolver};
use crate::state::LayoutState;

/// Ticks run synchronously after every layout so the result is already settled.
pub const DEFAULT_RELAX_STEPS: usize = 80;

/// A visible item with everything a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedItem {
    pub rank: usize,
    pub label: String,
    pub raw_score: f64,
    pub probability: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Color-ramp parameter in `[0, 1]`.
    pub color_value: f64,
    pub color: Rgb,
    pub label_font_px: f64,
    pub probability_font_px: f64,
}

impl PositionedItem {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub positioned: Vec<PositionedItem>,
    /// Replaces the caller's previous state for the next cycle.
    pub state: LayoutState,
}

fn clamp_bodies(canvas: Canvas, bodies: &mut [Body]) {
    for b in bodies {
        let p = canvas.clamp_circle(b.position(), b.radius);
        b.x = p.x;
        b.y = p.y;
    }
}

/// Positions the visible set, keeping surviving items where they were.
///
/// The engine owns the solver so background ticks keep refining the last
/// layout until the next call replaces its bodies.
pub struct LayoutEngine<S: RelaxationSolver = ForceSimulation> {
    solver: S,
    forces: ForceConfig,
    colors: ColorRamp,
    relax_steps: usize,
    labels: Vec<String>,
}

impl LayoutEngine<ForceSimulation> {
    pub fn new() -> Self {
        let forces = ForceConfig::default();
        Self::with_solver(ForceSimulation::new(forces.clone()), forces)
    }
}

impl Default for LayoutEngine<ForceSimulation> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RelaxationSolver> LayoutEngine<S> {
    /// `forces.center` is ignored: every layout centers on its own canvas.
    pub fn with_solver(solver: S, forces: ForceConfig) -> Self {
        Self {
            solver,
            forces,
            colors: ColorRamp::default(),
            relax_steps: DEFAULT_RELAX_STEPS,
            labels: Vec::new(),
        }
    }

    pub fn with_relax_steps(mut self, steps: usize) -> Self {
        self.relax_steps = steps;
        self
    }

    pub fn with_color_ramp(mut self, colors: ColorRamp) -> Self {
        self.colors = colors;
        self
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Starting point for each visible item: its previous position when it
    /// was visible last cycle, otherwise its hash-based initial position.
    pub fn seed_positions(
        visible: &[VisibleItem],
        previous: &LayoutState,
        canvas: Canvas,
        radii: RadiusRange,
    ) -> Vec<Point> {
        visible
            .iter()
            .map(|v| match previous.get(&v.label) {
                Some(p) => p,
                None => initial_position(&v.label, radii.radius(v.probability), radii, canvas),
            })
            .collect()
    }

    /// Lay out `visible`, settle it, and clamp every circle inside the canvas.
    pub fn layout(
        &mut self,
        visible: &[VisibleItem],
        previous: &LayoutState,
        canvas: Canvas,
        radii: RadiusRange,
    ) -> Layout {
        let seeds = Self::seed_positions(visible, previous, canvas, radii);
        let reused = visible.iter().filter(|v| previous.contains(&v.label)).count();

        let bodies: Vec<Body> = visible
            .iter()
            .zip(&seeds)
            .map(|(v, &p)| Body::at(p, radii.radius(v.probability)))
            .collect();

        self.bind_canvas(canvas);
        self.solver.set_bodies(bodies);
        self.solver.step(self.relax_steps);
        clamp_bodies(canvas, self.solver.bodies_mut());
        self.labels = visible.iter().map(|v| v.label.clone()).collect();

        let positioned: Vec<PositionedItem> = visible
            .iter()
            .zip(self.solver.bodies())
            .map(|(v, b)| PositionedItem {
                rank: v.rank,
                label: v.label.clone(),
                raw_score: v.raw_score,
                probability: v.probability,
                x: b.x,
                y: b.y,
                radius: b.radius,
                color_value: self.colors.value(v.probability),
                color: self.colors.color(v.probability),
                label_font_px: (b.radius / 3.0).max(8.0),
                probability_font_px: (b.radius / 4.0).max(6.0),
            })
            .collect();

        debug!(
            "{} laid out {} items ({} kept their position) in {} steps",
            self.solver.name(),
            positioned.len(),
            reused,
            self.relax_steps
        );

        Layout {
            positioned,
            state: self.snapshot(),
        }
    }

    /// Move the running layout onto a new canvas: bodies are clamped now, and
    /// every later background tick centers on and clamps to `canvas`.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.bind_canvas(canvas);
        clamp_bodies(canvas, self.solver.bodies_mut());
    }

    fn bind_canvas(&mut self, canvas: Canvas) {
        self.solver.configure(ForceConfig {
            center: canvas.center(),
            ..self.forces.clone()
        });
        self.solver
            .on_tick(Box::new(move |bodies: &mut [Body]| clamp_bodies(canvas, bodies)));
    }

    /// One background settling tick. Returns `false` once the solver has cooled.
    pub fn tick(&mut self) -> bool {
        self.solver.tick()
    }

    /// Current solver position of every item from the latest layout.
    pub fn positions(&self) -> impl Iterator<Item = (&str, Point)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.solver.bodies().iter().map(Body::position))
    }

    pub fn snapshot(&self) -> LayoutState {
        self.positions().collect()
    }
}
