//! Velocity-based force simulation over circles.
//!
//! Each tick cools `alpha` towards zero, accumulates velocity from the
//! charge, centering and collision forces, damps it, and moves the bodies.
//! Pairwise forces are O(n²), which is fine for vocabularies of a few hundred
//! visible items.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::solver::{Body, ForceConfig, RelaxationSolver, TickHook};

/// Squared distance below which charge stops growing.
const CHARGE_DISTANCE_MIN2: f64 = 1.0;

pub struct ForceSimulation {
    config: ForceConfig,
    bodies: Vec<Body>,
    alpha: f64,
    rng: StdRng,
    hook: Option<TickHook>,
}

impl ForceSimulation {
    pub fn new(config: ForceConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.jiggle_seed);
        Self {
            config,
            bodies: Vec::new(),
            alpha: 0.0,
            rng,
            hook: None,
        }
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    fn jiggle(&mut self) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * 1e-6
    }

    fn advance(&mut self) {
        self.alpha += (0.0 - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;

        self.apply_charge(alpha);
        self.apply_center();
        self.apply_axis_pull(alpha);
        self.apply_collide();

        let keep = 1.0 - self.config.velocity_decay;
        for b in &mut self.bodies {
            b.vx *= keep;
            b.vy *= keep;
            b.x += b.vx;
            b.y += b.vy;
        }
    }

    fn apply_charge(&mut self, alpha: f64) {
        let strength = self.config.charge_strength;
        if strength == 0.0 {
            return;
        }
        let positions: Vec<(f64, f64)> = self.bodies.iter().map(|b| (b.x, b.y)).collect();
        for i in 0..positions.len() {
            let (xi, yi) = positions[i];
            let (mut dvx, mut dvy) = (0.0, 0.0);
            for (j, &(xj, yj)) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let mut x = xj - xi;
                let mut y = yj - yi;
                let mut l = x * x + y * y;
                if x == 0.0 {
                    x = self.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = self.jiggle();
                    l += y * y;
                }
                if l < CHARGE_DISTANCE_MIN2 {
                    l = (CHARGE_DISTANCE_MIN2 * l).sqrt();
                }
                dvx += x * strength * alpha / l;
                dvy += y * strength * alpha / l;
            }
            self.bodies[i].vx += dvx;
            self.bodies[i].vy += dvy;
        }
    }

    /// Translate every body so the centroid moves onto the configured center.
    fn apply_center(&mut self) {
        if self.bodies.is_empty() {
            return;
        }
        let n = self.bodies.len() as f64;
        let sx = self.bodies.iter().map(|b| b.x).sum::<f64>() / n - self.config.center.x;
        let sy = self.bodies.iter().map(|b| b.y).sum::<f64>() / n - self.config.center.y;
        let s = self.config.center_strength;
        for b in &mut self.bodies {
            b.x -= sx * s;
            b.y -= sy * s;
        }
    }

    fn apply_axis_pull(&mut self, alpha: f64) {
        let c = self.config.center;
        let (kx, ky) = (self.config.x_strength * alpha, self.config.y_strength * alpha);
        for b in &mut self.bodies {
            b.vx += (c.x - b.x) * kx;
            b.vy += (c.y - b.y) * ky;
        }
    }

    /// Push apart circles whose next positions would overlap. The smaller
    /// circle takes the larger share of the correction.
    fn apply_collide(&mut self) {
        let margin = self.config.collision_margin;
        let strength = self.config.collision_strength;
        let n = self.bodies.len();
        for i in 0..n {
            let ri = self.bodies[i].radius + margin;
            let ri2 = ri * ri;
            let xi = self.bodies[i].x + self.bodies[i].vx;
            let yi = self.bodies[i].y + self.bodies[i].vy;
            for j in (i + 1)..n {
                let other = self.bodies[j];
                let rj = other.radius + margin;
                let r = ri + rj;
                let mut x = xi - other.x - other.vx;
                let mut y = yi - other.y - other.vy;
                let mut l = x * x + y * y;
                if l >= r * r {
                    continue;
                }
                if x == 0.0 {
                    x = self.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = self.jiggle();
                    l += y * y;
                }
                let d = l.sqrt();
                let k = (r - d) / d * strength;
                x *= k;
                y *= k;
                let rj2 = rj * rj;
                let share = rj2 / (ri2 + rj2);
                self.bodies[i].vx += x * share;
                self.bodies[i].vy += y * share;
                self.bodies[j].vx -= x * (1.0 - share);
                self.bodies[j].vy -= y * (1.0 - share);
            }
        }
    }
}

impl Default for ForceSimulation {
    fn default() -> Self {
        Self::new(ForceConfig::default())
    }
}

impl RelaxationSolver for ForceSimulation {
    fn name(&self) -> &str {
        "force"
    }

    fn configure(&mut self, forces: ForceConfig) {
        self.rng = StdRng::seed_from_u64(forces.jiggle_seed);
        self.config = forces;
    }

    fn set_bodies(&mut self, bodies: Vec<Body>) {
        self.bodies = bodies
            .into_iter()
            .map(|b| Body { vx: 0.0, vy: 0.0, ..b })
            .collect();
        self.alpha = self.config.reheat_alpha;
        // Same bodies in, same positions out, whatever ran before.
        self.rng = StdRng::seed_from_u64(self.config.jiggle_seed);
    }

    fn step(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
        trace!("stepped {} bodies {n} ticks, alpha {:.5}", self.bodies.len(), self.alpha);
    }

    fn tick(&mut self) -> bool {
        if self.alpha < self.config.alpha_min {
            return false;
        }
        self.advance();
        if let Some(hook) = self.hook.as_mut() {
            hook(self.bodies.as_mut_slice());
        }
        trace!("tick alpha {:.5}", self.alpha);
        true
    }

    fn on_tick(&mut self, hook: TickHook) {
        self.hook = Some(hook);
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn centered(x: f64, y: f64) -> ForceSimulation {
        ForceSimulation::new(ForceConfig {
            center: Point::new(x, y),
            ..ForceConfig::default()
        })
    }

    #[test]
    fn test_lone_body_moves_to_center() {
        let mut sim = centered(100.0, 50.0);
        sim.set_bodies(vec![Body::at(Point::new(0.0, 0.0), 10.0)]);
        sim.step(1);
        let b = sim.bodies()[0];
        assert_relative_eq!(b.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(b.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overlapping_bodies_separate() {
        let mut sim = centered(0.0, 0.0);
        sim.set_bodies(vec![
            Body::at(Point::new(-5.0, 0.0), 20.0),
            Body::at(Point::new(5.0, 0.0), 20.0),
        ]);
        sim.step(80);
        let d = sim.bodies()[0].position().distance(sim.bodies()[1].position());
        assert!(d > 38.0, "distance {d}");
    }

    #[test]
    fn test_coincident_bodies_separate() {
        let mut sim = centered(0.0, 0.0);
        sim.set_bodies(vec![
            Body::at(Point::new(0.0, 0.0), 10.0),
            Body::at(Point::new(0.0, 0.0), 10.0),
        ]);
        sim.step(80);
        let d = sim.bodies()[0].position().distance(sim.bodies()[1].position());
        assert!(d > 20.0, "distance {d}");
    }

    #[test]
    fn test_same_input_same_output() {
        let bodies = vec![
            Body::at(Point::new(0.0, 0.0), 12.0),
            Body::at(Point::new(0.0, 0.0), 8.0),
            Body::at(Point::new(30.0, -4.0), 15.0),
        ];
        let mut a = centered(10.0, 10.0);
        a.set_bodies(bodies.clone());
        a.step(40);
        let mut b = centered(10.0, 10.0);
        b.step(3);
        b.set_bodies(bodies);
        b.step(40);
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_set_bodies_reheats_and_zeroes_velocity() {
        let mut sim = ForceSimulation::default();
        let mut moving = Body::at(Point::new(1.0, 2.0), 5.0);
        moving.vx = 9.0;
        sim.set_bodies(vec![moving]);
        assert_eq!(sim.bodies()[0].vx, 0.0);
        assert_eq!(sim.alpha(), ForceConfig::default().reheat_alpha);
    }

    #[test]
    fn test_tick_runs_hook_and_cools_down() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut sim = ForceSimulation::default();
        sim.on_tick(Box::new(move |_bodies| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        sim.set_bodies(vec![Body::at(Point::new(3.0, 3.0), 5.0)]);

        sim.step(10);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let mut ticks = 0;
        while sim.tick() {
            ticks += 1;
            assert!(ticks < 10_000);
        }
        assert_eq!(calls.load(Ordering::SeqCst), ticks);
        assert!(sim.alpha() < ForceConfig::default().alpha_min);
        assert!(!sim.tick());
    }

    #[test]
    fn test_hook_can_move_bodies() {
        let mut sim = ForceSimulation::default();
        sim.on_tick(Box::new(|bodies| {
            for b in bodies.iter_mut() {
                b.x = b.x.max(500.0);
            }
        }));
        sim.set_bodies(vec![Body::at(Point::new(0.0, 0.0), 5.0)]);
        assert!(sim.tick());
        assert_eq!(sim.bodies()[0].x, 500.0);
    }
}
