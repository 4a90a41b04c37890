use std::time::Instant;

use log::debug;
use nv_layout::{Canvas, ForceSimulation, LayoutEngine, LayoutState, RelaxationSolver};
use nv_sampler::{truncate, ScoreSet};

use crate::config::SessionConfig;
use crate::debounce::Debouncer;
use crate::display::{format_mass, format_percentage, Reconciliation};
use crate::types::{Controls, DisplayItem, Frame};

/// Owns the vocabulary, the layout engine and the one piece of state carried
/// between cycles.
pub struct Session<S: RelaxationSolver = ForceSimulation> {
    scores: ScoreSet,
    config: SessionConfig,
    engine: LayoutEngine<S>,
    state: LayoutState,
    shown: Vec<String>,
    pending: Debouncer<Controls>,
}

impl Session<ForceSimulation> {
    pub fn new(scores: ScoreSet, config: SessionConfig) -> Self {
        let solver = ForceSimulation::new(config.forces.clone());
        let engine = LayoutEngine::with_solver(solver, config.forces.clone());
        Self::with_engine(scores, config, engine)
    }

    /// Build a session from a JSON vocabulary (see [`ScoreSet::from_json`]).
    pub fn from_json(json: &str, config: SessionConfig) -> nv_sampler::Result<Self> {
        Ok(Self::new(ScoreSet::from_json(json)?, config))
    }
}

impl<S: RelaxationSolver> Session<S> {
    /// The engine's relax steps and color ramp are overridden from `config`.
    pub fn with_engine(scores: ScoreSet, config: SessionConfig, engine: LayoutEngine<S>) -> Self {
        let engine = engine
            .with_relax_steps(config.relax_steps)
            .with_color_ramp(config.colors);
        let pending = Debouncer::new(config.debounce);
        Self {
            scores,
            config,
            engine,
            state: LayoutState::new(),
            shown: Vec::new(),
            pending,
        }
    }

    pub fn scores(&self) -> &ScoreSet {
        &self.scores
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Resize the drawing area. Items on screen are clamped into it at once,
    /// background ticks respect it, and the next cycle lays out on it.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.config.canvas = canvas;
        self.engine.set_canvas(canvas);
        self.state = self.engine.snapshot();
    }

    /// Run one full cycle synchronously: softmax, truncation, layout.
    pub fn recompute(&mut self, controls: Controls) -> Frame {
        let distribution = self.scores.distribution(controls.temperature);
        let truncation = truncate(&distribution, controls.top_k, controls.top_p);

        let layout = self.engine.layout(
            &truncation.visible,
            &self.state,
            self.config.canvas,
            self.config.radii,
        );
        self.state = layout.state;

        let labels: Vec<String> = layout.positioned.iter().map(|p| p.label.clone()).collect();
        let Reconciliation {
            entering, exiting, ..
        } = Reconciliation::between(&self.shown, &labels);
        self.shown = labels;

        debug!(
            "cycle k={} p={} t={}: {} visible, {} entering, {} exiting, mass {:.4}",
            controls.top_k,
            controls.top_p,
            controls.temperature,
            layout.positioned.len(),
            entering.len(),
            exiting.len(),
            truncation.realized_cumulative_mass
        );

        let items = layout
            .positioned
            .into_iter()
            .map(|item| DisplayItem {
                percentage: format_percentage(item.probability),
                item,
            })
            .collect();

        Frame {
            controls,
            items,
            realized_cumulative_mass: truncation.realized_cumulative_mass,
            mass_readout: format_mass(truncation.realized_cumulative_mass),
            entering,
            exiting,
        }
    }

    /// Queue a control change. A newer change replaces one not yet run.
    pub fn submit(&mut self, controls: Controls, now: Instant) {
        if self.pending.submit(controls, now).is_some() {
            debug!("superseded pending recompute");
        }
    }

    /// Run the queued cycle if its quiet period has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Frame> {
        let controls = self.pending.poll(now)?;
        Some(self.recompute(controls))
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.due_at()
    }

    /// One background settling tick. Positions stay inside the canvas and the
    /// carried state follows them. Returns `false` once the layout has cooled.
    pub fn tick(&mut self) -> bool {
        if !self.engine.tick() {
            return false;
        }
        self.state = self.engine.snapshot();
        true
    }
}
