//! `nv-layout` - Stable bubble layout for the visible token set.
//!
//! This crate provides:
//! - Radius and color scales driven by probability
//! - A `RelaxationSolver` trait and a reference `ForceSimulation`
//! - `LayoutEngine`, which seeds positions from the previous `LayoutState`
//!   and settles them before handing them to a renderer

pub mod engine;
pub mod force;
pub mod geometry;
pub mod placement;
pub mod scale;
pub mod solver;
pub mod state;

pub use engine::{Layout, LayoutEngine, PositionedItem, DEFAULT_RELAX_STEPS};
pub use force::ForceSimulation;
pub use geometry::{Canvas, Point};
pub use placement::{initial_position, label_angle};
pub use scale::{ColorRamp, RadiusRange, Rgb};
pub use solver::{Body, ForceConfig, RelaxationSolver, TickHook};
pub use state::LayoutState;
