//! `nv-session` - One recompute cycle per control change.
//!
//! Controls flow through softmax, truncation and layout; the resulting
//! `Frame` is what a renderer reconciles against its current shapes.

pub mod config;
pub mod debounce;
pub mod display;
pub mod session;
pub mod types;

pub use config::SessionConfig;
pub use debounce::Debouncer;
pub use display::{format_mass, format_percentage, Reconciliation};
pub use session::Session;
pub use types::{Controls, DisplayItem, Frame};
