//! `nv-sampler` - Probability side of nucleus-viz.
//!
//! This crate provides:
//! - `ScoreSet`, the immutable vocabulary of labels and raw scores
//! - Temperature-scaled, numerically stable softmax
//! - `TopK` and `TopP` truncation stages composed by a `TruncationChain`

pub mod distribution;
pub mod error;
pub mod score;
pub mod temperature;
pub mod top_k;
pub mod top_p;
pub mod truncation;

pub use distribution::{compute_distribution, ScoredItem};
pub use error::{Result, ScoreSetError};
pub use score::{Item, ScoreSet};
pub use temperature::{clamp_temperature, TEMPERATURE_FLOOR};
pub use top_k::TopK;
pub use top_p::{TopP, TOP_P_EPSILON};
pub use truncation::{truncate, Truncation, TruncationChain, Truncator, VisibleItem};
