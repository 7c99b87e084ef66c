//! Turn orchestration: the phase pipeline, win/lose, and entry points.

pub mod phase;
pub mod outcome;
pub mod engine;

pub use phase::{Phase, Refresh};
pub use outcome::evaluate_status;
pub use engine::{create_initial_state, mark_campaign_complete, step, Engine};
