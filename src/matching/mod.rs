//! Rule matching.
//!
//! - `context`: `RuleContext`, subject matching and target expansion
//! - `condition`: `LONELY` / `ON` / `NEAR` / `FACING` evaluation

pub mod context;
pub mod condition;

pub use context::{EmptyTraits, RuleContext};
