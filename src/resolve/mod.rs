//! Rule effects that do not move anything.
//!
//! - `properties`: derived property sets and forced facing
//! - `transform`: `X IS Y` and `EMPTY IS Y`
//! - `spawn`: destruction with `HAS`, plus `MAKE`, `WRITE` and `MORE`
//!
//! Every function here takes the board and the current rule set, mutates
//! the board, and reports whether anything changed.

pub mod properties;
pub mod transform;
pub mod spawn;

pub use properties::{apply_facing, apply_properties};
pub use spawn::{apply_make, apply_more, apply_write, destroy_items};
pub use transform::apply_transforms;
