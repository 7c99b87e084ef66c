//! Board working copy and cell index.
//!
//! - `CellIndex`: which items occupy which cell
//! - `Board`: the items of one turn in progress

pub mod cells;
pub mod grid;

pub use cells::{CellContents, CellIndex};
pub use grid::Board;
