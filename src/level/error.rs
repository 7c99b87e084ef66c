//! Level loading errors.
//!
//! Gameplay never fails; these only cover level text or pack lookups a
//! caller got wrong.

/// Errors produced while parsing level text or looking up levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    /// No `Size` statement anywhere in the level text.
    #[error("level text has no Size statement")]
    MissingSize,

    /// A `Size` statement that is not `<W>x<H>` with positive dimensions.
    #[error("invalid size '{0}', expected <width>x<height>")]
    InvalidSize(String),

    /// A placement coordinate that is not `<x>,<y>`.
    #[error("invalid coordinate '{coord}' for '{name}', expected <x>,<y>")]
    InvalidCoordinate { name: String, coord: String },

    /// An `@` suffix that is not `up`, `right`, `down` or `left`.
    #[error("invalid direction '{direction}' for '{name}'")]
    InvalidDirection { name: String, direction: String },

    /// A placement outside the declared size.
    #[error("'{name}' at ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        name: String,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// A level index past the end of the pack.
    #[error("no level at index {index} (pack has {len} levels)")]
    InvalidIndex { index: usize, len: usize },
}
