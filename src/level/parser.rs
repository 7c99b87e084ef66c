//! Level text parser.
//!
//! A level is a list of `;`-separated statements:
//!
//! ```text
//! Title Baba Is You; Size 6x3; Background black;
//! Baba 0,0; Is 1,0; You 2,0; baba@up 3,2 4,2
//! ```
//!
//! - `Title <text>`: the level title
//! - `Size <W>x<H>`: board size (required)
//! - `Background <anything>`: ignored
//! - `<Name[@dir]> <x,y> ...`: tiles. A capitalised name places word
//!   tiles, a lowercase name places objects. `@dir` sets an object's
//!   initial facing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::LevelError;
use crate::core::{Direction, Pos};

/// One tile placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelItem {
    /// Lowercase noun or word.
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub is_text: bool,
    #[serde(default)]
    pub dir: Option<Direction>,
}

/// A parsed level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// Placements in text order.
    pub items: Vec<LevelItem>,
}

impl LevelData {
    /// Parse level text.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        parse_level(text)
    }
}

impl FromStr for LevelData {
    type Err = LevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_level(text)
    }
}

/// Parse level text into a [`LevelData`].
///
/// Blank statements are skipped. Every placement must lie inside the
/// declared size, wherever the `Size` statement appears.
pub fn parse_level(text: &str) -> Result<LevelData, LevelError> {
    let mut title = String::new();
    let mut size = None;
    let mut items = Vec::new();

    for statement in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (head, rest) = match statement.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (statement, ""),
        };
        match head {
            "Title" => title = rest.to_string(),
            "Size" => size = Some(parse_size(rest)?),
            "Background" => {}
            _ => items.extend(parse_placement(head, rest)?),
        }
    }

    let (width, height) = size.ok_or(LevelError::MissingSize)?;
    if let Some(item) = items
        .iter()
        .find(|item: &&LevelItem| item.x < 0 || item.y < 0 || item.x >= width || item.y >= height)
    {
        return Err(LevelError::OutOfBounds {
            name: item.name.clone(),
            x: item.x,
            y: item.y,
            width,
            height,
        });
    }

    Ok(LevelData {
        title,
        width,
        height,
        items,
    })
}

fn parse_size(text: &str) -> Result<(i32, i32), LevelError> {
    let invalid = || LevelError::InvalidSize(text.to_string());
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: i32 = w.trim().parse().map_err(|_| invalid())?;
    let height: i32 = h.trim().parse().map_err(|_| invalid())?;
    if width <= 0 || height <= 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

fn parse_placement(head: &str, coords: &str) -> Result<Vec<LevelItem>, LevelError> {
    let (word, suffix) = match head.split_once('@') {
        Some((word, suffix)) => (word, Some(suffix)),
        None => (head, None),
    };
    let is_text = word.starts_with(|c: char| c.is_uppercase());
    let name = word.to_lowercase();
    if name.is_empty() {
        warn!(statement = head, "placement without a name ignored");
        return Ok(Vec::new());
    }

    let dir = match suffix {
        Some(suffix) => Some(Direction::from_word(&suffix.to_lowercase()).ok_or_else(|| {
            LevelError::InvalidDirection {
                name: name.clone(),
                direction: suffix.to_string(),
            }
        })?),
        None => None,
    };
    let dir = if is_text && dir.is_some() {
        warn!(name = %name, "facing on a word tile ignored");
        None
    } else {
        dir
    };

    coords
        .split_whitespace()
        .map(|coord| {
            let (x, y) = parse_coord(&name, coord)?;
            Ok(LevelItem {
                name: name.clone(),
                x,
                y,
                is_text,
                dir,
            })
        })
        .collect()
}

fn parse_coord(name: &str, coord: &str) -> Result<Pos, LevelError> {
    let invalid = || LevelError::InvalidCoordinate {
        name: name.to_string(),
        coord: coord.to_string(),
    };
    let (x, y) = coord.split_once(',').ok_or_else(invalid)?;
    let x = x.parse().map_err(|_| invalid())?;
    let y = y.parse().map_err(|_| invalid())?;
    Ok((x, y))
}
