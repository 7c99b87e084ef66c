//! Win and lose detection.

use crate::board::Board;
use crate::core::{GameStatus, Property};
use crate::matching::RuleContext;
use crate::rules::RuleSet;

/// Status of a board still in play.
///
/// Win when a `you` item shares a cell and float layer with a `win` item
/// (possibly itself), or when `LEVEL IS WIN` holds. Otherwise lose when no
/// `you` item is left.
#[must_use]
pub fn evaluate_status(board: &Board, rules: &RuleSet) -> GameStatus {
    let ctx = RuleContext::new(board, rules);
    let mut players = board.items().filter(|item| item.has(Property::You)).peekable();
    if players.peek().is_none() {
        return if ctx.level_wins() { GameStatus::Win } else { GameStatus::Lose };
    }

    let touching_win = players.any(|player| {
        board
            .layer_at(player.pos(), player.is_floating())
            .any(|other| other.has(Property::Win))
    });
    if touching_win || ctx.level_wins() {
        GameStatus::Win
    } else {
        GameStatus::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Item, ItemId, PropertySet};
    use crate::rules::{Rule, LEVEL};

    fn item(id: u32, pos: (i32, i32), props: &[Property]) -> Item {
        let mut item = Item::object(ItemId(id), "thing", pos);
        item.props = props.iter().copied().collect::<PropertySet>();
        item
    }

    #[test]
    fn test_you_on_win() {
        let mut board = Board::new(3, 3);
        board.insert(item(1, (1, 1), &[Property::You]));
        board.insert(item(2, (1, 1), &[Property::Win]));

        assert_eq!(evaluate_status(&board, &RuleSet::new()), GameStatus::Win);
    }

    #[test]
    fn test_you_and_win_on_one_item() {
        let mut board = Board::new(3, 3);
        board.insert(item(1, (1, 1), &[Property::You, Property::Win]));

        assert_eq!(evaluate_status(&board, &RuleSet::new()), GameStatus::Win);
    }

    #[test]
    fn test_win_needs_same_layer() {
        let mut board = Board::new(3, 3);
        board.insert(item(1, (1, 1), &[Property::You]));
        board.insert(item(2, (1, 1), &[Property::Win, Property::Float]));

        assert_eq!(evaluate_status(&board, &RuleSet::new()), GameStatus::Playing);
    }

    #[test]
    fn test_no_you_loses() {
        let mut board = Board::new(3, 3);
        board.insert(item(1, (1, 1), &[Property::Win]));

        assert_eq!(evaluate_status(&board, &RuleSet::new()), GameStatus::Lose);
    }

    #[test]
    fn test_level_is_win() {
        let board = Board::new(3, 3);
        let rules: RuleSet = [Rule::property(LEVEL, Property::Win)].into_iter().collect();

        assert_eq!(evaluate_status(&board, &rules), GameStatus::Win);
    }
}
