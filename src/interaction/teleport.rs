//! `X IS TELE`.
//!
//! Items standing on a `tele` pad jump to another pad of the same float
//! layer. Destinations are drawn from the turn's [`TeleportRng`], so a
//! replay of the same turn lands everything in the same place.

use tracing::trace;

use crate::board::Board;
use crate::core::{ItemId, Pos, Property, TeleportRng};

/// Teleport every non-`tele` item standing on a pad.
///
/// Per layer (grounded first), pads are the distinct cells holding a
/// `tele` item, ordered by `(y, x)`. A layer with fewer than two pads does
/// nothing. Travelers are handled in ID order, each drawing uniformly
/// among the pads other than the one it stands on.
pub fn apply_teleport(board: &mut Board, rng: &mut TeleportRng) -> bool {
    let mut jumps: Vec<(ItemId, Pos)> = Vec::new();

    for floating in [false, true] {
        let mut pads: Vec<Pos> = board
            .items()
            .filter(|item| item.has(Property::Tele) && item.is_floating() == floating)
            .map(|item| item.pos())
            .collect();
        pads.sort_unstable_by_key(|&(x, y)| (y, x));
        pads.dedup();
        if pads.len() < 2 {
            continue;
        }

        let travelers = board
            .items()
            .filter(|item| !item.has(Property::Tele) && item.is_floating() == floating)
            .filter(|item| pads.contains(&item.pos()));
        for item in travelers {
            let here = item.pos();
            let others: Vec<Pos> = pads.iter().copied().filter(|pad| *pad != here).collect();
            if let Some(choice) = rng.choose_index(others.len()) {
                jumps.push((item.id, others[choice]));
            }
        }
    }

    trace!(jumps = jumps.len(), seed = rng.seed(), "teleport");
    let mut changed = false;
    for (id, to) in jumps {
        changed |= board.move_item(id, to);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Item, PropertySet};

    fn pad(id: u32, pos: Pos) -> Item {
        let mut item = Item::object(ItemId(id), "pad", pos);
        item.props = [Property::Tele].into_iter().collect::<PropertySet>();
        item
    }

    fn rng(turn: u32) -> TeleportRng {
        TeleportRng::for_turn(turn, TeleportRng::DEFAULT_STREAM)
    }

    #[test]
    fn test_recorded_destinations() {
        let mut board = Board::new(5, 1);
        board.insert(pad(1, (4, 0)));
        board.insert(pad(2, (0, 0)));
        board.insert(pad(3, (2, 0)));
        board.insert(Item::object(ItemId(4), "baba", (0, 0)));
        board.insert(Item::object(ItemId(5), "keke", (2, 0)));

        assert!(apply_teleport(&mut board, &mut rng(1)));

        // Turn 1 draws 1 then 0 from two choices.
        assert_eq!(board.item(ItemId(4)).unwrap().pos(), (4, 0));
        assert_eq!(board.item(ItemId(5)).unwrap().pos(), (0, 0));
    }

    #[test]
    fn test_same_turn_same_result() {
        let build = || {
            let mut board = Board::new(3, 3);
            board.insert(pad(1, (0, 0)));
            board.insert(pad(2, (2, 0)));
            board.insert(pad(3, (1, 2)));
            board.insert(pad(4, (2, 2)));
            board.insert(Item::object(ItemId(5), "baba", (1, 2)));
            board
        };

        let mut a = build();
        let mut b = build();
        apply_teleport(&mut a, &mut rng(9));
        apply_teleport(&mut b, &mut rng(9));
        assert_eq!(a.to_items(), b.to_items());
    }

    #[test]
    fn test_single_pad_does_nothing() {
        let mut board = Board::new(3, 1);
        board.insert(pad(1, (0, 0)));
        board.insert(pad(2, (0, 0)));
        board.insert(Item::object(ItemId(3), "baba", (0, 0)));

        assert!(!apply_teleport(&mut board, &mut rng(1)));
    }

    #[test]
    fn test_layers_are_separate() {
        let mut board = Board::new(3, 1);
        board.insert(pad(1, (0, 0)));
        board.insert(pad(2, (2, 0)));
        let mut bird = Item::object(ItemId(3), "bird", (0, 0));
        bird.props.insert(Property::Float);
        board.insert(bird);

        assert!(!apply_teleport(&mut board, &mut rng(1)));
    }
}
