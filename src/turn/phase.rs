//! The ordered phases of a turn.

/// One phase of turn resolution. [`Phase::ORDER`] is the fixed pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The player's input, skipped on a wait.
    PlayerMove,
    /// `X IS MOVE` batch.
    Move,
    Fall,
    /// `X IS SHIFT` belts.
    Shift,
    /// `X IS UP/RIGHT/DOWN/LEFT`.
    Facing,
    /// `X IS Y`, including `EMPTY IS X`.
    Transform,
    Make,
    Write,
    More,
    /// Sink, defeat, melt, open/shut, eat, weak.
    Interact,
    Teleport,
}

/// What a phase that changed the board needs recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    /// Read the rules off the board again, then recompute properties.
    Rules,
    /// Recompute properties against the current rules.
    Properties,
}

impl Phase {
    /// Resolution order.
    pub const ORDER: [Phase; 11] = [
        Phase::PlayerMove,
        Phase::Move,
        Phase::Fall,
        Phase::Shift,
        Phase::Facing,
        Phase::Transform,
        Phase::Make,
        Phase::Write,
        Phase::More,
        Phase::Interact,
        Phase::Teleport,
    ];

    /// Facing only turns items, so the words stay put.
    #[must_use]
    pub fn refresh(self) -> Refresh {
        match self {
            Phase::Facing => Refresh::Properties,
            _ => Refresh::Rules,
        }
    }

    /// Name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::PlayerMove => "player_move",
            Phase::Move => "move",
            Phase::Fall => "fall",
            Phase::Shift => "shift",
            Phase::Facing => "facing",
            Phase::Transform => "transform",
            Phase::Make => "make",
            Phase::Write => "write",
            Phase::More => "more",
            Phase::Interact => "interact",
            Phase::Teleport => "teleport",
        }
    }
}
