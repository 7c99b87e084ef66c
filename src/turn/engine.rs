//! Turn resolution.
//!
//! A step loads the incoming state into a [`Board`], runs every
//! [`Phase`] in order, and freezes the board into a new [`GameState`].
//! After each phase that changed something the rules are read off the
//! board again (or just the properties recomputed, for facing), so later
//! phases always see the sentences as they stand right now.

use tracing::{debug, trace};

use super::outcome::evaluate_status;
use super::phase::{Phase, Refresh};
use crate::board::Board;
use crate::core::{
    Direction, EngineConfig, GameState, GameStatus, Signature, StepResult, TeleportRng,
};
use crate::interaction::{apply_interactions, apply_teleport};
use crate::level::LevelData;
use crate::movement::{apply_fall, apply_move, apply_shift, move_players};
use crate::resolve::{
    apply_facing, apply_make, apply_more, apply_properties, apply_transforms, apply_write,
};
use crate::rules::RuleSet;

/// Turn engine.
///
/// Stateless apart from its configuration: the same state and input
/// always produce the same result.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with a configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the opening state of a level.
    #[must_use]
    pub fn create_initial_state(&self, level: &LevelData, index: usize) -> GameState {
        create_initial_state(level, index)
    }

    /// Resolve one turn. `None` is a wait.
    ///
    /// A state that is no longer playing comes back unchanged with
    /// `changed = false`.
    #[must_use]
    pub fn step(&self, state: &GameState, input: Option<Direction>) -> StepResult {
        if !state.is_playing() {
            return StepResult {
                state: state.clone(),
                changed: false,
            };
        }

        let turn = state.turn.wrapping_add(1);
        let rng = TeleportRng::for_turn(turn, self.config.teleport_stream);
        let mut work = Working::load(state, rng);
        let mut changed = false;

        for phase in Phase::ORDER {
            if work.run(phase, input) {
                debug!(turn, phase = phase.name(), "phase changed the board");
                work.refresh(phase.refresh());
                changed = true;
            }
        }

        let status = evaluate_status(&work.board, &work.rules);
        if status != state.status {
            debug!(turn, from = ?state.status, to = ?status, "status changed");
            changed = true;
        }

        work.refresh(Refresh::Rules);
        StepResult {
            state: work.freeze(state, status, turn),
            changed,
        }
    }

    /// Flag a state as the end of the campaign.
    #[must_use]
    pub fn mark_campaign_complete(&self, state: &GameState) -> GameState {
        mark_campaign_complete(state)
    }
}

/// Build the opening state of a level.
///
/// Items get IDs in placement order. Rules and properties are resolved so
/// the state is ready to render before the first step.
#[must_use]
pub fn create_initial_state(level: &LevelData, index: usize) -> GameState {
    let mut board = Board::new(level.width, level.height);
    for placement in &level.items {
        let pos = (placement.x, placement.y);
        if placement.is_text {
            board.spawn(&Signature::text(placement.name.as_str()), pos, None);
        } else {
            board.spawn(&Signature::object(placement.name.as_str()), pos, placement.dir);
        }
    }

    let rules = board.extract_rules();
    apply_properties(&mut board, &rules);
    debug!(level = index, items = board.len(), rules = rules.len(), "level loaded");

    GameState {
        level_index: index,
        title: level.title.clone(),
        width: level.width,
        height: level.height,
        items: board.to_items(),
        rules: rules.iter().cloned().collect(),
        status: GameStatus::Playing,
        turn: 0,
        ids: board.id_allocator(),
    }
}

/// Resolve one turn with the default configuration.
#[must_use]
pub fn step(state: &GameState, input: Option<Direction>) -> StepResult {
    Engine::default().step(state, input)
}

/// Flag a state as the end of the campaign.
#[must_use]
pub fn mark_campaign_complete(state: &GameState) -> GameState {
    GameState {
        status: GameStatus::Complete,
        ..state.clone()
    }
}

/// Board, rules and RNG for the turn being resolved.
struct Working {
    board: Board,
    rules: RuleSet,
    rng: TeleportRng,
}

impl Working {
    fn load(state: &GameState, rng: TeleportRng) -> Self {
        let mut work = Self {
            board: Board::from_state(state),
            rules: RuleSet::new(),
            rng,
        };
        work.refresh(Refresh::Rules);
        work
    }

    fn run(&mut self, phase: Phase, input: Option<Direction>) -> bool {
        let Self { board, rules, rng } = self;
        let rules = &*rules;
        match phase {
            Phase::PlayerMove => match input {
                Some(dir) => move_players(board, rules, dir),
                None => false,
            },
            Phase::Move => apply_move(board, rules),
            Phase::Fall => apply_fall(board),
            Phase::Shift => apply_shift(board, rules),
            Phase::Facing => apply_facing(board),
            Phase::Transform => apply_transforms(board, rules),
            Phase::Make => apply_make(board, rules),
            Phase::Write => apply_write(board, rules),
            Phase::More => apply_more(board),
            Phase::Interact => apply_interactions(board, rules),
            Phase::Teleport => apply_teleport(board, rng),
        }
    }

    fn refresh(&mut self, refresh: Refresh) {
        if refresh == Refresh::Rules {
            self.rules = self.board.extract_rules();
            trace!(rules = self.rules.len(), "rules extracted");
        }
        apply_properties(&mut self.board, &self.rules);
    }

    fn freeze(self, prev: &GameState, status: GameStatus, turn: u32) -> GameState {
        GameState {
            level_index: prev.level_index,
            title: prev.title.clone(),
            width: prev.width,
            height: prev.height,
            items: self.board.to_items(),
            rules: self.rules.iter().cloned().collect(),
            status,
            turn,
            ids: self.board.id_allocator(),
        }
    }
}
