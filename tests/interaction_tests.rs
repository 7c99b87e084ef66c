//! Interaction and teleport integration tests.
//!
//! Same-cell effects, float layers, win detection, and the recorded
//! teleport destinations.

use rust_wordgrid::{
    create_initial_state, parse_level, step, Direction, Engine, EngineConfig, GameState,
    GameStatus, Pos,
};

fn load(text: &str) -> GameState {
    create_initial_state(&parse_level(text).unwrap(), 0)
}

fn positions(state: &GameState, name: &str) -> Vec<Pos> {
    state.objects_named(name).map(|item| item.pos()).collect()
}

const BABA_IS_YOU: &str = "Baba 0,0; Is 1,0; You 2,0";

// =============================================================================
// Destruction Tests
// =============================================================================

/// Test that open and shut cancel out pairwise.
#[test]
fn test_open_shut_min_count() {
    let state = load(&format!(
        "Size 4x4; {BABA_IS_YOU}; Key 0,1; Is 1,1; Open 2,1; Door 0,2; Is 1,2; Shut 2,2; \
         key 3,3; door 3,3; key 3,3; baba 0,3"
    ));
    let result = step(&state, None);

    assert!(result.changed);
    assert!(positions(&result.state, "door").is_empty());
    let keys: Vec<_> = result.state.objects_named("key").map(|item| item.id).collect();
    assert_eq!(keys.len(), 1);
    // The lower ID pairs off first.
    assert_eq!(keys[0], state.objects_named("key").nth(1).unwrap().id);
}

/// Test that walking into water sinks both and leaves what the player had.
#[test]
fn test_sink_and_has() {
    let state = load(&format!(
        "Size 5x4; {BABA_IS_YOU}; Water 0,1; Is 1,1; Sink 2,1; Baba 0,2; Has 1,2; Key 2,2; \
         baba 0,3; water 1,3"
    ));
    let result = step(&state, Some(Direction::Right));

    assert!(positions(&result.state, "baba").is_empty());
    assert!(positions(&result.state, "water").is_empty());
    assert_eq!(positions(&result.state, "key"), vec![(1, 3)]);
    assert_eq!(result.state.status, GameStatus::Lose);
}

/// Test that hot melts and defeat kills YOU in the same step.
#[test]
fn test_hot_and_defeat() {
    let state = load(&format!(
        "Size 6x5; {BABA_IS_YOU}; Lava 0,1; Is 1,1; Hot 2,1; Keke 0,2; Is 1,2; Melt 2,2; \
         Skull 0,3; Is 1,3; Defeat 2,3; baba 3,4; skull 4,4; keke 5,4; lava 5,4"
    ));
    let result = step(&state, Some(Direction::Right));

    assert!(positions(&result.state, "keke").is_empty());
    assert!(positions(&result.state, "baba").is_empty());
    assert_eq!(positions(&result.state, "lava"), vec![(5, 4)]);
    assert_eq!(result.state.status, GameStatus::Lose);
}

/// Test that an eater removes what its rule names.
#[test]
fn test_eat() {
    let state = load(&format!(
        "Size 5x4; {BABA_IS_YOU}; Baba 0,1; Eat 1,1; Rock 2,1; baba 0,3; rock 1,3; flag 1,3"
    ));
    let result = step(&state, Some(Direction::Right));

    assert!(positions(&result.state, "rock").is_empty());
    assert_eq!(positions(&result.state, "flag"), vec![(1, 3)]);
    assert_eq!(positions(&result.state, "baba"), vec![(1, 3)]);
}

// =============================================================================
// Float Layer Tests
// =============================================================================

/// Test that a grounded player cannot win on a floating flag.
#[test]
fn test_win_requires_same_layer() {
    let state = load(&format!(
        "Size 6x5; {BABA_IS_YOU}; Flag 0,1; Is 1,1; Win 2,1; Flag 0,2; Is 1,2; Float 2,2; \
         baba 0,4; flag 1,4"
    ));
    let result = step(&state, Some(Direction::Right));

    assert_eq!(positions(&result.state, "baba"), vec![(1, 4)]);
    assert_eq!(result.state.status, GameStatus::Playing);
}

/// Test that once both float, the player wins.
#[test]
fn test_win_in_float_layer() {
    let state = load(&format!(
        "Size 6x5; {BABA_IS_YOU}; Flag 0,1; Is 1,1; Win 2,1; Flag 0,2; And 1,2; Baba 2,2; Is 3,2; \
         Float 4,2; baba 0,4; flag 1,4"
    ));
    let result = step(&state, Some(Direction::Right));

    assert_eq!(result.state.status, GameStatus::Win);
}

/// Test that a floating skull does not defeat a grounded player.
#[test]
fn test_defeat_requires_same_layer() {
    let state = load(&format!(
        "Size 6x5; {BABA_IS_YOU}; Skull 0,1; Is 1,1; Defeat 2,1; Skull 0,2; Is 1,2; Float 2,2; \
         baba 0,4; skull 1,4"
    ));
    let result = step(&state, Some(Direction::Right));

    assert_eq!(positions(&result.state, "baba"), vec![(1, 4)]);
    assert_eq!(result.state.status, GameStatus::Playing);
}

// =============================================================================
// Teleport Tests
// =============================================================================

const TELEPORT_LEVEL: &str = "Size 5x3; pad 4,0 0,0 2,0; baba 0,0; keke 2,0; \
    Baba 0,1; Is 1,1; You 2,1; Pad 0,2; Is 1,2; Tele 2,2";

/// Test teleport destinations against recorded values for turns 1 and 2.
#[test]
fn test_teleport_recorded_destinations() {
    let state = load(TELEPORT_LEVEL);

    let first = step(&state, None);
    assert!(first.changed);
    assert_eq!(positions(&first.state, "baba"), vec![(4, 0)]);
    assert_eq!(positions(&first.state, "keke"), vec![(0, 0)]);

    let second = step(&first.state, None);
    assert_eq!(positions(&second.state, "baba"), vec![(0, 0)]);
    assert_eq!(positions(&second.state, "keke"), vec![(4, 0)]);
}

/// Test that replaying a turn from the same state lands the same way.
#[test]
fn test_teleport_replay() {
    let state = load(TELEPORT_LEVEL);
    let engine = Engine::new(EngineConfig::default().with_teleport_stream(0x5eed));

    let a = engine.step(&state, None);
    let b = engine.step(&state, None);
    assert_eq!(a, b);
    assert_eq!(positions(&a.state, "pad"), vec![(4, 0), (0, 0), (2, 0)]);
}
