//! Session Tests - Tick Loop, Win, Collision Reset, Agent Contact
//!
//! Scenario tests driving a full game session through input snapshots.

use glam::Vec3;
use maze_runner_engine::agents::{Cardinal, PatrolAgent};
use maze_runner_engine::camera::{CameraController, ViewMode};
use maze_runner_engine::game::{GameConfig, GameSession, MazeWorld, SessionEvent, SessionPhase};
use maze_runner_engine::input::{Commands, InputSnapshot, KeyCode, KeyboardState, MovementKeys};
use maze_runner_engine::physics::{AGENT_MESSAGE, CollisionKind, WALL_MESSAGE};
use maze_runner_engine::world::GridPos;

const DT: f32 = 1.0 / 60.0;

fn started(text: &str) -> GameSession {
    let config = GameConfig::default();
    let world = MazeWorld::from_text(text, &config).unwrap();
    let mut session = GameSession::new(world, config);
    session.tick(
        &InputSnapshot::with_commands(Commands {
            start: true,
            ..Default::default()
        }),
        DT,
    );
    session
}

fn strafe_left() -> InputSnapshot {
    InputSnapshot {
        movement: MovementKeys {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

// ============================================================================
// "231" scenario
// ============================================================================

#[test]
fn test_231_start_and_goal() {
    let session = started("231");
    assert_eq!(session.world().start(), GridPos::new(0, 0));
    assert_eq!(session.world().goal(), GridPos::new(0, 1));
    assert_eq!(session.player().get_position(), Vec3::new(0.5, 0.0, 0.5));
}

#[test]
fn test_231_walking_into_goal_wins() {
    let mut session = started("231");

    // facing 0 looks down -X, so strafing left walks toward +Z (column 1)
    let mut won = false;
    for _ in 0..20 {
        let report = session.tick(&strafe_left(), DT);
        if report.won() {
            won = true;
            break;
        }
    }
    assert!(won);
    assert_eq!(session.state().phase, SessionPhase::Won);

    let z = session.player().get_position().z;
    assert!((1.0..1.1).contains(&z));

    // nothing advances after winning
    let position = session.player().get_position();
    assert!(session.tick(&strafe_left(), DT).is_empty());
    assert_eq!(session.player().get_position(), position);
}

#[test]
fn test_231_wall_resets_to_start() {
    let mut session = started("231");
    session.player_mut().set_position(Vec3::new(0.5, 0.0, 2.01));

    let report = session.tick(&InputSnapshot::idle(), DT);
    let collisions: Vec<_> = report.collisions().collect();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].kind, CollisionKind::Wall { tile: GridPos::new(0, 2) });
    assert_eq!(collisions[0].message, WALL_MESSAGE);

    assert_eq!(session.player().get_position(), Vec3::new(0.5, 0.0, 0.5));
    assert_eq!(session.player().get_facing(), 0.0);
    assert_eq!(session.camera().get_view(), ViewMode::FirstPerson);
    assert_eq!(session.state().message.map(|m| m.text), Some(WALL_MESSAGE));

    // camera re-follows the reset rig, so it looks along the spawn facing
    let mut expected = CameraController::new(session.config().camera);
    expected.set_view(ViewMode::FirstPerson);
    expected.follow(session.player());
    assert_eq!(session.camera().get_direction(), expected.get_direction());
    assert_eq!(session.camera().get_position(), expected.get_position());
    let drift = session.camera().get_direction() - session.player().get_forward();
    assert!(drift.length() < 1e-5);
    assert!(session.state().is_running());
}

#[test]
fn test_leaving_grid_counts_as_collision() {
    let mut session = started("231");
    let backward = InputSnapshot {
        movement: MovementKeys {
            right: true,
            ..Default::default()
        },
        ..Default::default()
    };

    // strafing right walks toward -Z and off the grid
    let mut collided = false;
    for _ in 0..20 {
        if session.tick(&backward, DT).collisions().count() > 0 {
            collided = true;
            break;
        }
    }
    assert!(collided);
    assert_eq!(session.player().get_position(), Vec3::new(0.5, 0.0, 0.5));
}

// ============================================================================
// Agent proximity
// ============================================================================

fn with_agent_at(offset: f32) -> (GameSession, Vec3) {
    let mut session = started("20003");
    let player = Vec3::new(0.5, 0.0, 1.5);
    session.player_mut().set_position(player);
    session
        .agents_mut()
        .push(PatrolAgent::new(player + Vec3::new(0.0, 0.0, offset), Cardinal::PosZ, 0.0));
    (session, player)
}

#[test]
fn test_agent_at_029_resets_player() {
    let (mut session, _) = with_agent_at(0.29);
    let report = session.tick(&InputSnapshot::idle(), DT);

    let collisions: Vec<_> = report.collisions().collect();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].kind, CollisionKind::Agent { index: 0 });
    assert_eq!(collisions[0].message, AGENT_MESSAGE);
    assert_eq!(session.player().get_position(), Vec3::new(0.5, 0.0, 0.5));
}

#[test]
fn test_agent_at_031_is_ignored() {
    let (mut session, player) = with_agent_at(0.31);
    let report = session.tick(&InputSnapshot::idle(), DT);

    assert_eq!(report.collisions().count(), 0);
    assert_eq!(session.player().get_position(), player);
}

#[test]
fn test_ghost_camera_skips_collision() {
    let (mut session, player) = with_agent_at(0.1);
    session.tick(
        &InputSnapshot::with_commands(Commands {
            toggle_ghost: true,
            ..Default::default()
        }),
        DT,
    );
    assert!(session.camera().is_ghost());
    assert_eq!(session.player().get_position(), player);
}

// ============================================================================
// Full loop through the keyboard
// ============================================================================

#[test]
fn test_keyboard_driven_session() {
    let config = GameConfig::default();
    let world = MazeWorld::builtin(&config).unwrap();
    let mut session = GameSession::new(world, config);
    let mut keyboard = KeyboardState::new();

    keyboard.handle_key(KeyCode::Enter, true);
    let report = session.tick(&keyboard.snapshot(), DT);
    assert!(report.events.contains(&SessionEvent::Started));

    keyboard.handle_key(KeyCode::Digit1, true);
    let report = session.tick(&keyboard.snapshot(), DT);
    assert!(report
        .events
        .contains(&SessionEvent::ViewChanged(ViewMode::FirstPerson)));

    // agents keep out of walls however long they walk
    for _ in 0..600 {
        session.tick(&keyboard.snapshot(), DT);
        for agent in session.agents() {
            let tile = session.world().metrics().tile_at(agent.get_position());
            assert!(!session.world().grid().blocks(tile));
        }
    }
}
