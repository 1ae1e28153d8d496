//! Game Session
//!
//! Owns every mutable piece of a running game and advances it one tick at a
//! time from an immutable [`InputSnapshot`]. All session-wide flags and timers
//! live in one [`SessionState`] value.
//!
//! Tick order while running:
//! 1. one-shot commands (ghost toggle, view toggles)
//! 2. clocks: elapsed time, message timer, ghost countdown
//! 3. player + follow camera, or ghost camera
//! 4. agents, each consulting the footprint predicate
//! 5. player verdict (Follow only): win, or reset on collision

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::agents::{AgentStep, PatrolAgent};
use crate::camera::{CameraController, CameraMode, ViewMode};
use crate::input::{Commands, InputSnapshot};
use crate::physics::{CollisionEvent, CollisionResolver, Verdict};
use crate::player::PlayerRig;

use super::config::GameConfig;
use super::world::MazeWorld;

/// Coarse game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the start command
    #[default]
    Ready,
    Running,
    /// Goal reached; nothing advances any more
    Won,
}

/// Collision message currently on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveMessage {
    pub text: &'static str,
    pub remaining: f32,
}

/// Session-wide flags and timers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Elapsed game clock in seconds, ghost penalties included
    pub elapsed: f32,
    /// Seconds left in the current ghost flight
    pub ghost_remaining: Option<f32>,
    pub message: Option<ActiveMessage>,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_won(&self) -> bool {
        self.phase == SessionPhase::Won
    }
}

/// Something the presentation layer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    Started,
    GhostEntered,
    /// `expired` is false when the player left ghost mode early
    GhostExited { expired: bool },
    ViewChanged(ViewMode),
    Collided(CollisionEvent),
    Won { elapsed: f32 },
}

/// Events raised during one tick, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<SessionEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn collisions(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.events.iter().filter_map(|event| match event {
            SessionEvent::Collided(collision) => Some(collision),
            _ => None,
        })
    }

    pub fn won(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, SessionEvent::Won { .. }))
    }
}

/// Transforms the rendering consumer reads after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub view: Mat4,
    pub player: Mat4,
    pub agents: Vec<Mat4>,
}

/// A running game.
pub struct GameSession {
    world: MazeWorld,
    config: GameConfig,
    player: PlayerRig,
    camera: CameraController,
    agents: Vec<PatrolAgent>,
    rng: ChaCha8Rng,
    state: SessionState,
}

impl GameSession {
    pub fn new(world: MazeWorld, config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.session.rng_seed);
        let player = PlayerRig::new(world.spawn(), config.player);
        let camera = CameraController::following(&player, config.camera);
        let agents: Vec<PatrolAgent> = world
            .agent_spawns()
            .map(|position| PatrolAgent::spawn(position, &config.agents, &mut rng))
            .collect();

        tracing::info!(agents = agents.len(), "session created");

        Self {
            world,
            config,
            player,
            camera,
            agents,
            rng,
            state: SessionState::default(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn world(&self) -> &MazeWorld {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn player(&self) -> &PlayerRig {
        &self.player
    }

    /// Direct access for scripted setups (tests, debug tools).
    pub fn player_mut(&mut self) -> &mut PlayerRig {
        &mut self.player
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn agents(&self) -> &[PatrolAgent] {
        &self.agents
    }

    /// Direct access for scripted setups (tests, debug tools).
    pub fn agents_mut(&mut self) -> &mut Vec<PatrolAgent> {
        &mut self.agents
    }

    fn resolver(&self) -> CollisionResolver<'_> {
        CollisionResolver::new(self.world.grid(), self.world.metrics(), self.config.collision)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the session by `delta_time` seconds.
    pub fn tick(&mut self, input: &InputSnapshot, delta_time: f32) -> TickReport {
        let mut report = TickReport::default();

        match self.state.phase {
            SessionPhase::Won => return report,
            SessionPhase::Ready => {
                if !input.commands.start {
                    return report;
                }
                self.state.phase = SessionPhase::Running;
                report.events.push(SessionEvent::Started);
                tracing::info!("session started");
            }
            SessionPhase::Running => self.apply_commands(&input.commands, &mut report),
        }

        self.advance_clocks(delta_time, &mut report);

        match self.camera.get_mode() {
            CameraMode::Follow => {
                self.player.rotate(input.look.yaw_axis());
                self.player.move_by(&input.movement);
                self.camera.follow(&self.player);
            }
            CameraMode::Ghost => {
                self.camera
                    .rotate(input.look.yaw_axis(), input.look.pitch_axis());
                self.camera.fly(&input.movement);
            }
        }

        self.advance_agents(delta_time);

        if self.camera.get_mode() == CameraMode::Follow {
            self.resolve_player(&mut report);
        }

        report
    }

    fn apply_commands(&mut self, commands: &Commands, report: &mut TickReport) {
        if commands.toggle_ghost {
            if self.camera.enter_ghost() {
                self.state.ghost_remaining = Some(self.config.session.ghost_duration);
                self.state.elapsed += self.config.session.ghost_penalty;
                report.events.push(SessionEvent::GhostEntered);
            } else if self.camera.exit_ghost() {
                self.state.ghost_remaining = None;
                report.events.push(SessionEvent::GhostExited { expired: false });
            }
        }

        for (requested, view) in [
            (commands.first_person, ViewMode::FirstPerson),
            (commands.third_person, ViewMode::ThirdPerson),
        ] {
            if !requested || self.camera.get_view() == view {
                continue;
            }
            if self.camera.set_view(view) {
                self.camera.follow(&self.player);
                report.events.push(SessionEvent::ViewChanged(view));
            }
        }
    }

    fn advance_clocks(&mut self, delta_time: f32, report: &mut TickReport) {
        self.state.elapsed += delta_time;

        if let Some(message) = self.state.message.as_mut() {
            message.remaining -= delta_time;
            if message.remaining <= 0.0 {
                self.state.message = None;
            }
        }

        if let Some(remaining) = self.state.ghost_remaining.as_mut() {
            *remaining -= delta_time;
            if *remaining <= 0.0 {
                self.state.ghost_remaining = None;
                self.camera.exit_ghost();
                self.camera.follow(&self.player);
                report.events.push(SessionEvent::GhostExited { expired: true });
                tracing::debug!("ghost countdown expired");
            }
        }
    }

    fn advance_agents(&mut self, delta_time: f32) {
        let resolver =
            CollisionResolver::new(self.world.grid(), self.world.metrics(), self.config.collision);
        let mut blocked = 0usize;
        for agent in &mut self.agents {
            let step = agent.advance(delta_time, &mut self.rng, |candidate| {
                resolver.footprint_blocked(candidate)
            });
            if matches!(step, AgentStep::Blocked { .. }) {
                blocked += 1;
            }
        }
        if blocked > 0 {
            tracing::trace!(blocked, "agents turned");
        }
    }

    fn resolve_player(&mut self, report: &mut TickReport) {
        let verdict = self.resolver().evaluate(
            self.player.get_position(),
            self.agents.iter().map(PatrolAgent::get_position),
        );

        match verdict {
            Verdict::Clear => {}
            Verdict::Won => {
                self.state.phase = SessionPhase::Won;
                report.events.push(SessionEvent::Won {
                    elapsed: self.state.elapsed,
                });
                tracing::info!(elapsed = self.state.elapsed, "goal reached");
            }
            Verdict::Collided(event) => {
                self.reset_player();
                self.state.message = Some(ActiveMessage {
                    text: event.message,
                    remaining: event.display_seconds,
                });
                report.events.push(SessionEvent::Collided(event));
                tracing::info!(kind = ?event.kind, "collision, player reset to start");
            }
        }
    }

    /// Value-overwrite reset: player to spawn, camera to first person.
    ///
    /// The camera's direction comes from re-following the reset rig, so it
    /// ends up along the spawn facing.
    fn reset_player(&mut self) {
        self.player.reset_to(self.world.spawn());
        self.camera.set_view(ViewMode::FirstPerson);
        self.camera.follow(&self.player);
    }

    /// Current dynamic transforms. Static geometry comes from
    /// [`MazeWorld::placements`].
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            view: self.camera.view_matrix(),
            player: self.player.model_transform(),
            agents: self.agents.iter().map(PatrolAgent::model_transform).collect(),
        }
    }

    /// World position of the player and every agent, for debugging output.
    pub fn actor_positions(&self) -> (Vec3, Vec<Vec3>) {
        (
            self.player.get_position(),
            self.agents.iter().map(PatrolAgent::get_position).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn start() -> InputSnapshot {
        InputSnapshot::with_commands(Commands {
            start: true,
            ..Default::default()
        })
    }

    fn toggle_ghost() -> InputSnapshot {
        InputSnapshot::with_commands(Commands {
            toggle_ghost: true,
            ..Default::default()
        })
    }

    fn session(text: &str) -> GameSession {
        let config = GameConfig::default();
        let world = MazeWorld::from_text(text, &config).unwrap();
        GameSession::new(world, config)
    }

    #[test]
    fn test_ready_ignores_everything_but_start() {
        let mut session = session("2003");
        let report = session.tick(&toggle_ghost(), DT);
        assert!(report.is_empty());
        assert_eq!(session.state().phase, SessionPhase::Ready);
        assert_eq!(session.state().elapsed, 0.0);
        assert_eq!(session.camera().get_mode(), CameraMode::Follow);
    }

    #[test]
    fn test_start_runs_clock() {
        let mut session = session("2003");
        let report = session.tick(&start(), DT);
        assert_eq!(report.events, vec![SessionEvent::Started]);
        assert!(session.state().is_running());
        session.tick(&InputSnapshot::idle(), DT);
        assert!((session.state().elapsed - 2.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_ghost_adds_penalty_and_expires() {
        let mut session = session("2003");
        session.tick(&start(), DT);

        let report = session.tick(&toggle_ghost(), DT);
        assert!(report.events.contains(&SessionEvent::GhostEntered));
        assert!(session.camera().is_ghost());
        assert!(session.state().elapsed > 30.0);
        assert!(session.state().ghost_remaining.is_some());

        let mut expired = false;
        for _ in 0..20 {
            let report = session.tick(&InputSnapshot::idle(), 1.0);
            if report
                .events
                .contains(&SessionEvent::GhostExited { expired: true })
            {
                expired = true;
                break;
            }
        }
        assert!(expired);
        assert!(!session.camera().is_ghost());
        assert!(session.state().ghost_remaining.is_none());
    }

    #[test]
    fn test_ghost_toggle_twice_leaves_early() {
        let mut session = session("2003");
        session.tick(&start(), DT);
        let before = session.camera().get_position();

        session.tick(&toggle_ghost(), DT);
        let report = session.tick(&toggle_ghost(), DT);

        assert!(report
            .events
            .contains(&SessionEvent::GhostExited { expired: false }));
        assert_eq!(session.camera().get_position(), before);
    }

    #[test]
    fn test_view_toggle_ignored_in_ghost() {
        let mut session = session("2003");
        session.tick(&start(), DT);
        session.tick(&toggle_ghost(), DT);

        let report = session.tick(
            &InputSnapshot::with_commands(Commands {
                first_person: true,
                ..Default::default()
            }),
            DT,
        );
        assert!(report.is_empty());
        assert_eq!(session.camera().get_view(), ViewMode::ThirdPerson);
    }

    #[test]
    fn test_view_change_reported_once() {
        let mut session = session("2003");
        session.tick(&start(), DT);
        let first_person = InputSnapshot::with_commands(Commands {
            first_person: true,
            ..Default::default()
        });

        let report = session.tick(&first_person, DT);
        assert_eq!(
            report.events,
            vec![SessionEvent::ViewChanged(ViewMode::FirstPerson)]
        );

        let report = session.tick(&first_person, DT);
        assert!(report.is_empty());
        assert_eq!(session.camera().get_view(), ViewMode::FirstPerson);
    }

    #[test]
    fn test_collision_message_expires() {
        let mut session = session("2013");
        session.tick(&start(), DT);
        session.player_mut().set_position(Vec3::new(0.5, 0.0, 2.5));
        let report = session.tick(&InputSnapshot::idle(), DT);
        assert_eq!(report.collisions().count(), 1);
        assert!(session.state().message.is_some());

        for _ in 0..3 {
            session.tick(&InputSnapshot::idle(), 1.0);
        }
        assert!(session.state().message.is_none());
    }

    #[test]
    fn test_won_freezes_session() {
        let mut session = session("23");
        session.tick(&start(), DT);
        session.player_mut().set_position(Vec3::new(0.5, 0.0, 1.5));
        let report = session.tick(&InputSnapshot::idle(), DT);
        assert!(report.won());

        let elapsed = session.state().elapsed;
        let report = session.tick(&toggle_ghost(), DT);
        assert!(report.is_empty());
        assert_eq!(session.state().elapsed, elapsed);
        assert!(!session.camera().is_ghost());
    }

    #[test]
    fn test_render_frame_matches_actors() {
        let session = session("2070\n0003");
        let frame = session.render_frame();
        assert_eq!(frame.agents.len(), 1);
        assert_eq!(frame.agents[0].w_axis.truncate(), Vec3::new(0.5, 0.0, 2.5));
        assert_eq!(frame.player.w_axis.truncate(), Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(frame.view, session.camera().view_matrix());
    }

    #[test]
    fn test_agents_seeded_deterministically() {
        let a = session("2070\n0003");
        let b = session("2070\n0003");
        assert_eq!(a.agents().len(), 1);
        assert_eq!(a.agents()[0].get_speed(), b.agents()[0].get_speed());
        assert_eq!(a.agents()[0].get_direction(), b.agents()[0].get_direction());
    }
}
