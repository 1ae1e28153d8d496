//! Keyboard Input Module
//!
//! Tracks held movement/look keys and queues one-shot commands.
//! Decoupled from any windowing system: callers translate their native key
//! events into [`KeyCode`] and feed them through [`KeyboardState::handle_key`].

use super::bindings::{InputAction, KeyBindings};
use super::{Commands, InputSnapshot};

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,

    // Arrow keys (look)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Commands
    Enter,
    G,
    Digit1,
    Digit3,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Fly up (ghost camera only)
    pub up: bool,
    /// Fly down (ghost camera only)
    pub down: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward/backward axis: +1, 0 or -1.
    #[inline]
    pub fn forward_axis(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Right/left axis: +1, 0 or -1.
    #[inline]
    pub fn right_axis(&self) -> f32 {
        axis(self.right, self.left)
    }

    /// Up/down axis: +1, 0 or -1.
    #[inline]
    pub fn up_axis(&self) -> f32 {
        axis(self.up, self.down)
    }

    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }
}

/// Held look/rotation keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl LookKeys {
    /// Yaw input: +1 turning right, -1 turning left.
    #[inline]
    pub fn yaw_axis(&self) -> f32 {
        axis(self.right, self.left)
    }

    /// Pitch input: +1 looking up, -1 looking down.
    #[inline]
    pub fn pitch_axis(&self) -> f32 {
        axis(self.up, self.down)
    }

    pub fn any_pressed(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i32 - negative as i32) as f32
}

/// Keyboard state accumulated between ticks.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    bindings: KeyBindings,
    pub movement: MovementKeys,
    pub look: LookKeys,
    pending: Commands,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Feed one key event. Returns `true` if the key is bound.
    ///
    /// Held actions follow the key state; command actions fire on press only.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let Some(action) = self.bindings.get_action(key) else {
            return false;
        };
        match action {
            InputAction::MoveForward => self.movement.forward = pressed,
            InputAction::MoveBack => self.movement.backward = pressed,
            InputAction::MoveLeft => self.movement.left = pressed,
            InputAction::MoveRight => self.movement.right = pressed,
            InputAction::FlyUp => self.movement.up = pressed,
            InputAction::FlyDown => self.movement.down = pressed,
            InputAction::LookUp => self.look.up = pressed,
            InputAction::LookDown => self.look.down = pressed,
            InputAction::LookLeft => self.look.left = pressed,
            InputAction::LookRight => self.look.right = pressed,
            InputAction::StartGame if pressed => self.pending.start = true,
            InputAction::ToggleGhost if pressed => self.pending.toggle_ghost = true,
            InputAction::FirstPersonView if pressed => self.pending.first_person = true,
            InputAction::ThirdPersonView if pressed => self.pending.third_person = true,
            _ => {}
        }
        true
    }

    /// Queue commands coming from a UI layer (buttons) instead of keys.
    pub fn queue(&mut self, commands: Commands) {
        self.pending.start |= commands.start;
        self.pending.toggle_ghost |= commands.toggle_ghost;
        self.pending.first_person |= commands.first_person;
        self.pending.third_person |= commands.third_person;
    }

    /// Produce this tick's immutable input and drain queued commands.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            movement: self.movement,
            look: self.look,
            commands: std::mem::take(&mut self.pending),
        }
    }

    /// Release every held key and drop queued commands.
    pub fn reset(&mut self) {
        self.movement = MovementKeys::default();
        self.look = LookKeys::default();
        self.pending = Commands::default();
    }
}
