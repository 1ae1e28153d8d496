//! Input Bindings Module
//!
//! Maps physical keys to logical actions so the game reads actions, never keys.

use std::collections::HashMap;

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Fly up in ghost mode (default: Space)
    FlyUp,
    /// Fly down in ghost mode (default: Shift)
    FlyDown,
    /// Look up (default: ArrowUp)
    LookUp,
    /// Look down (default: ArrowDown)
    LookDown,
    /// Turn left (default: ArrowLeft)
    LookLeft,
    /// Turn right (default: ArrowRight)
    LookRight,
    /// Start the game (default: Enter)
    StartGame,
    /// Toggle the ghost camera (default: G)
    ToggleGhost,
    /// First-person view (default: 1)
    FirstPersonView,
    /// Third-person view (default: 3)
    ThirdPersonView,
}

/// Bidirectional key/action map.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings: WASD move, Space/Shift fly, arrows look,
    /// Enter start, G ghost, 1/3 view.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::FlyUp);
        bindings.bind(KeyCode::ShiftLeft, InputAction::FlyDown);
        bindings.bind(KeyCode::ArrowUp, InputAction::LookUp);
        bindings.bind(KeyCode::ArrowDown, InputAction::LookDown);
        bindings.bind(KeyCode::ArrowLeft, InputAction::LookLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::LookRight);
        bindings.bind(KeyCode::Enter, InputAction::StartGame);
        bindings.bind(KeyCode::G, InputAction::ToggleGhost);
        bindings.bind(KeyCode::Digit1, InputAction::FirstPersonView);
        bindings.bind(KeyCode::Digit3, InputAction::ThirdPersonView);

        bindings
    }

    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing any previous binding of either.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }
        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&action);
        }
    }

    /// Action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), Some(InputAction::LookLeft));
        assert_eq!(bindings.get_action(KeyCode::G), Some(InputAction::ToggleGhost));
        assert_eq!(bindings.get_action(KeyCode::Escape), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);

        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        // LookUp lost its key when ArrowUp was taken over
        assert_eq!(bindings.get_key(InputAction::LookUp), None);
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::new();

        bindings.unbind_key(KeyCode::G);

        assert_eq!(bindings.get_action(KeyCode::G), None);
        assert_eq!(bindings.get_key(InputAction::ToggleGhost), None);
    }
}
