//! Per-frame keyboard input resource.
//!
//! Only two keys matter: one spawns a debug thing at a random position, the
//! other toggles the debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held down.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL)
    }
}

/// Resource capturing the keyboard state relevant to the simulation.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    /// Spawn a thing labelled `debug` (default: Space).
    pub debug_spawn: BoolState,
    /// Toggle the debug overlay (default: F11).
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            debug_spawn: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
        }
    }
}
