//! Input system.
//!
//! [`update_input_state`] reads the keyboard from Raylib each frame, writes
//! [`InputState`] and turns fresh key presses into events:
//! the debug key toggles the overlay and the spawn key drops a thing
//! labelled `debug` into the world.
use bevy_ecs::prelude::*;

use crate::events::spawn::SpawnThingEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Label given to things spawned from the keyboard.
pub const DEBUG_SPAWN_LABEL: &str = "debug";

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let spawn_key = input.debug_spawn.key_binding;
    input.debug_spawn.active = rl.is_key_down(spawn_key);
    input.debug_spawn.just_pressed = rl.is_key_pressed(spawn_key);

    let debug_key = input.mode_debug.key_binding;
    input.mode_debug.active = rl.is_key_down(debug_key);
    input.mode_debug.just_pressed = rl.is_key_pressed(debug_key);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.debug_spawn.just_pressed {
        commands.trigger(SpawnThingEvent::new(DEBUG_SPAWN_LABEL));
    }
}
