//! Debug overlay toggle.
//!
//! A [`SwitchDebugEvent`] flips the presence of the [`DebugMode`] resource;
//! the renderer draws its overlay only while the resource exists. Turning the
//! overlay on also logs a one-line summary of the current scene.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::debugmode::DebugMode;
use crate::resources::snapshot::RenderSnapshot;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
    snapshot: Res<RenderSnapshot>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("debug overlay off");
        return;
    }
    commands.insert_resource(DebugMode {});
    info!(
        "debug overlay on: tick {}, {} things, ball at x = {}",
        snapshot.tick_count,
        snapshot.things.len(),
        snapshot.ball.x
    );
}
