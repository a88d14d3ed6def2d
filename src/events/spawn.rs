//! Manual spawn requests.
//!
//! Feed results spawn things directly from the poll systems. Anything else
//! that wants a thing in the world (the debug key, tests, tools) triggers a
//! [`SpawnThingEvent`] and lets [`observe_spawn_thing`] place it with the
//! shared [`ThingSpawner`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::thingspawner::{ThingSpawner, spawn_thing};

/// Request to spawn a thing with the given label at a random position.
#[derive(Event, Debug, Clone)]
pub struct SpawnThingEvent {
    pub label: String,
}

impl SpawnThingEvent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

pub fn observe_spawn_thing(
    trigger: On<SpawnThingEvent>,
    mut commands: Commands,
    mut spawner: ResMut<ThingSpawner>,
) {
    spawn_thing(&mut commands, &mut spawner, &trigger.event().label);
}
