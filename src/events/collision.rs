//! Collision event and the observer that prunes hit things.
//!
//! [`collision_detector`](crate::systems::collision::collision_detector)
//! triggers a [`CollisionEvent`] for every thing the ball lands on. The
//! [`observe_despawn_on_collision`] observer removes that thing from the
//! world by handle, so two things sharing a label or a position are each
//! handled on their own.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::thing::Thing;
use crate::resources::thingspawner::despawn_thing;

/// Event fired when the ball lands on a thing.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub ball: Entity,
    pub thing: Entity,
}

/// Despawn the thing that was hit.
pub fn observe_despawn_on_collision(
    trigger: On<CollisionEvent>,
    mut commands: Commands,
    things: Query<&Thing>,
) {
    let thing = trigger.event().thing;
    if let Ok(t) = things.get(thing) {
        info!("despawned '{}'", t.label);
    }
    despawn_thing(&mut commands, thing);
}
