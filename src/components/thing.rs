//! Labelled entity spawned from the name feed.
//!
//! A thing is stationary: its position is rolled once at spawn time by
//! [`ThingSpawner`](crate::resources::thingspawner::ThingSpawner) and never
//! changes. It lives until the ball's horizontal position lands on it.

use bevy_ecs::prelude::Component;

/// Spawned, labelled point in the simulation.
///
/// Labels are not unique; entity identity is the ECS [`Entity`](bevy_ecs::entity::Entity)
/// handle. `serial` records spawn order so iteration can be made deterministic
/// regardless of archetype storage order.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Thing {
    /// Display label, already truncated.
    pub label: String,
    /// Monotonic spawn counter.
    pub serial: u64,
}

impl Thing {
    pub fn new(label: impl Into<String>, serial: u64) -> Self {
        Self {
            label: label.into(),
            serial,
        }
    }
}
