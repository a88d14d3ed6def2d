//! Thing registry helpers.
//!
//! The ECS world owns every live [`Thing`]; this module wraps the three
//! registry operations around it:
//!
//! - [`spawn_thing`] rolls a random position, truncates the label and spawns
//!   the entity, returning its [`Entity`] handle.
//! - [`despawn_thing`] removes a thing by handle. Removing a handle twice is
//!   a no-op, so duplicate labels or coincident positions never remove the
//!   wrong entity.
//! - [`live_things`] lists the live things in spawn order.
//!
//! [`ThingSpawner`] is the resource holding the random source and the spawn
//! counter. Seed it with [`ThingSpawner::with_seed`] for reproducible runs.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::mapposition::MapPosition;
use crate::components::thing::Thing;
use crate::resources::simrules::SimRules;

/// Random placement and ordering state for newly spawned things.
#[derive(Resource, Debug)]
pub struct ThingSpawner {
    rng: fastrand::Rng,
    next_serial: u64,
    x_max: u32,
    y_min: u32,
    y_span: u32,
    label_max_chars: usize,
}

impl ThingSpawner {
    /// Create a spawner using the placement rules, seeded from entropy.
    pub fn new(rules: &SimRules) -> Self {
        Self {
            rng: fastrand::Rng::new(),
            next_serial: 0,
            x_max: rules.spawn_x_max,
            y_min: rules.spawn_y_min,
            y_span: rules.spawn_y_span,
            label_max_chars: rules.label_max_chars,
        }
    }

    /// Replace the random source with a deterministic one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Build the components of a new thing without spawning it.
    ///
    /// `x` is an integer in `[0, x_max)` and `y` an integer in
    /// `[y_min, y_min + y_span)`, both stored as floats so the ball can land
    /// on them exactly.
    pub fn roll(&mut self, name: &str) -> (Thing, MapPosition) {
        let x = self.rng.u32(0..self.x_max.max(1)) as f32;
        let y = (self.y_min + self.rng.u32(0..self.y_span.max(1))) as f32;
        let serial = self.next_serial;
        self.next_serial += 1;
        (
            Thing::new(truncate_label(name, self.label_max_chars), serial),
            MapPosition::new(x, y),
        )
    }

    /// Total number of things rolled so far.
    pub fn spawned(&self) -> u64 {
        self.next_serial
    }
}

/// Keep at most `max_chars` characters of `name`.
///
/// Counts `char`s rather than bytes so multi-byte labels are never split.
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

/// Spawn a new thing labelled `name` at a random position.
pub fn spawn_thing(commands: &mut Commands, spawner: &mut ThingSpawner, name: &str) -> Entity {
    let (thing, position) = spawner.roll(name);
    info!(
        "spawned '{}' at ({}, {})",
        thing.label, position.pos.x, position.pos.y
    );
    commands.spawn((thing, position)).id()
}

/// Remove a thing by handle.
pub fn despawn_thing(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).try_despawn();
}

/// Live things in spawn order.
pub fn live_things(world: &mut World) -> Vec<(Entity, Thing, MapPosition)> {
    let mut query = world.query::<(Entity, &Thing, &MapPosition)>();
    let mut things: Vec<(Entity, Thing, MapPosition)> = query
        .iter(world)
        .map(|(entity, thing, position)| (entity, thing.clone(), *position))
        .collect();
    things.sort_by_key(|(_, thing, _)| thing.serial);
    things
}
