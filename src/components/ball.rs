//! Marker for the rolling ball.
//!
//! Exactly one entity carries [`Ball`]. Its [`MapPosition`](super::mapposition::MapPosition)
//! is advanced by [`ball_motion`](crate::systems::movement::ball_motion) and
//! compared against every [`Thing`](super::thing::Thing) by the collision detector.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Ball;
