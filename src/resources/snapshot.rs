//! Render snapshot resource.
//!
//! [`RenderSnapshot`] is the whole contract between the simulation and the
//! renderer: where the ball is and which frame it shows, and where each live
//! thing is with its label. It is rebuilt at the end of every tick by
//! [`capture_snapshot`](crate::systems::snapshot::capture_snapshot); the
//! renderer never queries simulation components directly.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    /// Index into the drawable frames of the ball animation.
    pub frame: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThingView {
    pub label: String,
    pub x: f32,
    pub y: f32,
}

/// State of the simulation as of the last completed tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub tick_count: u64,
    pub ball: BallView,
    /// Live things in spawn order.
    pub things: Vec<ThingView>,
}
