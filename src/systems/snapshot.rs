//! Snapshot capture, the last system of every tick.
use bevy_ecs::prelude::*;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::components::thing::Thing;
use crate::resources::animationstore::BallAnimation;
use crate::resources::snapshot::{BallView, RenderSnapshot, ThingView};
use crate::resources::worldtime::WorldTime;

/// Rebuild [`RenderSnapshot`] from the current simulation state.
pub fn capture_snapshot(
    time: Res<WorldTime>,
    animation: Res<BallAnimation>,
    balls: Query<&MapPosition, With<Ball>>,
    things: Query<(&Thing, &MapPosition)>,
    mut snapshot: ResMut<RenderSnapshot>,
) {
    snapshot.tick_count = time.tick_count;

    if let Some(position) = balls.iter().next() {
        snapshot.ball = BallView {
            x: position.pos.x,
            y: position.pos.y,
            frame: animation.frame_index(time.tick_count),
        };
    }

    let mut live: Vec<(&Thing, &MapPosition)> = things.iter().collect();
    live.sort_by_key(|(thing, _)| thing.serial);
    snapshot.things = live
        .into_iter()
        .map(|(thing, position)| ThingView {
            label: thing.label.clone(),
            x: position.pos.x,
            y: position.pos.y,
        })
        .collect();
}
