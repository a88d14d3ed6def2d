//! Ball/thing collision detection.
//!
//! Only the horizontal coordinate matters: a thing is hit when its x matches
//! the ball's x after this tick's motion (and respawn, if one happened).
//! Every hit is published as a [`CollisionEvent`]; the despawn itself is done
//! by [`observe_despawn_on_collision`](crate::events::collision::observe_despawn_on_collision)
//! before the tick ends.
use bevy_ecs::prelude::*;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::components::thing::Thing;
use crate::events::collision::CollisionEvent;
use crate::resources::simrules::SimRules;

pub fn collision_detector(
    balls: Query<(Entity, &MapPosition), With<Ball>>,
    things: Query<(Entity, &MapPosition), With<Thing>>,
    rules: Res<SimRules>,
    mut commands: Commands,
) {
    for (ball, ball_position) in balls.iter() {
        for (thing, thing_position) in things.iter() {
            if rules
                .match_mode
                .hits(ball_position.pos.x, thing_position.pos.x)
            {
                commands.trigger(CollisionEvent { ball, thing });
            }
        }
    }
}
