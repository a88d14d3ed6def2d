//! Ball motion.
//!
//! The ball rolls towards negative x by [`SimRules::ball_step`] every tick.
//! When it reaches [`SimRules::exit_x`] it is put back at
//! [`SimRules::restart_x`] within the same tick. This is a hard reset, not a
//! wrap: the distance overshot is not carried over.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::resources::simrules::SimRules;

/// Roll the ball one step and respawn it at the far edge when it exits.
pub fn ball_motion(mut query: Query<&mut MapPosition, With<Ball>>, rules: Res<SimRules>) {
    for mut position in query.iter_mut() {
        position.pos.x -= rules.ball_step;
        if rules.match_mode.reached_exit(position.pos.x, rules.exit_x) {
            position.pos.x = rules.restart_x;
            info!("respawned");
        }
    }
}
