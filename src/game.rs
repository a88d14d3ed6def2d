//! World assembly for the rolling ball scene.
//!
//! [`init_world`] builds an ECS world holding the ball, the tick resources
//! and the observers. [`tick_schedule`] returns the systems of one tick in
//! their fixed order:
//!
//! 1. [`advance_tick`] increments `tick_count`.
//! 2. [`collect_feed_results`] spawns names of background polls that finished.
//! 3. [`ball_motion`] rolls the ball and resets it at the exit.
//! 4. [`collision_detector`] despawns the things the ball landed on.
//! 5. [`poll_scheduler`] starts a feed poll on poll ticks.
//! 6. [`capture_snapshot`] publishes the result for the renderer.
//!
//! The chain applies deferred commands between systems, so a thing despawned
//! in step 4 is gone before the snapshot and a thing spawned in step 5 is in
//! it.
//!
//! Graphics are loaded separately by [`load_assets`] since they need a live
//! Raylib window; a headless run uses [`headless_animation`] instead.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::*;

use crate::components::ball::Ball;
use crate::components::mapposition::MapPosition;
use crate::events::collision::observe_despawn_on_collision;
use crate::events::spawn::observe_spawn_thing;
use crate::events::switchdebug::switch_debug_observer;
use crate::feedclient::HttpFeed;
use crate::resources::animationstore::BallAnimation;
use crate::resources::assetstore::SceneAssets;
use crate::resources::feed::{FeedBridge, setup_feed};
use crate::resources::gameconfig::{FeedDriverKind, GameConfig};
use crate::resources::input::InputState;
use crate::resources::snapshot::{BallView, RenderSnapshot};
use crate::resources::thingspawner::ThingSpawner;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_detector;
use crate::systems::feed::{collect_feed_results, poll_scheduler};
use crate::systems::movement::ball_motion;
use crate::systems::render::{BALL_TEXTURE, LABEL_FONT, THING_TEXTURE};
use crate::systems::snapshot::capture_snapshot;
use crate::systems::time::advance_tick;

/// Build the feed bridge described by the configuration.
pub fn feed_bridge_for(config: &GameConfig) -> FeedBridge {
    let feed = HttpFeed::new(config.feed_url.clone(), config.feed_timeout());
    info!(
        "polling {} every {} ticks ({} driver)",
        feed.url(),
        config.rules.poll_interval,
        config.feed_driver.as_str()
    );
    match config.feed_driver {
        FeedDriverKind::Inline => FeedBridge::inline(feed),
        FeedDriverKind::Background => FeedBridge::background(feed),
    }
}

/// Ball animation for runs without a window.
///
/// Frames are one unit wide; only the frame index matters when nothing is
/// drawn.
pub fn headless_animation(config: &GameConfig) -> BallAnimation {
    BallAnimation::from_strip(
        BALL_TEXTURE,
        config.ball_strip_frames as f32,
        1.0,
        config.ball_strip_frames,
        config.skip_first_frame,
        config.rules.ticks_per_frame,
    )
}

/// Load every texture and font the renderer needs.
pub fn load_assets(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    config: &GameConfig,
) -> Result<(SceneAssets, BallAnimation), String> {
    let mut assets = SceneAssets::new();

    let path = config.ball_strip.to_string_lossy();
    let strip = rl
        .load_texture(th, &path)
        .map_err(|e| format!("Failed to load ball strip '{}': {}", path, e))?;
    let animation = BallAnimation::from_strip(
        BALL_TEXTURE,
        strip.width as f32,
        strip.height as f32,
        config.ball_strip_frames,
        config.skip_first_frame,
        config.rules.ticks_per_frame,
    );
    assets.insert_texture(BALL_TEXTURE, strip);

    let path = config.thing_texture.to_string_lossy();
    let thing = rl
        .load_texture(th, &path)
        .map_err(|e| format!("Failed to load thing texture '{}': {}", path, e))?;
    assets.insert_texture(THING_TEXTURE, thing);

    let path = config.font.to_string_lossy();
    let font = rl
        .load_font(th, &path)
        .map_err(|e| format!("Failed to load font '{}': {}", path, e))?;
    assets.insert_font(LABEL_FONT, font);

    let (textures, fonts) = assets.counts();
    debug!(
        "loaded {} textures and {} fonts, ball has {} frames",
        textures, fonts, animation.frame_count
    );
    Ok((assets, animation))
}

/// Create the world: resources, the ball and the observers.
pub fn init_world(config: &GameConfig, feed: FeedBridge, animation: BallAnimation) -> World {
    let rules = config.rules;
    let mut world = World::new();

    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(rules);

    let spawner = ThingSpawner::new(&rules);
    let spawner = match config.seed {
        Some(seed) => spawner.with_seed(seed),
        None => spawner,
    };
    world.insert_resource(spawner);
    setup_feed(&mut world, feed);

    world.insert_resource(RenderSnapshot {
        tick_count: 0,
        ball: BallView {
            x: rules.start_x,
            y: rules.ball_y,
            frame: animation.frame_index(0),
        },
        things: Vec::new(),
    });
    world.insert_resource(animation);
    world.insert_resource(InputState::default());
    world.insert_resource(config.clone());

    world.spawn((Ball, MapPosition::new(rules.start_x, rules.ball_y)));

    world.spawn(Observer::new(observe_despawn_on_collision));
    world.spawn(Observer::new(observe_spawn_thing));
    world.spawn(Observer::new(switch_debug_observer));
    // Observers must exist before the first tick triggers anything.
    world.flush();

    world
}

/// Systems of a single tick, in order.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            advance_tick,
            collect_feed_results,
            ball_motion,
            collision_detector,
            poll_scheduler,
            capture_snapshot,
        )
            .chain(),
    );
    schedule
}

/// Run `ticks` ticks back to back.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: u64) {
    for _ in 0..ticks {
        schedule.run(world);
    }
}
