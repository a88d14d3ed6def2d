//! Feed bridge integration tests.
//!
//! Exercises the background driver end to end: polls are dispatched to the
//! worker thread, results arrive on a later tick, overlapping triggers are
//! skipped, a dead worker is reported as disconnected and shutdown joins
//! the worker.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bevy_ecs::prelude::*;
use crossbeam_channel::unbounded;

use rollingball::feedclient::FetchError;
use rollingball::game;
use rollingball::resources::feed::{FeedBridge, PollStart, shutdown_feed};
use rollingball::resources::gameconfig::GameConfig;
use rollingball::resources::simrules::SimRules;
use rollingball::resources::snapshot::RenderSnapshot;
use rollingball::resources::thingspawner::ThingSpawner;

const WAIT_STEP: Duration = Duration::from_millis(5);
const MAX_WAIT_TICKS: u64 = 200;

fn make_world(rules: SimRules, feed: FeedBridge) -> World {
    let mut config = GameConfig::new();
    config.rules = rules;
    config.seed = Some(99);
    game::init_world(&config, feed, game::headless_animation(&config))
}

/// Keep ticking, with a short sleep between ticks, until `done` holds.
fn tick_until(world: &mut World, schedule: &mut Schedule, done: impl Fn(&World) -> bool) -> bool {
    for _ in 0..MAX_WAIT_TICKS {
        if done(world) {
            return true;
        }
        std::thread::sleep(WAIT_STEP);
        schedule.run(world);
    }
    done(world)
}

/// Spawn area pinned to x = 0 so the ball cannot reach new things while
/// the tests wait for them.
fn pinned_rules(poll_interval: u64) -> SimRules {
    SimRules {
        poll_interval,
        spawn_x_max: 1,
        ..SimRules::default()
    }
}

#[test]
fn background_results_arrive_on_a_later_tick() {
    let feed = FeedBridge::background(|| -> Result<Vec<String>, FetchError> {
        Ok(vec!["Bessie".to_string(), "Elsie".to_string()])
    });
    let mut world = make_world(pinned_rules(180), feed);
    let mut schedule = game::tick_schedule();

    game::run_ticks(&mut world, &mut schedule, 180);
    assert!(world.resource::<FeedBridge>().in_flight());
    assert!(world.resource::<RenderSnapshot>().things.is_empty());

    let arrived = tick_until(&mut world, &mut schedule, |w| {
        w.resource::<ThingSpawner>().spawned() == 2
    });
    assert!(arrived, "background poll never delivered");

    let snap = world.resource::<RenderSnapshot>().clone();
    assert!(snap.tick_count > 180);
    let labels: Vec<&str> = snap.things.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Bessie", "Elsie"]);
    assert!(!world.resource::<FeedBridge>().in_flight());

    shutdown_feed(&mut world);
}

#[test]
fn trigger_while_in_flight_is_skipped() {
    let (release, gate) = unbounded::<()>();
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    let feed = FeedBridge::background(move || -> Result<Vec<String>, FetchError> {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = gate.recv();
        Ok(vec!["late".to_string()])
    });
    let mut world = make_world(pinned_rules(2), feed);
    let mut schedule = game::tick_schedule();

    // Ticks 2, 4 and 6 are poll ticks; only the first one dispatches.
    game::run_ticks(&mut world, &mut schedule, 6);
    assert_eq!(world.resource::<FeedBridge>().polls_started(), 1);
    assert!(world.resource::<FeedBridge>().in_flight());

    release.send(()).unwrap();
    let arrived = tick_until(&mut world, &mut schedule, |w| {
        w.resource::<ThingSpawner>().spawned() >= 1
    });
    assert!(arrived, "released poll never delivered");

    // Let any poll dispatched after the first one finish too.
    drop(release);
    shutdown_feed(&mut world);
    assert!(polls.load(Ordering::SeqCst) >= 1);
    assert!(world.get_resource::<FeedBridge>().is_none());
}

#[test]
fn background_failure_spawns_nothing() {
    let feed = FeedBridge::background(|| -> Result<Vec<String>, FetchError> {
        Err(FetchError::Status(500))
    });
    let mut world = make_world(pinned_rules(2), feed);
    let mut schedule = game::tick_schedule();

    game::run_ticks(&mut world, &mut schedule, 2);
    let settled = tick_until(&mut world, &mut schedule, |w| {
        !w.resource::<FeedBridge>().in_flight()
    });
    assert!(settled);
    assert!(world.resource::<RenderSnapshot>().things.is_empty());
    assert_eq!(world.resource::<ThingSpawner>().spawned(), 0);

    shutdown_feed(&mut world);
}

#[test]
fn inline_bridge_completes_immediately() {
    let mut bridge = FeedBridge::inline(|| -> Result<Vec<String>, FetchError> {
        Ok(vec!["now".to_string()])
    });
    assert!(bridge.is_inline());
    match bridge.start_poll() {
        PollStart::Completed(Ok(names)) => assert_eq!(names, vec!["now".to_string()]),
        other => panic!("unexpected poll start: {other:?}"),
    }
    assert!(!bridge.in_flight());
    assert!(bridge.drain_completed().is_empty());
    assert_eq!(bridge.polls_started(), 1);
}

#[test]
fn shutdown_stops_the_worker() {
    let mut bridge = FeedBridge::background(|| -> Result<Vec<String>, FetchError> {
        Ok(Vec::new())
    });
    assert!(!bridge.is_inline());
    bridge.shutdown();
    assert!(matches!(bridge.start_poll(), PollStart::Disconnected));
}

#[test]
fn dead_worker_is_reported_instead_of_busy() {
    let mut bridge = FeedBridge::background(|| -> Result<Vec<String>, FetchError> {
        panic!("feed worker crashed")
    });
    assert!(matches!(bridge.start_poll(), PollStart::Dispatched));
    assert!(bridge.in_flight());

    let mut cleared = false;
    for _ in 0..MAX_WAIT_TICKS {
        std::thread::sleep(WAIT_STEP);
        assert!(bridge.drain_completed().is_empty());
        if !bridge.in_flight() {
            cleared = true;
            break;
        }
    }
    assert!(cleared, "in-flight poll was never abandoned");
    assert!(matches!(bridge.start_poll(), PollStart::Disconnected));
    assert_eq!(bridge.polls_started(), 1);
    bridge.shutdown();
}

#[test]
fn scheduler_keeps_ticking_after_worker_dies() {
    let feed = FeedBridge::background(|| -> Result<Vec<String>, FetchError> {
        panic!("feed worker crashed")
    });
    let mut world = make_world(pinned_rules(2), feed);
    let mut schedule = game::tick_schedule();

    game::run_ticks(&mut world, &mut schedule, 2);
    let cleared = tick_until(&mut world, &mut schedule, |w| {
        !w.resource::<FeedBridge>().in_flight()
    });
    assert!(cleared);

    // Later poll ticks find the worker gone and dispatch nothing.
    game::run_ticks(&mut world, &mut schedule, 10);
    assert!(!world.resource::<FeedBridge>().in_flight());
    assert_eq!(world.resource::<FeedBridge>().polls_started(), 1);
    assert!(world.resource::<RenderSnapshot>().things.is_empty());

    shutdown_feed(&mut world);
}
