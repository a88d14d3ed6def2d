//! Feed polling systems and the background worker.
//!
//! - [`collect_feed_results`] runs at the top of every tick and spawns the
//!   names of any background poll that finished since the previous tick.
//! - [`poll_scheduler`] runs after collision handling and starts a poll on
//!   every tick that is a multiple of [`SimRules::poll_interval`]. With the
//!   inline driver the names spawn right away.
//! - [`feed_thread`] is the entry point of the worker thread spawned by
//!   [`FeedBridge::background`](crate::resources::feed::FeedBridge::background).
//!
//! A failed poll is never fatal: it is logged and the interval is skipped.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};

use crate::events::feed::{FeedCmd, FeedMessage};
use crate::feedclient::{FetchError, NameFeed};
use crate::resources::feed::{FeedBridge, PollStart};
use crate::resources::simrules::SimRules;
use crate::resources::thingspawner::{ThingSpawner, spawn_thing};
use crate::resources::worldtime::WorldTime;

/// Spawn one thing per name, or log the failure. Returns the spawn count.
fn spawn_names(
    commands: &mut Commands,
    spawner: &mut ThingSpawner,
    result: Result<Vec<String>, FetchError>,
) -> usize {
    match result {
        Ok(names) => {
            for name in &names {
                spawn_thing(commands, spawner, name);
            }
            names.len()
        }
        Err(e) => {
            warn!("unable to make network call: {}", e);
            0
        }
    }
}

/// Drain finished background polls and spawn their names.
///
/// Non-blocking; does nothing for the inline driver.
pub fn collect_feed_results(
    mut bridge: ResMut<FeedBridge>,
    mut spawner: ResMut<ThingSpawner>,
    mut commands: Commands,
) {
    for result in bridge.drain_completed() {
        let spawned = spawn_names(&mut commands, &mut spawner, result);
        debug!("feed poll delivered {} names", spawned);
    }
}

/// Start a feed poll on every poll tick.
pub fn poll_scheduler(
    time: Res<WorldTime>,
    rules: Res<SimRules>,
    mut bridge: ResMut<FeedBridge>,
    mut spawner: ResMut<ThingSpawner>,
    mut commands: Commands,
) {
    if !rules.is_poll_tick(time.tick_count) {
        return;
    }
    match bridge.start_poll() {
        PollStart::Completed(result) => {
            let spawned = spawn_names(&mut commands, &mut spawner, result);
            debug!("tick {}: feed poll spawned {} things", time.tick_count, spawned);
        }
        PollStart::Dispatched => {
            debug!("tick {}: feed poll dispatched", time.tick_count);
        }
        PollStart::Busy => {
            info!(
                "tick {}: previous feed poll still running, skipping",
                time.tick_count
            );
        }
        PollStart::Disconnected => {
            error!("tick {}: feed worker is not running", time.tick_count);
        }
    }
}

/// Entry point of the feed worker thread.
///
/// Blocks on the command channel; each [`FeedCmd::Poll`] runs one fetch and
/// sends back a [`FeedMessage::Completed`]. Exits on [`FeedCmd::Shutdown`]
/// or when the tick loop drops its sender.
pub fn feed_thread(feed: Box<dyn NameFeed>, rx_cmd: Receiver<FeedCmd>, tx_msg: Sender<FeedMessage>) {
    debug!("feed thread starting (id={:?})", std::thread::current().id());

    for cmd in rx_cmd.iter() {
        match cmd {
            FeedCmd::Poll => {
                let result = feed.poll();
                if tx_msg.send(FeedMessage::Completed(result)).is_err() {
                    break;
                }
            }
            FeedCmd::Shutdown => {
                debug!("feed thread shutdown requested");
                break;
            }
        }
    }

    debug!("feed thread exiting (id={:?})", std::thread::current().id());
}
