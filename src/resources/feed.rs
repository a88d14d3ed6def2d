//! ECS resource that connects the tick loop to the name feed.
//!
//! A [`FeedBridge`] runs polls with one of two drivers:
//!
//! - **Inline**: the poll runs synchronously inside the tick that triggers
//!   it, so its names spawn in that same tick. A slow feed stalls the loop.
//! - **Background**: the triggering tick sends [`FeedCmd::Poll`] to a
//!   dedicated worker thread (see [`feed_thread`]); finished results are
//!   drained without blocking at the top of later ticks. Only one poll is
//!   in flight at a time.
//!
//! Use [`setup_feed`] once during initialization and [`shutdown_feed`] during
//! teardown to stop and join the worker.

use crate::events::feed::{FeedCmd, FeedMessage};
use crate::feedclient::{FetchError, NameFeed};
use crate::systems::feed::feed_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use log::{error, warn};

/// How polls are executed.
pub enum FeedDriver {
    Inline(Box<dyn NameFeed>),
    Background {
        /// Sender for [`FeedCmd`] messages (ECS -> feed thread).
        tx_cmd: Sender<FeedCmd>,
        /// Receiver for [`FeedMessage`] messages (feed thread -> ECS).
        rx_msg: Receiver<FeedMessage>,
        /// Join handle for the worker; taken on shutdown.
        handle: Option<std::thread::JoinHandle<()>>,
    },
}

/// Outcome of asking the bridge to start a poll.
#[derive(Debug)]
pub enum PollStart {
    /// Inline driver: the poll already ran.
    Completed(Result<Vec<String>, FetchError>),
    /// Background driver: the request was handed to the worker.
    Dispatched,
    /// Background driver: a previous poll has not reported back yet.
    Busy,
    /// Background driver: the worker is gone.
    Disconnected,
}

/// Shared bridge between the ECS world and the feed.
#[derive(Resource)]
pub struct FeedBridge {
    driver: FeedDriver,
    in_flight: bool,
    /// Set once the worker's result channel is found closed.
    worker_gone: bool,
    polls_started: u64,
}

impl FeedBridge {
    /// Bridge that polls synchronously inside the tick.
    pub fn inline(feed: impl NameFeed + 'static) -> Self {
        Self {
            driver: FeedDriver::Inline(Box::new(feed)),
            in_flight: false,
            worker_gone: false,
            polls_started: 0,
        }
    }

    /// Bridge that polls on a freshly spawned worker thread.
    pub fn background(feed: impl NameFeed + 'static) -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<FeedCmd>();
        let (tx_msg, rx_msg) = unbounded::<FeedMessage>();
        let feed: Box<dyn NameFeed> = Box::new(feed);

        let handle = std::thread::Builder::new()
            .name("feed".into())
            .spawn(move || feed_thread(feed, rx_cmd, tx_msg))
            .map_err(|e| warn!("failed to spawn feed thread: {}", e))
            .ok();

        Self {
            driver: FeedDriver::Background {
                tx_cmd,
                rx_msg,
                handle,
            },
            in_flight: false,
            worker_gone: false,
            polls_started: 0,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.driver, FeedDriver::Inline(_))
    }

    /// Whether a background poll has been dispatched and not yet reported.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Number of polls actually started (inline runs and dispatched requests).
    pub fn polls_started(&self) -> u64 {
        self.polls_started
    }

    /// Start a poll with the configured driver.
    pub fn start_poll(&mut self) -> PollStart {
        match &self.driver {
            FeedDriver::Inline(feed) => {
                self.polls_started += 1;
                PollStart::Completed(feed.poll())
            }
            FeedDriver::Background { tx_cmd, .. } => {
                if self.worker_gone {
                    return PollStart::Disconnected;
                }
                if self.in_flight {
                    return PollStart::Busy;
                }
                match tx_cmd.send(FeedCmd::Poll) {
                    Ok(()) => {
                        self.in_flight = true;
                        self.polls_started += 1;
                        PollStart::Dispatched
                    }
                    Err(_) => PollStart::Disconnected,
                }
            }
        }
    }

    /// Take every result the worker has finished since the last call.
    ///
    /// Never blocks. Always empty for the inline driver. If the worker has
    /// died the in-flight poll is abandoned, so the next trigger reports
    /// [`PollStart::Disconnected`] instead of [`PollStart::Busy`].
    pub fn drain_completed(&mut self) -> Vec<Result<Vec<String>, FetchError>> {
        let FeedDriver::Background { rx_msg, .. } = &self.driver else {
            return Vec::new();
        };
        let mut results = Vec::new();
        loop {
            match rx_msg.try_recv() {
                Ok(FeedMessage::Completed(result)) => results.push(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.in_flight {
                        error!("feed worker stopped before finishing its poll");
                        self.in_flight = false;
                    }
                    self.worker_gone = true;
                    break;
                }
            }
        }
        if !results.is_empty() {
            self.in_flight = false;
        }
        results
    }

    /// Stop the worker thread, if any, and wait for it.
    pub fn shutdown(&mut self) {
        if let FeedDriver::Background { tx_cmd, handle, .. } = &mut self.driver {
            let _ = tx_cmd.send(FeedCmd::Shutdown);
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        }
    }
}

/// Register the bridge in the world.
pub fn setup_feed(world: &mut World, bridge: FeedBridge) {
    world.insert_resource(bridge);
}

/// Gracefully stop the feed worker and remove the bridge.
///
/// A poll that is still running is allowed to finish (bounded by the HTTP
/// timeout) before the thread exits.
pub fn shutdown_feed(world: &mut World) {
    if let Some(mut bridge) = world.remove_resource::<FeedBridge>() {
        bridge.shutdown();
    }
}
