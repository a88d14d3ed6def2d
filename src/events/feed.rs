//! Messages exchanged with the background feed worker.
//!
//! The tick loop sends [`FeedCmd`] values to the worker thread and drains
//! [`FeedMessage`] values from it at the top of later ticks. Only these
//! messages cross the thread boundary; the thing registry is never touched
//! by the worker.

use crate::feedclient::FetchError;

/// Commands sent *to* the feed worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCmd {
    /// Run one poll and report the outcome.
    Poll,
    /// Stop the worker loop.
    Shutdown,
}

/// Messages sent *back* from the feed worker.
#[derive(Debug)]
pub enum FeedMessage {
    /// A poll finished, successfully or not.
    Completed(Result<Vec<String>, FetchError>),
}
