//! Event types and observers.
//!
//! Submodules:
//! - [`collision`] – the ball landed on a thing; the observer despawns it
//! - [`feed`] – commands and messages for the background feed worker
//! - [`spawn`] – manual requests to spawn a thing
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod collision;
pub mod feed;
pub mod spawn;
pub mod switchdebug;
