//! Scene systems.
//!
//! Submodules overview
//! - [`collision`] – detect the ball landing on things and emit collision events
//! - [`feed`] – schedule feed polls, collect their results, run the feed worker
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`movement`] – roll the ball and respawn it at the far edge
//! - [`render`] – draw the render snapshot and the debug overlay using Raylib
//! - [`snapshot`] – publish the state of the finished tick for the renderer
//! - [`time`] – tick counter, frame delta and fixed-step pacing

pub mod collision;
pub mod feed;
pub mod input;
pub mod movement;
pub mod render;
pub mod snapshot;
pub mod time;
