//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – the ball's sprite strip and tick-driven frame selection
//! - `assetstore` – loaded textures and fonts keyed by string IDs
//! - `debugmode` – presence toggles the debug overlay
//! - `feed` – bridge between the tick loop and the name feed
//! - `gameconfig` – settings loaded from the INI file
//! - `input` – per-frame keyboard state of keys relevant to the scene
//! - `simrules` – motion, respawn, polling and spawn constants
//! - `snapshot` – state published for the renderer after each tick
//! - `thingspawner` – random placement and the thing registry helpers
//! - `worldtime` – tick counter, simulation time and delta
pub mod animationstore;
pub mod assetstore;
pub mod debugmode;
pub mod feed;
pub mod gameconfig;
pub mod input;
pub mod simrules;
pub mod snapshot;
pub mod thingspawner;
pub mod worldtime;
