//! Rolling ball library.
//!
//! Exposes the scene's ECS components, resources, systems and events for use
//! by the binary and by integration tests.

pub mod components;
pub mod events;
pub mod feedclient;
pub mod game;
pub mod resources;
pub mod systems;
