//! ECS components for entities.
//!
//! The simulation only needs a handful of components: a position shared by
//! every drawable entity, a marker for the ball, and the label carried by
//! spawned things.
//!
//! Submodules overview:
//! - [`ball`] – marker for the single rolling ball
//! - [`mapposition`] – world-space position for an entity
//! - [`thing`] – label and spawn order of feed-spawned entities

pub mod ball;
pub mod mapposition;
pub mod thing;
