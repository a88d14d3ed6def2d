//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay drawn on top
//! of the scene (tick count, live things, ball position). Remove it to disable.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
