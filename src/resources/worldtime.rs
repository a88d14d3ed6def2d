//! Simulation time resource.
//!
//! `tick_count` is the simulation clock: it is incremented exactly once per
//! tick by [`advance_tick`](crate::systems::time::advance_tick) and drives
//! both feed polling and ball animation. `elapsed`/`delta` track wall time
//! as reported by the host loop.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    /// Number of simulation ticks run so far.
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
