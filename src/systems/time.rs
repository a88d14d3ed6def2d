//! Time and tick systems.
//!
//! - [`update_world_time`] records the host frame delta on
//!   [`WorldTime`](crate::resources::worldtime::WorldTime).
//! - [`advance_tick`] is the first system of every tick and increments
//!   `tick_count`.
//! - [`FixedStep`] turns variable frame times into a whole number of ticks
//!   at the configured tick rate.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

/// Advance the simulation clock by one tick.
pub fn advance_tick(mut time: ResMut<WorldTime>) {
    time.tick_count += 1;
}

/// Fixed-rate tick accumulator.
///
/// Frame time is accumulated and converted into whole ticks of
/// `1 / tick_rate` seconds. At most `max_ticks_per_frame` ticks are released
/// per frame; any excess backlog is dropped so a long stall does not make
/// the simulation sprint to catch up.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
}

impl FixedStep {
    pub fn new(tick_rate: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    /// Seconds per tick.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `dt` seconds and return how many ticks to run now.
    pub fn ticks_for(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_frame && self.accumulator >= self.step {
            self.accumulator = 0.0;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_per_step() {
        let mut fixed = FixedStep::new(60, 4);
        assert_eq!(fixed.ticks_for(1.0 / 60.0 + 1e-6), 1);
        assert_eq!(fixed.ticks_for(0.0), 0);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut fixed = FixedStep::new(60, 4);
        assert_eq!(fixed.ticks_for(0.01), 0);
        assert_eq!(fixed.ticks_for(0.01), 1);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut fixed = FixedStep::new(60, 4);
        assert_eq!(fixed.ticks_for(1.0), 4);
        // Backlog dropped: the next short frame does not release a burst.
        assert_eq!(fixed.ticks_for(0.001), 0);
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut fixed = FixedStep::new(60, 4);
        assert_eq!(fixed.ticks_for(-1.0), 0);
    }

    #[test]
    fn advance_tick_increments_once() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(advance_tick);
        schedule.run(&mut world);
        schedule.run(&mut world);
        assert_eq!(world.resource::<WorldTime>().tick_count, 2);
    }

    #[test]
    fn world_time_tracks_scaled_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.2);
        let time = world.resource::<WorldTime>();
        assert!((time.delta - 0.1).abs() < 1e-6);
        assert!((time.elapsed - 0.2).abs() < 1e-6);
    }
}
