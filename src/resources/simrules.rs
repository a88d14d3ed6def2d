//! Simulation rules resource.
//!
//! [`SimRules`] is the immutable bundle of constants that shape a tick: how
//! far the ball rolls, where it exits and restarts, how often the feed is
//! polled, and how spawned things are placed. It is built once from
//! [`GameConfig`](crate::resources::gameconfig::GameConfig) and inserted
//! into the world before the first tick.
//!
//! # Position matching
//!
//! Respawn and collision are triggered by the ball landing *exactly* on a
//! coordinate. That only works because the ball starts on an integer, rolls
//! by an integer step, and things are placed on integers. [`MatchMode::Tolerant`]
//! is the opt-in escape hatch for configurations where that no longer holds
//! (fractional steps, odd start positions).

use bevy_ecs::prelude::Resource;

pub const DEFAULT_BALL_STEP: f32 = 1.0;
pub const DEFAULT_EXIT_X: f32 = -350.0;
pub const DEFAULT_RESTART_X: f32 = 1600.0;
/// Centre of the default 875 unit wide viewport, rounded down.
pub const DEFAULT_START_X: f32 = 437.0;
pub const DEFAULT_BALL_Y: f32 = 0.0;
pub const DEFAULT_POLL_INTERVAL: u64 = 180;
pub const DEFAULT_TICKS_PER_FRAME: u64 = 8;
pub const DEFAULT_SPAWN_X_MAX: u32 = 900;
pub const DEFAULT_SPAWN_Y_MIN: u32 = 50;
pub const DEFAULT_SPAWN_Y_SPAN: u32 = 100;
pub const DEFAULT_LABEL_MAX_CHARS: usize = 10;

/// How the ball's x coordinate is compared against thresholds and things.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MatchMode {
    /// Exact floating-point equality.
    #[default]
    Exact,
    /// Range comparison with the given tolerance.
    Tolerant { epsilon: f32 },
}

impl MatchMode {
    /// Whether the ball at `ball_x` is on a thing at `thing_x`.
    pub fn hits(&self, ball_x: f32, thing_x: f32) -> bool {
        match *self {
            MatchMode::Exact => ball_x == thing_x,
            MatchMode::Tolerant { epsilon } => (ball_x - thing_x).abs() <= epsilon,
        }
    }

    /// Whether a ball rolling towards negative x has reached the exit.
    pub fn reached_exit(&self, ball_x: f32, exit_x: f32) -> bool {
        match *self {
            MatchMode::Exact => ball_x == exit_x,
            MatchMode::Tolerant { epsilon } => ball_x <= exit_x + epsilon,
        }
    }

    /// Parse the `match_mode` config value. Unknown values yield `None`.
    pub fn parse(value: &str, epsilon: f32) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(MatchMode::Exact),
            "tolerant" => Some(MatchMode::Tolerant { epsilon }),
            _ => None,
        }
    }
}

/// Constants that drive every tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimRules {
    /// Distance the ball moves towards negative x per tick.
    pub ball_step: f32,
    /// Ball x that triggers a respawn.
    pub exit_x: f32,
    /// Ball x right after a respawn.
    pub restart_x: f32,
    /// Ball x when the simulation starts.
    pub start_x: f32,
    /// Ball y; the ball only moves horizontally.
    pub ball_y: f32,
    /// Poll the feed on every tick that is a multiple of this.
    pub poll_interval: u64,
    /// Ticks each animation frame stays on screen.
    pub ticks_per_frame: u64,
    /// Things spawn with x in `[0, spawn_x_max)`.
    pub spawn_x_max: u32,
    /// Things spawn with y in `[spawn_y_min, spawn_y_min + spawn_y_span)`.
    pub spawn_y_min: u32,
    pub spawn_y_span: u32,
    /// Labels longer than this many characters are cut.
    pub label_max_chars: usize,
    pub match_mode: MatchMode,
}

impl Default for SimRules {
    fn default() -> Self {
        Self {
            ball_step: DEFAULT_BALL_STEP,
            exit_x: DEFAULT_EXIT_X,
            restart_x: DEFAULT_RESTART_X,
            start_x: DEFAULT_START_X,
            ball_y: DEFAULT_BALL_Y,
            poll_interval: DEFAULT_POLL_INTERVAL,
            ticks_per_frame: DEFAULT_TICKS_PER_FRAME,
            spawn_x_max: DEFAULT_SPAWN_X_MAX,
            spawn_y_min: DEFAULT_SPAWN_Y_MIN,
            spawn_y_span: DEFAULT_SPAWN_Y_SPAN,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            match_mode: MatchMode::Exact,
        }
    }
}

impl SimRules {
    /// Whether the feed should be polled on `tick_count`.
    pub fn is_poll_tick(&self, tick_count: u64) -> bool {
        self.poll_interval > 0 && tick_count % self.poll_interval == 0
    }

    /// Number of ticks the ball needs to roll from `restart_x` to `exit_x`.
    pub fn ticks_per_lap(&self) -> u64 {
        ((self.restart_x - self.exit_x) / self.ball_step) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_mode_requires_equality() {
        let mode = MatchMode::Exact;
        assert!(mode.hits(12.0, 12.0));
        assert!(!mode.hits(12.0, 12.5));
        assert!(mode.reached_exit(-350.0, -350.0));
        assert!(!mode.reached_exit(-350.5, -350.0));
    }

    #[test]
    fn tolerant_mode_uses_range() {
        let mode = MatchMode::Tolerant { epsilon: 0.5 };
        assert!(mode.hits(12.0, 12.4));
        assert!(!mode.hits(12.0, 12.6));
        assert!(mode.reached_exit(-350.7, -350.0));
        assert!(mode.reached_exit(-349.6, -350.0));
        assert!(!mode.reached_exit(-349.0, -350.0));
    }

    #[test]
    fn parse_match_mode() {
        assert_eq!(MatchMode::parse("exact", 0.5), Some(MatchMode::Exact));
        assert_eq!(
            MatchMode::parse(" Tolerant ", 0.25),
            Some(MatchMode::Tolerant { epsilon: 0.25 })
        );
        assert_eq!(MatchMode::parse("fuzzy", 0.5), None);
    }

    #[test]
    fn poll_ticks_are_multiples_of_interval() {
        let rules = SimRules::default();
        assert!(rules.is_poll_tick(180));
        assert!(rules.is_poll_tick(360));
        assert!(!rules.is_poll_tick(179));
        assert!(!rules.is_poll_tick(181));
    }

    #[test]
    fn zero_interval_never_polls() {
        let rules = SimRules {
            poll_interval: 0,
            ..SimRules::default()
        };
        assert!(!rules.is_poll_tick(0));
        assert!(!rules.is_poll_tick(180));
    }

    #[test]
    fn default_lap_length() {
        assert_eq!(SimRules::default().ticks_per_lap(), 1950);
    }
}
