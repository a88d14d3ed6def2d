//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Every value has a
//! default matching the stock scene, so the program runs without a
//! config file at all.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 875
//! height = 180
//! title = katamari ball
//! target_fps = 60
//! run_in_background = true
//!
//! [simulation]
//! tick_rate = 60
//! max_ticks_per_frame = 4
//! ball_step = 1
//! exit_x = -350
//! restart_x = 1600
//! start_x = 437
//! ball_y = 0
//! poll_interval_ticks = 180
//! ticks_per_frame = 8
//! spawn_x_max = 900
//! spawn_y_min = 50
//! spawn_y_span = 100
//! label_max_chars = 10
//! match_mode = exact
//! match_epsilon = 0.5
//! ; seed = 1234
//!
//! [feed]
//! url = http://dev.katamarijr.com:4444/drain
//! timeout_ms = 2000
//! driver = background
//!
//! [assets]
//! ball_strip = ./assets/roll.png
//! ball_strip_frames = 9
//! skip_first_frame = true
//! ball_scale = 0.65
//! thing_texture = ./assets/cow.png
//! thing_scale = 0.2
//! font = ./assets/fonts/goregular.ttf
//! label_font_size = 24
//! banner = -> dev.katamarijr.com <-
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::resources::simrules::{MatchMode, SimRules};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 875;
const DEFAULT_WINDOW_HEIGHT: u32 = 180;
const DEFAULT_WINDOW_TITLE: &str = "katamari ball";
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_RUN_IN_BACKGROUND: bool = true;
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 4;
const DEFAULT_MATCH_EPSILON: f32 = 0.5;
const DEFAULT_FEED_URL: &str = "http://dev.katamarijr.com:4444/drain";
const DEFAULT_FEED_TIMEOUT_MS: u64 = 2000;
const DEFAULT_BALL_STRIP: &str = "./assets/roll.png";
const DEFAULT_BALL_STRIP_FRAMES: usize = 9;
const DEFAULT_SKIP_FIRST_FRAME: bool = true;
const DEFAULT_BALL_SCALE: f32 = 0.65;
const DEFAULT_THING_TEXTURE: &str = "./assets/cow.png";
const DEFAULT_THING_SCALE: f32 = 0.2;
const DEFAULT_FONT: &str = "./assets/fonts/goregular.ttf";
const DEFAULT_LABEL_FONT_SIZE: f32 = 24.0;
const DEFAULT_BANNER: &str = "-> dev.katamarijr.com <-";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Which feed driver to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedDriverKind {
    /// Poll synchronously inside the triggering tick.
    Inline,
    /// Poll on a worker thread and collect results on later ticks.
    #[default]
    Background,
}

impl FeedDriverKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(FeedDriverKind::Inline),
            "background" => Some(FeedDriverKind::Background),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedDriverKind::Inline => "inline",
            FeedDriverKind::Background => "background",
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Logical viewport width; the window opens at this size.
    pub window_width: u32,
    /// Logical viewport height.
    pub window_height: u32,
    pub window_title: String,
    /// Target frames per second.
    pub target_fps: u32,
    /// Keep ticking while the window is unfocused.
    pub run_in_background: bool,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Upper bound of ticks run in a single rendered frame.
    pub max_ticks_per_frame: u32,
    /// Fixed seed for thing placement; random when absent.
    pub seed: Option<u64>,
    /// Simulation constants.
    pub rules: SimRules,
    pub feed_url: String,
    pub feed_timeout_ms: u64,
    pub feed_driver: FeedDriverKind,
    /// Path of the ball sprite strip.
    pub ball_strip: PathBuf,
    /// Number of frames in the strip, placeholder included.
    pub ball_strip_frames: usize,
    /// Skip the first frame of the strip.
    pub skip_first_frame: bool,
    pub ball_scale: f32,
    /// Path of the image drawn for every thing.
    pub thing_texture: PathBuf,
    pub thing_scale: f32,
    /// Path of the TTF font used for labels and the banner.
    pub font: PathBuf,
    pub label_font_size: f32,
    /// Static text drawn behind the scene.
    pub banner: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            run_in_background: DEFAULT_RUN_IN_BACKGROUND,
            tick_rate: DEFAULT_TICK_RATE,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            seed: None,
            rules: SimRules::default(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout_ms: DEFAULT_FEED_TIMEOUT_MS,
            feed_driver: FeedDriverKind::default(),
            ball_strip: PathBuf::from(DEFAULT_BALL_STRIP),
            ball_strip_frames: DEFAULT_BALL_STRIP_FRAMES,
            skip_first_frame: DEFAULT_SKIP_FIRST_FRAME,
            ball_scale: DEFAULT_BALL_SCALE,
            thing_texture: PathBuf::from(DEFAULT_THING_TEXTURE),
            thing_scale: DEFAULT_THING_SCALE,
            font: PathBuf::from(DEFAULT_FONT),
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            banner: DEFAULT_BANNER.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Feed request timeout.
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed_timeout_ms)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(title) = config.get("window", "title") {
            self.window_title = title;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(background) = config.getbool("window", "run_in_background").ok().flatten() {
            self.run_in_background = background;
        }

        // [simulation] section
        if let Some(rate) = config.getuint("simulation", "tick_rate").ok().flatten() {
            self.tick_rate = (rate as u32).max(1);
        }
        if let Some(max) = config
            .getuint("simulation", "max_ticks_per_frame")
            .ok()
            .flatten()
        {
            self.max_ticks_per_frame = (max as u32).max(1);
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        let rules = &mut self.rules;
        if let Some(step) = config.getfloat("simulation", "ball_step").ok().flatten() {
            if step > 0.0 {
                rules.ball_step = step as f32;
            } else {
                warn!("ignoring non-positive ball_step {}", step);
            }
        }
        if let Some(x) = config.getfloat("simulation", "exit_x").ok().flatten() {
            rules.exit_x = x as f32;
        }
        if let Some(x) = config.getfloat("simulation", "restart_x").ok().flatten() {
            rules.restart_x = x as f32;
        }
        if let Some(x) = config.getfloat("simulation", "start_x").ok().flatten() {
            rules.start_x = x as f32;
        }
        if let Some(y) = config.getfloat("simulation", "ball_y").ok().flatten() {
            rules.ball_y = y as f32;
        }
        if let Some(interval) = config
            .getuint("simulation", "poll_interval_ticks")
            .ok()
            .flatten()
        {
            rules.poll_interval = interval;
        }
        if let Some(ticks) = config.getuint("simulation", "ticks_per_frame").ok().flatten() {
            rules.ticks_per_frame = ticks.max(1);
        }
        if let Some(x_max) = config.getuint("simulation", "spawn_x_max").ok().flatten() {
            rules.spawn_x_max = x_max as u32;
        }
        if let Some(y_min) = config.getuint("simulation", "spawn_y_min").ok().flatten() {
            rules.spawn_y_min = y_min as u32;
        }
        if let Some(y_span) = config.getuint("simulation", "spawn_y_span").ok().flatten() {
            rules.spawn_y_span = y_span as u32;
        }
        if let Some(max_chars) = config
            .getuint("simulation", "label_max_chars")
            .ok()
            .flatten()
        {
            rules.label_max_chars = max_chars as usize;
        }
        let epsilon = config
            .getfloat("simulation", "match_epsilon")
            .ok()
            .flatten()
            .map(|e| e.abs() as f32)
            .unwrap_or(DEFAULT_MATCH_EPSILON);
        if let Some(mode) = config.get("simulation", "match_mode") {
            match MatchMode::parse(&mode, epsilon) {
                Some(mode) => rules.match_mode = mode,
                None => warn!("unknown match_mode '{}', keeping {:?}", mode, rules.match_mode),
            }
        }

        // [feed] section
        if let Some(url) = config.get("feed", "url") {
            self.feed_url = url;
        }
        if let Some(timeout) = config.getuint("feed", "timeout_ms").ok().flatten() {
            self.feed_timeout_ms = timeout;
        }
        if let Some(driver) = config.get("feed", "driver") {
            match FeedDriverKind::parse(&driver) {
                Some(kind) => self.feed_driver = kind,
                None => warn!(
                    "unknown feed driver '{}', keeping {}",
                    driver,
                    self.feed_driver.as_str()
                ),
            }
        }

        // [assets] section
        if let Some(path) = config.get("assets", "ball_strip") {
            self.ball_strip = PathBuf::from(path);
        }
        if let Some(frames) = config.getuint("assets", "ball_strip_frames").ok().flatten() {
            self.ball_strip_frames = (frames as usize).max(1);
        }
        if let Some(skip) = config.getbool("assets", "skip_first_frame").ok().flatten() {
            self.skip_first_frame = skip;
        }
        if let Some(scale) = config.getfloat("assets", "ball_scale").ok().flatten() {
            self.ball_scale = scale as f32;
        }
        if let Some(path) = config.get("assets", "thing_texture") {
            self.thing_texture = PathBuf::from(path);
        }
        if let Some(scale) = config.getfloat("assets", "thing_scale").ok().flatten() {
            self.thing_scale = scale as f32;
        }
        if let Some(path) = config.get("assets", "font") {
            self.font = PathBuf::from(path);
        }
        if let Some(size) = config.getfloat("assets", "label_font_size").ok().flatten() {
            self.label_font_size = size as f32;
        }
        if let Some(banner) = config.get("assets", "banner") {
            self.banner = banner;
        }

        info!(
            "Loaded config: {}x{} window, {} ticks/s, poll every {} ticks, feed {} ({}), match {:?}",
            self.window_width,
            self.window_height,
            self.tick_rate,
            self.rules.poll_interval,
            self.feed_url,
            self.feed_driver.as_str(),
            self.rules.match_mode
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let rules = &self.rules;

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "title", Some(self.window_title.clone()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set(
            "window",
            "run_in_background",
            Some(self.run_in_background.to_string()),
        );

        // [simulation] section
        config.set("simulation", "tick_rate", Some(self.tick_rate.to_string()));
        config.set(
            "simulation",
            "max_ticks_per_frame",
            Some(self.max_ticks_per_frame.to_string()),
        );
        if let Some(seed) = self.seed {
            config.set("simulation", "seed", Some(seed.to_string()));
        }
        config.set("simulation", "ball_step", Some(rules.ball_step.to_string()));
        config.set("simulation", "exit_x", Some(rules.exit_x.to_string()));
        config.set("simulation", "restart_x", Some(rules.restart_x.to_string()));
        config.set("simulation", "start_x", Some(rules.start_x.to_string()));
        config.set("simulation", "ball_y", Some(rules.ball_y.to_string()));
        config.set(
            "simulation",
            "poll_interval_ticks",
            Some(rules.poll_interval.to_string()),
        );
        config.set(
            "simulation",
            "ticks_per_frame",
            Some(rules.ticks_per_frame.to_string()),
        );
        config.set("simulation", "spawn_x_max", Some(rules.spawn_x_max.to_string()));
        config.set("simulation", "spawn_y_min", Some(rules.spawn_y_min.to_string()));
        config.set("simulation", "spawn_y_span", Some(rules.spawn_y_span.to_string()));
        config.set(
            "simulation",
            "label_max_chars",
            Some(rules.label_max_chars.to_string()),
        );
        let (mode, epsilon) = match rules.match_mode {
            MatchMode::Exact => ("exact", DEFAULT_MATCH_EPSILON),
            MatchMode::Tolerant { epsilon } => ("tolerant", epsilon),
        };
        config.set("simulation", "match_mode", Some(mode.to_string()));
        config.set("simulation", "match_epsilon", Some(epsilon.to_string()));

        // [feed] section
        config.set("feed", "url", Some(self.feed_url.clone()));
        config.set("feed", "timeout_ms", Some(self.feed_timeout_ms.to_string()));
        config.set("feed", "driver", Some(self.feed_driver.as_str().to_string()));

        // [assets] section
        config.set(
            "assets",
            "ball_strip",
            Some(self.ball_strip.display().to_string()),
        );
        config.set(
            "assets",
            "ball_strip_frames",
            Some(self.ball_strip_frames.to_string()),
        );
        config.set(
            "assets",
            "skip_first_frame",
            Some(self.skip_first_frame.to_string()),
        );
        config.set("assets", "ball_scale", Some(self.ball_scale.to_string()));
        config.set(
            "assets",
            "thing_texture",
            Some(self.thing_texture.display().to_string()),
        );
        config.set("assets", "thing_scale", Some(self.thing_scale.to_string()));
        config.set("assets", "font", Some(self.font.display().to_string()));
        config.set(
            "assets",
            "label_font_size",
            Some(self.label_font_size.to_string()),
        );
        config.set("assets", "banner", Some(self.banner.clone()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
