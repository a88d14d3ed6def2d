//! Rolling ball main entry point.
//!
//! A ball rolls right to left across a narrow strip of sky. Every few
//! seconds a name feed is polled over HTTP and each name appears as a
//! labelled thing somewhere on the strip; when the ball rolls over a thing
//! the thing disappears.
//!
//! Built on:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for the simulation state and its systems
//! - **ureq** on a worker thread for the feed
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and apply CLI overrides
//! 2. Open the window and load the ball strip, the thing image and the font
//! 3. Build the ECS world and start the feed worker
//! 4. Each frame: read input, run as many fixed-rate ticks as the frame time
//!    covers, draw the latest snapshot
//! 5. Stop the feed worker on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --headless 600 --inline-feed
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use clap::Parser;

use rollingball::game;
use rollingball::resources::feed::shutdown_feed;
use rollingball::resources::gameconfig::{FeedDriverKind, GameConfig};
use rollingball::resources::snapshot::RenderSnapshot;
use rollingball::systems::input::update_input_state;
use rollingball::systems::render::render_system;
use rollingball::systems::time::{FixedStep, update_world_time};

/// Katamari ball
#[derive(Parser)]
#[command(version, about = "A ball rolls over things named by a remote feed.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Override the feed URL.
    #[arg(long, value_name = "URL")]
    feed_url: Option<String>,

    /// Poll the feed synchronously inside the tick.
    #[arg(long)]
    inline_feed: bool,

    /// Run this many ticks without a window and print the final snapshot.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(url) = cli.feed_url {
        config.feed_url = url;
    }
    if cli.inline_feed {
        config.feed_driver = FeedDriverKind::Inline;
    }

    if cli.write_config {
        match config.save_to_file() {
            Ok(()) => println!("configuration written to {}", config.config_path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(ticks) = cli.headless {
        run_headless(&config, ticks);
        return;
    }

    run_windowed(config);
}

/// Run `ticks` ticks at the configured tick rate and print the snapshot.
fn run_headless(config: &GameConfig, ticks: u64) {
    let feed = game::feed_bridge_for(config);
    let mut world = game::init_world(config, feed, game::headless_animation(config));
    let mut tick = game::tick_schedule();
    let step = Duration::from_secs_f32(FixedStep::new(config.tick_rate, 1).step());

    log::info!("running {} ticks headless", ticks);
    let mut next = Instant::now();
    for _ in 0..ticks {
        tick.run(&mut world);
        next += step;
        if let Some(wait) = next.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }
    shutdown_feed(&mut world);

    match serde_json::to_string_pretty(world.resource::<RenderSnapshot>()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_windowed(config: GameConfig) {
    log::info!("Rolling ball starting");
    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.window_title)
        .build();
    rl.set_target_fps(config.target_fps);
    if config.run_in_background {
        // Keep updating while the window is unfocused.
        unsafe {
            raylib::ffi::SetWindowState(raylib::ffi::ConfigFlags::FLAG_WINDOW_ALWAYS_RUN as u32);
        }
    }

    let (assets, animation) = match game::load_assets(&mut rl, &thread, &config) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // --------------- ECS world + resources ---------------
    let feed = game::feed_bridge_for(&config);
    let mut fixed_step = FixedStep::new(config.tick_rate, config.max_ticks_per_frame);
    let mut world = game::init_world(&config, feed, animation);
    world.insert_non_send_resource(assets);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut tick = game::tick_schedule();
    let mut frame = Schedule::default();
    frame.add_systems((update_input_state, render_system).chain());

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        game::run_ticks(&mut world, &mut tick, fixed_step.ticks_for(dt) as u64);
        frame.run(&mut world);

        world.clear_trackers();
    }
    shutdown_feed(&mut world);
}
