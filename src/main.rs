//! Space Triangle entry point
//!
//! Runs the game headless with the built-in autopilot at a fixed frame rate,
//! tessellating every frame the way a windowed host would.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "space-triangle")]
#[command(about = "Asteroid shooter on a wraparound plane, driven by its demo autopilot")]
struct Args {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the run seed
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Skip the title scene
    #[arg(long)]
    no_title: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_settings: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use space_triangle::platform::{FrameClock, InputState, Key};
    use space_triangle::renderer::{draw_list, tessellate};
    use space_triangle::sim::TickInput;
    use space_triangle::{Game, Settings};

    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load_or_default(args.config.as_deref());
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.no_title {
        settings.title_screen = false;
    }

    if args.dump_settings {
        match serde_json::to_string_pretty(&settings) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize settings: {e}"),
        }
        return;
    }

    if !(args.fps > 0.0) {
        log::error!("--fps must be positive");
        std::process::exit(2);
    }

    log::info!("Space Triangle (headless) starting, seed {:#x}", settings.seed);

    let plane = settings.tuning.plane;
    let mut game = Game::new(settings);
    let mut keys = InputState::new();
    let mut clock = FrameClock::new();

    let frame_ms = 1000.0 / args.fps;
    let mut best_level = game.level().unwrap_or(0);
    let mut last_level = game.level();
    let mut losses = 0u32;
    let mut vertices = 0usize;

    for frame in 0..args.frames {
        let demo = game.demo_input();
        keys.set(Key::Left, demo.left);
        keys.set(Key::Right, demo.right);
        keys.set(Key::Up, demo.up);
        keys.set(Key::Down, demo.down);
        keys.set(Key::Space, demo.fire);

        let dt = clock.tick_millis(f64::from(frame) * frame_ms);
        game.advance(dt, &TickInput::from_input(&keys));

        let batches = tessellate(&draw_list(&game), &plane);
        vertices += batches.iter().map(|b| b.vertices.len()).sum::<usize>();

        let level = game.level();
        if level != last_level {
            match level {
                Some(l) if last_level.is_some_and(|prev| l > prev) => {
                    log::info!("Frame {frame}: advanced to wave {l}");
                }
                Some(l) => {
                    if last_level.is_some() {
                        losses += 1;
                    }
                    log::info!("Frame {frame}: wave {l} started");
                }
                None => {
                    losses += 1;
                    log::info!("Frame {frame}: ship lost");
                }
            }
            best_level = best_level.max(level.unwrap_or(0));
            last_level = level;
        }
    }

    println!(
        "Simulated {} frames: best wave {}, ships lost {}, {} vertices tessellated",
        args.frames, best_level, losses, vertices
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts on the web drive `Game` directly through the library
}
