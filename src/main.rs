use clap::Parser;
use moonlattice::time::FrameClock;
use moonlattice::{Scene, SceneConfig, SceneError};
use std::path::PathBuf;

/// Run the night scene headless and report what happened.
#[derive(Parser, Debug)]
#[command(name = "moonlattice")]
struct Args {
    /// Seed for body randomization.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 1800)]
    ticks: u64,

    /// Fixed frames per second; dt = 1 / fps.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Optional JSON scene config.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final frame as JSON.
    #[arg(long)]
    dump: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SceneError> {
    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let mut scene = Scene::initialize(config, args.seed)?;
    let mut clock = FrameClock::fixed(1.0 / args.fps.max(1.0));

    for _ in 0..args.ticks {
        scene.tick(clock.update());
    }

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&scene.frame())?);
    }

    let moon = scene.moon().state();
    let stats = scene.teardown();
    println!("=== moonlattice ===");
    println!("Seed:        {}", args.seed);
    println!("Ticks:       {}", stats.ticks);
    println!("Sim time:    {:.2}s", clock.elapsed());
    println!("Bounces:     {}", stats.bounces);
    println!("Moonsets:    {}", stats.moon_wraps);
    println!(
        "Moon:        phase {:.1}°, height {:.1}, size {:.1}",
        moon.phase.to_degrees(),
        moon.position.y,
        moon.size
    );

    Ok(())
}
