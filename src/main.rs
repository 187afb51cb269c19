// src/main.rs - traj-gen: sample an LSPB joint trajectory from the command line
use clap::Parser;

use minivie_motion::config::Config;
use minivie_motion::motion::trajectory::{TrajectoryGenerator, TrajectoryRequest};

#[derive(Parser, Debug)]
#[command(
    name = "traj-gen",
    about = "Generate a sampled LSPB trajectory for one joint motion"
)]
struct Args {
    /// Start position (caller-defined units, typically degrees)
    start: f64,

    /// Goal position
    end: f64,

    /// Total motion duration in seconds
    duration: f64,

    /// Requested cruise speed magnitude
    speed: f64,

    /// TOML configuration file (defaults are used when it does not exist)
    #[arg(long, default_value = "motion.toml")]
    config: String,

    /// Emit samples as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = if std::path::Path::new(&args.config).exists() {
        Config::load(&args.config).map_err(|e| {
            tracing::error!("Failed to load config from '{}': {}", args.config, e);
            e
        })?
    } else {
        tracing::info!("No configuration file at '{}', using defaults", args.config);
        Config::default()
    };

    let generator = TrajectoryGenerator::from_config(&config);
    let request = TrajectoryRequest {
        start: args.start,
        end: args.end,
        duration: args.duration,
        speed: args.speed,
    };

    let trajectory = generator.generate(&request).map_err(|e| {
        tracing::error!("Trajectory generation failed: {}", e);
        tracing::error!(
            "Minimum feasible duration at this speed: {:.3}s",
            generator.min_duration(args.start, args.end, args.speed)
        );
        e
    })?;

    tracing::info!(
        "Generated {} samples: blend time {:.3}s, cruise velocity {:.3}",
        trajectory.len(),
        trajectory.boundaries().blend_time,
        trajectory.cruise_velocity()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(trajectory.points())?);
    } else {
        println!("time,position,velocity,acceleration");
        for p in trajectory.points() {
            println!(
                "{:.6},{:.6},{:.6},{:.6}",
                p.time, p.position, p.velocity, p.acceleration
            );
        }
    }

    Ok(())
}
