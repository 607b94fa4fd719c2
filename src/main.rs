use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use bomb_snake::game::GameConfig;
use bomb_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "bomb_snake")]
#[command(version, about = "Grid snake with bombs: eat, dodge, speed up")]
struct Cli {
    /// Cell edge length in canvas pixels, snapped to 5/10/20/25/40/50
    #[arg(long, default_value_t = 20)]
    cell_size: u32,

    /// Difficulty scalar: raises both the speed ramp and bomb frequency
    #[arg(long, default_value_t = 25.0)]
    difficulty: f64,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 400)]
    canvas_width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400)]
    canvas_height: u32,

    /// Write logs to this file; the terminal itself is the game surface
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = GameConfig::new(
        cli.canvas_width,
        cli.canvas_height,
        cli.cell_size,
        cli.difficulty,
    );

    let mut game = HumanMode::new(config);
    game.run().await
}
