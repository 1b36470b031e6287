//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "flappy-term")]
#[command(about = "Fly through the gates. Space/Up or click to flap, R to restart, Q to quit")]
pub struct Config {
    /// Seed for obstacle placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Simulation ticks per second; physics constants assume 60
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,
    /// Disable sound
    #[arg(long)]
    pub mute: bool,
    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
