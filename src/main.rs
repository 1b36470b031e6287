use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use flappy_term::assets::{self, ProceduralImages};
use flappy_term::{Config, driver, logging};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_file.as_deref())?;
    info!("Starting with {config:?}");

    // Nothing runs until every sprite is ready
    let sprites = pollster::block_on(assets::load_all(&ProceduralImages))?;

    driver::run(&config, sprites).context("terminal error")
}
