// src/bin/cli.rs
use clap::Parser;

use acropolis_exporter::cli::{self, CliArgs};
use acropolis_exporter::logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    logging::init(args.debug);

    let text = cli::run(&args)?;
    print!("{text}");
    Ok(())
}
