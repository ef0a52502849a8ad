// src/bin/exporter.rs
use clap::Parser;

use acropolis_exporter::config::ExporterOptions;
use acropolis_exporter::{logging, server};

#[tokio::main]
async fn main() {
    let opts = ExporterOptions::parse();
    logging::init(opts.debug);

    if let Err(e) = server::serve(&opts).await {
        acropolis_exporter::loge!("Exporter stopped: {e}");
        std::process::exit(1);
    }
}
