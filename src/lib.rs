// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod logging;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod cli;
pub mod collect;
pub mod metrics;
pub mod records;
pub mod server;

pub use collect::{collect, collect_snapshot};
pub use error::{ExporterError, Result};
pub use records::Snapshot;
