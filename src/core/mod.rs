// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use sanitize::{parse_bool, parse_memory, parse_numeric, MemorySize, MemoryUnit};
