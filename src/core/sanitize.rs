// src/core/sanitize.rs
//! Cell text → typed values.
//!
//! Every function here is total: garbage in gives `0` / `false` out, so a
//! single odd cell can never take down a whole scrape.

/// Memory units the scheduler page prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryUnit {
    Mb,
    Gb,
    Tb,
}

impl MemoryUnit {
    /// Factor to MB.
    pub fn multiplier(self) -> f64 {
        match self {
            MemoryUnit::Mb => 1.0,
            MemoryUnit::Gb => 1024.0,
            MemoryUnit::Tb => 1024.0 * 1024.0,
        }
    }
}

/// A size+unit pair as read from a cell, before canonicalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemorySize {
    pub magnitude: f64,
    pub unit: MemoryUnit,
}

impl Default for MemorySize {
    fn default() -> Self {
        Self { magnitude: 0.0, unit: MemoryUnit::Mb }
    }
}

impl MemorySize {
    /// Read `"16 GB"`, `"512MB"`, `"1.5 tb"` and friends.
    ///
    /// The numeric prefix is the first run of digits/dots. The unit is picked
    /// by substring, `GB` before `TB`; anything else counts as MB. A string
    /// carrying both `GB` and `TB` therefore reads as GB.
    pub fn parse(text: &str) -> MemorySize {
        let upper = text.trim().to_uppercase();

        let mut numeric = s!();
        for ch in upper.chars() {
            if ch.is_ascii_digit() || ch == '.' {
                numeric.push(ch);
            } else if !numeric.is_empty() {
                break;
            }
        }
        let magnitude = numeric.parse::<f64>().unwrap_or(0.0);

        let unit = if upper.contains("GB") {
            MemoryUnit::Gb
        } else if upper.contains("TB") {
            MemoryUnit::Tb
        } else {
            MemoryUnit::Mb
        };

        MemorySize { magnitude, unit }
    }

    pub fn megabytes(&self) -> f64 {
        self.magnitude * self.unit.multiplier()
    }

    pub fn bytes(&self) -> f64 {
        self.megabytes() * 1024.0 * 1024.0
    }
}

/// Keep digits and dots, in order, and read what is left as a float.
/// No sign handling: `"-3"` reads as `3`.
pub fn parse_numeric(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

/// Memory cell → size in MB.
pub fn parse_memory(text: &str) -> f64 {
    MemorySize::parse(text).megabytes()
}

/// Only a case-insensitive `"true"` is true.
pub fn parse_bool(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}
