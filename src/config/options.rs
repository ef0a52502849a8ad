// src/config/options.rs
use std::time::Duration;

use clap::Parser;
use clap::builder::BoolishValueParser;

use super::consts::*;

/// Service options. Flags mirror env vars so the exporter runs unchanged
/// in a container.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "acropolis_exporter", about = "Acropolis Prometheus Exporter", version)]
pub struct ExporterOptions {
    /// URL to fetch Acropolis scheduler data from
    #[arg(long, env = "SCHEDULER_URL")]
    pub url: String,

    /// Port to serve metrics on
    #[arg(long, env = "EXPORTER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable debug logging
    #[arg(long, env = "DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,

    /// Upstream fetch timeout in seconds
    #[arg(long = "timeout", env = "EXPORTER_TIMEOUT_SECS", default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ExporterOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            port: DEFAULT_PORT,
            debug: false,
            timeout_secs: FETCH_TIMEOUT_SECS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{BIND_HOST}:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_url_given() {
        let opts = ExporterOptions::try_parse_from(["acropolis_exporter", "--url", "http://sched:2030"])
            .unwrap();
        assert_eq!(opts.url, "http://sched:2030");
        assert_eq!(opts.port, DEFAULT_PORT);
        assert_eq!(opts.timeout(), Duration::from_secs(FETCH_TIMEOUT_SECS));
        assert_eq!(opts.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn flags_override_defaults() {
        let opts = ExporterOptions::try_parse_from([
            "acropolis_exporter", "--url", "http://x", "--port", "9105", "--debug", "--timeout", "3",
        ])
        .unwrap();
        assert_eq!(opts.port, 9105);
        assert!(opts.debug);
        assert_eq!(opts.timeout_secs, 3);
    }

    #[test]
    fn new_matches_parsed_defaults() {
        let parsed = ExporterOptions::try_parse_from(["acropolis_exporter", "--url", "http://x"]).unwrap();
        assert_eq!(ExporterOptions::new("http://x"), parsed);
    }

    /// Parse with `debug` bound to its own env var so parallel tests never
    /// see each other's value.
    fn debug_from_env(var: &'static str, value: &str) -> bool {
        use clap::{CommandFactory, FromArgMatches};

        // SAFETY: each caller uses a distinct variable name
        unsafe { std::env::set_var(var, value) };
        let matches = ExporterOptions::command()
            .mut_arg("debug", |a| a.env(var))
            .try_get_matches_from(["acropolis_exporter", "--url", "http://x"])
            .unwrap();
        ExporterOptions::from_arg_matches(&matches).unwrap().debug
    }

    #[test]
    fn debug_env_accepts_shell_style_toggles() {
        assert!(debug_from_env("ACROPOLIS_DEBUG_ONE", "1"));
        assert!(debug_from_env("ACROPOLIS_DEBUG_YES", "yes"));
        assert!(debug_from_env("ACROPOLIS_DEBUG_ON", "on"));
        assert!(!debug_from_env("ACROPOLIS_DEBUG_ZERO", "0"));
        assert!(!debug_from_env("ACROPOLIS_DEBUG_NO", "no"));
        assert!(!debug_from_env("ACROPOLIS_DEBUG_FALSE", "false"));
    }
}
