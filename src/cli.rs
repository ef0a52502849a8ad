// src/cli.rs
// One-shot mode: read the page once (file or URL), print the exposition.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::BoolishValueParser;

use crate::collect;
use crate::config::consts::FETCH_TIMEOUT_SECS;
use crate::core::net;
use crate::error::{ExporterError, Result};

#[derive(Parser, Clone, Debug)]
#[command(name = "cli", about = "Render Acropolis scheduler metrics once and exit", version)]
pub struct CliArgs {
    /// Fetch the scheduler page from this URL
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read a saved scheduler page from disk
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, env = "DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,

    /// Fetch timeout in seconds
    #[arg(long = "timeout", default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl CliArgs {
    pub fn source(&self) -> Result<Source> {
        match (&self.url, &self.file) {
            (Some(url), None) => Ok(Source::Url(url.clone())),
            (None, Some(path)) => Ok(Source::File(path.clone())),
            (Some(_), Some(_)) => Err(ExporterError::config("use either --url or --file, not both")),
            (None, None) => Err(ExporterError::config("specify --url <URL> or --file <PATH>")),
        }
    }
}

pub fn load_markup(source: &Source, timeout: Duration) -> Result<String> {
    match source {
        Source::File(path) => {
            logd!("Reading {}", path.display());
            // saved pages are not always UTF-8; decode like the HTTP path does
            Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
        }
        Source::Url(url) => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(async {
                let client = net::client(timeout)?;
                net::fetch_page(&client, url).await
            })
        }
    }
}

pub fn run(args: &CliArgs) -> Result<String> {
    let source = args.source()?;
    let markup = load_markup(&source, Duration::from_secs(args.timeout_secs))?;
    Ok(collect::collect(&markup))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scheduler.html")
    }

    #[test]
    fn source_requires_exactly_one() {
        let args = CliArgs::try_parse_from(["cli"]).unwrap();
        assert!(matches!(args.source(), Err(ExporterError::Config(_))));

        let args = CliArgs::try_parse_from(["cli", "--file", "page.html"]).unwrap();
        assert_eq!(args.source().unwrap(), Source::File(PathBuf::from("page.html")));

        assert!(CliArgs::try_parse_from(["cli", "--file", "a", "--url", "http://x"]).is_err());
    }

    #[test]
    fn run_from_file() {
        let args = CliArgs::try_parse_from(["cli", "--file", fixture().to_str().unwrap()]).unwrap();
        let out = run(&args).unwrap();
        assert!(out.contains("acropolis_hosts_total 2\n"));
    }

    #[test]
    fn latin1_page_is_read_lossily() {
        let path = std::env::temp_dir().join(format!("acropolis_latin1_{}.html", std::process::id()));
        let mut page = b"<table id=\"hosts\"><tr><th>UUID</th><th>CPUs</th></tr><tr><td>caf".to_vec();
        page.push(0xE9);
        page.extend_from_slice(b"</td><td>4</td></tr></table>");
        fs::write(&path, &page).unwrap();

        let out = load_markup(&Source::File(path.clone()), Duration::from_secs(1));
        fs::remove_file(&path).unwrap();
        let markup = out.unwrap();
        assert!(markup.contains("caf\u{FFFD}"));
        assert!(collect::collect(&markup).contains("acropolis_hosts_total 1\n"));
    }

    #[test]
    fn debug_flag_and_env_values() {
        use clap::{CommandFactory, FromArgMatches};

        let args = CliArgs::try_parse_from(["cli", "--debug"]).unwrap();
        assert!(args.debug);

        // SAFETY: variable name is private to this test
        unsafe { std::env::set_var("ACROPOLIS_CLI_DEBUG", "1") };
        let matches = CliArgs::command()
            .mut_arg("debug", |a| a.env("ACROPOLIS_CLI_DEBUG"))
            .try_get_matches_from(["cli"])
            .unwrap();
        assert!(CliArgs::from_arg_matches(&matches).unwrap().debug);
    }

    #[test]
    fn missing_file_is_io_error() {
        let src = Source::File(PathBuf::from("/definitely/not/here.html"));
        let err = load_markup(&src, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ExporterError::Io(_)));
    }
}
