// src/collect.rs
use std::time::Instant;

use crate::core::html;
use crate::metrics;
use crate::records::Snapshot;

/// Markup in, exposition text out. Never fails: missing sections and bad
/// cells degrade into fewer or zero-valued samples.
pub fn collect(markup: &str) -> String {
    let snapshot = collect_snapshot(markup);
    metrics::render(&snapshot)
}

/// Parse and build the typed records of one scrape.
pub fn collect_snapshot(markup: &str) -> Snapshot {
    let t = Instant::now();
    let doc = html::parse(markup);
    let snapshot = Snapshot::from_document(&doc);
    logd!("Parsed scheduler page in {:?}", t.elapsed());
    if snapshot.is_empty() {
        logw!("Scheduler page yielded no records");
    }
    snapshot
}
