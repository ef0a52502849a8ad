// src/metrics.rs
//! Prometheus text exposition of a `Snapshot`.
//!
//! Everything is a gauge: the page is a full-state snapshot, not a stream
//! of events. Families are written in a fixed order, each as
//! `# HELP` / `# TYPE` / samples / blank line. A section with no records
//! writes no families at all.
//!
//! Label values go out as read. A quote or backslash in a cell will break
//! the line for the Prometheus parser.

use std::fmt::{self, Write};

use crate::config::consts::PREFIX;
use crate::records::{HostRecord, SchedulerInternalRecord, Snapshot, VmRecord};

type Gauge<T> = (&'static str, &'static str, fn(&T) -> f64);

const HOST_GAUGES: &[Gauge<HostRecord>] = &[
    ("host_cpu_cores_total", "Total CPU cores available on the host", |h: &HostRecord| h.cpu_total),
    ("host_cpu_cores_used", "CPU cores currently in use on the host", |h: &HostRecord| h.cpu_used),
    ("host_cpu_cores_free", "CPU cores currently free on the host", |h: &HostRecord| h.cpu_free),
    ("host_memory_total_bytes", "Memory total on the host in bytes", |h: &HostRecord| h.memory_total.bytes()),
    ("host_memory_used_bytes", "Memory used on the host in bytes", |h: &HostRecord| h.memory_used.bytes()),
    ("host_memory_reserved_bytes", "Memory reserved on the host in bytes", |h: &HostRecord| h.memory_reserved.bytes()),
    ("host_memory_free_bytes", "Memory free on the host in bytes", |h: &HostRecord| h.memory_free.bytes()),
    ("host_memory_assigned_bytes", "Memory assigned on the host in bytes", |h: &HostRecord| h.memory_assigned.bytes()),
    ("host_priority", "Host priority score", |h: &HostRecord| h.priority),
    ("host_schedulable", "Whether the host schedulable (1) or not (0)", |h: &HostRecord| flag(h.schedulable)),
    ("host_connected", "Whether the host connected (1) or not (0)", |h: &HostRecord| flag(h.connected)),
    ("host_gpu_node", "Whether the host gpu node (1) or not (0)", |h: &HostRecord| flag(h.gpu_node)),
];

const SCHEDULER_GAUGES: &[Gauge<SchedulerInternalRecord>] = &[
    (
        "scheduler_actual_memory_used_bytes",
        "Actual Memory Used by the host in bytes",
        |s: &SchedulerInternalRecord| s.actual_memory_used.bytes(),
    ),
    (
        "scheduler_vm_overheads_bytes",
        "VM Overheads by the host in bytes",
        |s: &SchedulerInternalRecord| s.vm_overheads.bytes(),
    ),
    (
        "scheduler_host_overheads_bytes",
        "Host Overheads by the host in bytes",
        |s: &SchedulerInternalRecord| s.host_overheads.bytes(),
    ),
];

const VM_GAUGES: &[Gauge<VmRecord>] = &[
    ("vm_cpu_cores_total", "CPU cores total by the VM", |v: &VmRecord| v.cpu_total),
    ("vm_cpu_cores_used", "CPU cores used by the VM", |v: &VmRecord| v.cpu_used),
    ("vm_cpu_cores_free", "CPU cores free by the VM", |v: &VmRecord| v.cpu_free),
    ("vm_memory_total_bytes", "Total memory assigned to the VM in bytes", |v: &VmRecord| v.memory_total.bytes()),
];

/// Render with the current wall clock as scrape timestamp.
pub fn render(snapshot: &Snapshot) -> String {
    render_at(snapshot, now_seconds())
}

/// Render with a caller-chosen timestamp (seconds since the epoch).
pub fn render_at(snapshot: &Snapshot, timestamp: f64) -> String {
    let mut out = String::with_capacity(4096);
    match write_exposition(&mut out, snapshot, timestamp) {
        Ok(()) => out,
        Err(e) => {
            loge!("Error in metrics generation: {e}");
            render_failure_body()
        }
    }
}

/// Body returned when rendering itself fails.
pub fn render_failure_body() -> String {
    join!(PREFIX, "scrape_error 1\n")
}

/// Body returned when the page could not be fetched. Carries no stale data.
pub fn scrape_error_body(reason: &str) -> String {
    let name = join!(PREFIX, "scrape_error");
    let reason = reason.replace(['\r', '\n'], " ");
    format!(
        "# HELP {name} Whether there was an error scraping the target\n\
         # TYPE {name} gauge\n\
         {name} 1\n\
         # Error: {reason}\n"
    )
}

pub fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

fn write_exposition(out: &mut String, snap: &Snapshot, timestamp: f64) -> fmt::Result {
    single(out, "scrape_timestamp_seconds", "Timestamp of the last successful scrape", timestamp)?;

    if !snap.hosts.is_empty() {
        for (suffix, help, value) in HOST_GAUGES {
            family(out, suffix, help, &snap.hosts, host_labels, *value)?;
        }
        family_with(
            out,
            "host_info",
            "Host information with Zeus state as label",
            &snap.hosts,
            |w, h| write!(w, "{},zeus_state=\"{}\"", host_labels(h), h.zeus_state),
            |_| 1.0,
        )?;
    }

    if !snap.scheduler_internals.is_empty() {
        for (suffix, help, value) in SCHEDULER_GAUGES {
            family(out, suffix, help, &snap.scheduler_internals, |s| format!("uuid=\"{}\"", s.uuid), *value)?;
        }
    }

    if !snap.vms.is_empty() {
        for (suffix, help, value) in VM_GAUGES {
            family(out, suffix, help, &snap.vms, vm_labels, *value)?;
        }
        family_with(
            out,
            "vm_info",
            "VM information with destination as label",
            &snap.vms,
            |w, v| write!(w, "{},destination=\"{}\"", vm_labels(v), v.destination),
            |_| 1.0,
        )?;
    }

    single(out, "hosts_total", "Total number of hosts", snap.hosts.len() as f64)?;
    single(out, "vms_total", "Total number of VMs", snap.vms.len() as f64)?;
    Ok(())
}

fn host_labels(h: &HostRecord) -> String {
    format!("ip=\"{}\",uuid=\"{}\"", h.ip, h.uuid)
}

fn vm_labels(v: &VmRecord) -> String {
    format!("vm_name=\"{}\",vm_uuid=\"{}\",host_ip=\"{}\"", v.name, v.uuid, v.host_ip)
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn preamble(out: &mut String, name: &str, help: &str) -> fmt::Result {
    writeln!(out, "# HELP {name} {help}")?;
    writeln!(out, "# TYPE {name} gauge")
}

/// Unlabeled single-sample family.
fn single(out: &mut String, suffix: &str, help: &str, value: f64) -> fmt::Result {
    let name = join!(PREFIX, suffix);
    preamble(out, &name, help)?;
    writeln!(out, "{name} {value}")?;
    writeln!(out)
}

fn family<T>(
    out: &mut String,
    suffix: &str,
    help: &str,
    items: &[T],
    labels: impl Fn(&T) -> String,
    value: impl Fn(&T) -> f64,
) -> fmt::Result {
    family_with(out, suffix, help, items, |w, item| w.write_str(&labels(item)), value)
}

/// One family, one sample per item. `labels` writes the text between braces.
fn family_with<T>(
    out: &mut String,
    suffix: &str,
    help: &str,
    items: &[T],
    labels: impl Fn(&mut String, &T) -> fmt::Result,
    value: impl Fn(&T) -> f64,
) -> fmt::Result {
    let name = join!(PREFIX, suffix);
    preamble(out, &name, help)?;
    for item in items {
        write!(out, "{name}{{")?;
        labels(out, item)?;
        writeln!(out, "}} {}", value(item))?;
    }
    writeln!(out)
}
