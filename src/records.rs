// src/records.rs
//! Typed records built from located tables.
//!
//! Cell text is converted exactly once, here. A `Snapshot` is built fresh
//! for every scrape and owned by that scrape alone.

use scraper::Html;

use crate::config::consts::columns::*;
use crate::config::consts::{NO_DESTINATION, UNKNOWN};
use crate::core::html::Outline;
use crate::core::sanitize::{parse_bool, parse_numeric, MemorySize};
use crate::specs::{self, RawRow};

#[derive(Clone, Debug, PartialEq)]
pub struct HostRecord {
    pub uuid: String,
    pub ip: String,
    pub cpu_total: f64,
    pub cpu_used: f64,
    pub cpu_free: f64,
    pub memory_total: MemorySize,
    pub memory_used: MemorySize,
    pub memory_reserved: MemorySize,
    pub memory_free: MemorySize,
    pub memory_assigned: MemorySize,
    pub priority: f64,
    pub schedulable: bool,
    pub connected: bool,
    pub gpu_node: bool,
    pub zeus_state: String,
}

impl HostRecord {
    /// Missing `UUID`/`IP` columns become `"unknown"`; the row is kept.
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            uuid: s!(row.get_or(UUID, UNKNOWN)),
            ip: s!(row.get_or(IP, UNKNOWN)),
            cpu_total: numeric(row, CPUS),
            cpu_used: numeric(row, CPU_USED),
            cpu_free: numeric(row, CPU_FREE),
            memory_total: memory(row, MEMORY),
            memory_used: memory(row, MEMORY_USED),
            memory_reserved: memory(row, MEMORY_RESERVED),
            memory_free: memory(row, MEMORY_FREE),
            memory_assigned: memory(row, MEMORY_ASSIGNED),
            priority: numeric(row, PRIORITY),
            schedulable: boolean(row, SCHEDULABLE),
            connected: boolean(row, CONNECTED),
            gpu_node: boolean(row, GPU_NODE),
            zeus_state: s!(row.get_or(ZEUS_STATE, UNKNOWN)),
        }
    }
}

/// Scheduler bookkeeping for one host (same UUID by convention).
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerInternalRecord {
    pub uuid: String,
    pub actual_memory_used: MemorySize,
    pub vm_overheads: MemorySize,
    pub host_overheads: MemorySize,
}

impl SchedulerInternalRecord {
    pub fn from_row(row: &RawRow) -> Self {
        Self {
            uuid: s!(row.get_or(UUID, UNKNOWN)),
            actual_memory_used: memory(row, ACTUAL_MEMORY_USED),
            vm_overheads: memory(row, VM_OVERHEADS),
            host_overheads: memory(row, HOST_OVERHEADS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VmRecord {
    pub uuid: String,
    pub name: String,
    /// IP of the host whose table listed this VM, not a VM column.
    pub host_ip: String,
    pub cpu_total: f64,
    pub cpu_used: f64,
    pub cpu_free: f64,
    pub memory_total: MemorySize,
    pub destination: String,
}

impl VmRecord {
    pub fn from_row(row: &RawRow, host_ip: &str) -> Self {
        Self {
            uuid: s!(row.get_or(UUID, UNKNOWN)),
            name: s!(row.get_or(NAME, UNKNOWN)),
            host_ip: s!(host_ip),
            cpu_total: numeric(row, CPUS),
            cpu_used: numeric(row, CPU_USED),
            cpu_free: numeric(row, CPU_FREE),
            memory_total: memory(row, MEMORY),
            destination: s!(row.get_or(DESTINATION, NO_DESTINATION)),
        }
    }
}

/// Everything one scrape read off the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub hosts: Vec<HostRecord>,
    pub scheduler_internals: Vec<SchedulerInternalRecord>,
    pub vms: Vec<VmRecord>,
}

impl Snapshot {
    pub fn from_document(doc: &Html) -> Self {
        Self::from_outline(&Outline::new(doc))
    }

    /// Each section is read on its own; a missing one leaves its
    /// collection empty and the others untouched.
    pub fn from_outline(outline: &Outline<'_>) -> Self {
        let hosts: Vec<HostRecord> = specs::hosts_table(outline)
            .map(|t| specs::extract(t).rows.iter().map(HostRecord::from_row).collect())
            .unwrap_or_default();
        logf!("Parsed {} hosts", hosts.len());

        let scheduler_internals: Vec<SchedulerInternalRecord> = specs::scheduler_internals_table(outline)
            .map(|t| {
                specs::extract(t)
                    .rows
                    .iter()
                    .map(SchedulerInternalRecord::from_row)
                    .collect()
            })
            .unwrap_or_default();
        logf!("Parsed {} scheduler internal entries", scheduler_internals.len());

        let mut vms = Vec::new();
        for vm_table in specs::vm_tables(outline) {
            let rows = specs::extract(vm_table.table).rows;
            vms.extend(rows.iter().map(|r| VmRecord::from_row(r, &vm_table.host_ip)));
        }
        logf!("Parsed {} VMs", vms.len());

        Self { hosts, scheduler_internals, vms }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.scheduler_internals.is_empty() && self.vms.is_empty()
    }
}

fn numeric(row: &RawRow, column: &str) -> f64 {
    parse_numeric(row.get_or(column, "0"))
}

fn memory(row: &RawRow, column: &str) -> MemorySize {
    MemorySize::parse(row.get_or(column, "0"))
}

fn boolean(row: &RawRow, column: &str) -> bool {
    parse_bool(row.get_or(column, ""))
}
