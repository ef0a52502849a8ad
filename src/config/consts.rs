// src/config/consts.rs

// Serve
pub const DEFAULT_PORT: u16 = 8080;
pub const BIND_HOST: &str = "0.0.0.0";
pub const METRICS_PATH: &str = "/metrics";
pub const HEALTH_PATH: &str = "/health";
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

// Fetch
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("acropolis_exporter/", env!("CARGO_PKG_VERSION"));

// Metric naming
pub const PREFIX: &str = "acropolis_";

// Sentinels for absent cells
pub const UNKNOWN: &str = "unknown";
pub const NO_DESTINATION: &str = "none";

// Page landmarks
pub const HOSTS_TABLE_ID: &str = "hosts";
pub const HOSTS_WRAPPER_ID: &str = "hosts_wrapper";
pub const HOSTS_HEADING: &str = "Hosts";
pub const INTERNALS_HEADING: &str = "Scheduler Internals";
pub const VM_TABLE_CLASS: &str = "vms";
pub const VM_HEADING_MARKER: &str = "VMs on";

/// Column names as the scheduler page prints them.
pub mod columns {
    pub const IP: &str = "IP";
    pub const UUID: &str = "UUID";
    pub const NAME: &str = "Name";
    pub const CPUS: &str = "CPUs";
    pub const CPU_USED: &str = "CPU used";
    pub const CPU_FREE: &str = "CPU free";
    pub const MEMORY: &str = "Memory";
    pub const MEMORY_USED: &str = "Memory Used";
    pub const MEMORY_RESERVED: &str = "Memory Reserved";
    pub const MEMORY_FREE: &str = "Memory Free";
    pub const MEMORY_ASSIGNED: &str = "Memory Assigned";
    pub const PRIORITY: &str = "Priority";
    pub const SCHEDULABLE: &str = "Schedulable";
    pub const CONNECTED: &str = "Connected";
    pub const GPU_NODE: &str = "GPU Node";
    pub const ZEUS_STATE: &str = "ZeusState";
    pub const ACTUAL_MEMORY_USED: &str = "Actual Memory Used";
    pub const VM_OVERHEADS: &str = "VM Overheads";
    pub const HOST_OVERHEADS: &str = "Host Overheads";
    pub const DESTINATION: &str = "Destination";
}
