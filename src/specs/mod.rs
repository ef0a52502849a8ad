// src/specs/mod.rs
//! # Page-reading “specs” module
//!
//! This module knows **where the ground truth lives** on the Acropolis
//! scheduler status page and how to read it tolerantly.
//!
//! ## What lives here
//! - **Table location** (`locate`): hosts, scheduler internals and per-host
//!   VM tables, each with its own fallback chain (identifier first, heading
//!   proximity last).
//! - **Row extraction** (`rows`): header cells paired with data cells into
//!   ordered `header → text` rows.
//!
//! ## What does **not** live here
//! - **Typing** of cell text (`core::sanitize`) and assembly into records
//!   (`records`).
//! - **Fetching** (`core::net`) and **rendering** (`metrics`).
//!
//! ## Typical call chain
//! ```text
//! collect::collect → records::Snapshot::from_document
//!                      → specs::locate::*  → specs::rows::extract
//!                  → metrics::render
//! ```
//!
//! ## Conventions & invariants
//! - A missing table is a **degraded page**, never an error: log a warning and
//!   return nothing.
//! - A row whose cell count differs from the header count is **dropped whole**.
//! - Heading text is matched **literally** (`==` or `contains`), no
//!   normalization, so the selectors keep matching what the page prints today.
pub mod locate;
pub mod rows;

pub use locate::{hosts_table, scheduler_internals_table, vm_tables, VmTable};
pub use rows::{extract, RawRow, TableRows};
