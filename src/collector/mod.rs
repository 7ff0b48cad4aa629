//! Metrics collection from the Linux `/proc` filesystem.
//!
//! This module provides infrastructure for reading system-wide and
//! per-process statistics from `/proc`, with support for mocking so the
//! collectors can be tested (and demoed) without a Linux kernel underneath.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  ┌─────────────────────┐   ┌────────────────────────┐  │
//! │  │  ProcessCollector   │   │    SystemCollector     │  │
//! │  │  - /proc/[pid]/*    │   │  - /proc/stat          │  │
//! │  │  - /etc/passwd      │   │  - /proc/meminfo       │  │
//! │  └──────────┬──────────┘   │  - /proc/uptime, ...   │  │
//! │             │              └───────────┬────────────┘  │
//! │             └──────────┬───────────────┘               │
//! │                 ┌──────▼──────┐                        │
//! │                 │  FileSystem │ (trait)                │
//! │                 └──────┬──────┘                        │
//! └────────────────────────┼───────────────────────────────┘
//!                          │
//!              ┌───────────┴───────────┐
//!       ┌──────▼──────┐         ┌──────▼──────┐
//!       │   RealFs    │         │   MockFs    │
//!       │  (Linux)    │         │  (testing)  │
//!       └─────────────┘         └─────────────┘
//! ```
//!
//! Every operation is a fresh, self-contained read: absent files, absent
//! keys, and non-numeric values degrade to documented defaults instead of
//! surfacing errors, because the process table is inherently racy — a PID
//! listed one instant may be gone the next.

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{ProcessCollector, SystemCollector, UserResolver};
pub use traits::{FileSystem, RealFs};
