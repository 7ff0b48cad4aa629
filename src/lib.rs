//! proctop — Linux `/proc` statistics collection and derivation.
//!
//! Provides:
//! - `collector` — parsers and collectors for system and per-process
//!   metrics from the `/proc` filesystem
//! - `model` — derived views (process snapshots, system overview)
//! - `rates` — delta-based aggregate CPU utilization
//! - `fmt` — display formatting helpers
//! - `tui` — terminal front-end (ratatui/crossterm) over the collectors

pub mod collector;
pub mod fmt;
pub mod model;
pub mod rates;
pub mod tui;
