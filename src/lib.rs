//! chime - Countdown Task Board Library
//!
//! This library provides the core functionality for the chime TUI, a terminal
//! task board where every task counts down toward a deadline.
//!
//! # Core Concepts
//!
//! - **Task Board**: ordered, in-memory task collection with id-keyed
//!   add/complete/remove operations; never persisted
//! - **Countdown Engine**: derives a display phase (Active, Critical, Expired,
//!   Completed) from a task's start time, duration, and the current instant
//! - **Tickers**: one cancellable once-per-second timer per live countdown,
//!   released on completion, expiry, removal, or board teardown
//! - **Roles**: a parent/child toggle that gates board controls
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.chime.toml`
//! - `countdown`: Phase state machine and remaining-time math
//! - `error`: Error types and result aliases
//! - `output`: CLI error emission (human and JSON)
//! - `role`: Roles and the controls they unlock
//! - `task`: Task records and the board collection
//! - `ticker`: Per-task countdown timers
//! - `ui`: The ratatui board

pub mod cli;
pub mod config;
pub mod countdown;
pub mod error;
pub mod output;
pub mod role;
pub mod task;
pub mod ticker;
pub mod ui;

pub use error::{Error, Result};
