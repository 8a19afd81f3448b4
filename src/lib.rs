//! Material navigator
//!
//! Step through a fixed category taxonomy one level at a time, collect the
//! completed root-to-leaf paths of a session, and render them as a report.
//!
//! Layers, innermost first:
//! - [`domain`]: category tree, name lookup, navigation state machine, report text
//! - [`application`]: tree store, report service, interactive loop, boundary facade
//! - [`infrastructure`]: filesystem/selector/clock implementations and wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
