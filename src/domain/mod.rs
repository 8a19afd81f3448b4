//! Domain layer: taxonomy tree, lookup, navigation and report rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod report;
pub mod search;
pub mod session;

pub use arena::{CategoryNode, CategoryTree};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use report::{format_timestamp, render_report, report_file_name};
pub use search::SearchOutcome;
pub use session::{NavState, NavigationSession, SessionEvent, Transition};
