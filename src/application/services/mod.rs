//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Selector, Clock)
//! but are themselves concrete structs, not traits.

mod navigation;
mod report;
mod shared_session;
mod tree_store;

pub use navigation::{Action, Feedback, NavigationService, BACK_LABEL, FINISH_LABEL, RESET_LABEL};
pub use report::{GeneratedReport, ReportService};
pub use shared_session::{SessionView, SharedSession};
pub use tree_store::TreeStore;
