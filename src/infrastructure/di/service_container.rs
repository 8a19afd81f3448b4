//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{NavigationService, ReportService, TreeStore};
use crate::application::NavigatorApi;
use crate::config::Settings;
use crate::infrastructure::traits::{
    Clock, FileSystem, RealFileSystem, Selector, SkimSelector, SystemClock,
};

/// Container holding all application services.
///
/// The tree store is shared, so the category tree is read at most once no
/// matter how many services use it.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Interactive selector
    pub selector: Arc<dyn Selector>,

    /// Time source for report stamps
    pub clock: Arc<dyn Clock>,

    /// Category tree, loaded on first use
    pub tree_store: Arc<TreeStore>,

    /// Report rendering and persistence
    pub reports: Arc<ReportService>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(SkimSelector),
            Arc::new(SystemClock),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        selector: Arc<dyn Selector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = Arc::new(settings);
        let tree_store = Arc::new(TreeStore::new(fs.clone(), settings.tree_file.clone()));
        let reports = Arc::new(ReportService::new(
            fs.clone(),
            clock.clone(),
            settings.report_dir.clone(),
            settings.report_prefix.clone(),
        ));

        Self {
            settings,
            fs,
            selector,
            clock,
            tree_store,
            reports,
        }
    }

    /// Boundary facade over the shared store and report service.
    pub fn api(&self) -> NavigatorApi {
        NavigatorApi::new(self.tree_store.clone(), self.reports.clone())
    }

    /// Interactive navigation driven by the configured selector.
    pub fn navigation(&self) -> NavigationService {
        NavigationService::new(self.selector.clone())
    }
}
