//! Category tree store
//!
//! Loads the taxonomy JSON once and hands out the shared, read-only tree.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CategorySpec, CategoryTree};
use crate::infrastructure::traits::FileSystem;

/// Owns the category tree for the lifetime of the process.
///
/// The first successful `load` parses the source and caches the result;
/// later calls return the cached tree without touching the filesystem.
/// A missing source is not cached, so a later call looks again.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    source: PathBuf,
    tree: OnceLock<Arc<CategoryTree>>,
}

impl TreeStore {
    /// Create a store reading from `source`.
    pub fn new(fs: Arc<dyn FileSystem>, source: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            source: source.into(),
            tree: OnceLock::new(),
        }
    }

    /// Path of the backing JSON resource.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// True once a tree has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.tree.get().is_some()
    }

    /// Load the tree, reading the source only on the first successful call.
    #[instrument(level = "debug", skip(self), fields(source = %self.source.display()))]
    pub fn load(&self) -> ApplicationResult<Arc<CategoryTree>> {
        if let Some(tree) = self.tree.get() {
            debug!("load: using cached tree");
            return Ok(Arc::clone(tree));
        }

        if !self.fs.exists(&self.source) {
            warn!("category tree not found: {}", self.source.display());
            return Err(ApplicationError::DataSourceMissing(self.source.clone()));
        }

        let content = self
            .fs
            .read_to_string(&self.source)
            .with_path_context("read category tree", &self.source)?;
        let tree = Arc::new(self.parse(&content)?);

        // Another caller may have won the race; either tree is equivalent.
        if self.tree.set(Arc::clone(&tree)).is_ok() {
            info!(
                "category tree loaded: {} categories, {} top-level, depth {}",
                tree.len(),
                tree.roots().len(),
                tree.depth()
            );
        }
        Ok(self.tree.get().map(Arc::clone).unwrap_or(tree))
    }

    fn parse(&self, content: &str) -> ApplicationResult<CategoryTree> {
        let specs: Vec<CategorySpec> =
            serde_json::from_str(content).map_err(|e| self.malformed(e.to_string()))?;
        CategoryTree::from_specs(&specs).map_err(|e| self.malformed(e.to_string()))
    }

    fn malformed(&self, reason: String) -> ApplicationError {
        ApplicationError::MalformedTreeData {
            path: self.source.clone(),
            reason,
        }
    }
}
