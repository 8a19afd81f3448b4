//! Name lookup over the category tree.

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::CategoryTree;
use crate::domain::entities::normalize_name;

/// Outcome of looking up a category by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Category exists and has children (in source order).
    Found { children: Vec<String> },
    /// Category exists but has no children.
    FoundLeaf,
    /// No category with that name anywhere in the tree.
    NotFound,
}

impl SearchOutcome {
    /// Choices offered after this lookup; empty for leaves and misses.
    pub fn children(&self) -> &[String] {
        match self {
            SearchOutcome::Found { children } => children,
            SearchOutcome::FoundLeaf | SearchOutcome::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, SearchOutcome::NotFound)
    }
}

impl CategoryTree {
    /// First node in pre-order whose name matches, ignoring case and
    /// surrounding whitespace.
    ///
    /// When a name occurs in several branches the earliest one in pre-order
    /// (top-level order first, then depth) always wins.
    pub fn find(&self, name: &str) -> Option<Index> {
        let wanted = normalize_name(name);
        self.iter()
            .find(|(_, node)| normalize_name(&node.name) == wanted)
            .map(|(idx, _)| idx)
    }

    /// Direct children of the first category matching `name`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_children(&self, name: &str) -> SearchOutcome {
        let outcome = match self.find(name) {
            Some(idx) => {
                let children = self.child_names(idx);
                if children.is_empty() {
                    SearchOutcome::FoundLeaf
                } else {
                    SearchOutcome::Found { children }
                }
            }
            None => SearchOutcome::NotFound,
        };
        debug!("find_children: {:?} -> {:?}", name, outcome);
        outcome
    }
}
