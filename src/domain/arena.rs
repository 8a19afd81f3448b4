use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{normalize_name, CategoryPath, CategorySpec};
use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based category hierarchy.
#[derive(Debug)]
pub struct CategoryNode {
    /// Category name as it appears in the source data
    pub name: String,
    /// Index of parent node in the arena, None for top-level categories
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in source order
    pub children: Vec<Index>,
}

impl CategoryNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for CategoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based category forest.
///
/// Holds any number of top-level categories in source order. Built once at
/// load time and read-only afterwards, so it can be shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct CategoryTree {
    /// Arena storage for all nodes
    arena: Arena<CategoryNode>,
    /// Top-level categories, in source order
    roots: Vec<Index>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated tree from its JSON representation.
    ///
    /// Names must be non-empty and unique among siblings (after trimming and
    /// ignoring case).
    #[instrument(level = "debug", skip(specs), fields(roots = specs.len()))]
    pub fn from_specs(specs: &[CategorySpec]) -> DomainResult<Self> {
        let mut tree = Self::new();
        tree.insert_level(specs, None)?;
        Ok(tree)
    }

    fn insert_level(&mut self, specs: &[CategorySpec], parent: Option<Index>) -> DomainResult<()> {
        let parent_name = parent
            .and_then(|idx| self.get_node(idx))
            .map(|n| n.name.clone())
            .unwrap_or_else(|| "<top level>".to_string());

        let mut seen = HashSet::new();
        for spec in specs {
            if spec.name.trim().is_empty() {
                return Err(DomainError::EmptyCategoryName {
                    parent: parent_name,
                });
            }
            if !seen.insert(normalize_name(&spec.name)) {
                return Err(DomainError::DuplicateSibling {
                    name: spec.name.clone(),
                    parent: parent_name,
                });
            }
            let idx = self.insert_node(spec.name.clone(), parent);
            self.insert_level(&spec.children, Some(idx))?;
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: String, parent: Option<Index>) -> Index {
        let node = CategoryNode {
            name,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&CategoryNode> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Names of the top-level categories, in source order.
    pub fn root_names(&self) -> Vec<String> {
        self.names_of(&self.roots)
    }

    /// Names of the direct children of a node, in source order.
    pub fn child_names(&self, idx: Index) -> Vec<String> {
        self.get_node(idx)
            .map(|node| self.names_of(&node.children))
            .unwrap_or_default()
    }

    fn names_of(&self, indices: &[Index]) -> Vec<String> {
        indices
            .iter()
            .filter_map(|&i| self.get_node(i))
            .map(|n| n.name.clone())
            .collect()
    }

    /// Names from the top level down to `idx`.
    pub fn path_to(&self, idx: Index) -> CategoryPath {
        let mut path = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            match self.get_node(i) {
                Some(node) => {
                    path.push(node.name.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Pre-order traversal over the whole forest, siblings left to right.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    /// Number of levels in the deepest branch, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Every complete path from a top-level category down to a leaf.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_paths(&self) -> Vec<CategoryPath> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| self.path_to(idx))
            .collect()
    }

    /// Render the forest as one text tree per top-level category.
    pub fn to_tree_strings(&self) -> Vec<Tree<String>> {
        fn build(tree: &CategoryTree, idx: Index) -> Option<Tree<String>> {
            let node = tree.get_node(idx)?;
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|&child| build(tree, child))
                .collect();
            Some(Tree::new(node.name.clone()).with_leaves(leaves))
        }

        self.roots
            .iter()
            .filter_map(|&root| build(self, root))
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a CategoryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a CategoryTree) -> Self {
        // Roots in reverse so the first root is popped first
        let stack = tree.roots.iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
