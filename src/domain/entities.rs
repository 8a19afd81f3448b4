//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// Separator between category names when a path is rendered as text.
pub const PATH_SEPARATOR: &str = " > ";

/// Ordered category names from a root down to the point reached so far.
pub type CategoryPath = Vec<String>;

/// One category as stored in the taxonomy JSON resource.
///
/// The resource is an ordered list of these, nested through `children`.
/// A missing `children` key is read as "no children".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub children: Vec<CategorySpec>,
}

impl CategorySpec {
    /// Leaf category without children.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Category with the given children.
    pub fn branch(name: impl Into<String>, children: Vec<CategorySpec>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

/// Normalize a category name for comparison: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True when both names refer to the same category under lookup rules.
pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Render a path as `A > B > C`.
pub fn format_path(path: &[String]) -> String {
    path.join(PATH_SEPARATOR)
}

/// Parse `A > B > C` back into a path, dropping empty segments.
pub fn parse_path(text: &str) -> CategoryPath {
    text.split('>')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input unchanged if a variable cannot be resolved.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
