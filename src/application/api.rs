//! Boundary facade for presentation and transport layers
//!
//! Request and response types are JSON-shaped so they can cross a process
//! boundary unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::services::{GeneratedReport, ReportService, TreeStore};
use crate::application::ApplicationResult;
use crate::domain::{CategoryPath, NavigationSession, SearchOutcome};

/// Lookup status as seen across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    NotFound,
}

/// Answer to "what are the children of X".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildrenResponse {
    pub status: LookupStatus,
    /// The name as it was asked for
    pub material: String,
    /// Present only when found; empty for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<String>>,
}

impl ChildrenResponse {
    pub fn from_outcome(material: &str, outcome: SearchOutcome) -> Self {
        let (status, subcategories) = match outcome {
            SearchOutcome::Found { children } => (LookupStatus::Found, Some(children)),
            SearchOutcome::FoundLeaf => (LookupStatus::Found, Some(Vec::new())),
            SearchOutcome::NotFound => (LookupStatus::NotFound, None),
        };
        Self {
            status,
            material: material.to_string(),
            subcategories,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub paths: Vec<CategoryPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub content: String,
}

/// Stateless entry points over the tree store and report service.
pub struct NavigatorApi {
    store: Arc<TreeStore>,
    reports: Arc<ReportService>,
}

impl NavigatorApi {
    pub fn new(store: Arc<TreeStore>, reports: Arc<ReportService>) -> Self {
        Self { store, reports }
    }

    /// Names of the top-level categories.
    #[instrument(level = "debug", skip(self))]
    pub fn list_top_level(&self) -> ApplicationResult<Vec<String>> {
        Ok(self.store.load()?.root_names())
    }

    /// Children of the first category matching `name`.
    ///
    /// An unknown name is a `not_found` response, not an error.
    #[instrument(level = "debug", skip(self))]
    pub fn list_children(&self, name: &str) -> ApplicationResult<ChildrenResponse> {
        let outcome = self.store.load()?.find_children(name);
        Ok(ChildrenResponse::from_outcome(name, outcome))
    }

    /// Render a report for arbitrary paths without writing it anywhere.
    #[instrument(level = "debug", skip_all, fields(paths = request.paths.len()))]
    pub fn generate_report(&self, request: &ReportRequest) -> ReportResponse {
        ReportResponse {
            content: self.reports.render(&request.paths).text(),
        }
    }

    /// Render and write a report into the configured report directory.
    pub fn save_report(&self, paths: &[CategoryPath]) -> ApplicationResult<GeneratedReport> {
        self.reports.write(paths)
    }

    /// Fresh navigation session over the loaded tree.
    pub fn start_session(&self) -> ApplicationResult<NavigationSession> {
        Ok(NavigationSession::new(self.store.load()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_not_found_when_serializing_then_no_subcategories_field() {
        let response = ChildrenResponse::from_outcome("Stahlbeton", SearchOutcome::NotFound);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "not_found", "material": "Stahlbeton"})
        );
    }

    #[test]
    fn given_leaf_when_serializing_then_empty_subcategories() {
        let response = ChildrenResponse::from_outcome("gestrahlt", SearchOutcome::FoundLeaf);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "found", "material": "gestrahlt", "subcategories": []})
        );
    }

    #[test]
    fn given_report_json_when_deserializing_then_paths_parsed() {
        let request: ReportRequest =
            serde_json::from_str(r#"{"paths": [["A", "B"], ["C"]]}"#).unwrap();
        assert_eq!(request.paths.len(), 2);
        assert_eq!(request.paths[0], vec!["A", "B"]);
    }
}
