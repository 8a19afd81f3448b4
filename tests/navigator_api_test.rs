//! Tests for the NavigatorApi boundary

use std::path::Path;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use matnav::application::{ApplicationError, LookupStatus, NavigatorApi, ReportRequest};
use matnav::config::Settings;
use matnav::infrastructure::di::ServiceContainer;
use matnav::infrastructure::traits::{Clock, RealFileSystem, SelectionItem, Selector};

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Cancels every prompt; the API never asks.
struct NoSelector;

impl Selector for NoSelector {
    fn select_one(&self, _: &[SelectionItem], _: &str) -> Result<Option<SelectionItem>, String> {
        Ok(None)
    }
}

struct Ctx {
    temp: TempDir,
    container: ServiceContainer,
}

fn container(tree_file: &Path, report_dir: &Path) -> ServiceContainer {
    let settings = Settings {
        tree_file: tree_file.to_path_buf(),
        report_dir: report_dir.to_path_buf(),
        ..Settings::default()
    };
    let at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(14, 3, 59)
        .unwrap();
    ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        Arc::new(NoSelector),
        Arc::new(FixedClock(at)),
    )
}

#[fixture]
fn ctx() -> Ctx {
    let temp = TempDir::new().unwrap();
    let tree_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/material_tree.json");
    let container = container(&tree_file, temp.path());
    Ctx { temp, container }
}

fn api(ctx: &Ctx) -> NavigatorApi {
    ctx.container.api()
}

#[rstest]
fn given_tree_when_listing_top_then_names_in_order(ctx: Ctx) {
    let top = api(&ctx).list_top_level().unwrap();
    assert_eq!(serde_json::to_value(top).unwrap(), json!(["Beläge", "Mauer", "Treppe"]));
}

#[rstest]
fn given_known_name_when_listing_children_then_found_shape(ctx: Ctx) {
    let response = api(&ctx).list_children(" walzasphalt ").unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "status": "found",
            "material": " walzasphalt ",
            "subcategories": ["AC 11", "AC 16"]
        })
    );
}

#[rstest]
fn given_leaf_when_listing_children_then_found_and_empty(ctx: Ctx) {
    let response = api(&ctx).list_children("Sichtbeton").unwrap();
    assert_eq!(response.status, LookupStatus::Found);
    assert_eq!(response.subcategories, Some(vec![]));
}

#[rstest]
fn given_unknown_name_when_listing_children_then_not_found_shape(ctx: Ctx) {
    let response = api(&ctx).list_children("Glas").unwrap();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"status": "not_found", "material": "Glas"})
    );
}

#[rstest]
fn given_report_request_when_generating_then_content_not_written(ctx: Ctx) {
    let request: ReportRequest =
        serde_json::from_value(json!({"paths": [["A", "B"], ["C"]]})).unwrap();

    let response = api(&ctx).generate_report(&request);

    assert!(response
        .content
        .starts_with("Material Navigator Report - 2024-05-01_14-03-59\n"));
    assert!(response.content.ends_with("1. A > B\n2. C\n"));
    assert_eq!(std::fs::read_dir(ctx.temp.path()).unwrap().count(), 0);
}

#[rstest]
fn given_empty_request_when_generating_then_no_selections(ctx: Ctx) {
    let response = api(&ctx).generate_report(&ReportRequest::default());
    assert!(response.content.ends_with("\n\nNo selections.\n"));
}

#[rstest]
fn given_paths_when_saving_then_same_content_as_generated(ctx: Ctx) {
    let paths = vec![vec!["Treppe".to_string(), "Holz".to_string()]];
    let generated = api(&ctx).generate_report(&ReportRequest {
        paths: paths.clone(),
    });

    let saved = api(&ctx).save_report(&paths).unwrap();

    assert_eq!(saved.text(), generated.content);
    assert!(Path::new(&saved.identifier).is_file());
}

#[rstest]
fn given_api_when_starting_session_then_at_top(ctx: Ctx) {
    let session = api(&ctx).start_session().unwrap();
    assert_eq!(session.options(), ["Beläge", "Mauer", "Treppe"]);
}

#[test]
fn given_missing_tree_when_calling_then_data_source_missing() {
    let temp = TempDir::new().unwrap();
    let container = container(&temp.path().join("nope.json"), temp.path());
    let api = container.api();

    assert!(matches!(
        api.list_top_level(),
        Err(ApplicationError::DataSourceMissing(_))
    ));
    assert!(matches!(
        api.list_children("Beton"),
        Err(ApplicationError::DataSourceMissing(_))
    ));
    // rendering does not need the tree
    assert!(api
        .generate_report(&ReportRequest::default())
        .content
        .contains("No selections."));
}
