//! Tests for name lookup over the fixture taxonomy

use std::path::Path;
use std::sync::Arc;

use rstest::{fixture, rstest};

use matnav::application::services::TreeStore;
use matnav::domain::{CategoryTree, SearchOutcome};
use matnav::infrastructure::traits::RealFileSystem;

#[fixture]
fn tree() -> Arc<CategoryTree> {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/material_tree.json");
    TreeStore::new(Arc::new(RealFileSystem), source)
        .load()
        .expect("fixture tree loads")
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[rstest]
fn given_top_level_name_when_searching_then_direct_children(tree: Arc<CategoryTree>) {
    assert_eq!(
        tree.find_children("Beläge"),
        SearchOutcome::Found {
            children: names(&["Asphalt", "Beton", "Platten", "Naturstein"])
        }
    );
}

#[rstest]
fn given_nested_name_when_searching_then_direct_children(tree: Arc<CategoryTree>) {
    assert_eq!(
        tree.find_children("Walzasphalt"),
        SearchOutcome::Found {
            children: names(&["AC 11", "AC 16"])
        }
    );
}

#[rstest]
fn given_leaf_name_when_searching_then_found_leaf(tree: Arc<CategoryTree>) {
    assert_eq!(tree.find_children("gestrahlt"), SearchOutcome::FoundLeaf);
}

#[rstest]
fn given_unknown_name_when_searching_then_not_found(tree: Arc<CategoryTree>) {
    assert_eq!(tree.find_children("Stahlbeton"), SearchOutcome::NotFound);
}

#[rstest]
#[case("Beton")]
#[case("beton")]
#[case("  beton ")]
#[case("BETON\t")]
fn given_case_or_whitespace_variant_when_searching_then_same_as_exact(
    tree: Arc<CategoryTree>,
    #[case] query: &str,
) {
    assert_eq!(tree.find_children(query), tree.find_children("Beton"));
}

#[rstest]
fn given_name_in_two_branches_when_searching_then_first_pre_order_wins(tree: Arc<CategoryTree>) {
    // "Beton" exists below "Beläge" and below "Mauer"; the earlier branch wins
    assert_eq!(
        tree.find_children("Beton"),
        SearchOutcome::Found {
            children: names(&["gestrahlt", "geschliffen"])
        }
    );
    let idx = tree.find("Beton").unwrap();
    assert_eq!(tree.path_to(idx), names(&["Beläge", "Beton"]));
}

#[rstest]
fn given_leaf_name_in_two_branches_when_searching_then_first_wins(
    tree: Arc<CategoryTree>,
) {
    // "Naturstein" is a leaf both below "Beläge" and "Treppe"
    assert_eq!(tree.find_children("Naturstein"), SearchOutcome::FoundLeaf);
}
