use super::*;

use std::rc::Rc;

use crate::{image::DEFAULT_IMAGE_BASE, item::ItemFields, mirror::TOP_ITEMS_CAPACITY};

fn sample() -> Catalog {
    Catalog::sample(ImageBase::parse(DEFAULT_IMAGE_BASE).expect("base")).expect("sample")
}

#[test]
fn lists_all_groups_only() {
    let catalog = sample();
    let groups = catalog.list_groups(ALL_GROUPS).expect("groups");
    assert_eq!(groups.len(), 2);

    let err = catalog.list_groups("SomeGroups").expect_err("unsupported");
    assert!(matches!(err, CatalogError::UnsupportedCollection(ref name) if name == "SomeGroups"));
    assert_eq!(err.code(), crate::error::ErrorCode::InvalidArgument);
}

#[test]
fn finds_groups_and_items_by_key() {
    let catalog = sample();

    let group = catalog.find_group("Group-2").expect("group");
    assert_eq!(group.title(), "Benefits of Forex Trading");
    assert!(catalog.find_group("Group-3").is_none());

    let item = catalog.find_item("Small-Group-2-Item6").expect("item");
    assert_eq!(item.title(), "Tips for escalating forex profits");
    assert_eq!(
        catalog.group_of(&item).map(|group| group.unique_id()),
        Some("Group-2".to_string())
    );
    assert!(catalog.find_item("Small-Group-2-Item7").is_none());
}

#[test]
fn sample_items_resolve_images_against_base() {
    let catalog = Catalog::sample(ImageBase::parse("https://tiles.example.com/app/").expect("base"))
        .expect("sample");
    let item = catalog.find_item("Big-Group-1-Item1").expect("item");
    assert_eq!(
        item.image().expect("image").uri().as_str(),
        "https://tiles.example.com/app/Assets/11.jpg"
    );
}

#[test]
fn duplicate_keys_are_treated_as_absent() {
    let mut catalog = sample();
    catalog.create_group(RecordFields::new("Group-1", "Impostor"));
    catalog
        .find_group_mut("Group-2")
        .expect("group")
        .create_item(ItemFields::new(RecordFields::new("Big-Group-1-Item1", "Twin")))
        .expect("item");

    assert!(catalog.find_group("Group-1").is_none());
    assert!(catalog.find_group_mut("Group-1").is_none());
    assert!(catalog.find_item("Big-Group-1-Item1").is_none());
}

#[test]
fn runtime_mutation_keeps_top_items_bounded() {
    let mut catalog = sample();
    let group = catalog.find_group_mut("Group-1").expect("group");
    for n in 0..10 {
        group
            .create_item(ItemFields::new(RecordFields::new(format!("Extra-{n}"), "extra")))
            .expect("item");
    }

    let group = catalog.find_group("Group-1").expect("group");
    assert_eq!(group.item_count(), 16);
    assert_eq!(group.top_items().len(), TOP_ITEMS_CAPACITY);
    assert_eq!(group.top_items().as_slice()[11].unique_id(), "Extra-5");
}

#[test]
fn removes_groups() {
    let mut catalog = sample();
    let removed = catalog.remove_group("Group-1").expect("removed");
    assert_eq!(removed.unique_id(), "Group-1");
    assert!(catalog.remove_group("Group-1").is_none());
    assert!(catalog.find_item("Big-Group-1-Item1").is_none());
    assert_eq!(catalog.groups().len(), 1);

    let orphan = Rc::clone(&removed.items().as_slice()[0]);
    assert!(catalog.group_of(&orphan).is_none());
}

#[test]
fn snapshot_serializes_top_items_by_key() {
    let catalog = sample();
    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.groups[0].top_items.len(), 6);
    assert_eq!(snapshot.groups[0].items[1].col_span, 53);

    let json = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(json["groups"][1]["id"], "Group-2");
    assert_eq!(json["groups"][0]["image"], "app:///Assets/10.jpg");
    assert_eq!(json["groups"][0]["items"][0]["group"], "Group-1");
}
