use std::rc::Rc;

use data_model::{
    Catalog, Group, ImageBase, Item, ItemFields, ItemRef, Property, Record, RecordFields,
    DEFAULT_IMAGE_BASE, TOP_ITEMS_CAPACITY,
};

fn base() -> ImageBase {
    ImageBase::parse(DEFAULT_IMAGE_BASE).expect("base")
}

fn group_of_len(len: usize) -> Group {
    let mut group = Group::new(RecordFields::new("Group-1", "Forex Basics"), &base());
    for n in 0..len {
        group
            .create_item(ItemFields::new(RecordFields::new(format!("item-{n}"), "tile")))
            .expect("item");
    }
    group
}

fn top_keys(group: &Group) -> Vec<String> {
    group
        .top_items()
        .iter()
        .map(|item| item.unique_id())
        .collect()
}

fn loose(key: &str) -> ItemRef {
    Rc::new(Item::new(ItemFields::new(RecordFields::new(key, key)), "", &base()).expect("item"))
}

#[test]
fn thirteenth_item_does_not_enter_window() {
    let mut group = group_of_len(12);
    let before = top_keys(&group);

    group.push_item(loose("thirteen")).expect("push");

    assert_eq!(group.top_items().len(), TOP_ITEMS_CAPACITY);
    assert_eq!(top_keys(&group), before);
}

#[test]
fn removing_inside_exactly_full_window_shrinks_it() {
    let mut group = group_of_len(12);
    group.remove_item(5).expect("remove");

    assert_eq!(group.top_items().len(), 11);
    assert!(!top_keys(&group).contains(&"item-5".to_string()));
}

#[test]
fn removing_inside_window_of_longer_group_pulls_next_item_in() {
    let mut group = group_of_len(20);
    group.remove_item(5).expect("remove");

    assert_eq!(group.top_items().len(), TOP_ITEMS_CAPACITY);
    assert_eq!(group.top_items().as_slice()[11].unique_id(), "item-12");
}

#[test]
fn reset_twice_matches_reset_once() {
    let mut group = group_of_len(20);
    let items: Vec<ItemRef> = group.items().iter().rev().cloned().collect();

    group.reset_items(items.clone()).expect("reset");
    let once = top_keys(&group);
    group.reset_items(items).expect("reset");

    assert_eq!(top_keys(&group), once);
    assert_eq!(once.first().map(String::as_str), Some("item-19"));
}

#[test]
fn field_edits_through_catalog_notify_once() {
    let catalog = Catalog::sample(base()).expect("sample");
    let item = catalog.find_item("Big-Group-1-Item3").expect("item");

    let hits = Rc::new(std::cell::Cell::new(0));
    let counter = Rc::clone(&hits);
    item.subscribe(Property::Description, move |_| counter.set(counter.get() + 1));

    let current = item.description();
    assert!(!item.set_description(&current));
    assert!(item.set_description("Robots, briefly."));
    assert!(!item.set_description("Robots, briefly."));

    assert_eq!(hits.get(), 1);
    let top = &catalog.find_group("Group-1").expect("group").top_items().as_slice()[2];
    assert_eq!(top.description(), "Robots, briefly.");
}
