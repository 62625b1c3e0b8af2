use super::*;

use std::cell::RefCell;

use crate::{image::DEFAULT_IMAGE_BASE, observable::CollectionChange};

fn base() -> ImageBase {
    ImageBase::parse(DEFAULT_IMAGE_BASE).expect("base")
}

fn group_with(keys: &[&str]) -> Group {
    let mut group = Group::new(RecordFields::new("Group-1", "Forex Basics"), &base());
    for key in keys {
        group
            .create_item(ItemFields::new(RecordFields::new(*key, *key)))
            .expect("item");
    }
    group
}

fn loose_item(key: &str) -> ItemRef {
    Rc::new(Item::new(ItemFields::new(RecordFields::new(key, key)), "", &base()).expect("item"))
}

fn keys(items: &[ItemRef]) -> Vec<String> {
    items.iter().map(|item| item.unique_id()).collect()
}

#[test]
fn walkthrough_keeps_window_in_step() {
    let mut group = group_with(&["A", "B", "C"]);
    assert_eq!(keys(group.top_items().as_slice()), ["A", "B", "C"]);

    group.insert_item(1, loose_item("D")).expect("insert");
    assert_eq!(keys(group.top_items().as_slice()), ["A", "D", "B", "C"]);

    group.move_item(3, 0).expect("move");
    assert_eq!(keys(group.top_items().as_slice()), ["C", "A", "D", "B"]);

    let removed = group.remove_item(2).expect("remove");
    assert_eq!(removed.unique_id(), "D");
    assert_eq!(keys(group.top_items().as_slice()), ["C", "A", "B"]);
}

#[test]
fn window_shares_items_with_full_sequence() {
    let group = group_with(&["A"]);
    let full = &group.items().as_slice()[0];
    let top = &group.top_items().as_slice()[0];

    assert!(Rc::ptr_eq(full, top));
    top.set_title("renamed");
    assert_eq!(full.title(), "renamed");
}

#[test]
fn items_leaving_the_group_drop_their_back_reference() {
    let mut group = group_with(&["A", "B", "C", "D"]);
    let kept = Rc::clone(&group.items().as_slice()[3]);

    let removed = group.remove_item(0).expect("remove");
    assert_eq!(removed.group_key(), "");

    let replaced = group.replace_item(0, loose_item("E")).expect("replace");
    assert_eq!(replaced.unique_id(), "B");
    assert_eq!(replaced.group_key(), "");
    assert_eq!(group.items().as_slice()[0].group_key(), "Group-1");

    let same = Rc::clone(&group.items().as_slice()[0]);
    group.replace_item(0, Rc::clone(&same)).expect("replace in place");
    assert_eq!(same.group_key(), "Group-1");

    let dropped = Rc::clone(&group.items().as_slice()[1]);
    group.reset_items([Rc::clone(&kept)]).expect("reset");
    assert_eq!(dropped.group_key(), "");
    assert_eq!(kept.group_key(), "Group-1");

    group.clear_items().expect("clear");
    assert_eq!(kept.group_key(), "");
}

#[test]
fn adopted_items_point_back_at_group() {
    let mut group = group_with(&["A"]);
    let stray = loose_item("B");
    assert_eq!(stray.group_key(), "");

    group.push_item(Rc::clone(&stray)).expect("push");
    assert_eq!(stray.group_key(), "Group-1");

    group.set_unique_id("Group-9");
    assert!(group
        .items()
        .iter()
        .all(|item| item.group_key() == "Group-9"));
}

#[test]
fn window_is_patched_before_full_subscribers_hear() {
    let mut group = group_with(&[]);
    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    group
        .items()
        .subscribe(move |change| sink.borrow_mut().push(("full", *change)));
    let sink = Rc::clone(&log);
    group
        .top_items()
        .subscribe(move |change| sink.borrow_mut().push(("top", *change)));

    group.push_item(loose_item("A")).expect("push");

    assert_eq!(
        *log.borrow(),
        vec![
            ("top", CollectionChange::Insert { new_index: 0 }),
            ("full", CollectionChange::Insert { new_index: 0 }),
        ]
    );
}

#[test]
fn replace_and_reset_flow_through() {
    let mut group = group_with(&["A", "B"]);

    let old = group.replace_item(1, loose_item("Z")).expect("replace");
    assert_eq!(old.unique_id(), "B");
    assert_eq!(keys(group.top_items().as_slice()), ["A", "Z"]);

    let many: Vec<ItemRef> = (0..15).map(|n| loose_item(&format!("I{n}"))).collect();
    group.reset_items(many).expect("reset");
    assert_eq!(group.top_items().len(), TOP_ITEMS_CAPACITY);
    assert_eq!(group.top_items().as_slice()[11].unique_id(), "I11");

    group.clear_items().expect("clear");
    assert!(group.top_items().is_empty());
}

#[test]
fn invalid_index_is_reported_and_ignored() {
    let mut group = group_with(&["A"]);
    let err = group.remove_item(4).expect_err("remove past end");
    assert!(matches!(
        err,
        CatalogError::IndexOutOfRange { index: 4, len: 1 }
    ));
    assert_eq!(keys(group.top_items().as_slice()), ["A"]);
    assert_eq!(group.position_of("A"), Some(0));
    assert_eq!(group.position_of("missing"), None);
}
