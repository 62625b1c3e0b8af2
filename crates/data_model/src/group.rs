use std::{fmt, rc::Rc};

use crate::{
    error::{CatalogError, Result},
    image::ImageBase,
    item::{Item, ItemFields, ItemRef},
    mirror::{BoundedMirror, TOP_ITEMS_CAPACITY},
    observable::{ObservableVec, SequenceEdit},
    record::{Record, RecordCore, RecordFields},
};

/// A titled group owning an ordered item sequence and its self-maintained top-items window.
///
/// Every structural edit goes through the group so the window is patched before any
/// subscriber of the full sequence hears about the change.
#[derive(Debug)]
pub struct Group {
    core: RecordCore,
    items: ObservableVec<ItemRef>,
    top_items: BoundedMirror<ItemRef>,
}

impl Group {
    pub fn new(fields: RecordFields, image_base: &ImageBase) -> Self {
        Self {
            core: RecordCore::new(fields, image_base),
            items: ObservableVec::new(),
            top_items: BoundedMirror::new(TOP_ITEMS_CAPACITY),
        }
    }

    /// The full item sequence. Read and subscribe only; edit through the group.
    pub fn items(&self) -> &ObservableVec<ItemRef> {
        &self.items
    }

    /// The first [`TOP_ITEMS_CAPACITY`] items, kept in step with [`Self::items`].
    pub fn top_items(&self) -> &BoundedMirror<ItemRef> {
        &self.top_items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.core().has_key(key))
    }

    /// Builds an item owned by this group and appends it.
    pub fn create_item(&mut self, fields: ItemFields) -> Result<ItemRef> {
        let item = Rc::new(Item::new(
            fields,
            &self.unique_id(),
            self.core.image_base(),
        )?);
        self.push_item(Rc::clone(&item))?;
        Ok(item)
    }

    pub fn push_item(&mut self, item: ItemRef) -> Result<()> {
        self.adopt(&item);
        self.edit_items(SequenceEdit::Push(item)).map(|_| ())
    }

    pub fn insert_item(&mut self, index: usize, item: ItemRef) -> Result<()> {
        self.adopt(&item);
        self.edit_items(SequenceEdit::Insert(index, item))
            .map(|_| ())
    }

    /// Removes the item at `index` and clears its back-reference.
    pub fn remove_item(&mut self, index: usize) -> Result<ItemRef> {
        let removed = self
            .edit_items(SequenceEdit::Remove(index))?
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?;
        release(&removed);
        Ok(removed)
    }

    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        self.edit_items(SequenceEdit::Move(old_index, new_index))
            .map(|_| ())
    }

    pub fn replace_item(&mut self, index: usize, item: ItemRef) -> Result<ItemRef> {
        self.adopt(&item);
        let replaced = self
            .edit_items(SequenceEdit::Replace(index, Rc::clone(&item)))?
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?;
        if !Rc::ptr_eq(&replaced, &item) {
            release(&replaced);
        }
        Ok(replaced)
    }

    pub fn clear_items(&mut self) -> Result<()> {
        for item in &self.items {
            release(item);
        }
        self.edit_items(SequenceEdit::Clear).map(|_| ())
    }

    pub fn reset_items(&mut self, items: impl IntoIterator<Item = ItemRef>) -> Result<()> {
        let items: Vec<ItemRef> = items.into_iter().collect();
        for item in &self.items {
            release(item);
        }
        for item in &items {
            self.adopt(item);
        }
        self.edit_items(SequenceEdit::Reset(items)).map(|_| ())
    }

    fn adopt(&self, item: &Item) {
        item.set_group_key(&self.unique_id());
    }

    /// Applies `edit` to the full sequence, patches the window, then announces the change.
    fn edit_items(&mut self, edit: SequenceEdit<ItemRef>) -> Result<Option<ItemRef>> {
        let applied = self.items.apply_silently(edit)?;
        self.top_items
            .on_full_changed(self.items.as_slice(), &applied.change)?;
        tracing::debug!(
            group = %self.unique_id(),
            change = ?applied.change,
            items = self.items.len(),
            top_items = self.top_items.len(),
            "group items changed"
        );
        self.items.announce(&applied.change);
        Ok(applied.displaced)
    }
}

fn release(item: &Item) {
    item.set_group_key("");
}

impl Record for Group {
    fn core(&self) -> &RecordCore {
        &self.core
    }

    /// Renames the group and repoints every owned item's back-reference.
    fn set_unique_id(&self, value: &str) -> bool {
        let changed = self.core.set_unique_id(value);
        if changed {
            for item in &self.items {
                item.set_group_key(value);
            }
        }
        changed
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

#[cfg(test)]
#[path = "tests/group_tests.rs"]
mod tests;
