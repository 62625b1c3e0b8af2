use serde::Serialize;

use crate::{
    error::{CatalogError, Result},
    group::Group,
    image::{ImageBase, ImageRef},
    item::{Item, ItemRef},
    observable::ObservableVec,
    record::{Record, RecordFields},
    seed::CatalogSeed,
};

/// The only named collection of groups a catalog serves.
pub const ALL_GROUPS: &str = "AllGroups";

/// Top-level owner of every group. Lookups are linear; catalogs are small.
#[derive(Debug)]
pub struct Catalog {
    image_base: ImageBase,
    groups: ObservableVec<Group>,
}

impl Catalog {
    pub fn new(image_base: ImageBase) -> Self {
        Self {
            image_base,
            groups: ObservableVec::new(),
        }
    }

    pub fn from_seed(seed: &CatalogSeed, image_base: ImageBase) -> Result<Self> {
        let mut catalog = Self::new(image_base);
        for group_seed in &seed.groups {
            let group = catalog.create_group(group_seed.record.clone());
            for item in &group_seed.items {
                group.create_item(item.clone())?;
            }
        }
        tracing::debug!(
            groups = catalog.groups.len(),
            items = seed.item_count(),
            "catalog populated from seed"
        );
        Ok(catalog)
    }

    pub fn sample(image_base: ImageBase) -> Result<Self> {
        Self::from_seed(&CatalogSeed::sample()?, image_base)
    }

    pub fn image_base(&self) -> &ImageBase {
        &self.image_base
    }

    pub fn groups(&self) -> &ObservableVec<Group> {
        &self.groups
    }

    /// Groups of the named collection; only [`ALL_GROUPS`] exists.
    pub fn list_groups(&self, collection: &str) -> Result<&[Group]> {
        if collection != ALL_GROUPS {
            return Err(CatalogError::UnsupportedCollection(collection.to_string()));
        }
        Ok(self.groups.as_slice())
    }

    /// The group with `key`, or `None` when zero or several groups carry it.
    pub fn find_group(&self, key: &str) -> Option<&Group> {
        single(self.groups.iter().filter(|group| group.core().has_key(key)))
    }

    pub fn find_group_mut(&mut self, key: &str) -> Option<&mut Group> {
        let index = single(
            self.groups
                .iter()
                .enumerate()
                .filter(|(_, group)| group.core().has_key(key))
                .map(|(index, _)| index),
        )?;
        self.groups.get_mut(index)
    }

    /// The item with `key` across all groups, or `None` when zero or several items carry it.
    pub fn find_item(&self, key: &str) -> Option<ItemRef> {
        single(
            self.groups
                .iter()
                .flat_map(|group| group.items().iter())
                .filter(|item| item.core().has_key(key)),
        )
        .cloned()
    }

    /// Follows an item's back-reference to the group that owns it.
    pub fn group_of(&self, item: &Item) -> Option<&Group> {
        self.find_group(&item.group_key())
    }

    pub fn create_group(&mut self, fields: RecordFields) -> &mut Group {
        let group = Group::new(fields, &self.image_base);
        self.add_group(group)
    }

    pub fn add_group(&mut self, group: Group) -> &mut Group {
        tracing::debug!(group = %group.unique_id(), "group added");
        self.groups.push(group)
    }

    pub fn remove_group(&mut self, key: &str) -> Option<Group> {
        let index = self
            .groups
            .iter()
            .position(|group| group.core().has_key(key))?;
        let removed = self.groups.remove(index).ok()?;
        tracing::debug!(group = key, "group removed");
        Some(removed)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            groups: self.groups.iter().map(GroupSnapshot::of).collect(),
        }
    }
}

fn single<I: Iterator>(mut matches: I) -> Option<I::Item> {
    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub groups: Vec<GroupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub items: Vec<ItemSnapshot>,
    pub top_items: Vec<String>,
}

impl GroupSnapshot {
    fn of(group: &Group) -> Self {
        Self {
            id: group.unique_id(),
            title: group.title(),
            subtitle: group.subtitle(),
            description: group.description(),
            image: group.image(),
            items: group.items().iter().map(|item| ItemSnapshot::of(item)).collect(),
            top_items: group
                .top_items()
                .iter()
                .map(|item| item.unique_id())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSnapshot {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub content: String,
    pub col_span: u32,
    pub row_span: u32,
    pub group: String,
}

impl ItemSnapshot {
    fn of(item: &Item) -> Self {
        Self {
            id: item.unique_id(),
            title: item.title(),
            subtitle: item.subtitle(),
            description: item.description(),
            image: item.image(),
            content: item.content(),
            col_span: item.col_span(),
            row_span: item.row_span(),
            group: item.group_key(),
        }
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
