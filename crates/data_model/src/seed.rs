//! TOML seed documents used to populate a catalog.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{error::Result, item::ItemFields, record::RecordFields};

/// Placeholder catalog shipped with the crate.
pub const SAMPLE_SEED: &str = include_str!("../data/sample_catalog.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupSeed {
    #[serde(flatten)]
    pub record: RecordFields,
    #[serde(default)]
    pub items: Vec<ItemFields>,
}

impl CatalogSeed {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn sample() -> Result<Self> {
        Self::from_toml_str(SAMPLE_SEED)
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }
}
