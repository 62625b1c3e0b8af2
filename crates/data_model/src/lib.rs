//! Observable catalog of grouped items for grid-style views.
//!
//! A [`Catalog`] owns [`Group`]s; each group owns an ordered item sequence and a
//! [`BoundedMirror`] of its first [`TOP_ITEMS_CAPACITY`] items that is patched
//! incrementally on every structural edit. Records announce individual field changes
//! through an embedded [`PropertyNotifier`].

pub mod catalog;
pub mod error;
pub mod group;
pub mod image;
pub mod item;
pub mod mirror;
pub mod notify;
pub mod observable;
pub mod record;
pub mod seed;

pub use catalog::{Catalog, CatalogSnapshot, GroupSnapshot, ItemSnapshot, ALL_GROUPS};
pub use error::{CatalogError, ErrorCode, Result};
pub use group::Group;
pub use image::{ImageBase, ImageRef, DEFAULT_IMAGE_BASE};
pub use item::{Item, ItemFields, ItemRef};
pub use mirror::{BoundedMirror, TOP_ITEMS_CAPACITY};
pub use notify::{Property, PropertyNotifier, SubscriptionId, Subscribers};
pub use observable::{Applied, CollectionChange, ObservableVec, SequenceEdit};
pub use record::{Record, RecordCore, RecordFields};
pub use seed::{CatalogSeed, GroupSeed, SAMPLE_SEED};
