//! Lazy image references resolved against a base location.

use std::cell::RefCell;

use serde::Serialize;
use url::Url;

use crate::error::{CatalogError, Result};

pub const DEFAULT_IMAGE_BASE: &str = "app:///";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(Url);

impl ImageRef {
    pub fn new(uri: Url) -> Self {
        Self(uri)
    }

    pub fn uri(&self) -> &Url {
        &self.0
    }
}

/// Absolute location that relative image paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBase(Url);

impl ImageBase {
    pub fn parse(base: &str) -> Result<Self> {
        Url::parse(base)
            .map(Self)
            .map_err(|source| CatalogError::InvalidImageBase {
                base: base.to_string(),
                source,
            })
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn resolve(&self, path: &str) -> Option<ImageRef> {
        match self.0.join(path) {
            Ok(uri) => Some(ImageRef(uri)),
            Err(err) => {
                tracing::warn!(base = %self.0, path, error = %err, "unresolvable image path");
                None
            }
        }
    }
}

/// An image that is either supplied directly or resolved from a path on first access.
#[derive(Debug)]
pub(crate) struct ImageSlot {
    base: ImageBase,
    path: RefCell<Option<String>>,
    cached: RefCell<Option<ImageRef>>,
}

impl ImageSlot {
    pub(crate) fn new(base: ImageBase, path: Option<String>) -> Self {
        Self {
            base,
            path: RefCell::new(path),
            cached: RefCell::new(None),
        }
    }

    pub(crate) fn base(&self) -> &ImageBase {
        &self.base
    }

    pub(crate) fn path(&self) -> Option<String> {
        self.path.borrow().clone()
    }

    #[cfg(test)]
    pub(crate) fn is_resolved(&self) -> bool {
        self.cached.borrow().is_some()
    }

    pub(crate) fn get(&self) -> Option<ImageRef> {
        let mut cached = self.cached.borrow_mut();
        if cached.is_none() {
            if let Some(path) = self.path.borrow().as_deref() {
                *cached = self.base.resolve(path);
            }
        }
        cached.clone()
    }

    /// Drops any cached image; the new path is resolved on next access.
    pub(crate) fn set_path(&self, path: String) {
        *self.cached.borrow_mut() = None;
        *self.path.borrow_mut() = Some(path);
    }

    /// Replaces the image directly. Returns whether the stored image changed.
    /// A pending path counts as a different image even before it is resolved.
    pub(crate) fn set_image(&self, image: Option<ImageRef>) -> bool {
        let had_path = self.path.borrow_mut().take().is_some();
        let mut cached = self.cached.borrow_mut();
        if *cached == image {
            return had_path;
        }
        *cached = image;
        true
    }
}
