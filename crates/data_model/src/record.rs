//! Fields and change notification shared by items and groups.

use std::cell::RefCell;

use serde::Deserialize;

use crate::{
    image::{ImageBase, ImageRef, ImageSlot},
    notify::{Property, PropertyNotifier, SubscriptionId},
};

/// Descriptive fields every record is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordFields {
    #[serde(rename = "id")]
    pub unique_id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, rename = "image")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl RecordFields {
    pub fn new(unique_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug)]
pub struct RecordCore {
    unique_id: RefCell<String>,
    title: RefCell<String>,
    subtitle: RefCell<String>,
    description: RefCell<String>,
    image: ImageSlot,
    notifier: PropertyNotifier,
}

impl RecordCore {
    pub fn new(fields: RecordFields, image_base: &ImageBase) -> Self {
        Self {
            unique_id: RefCell::new(fields.unique_id),
            title: RefCell::new(fields.title),
            subtitle: RefCell::new(fields.subtitle),
            description: RefCell::new(fields.description),
            image: ImageSlot::new(image_base.clone(), fields.image_path),
            notifier: PropertyNotifier::default(),
        }
    }

    pub fn notifier(&self) -> &PropertyNotifier {
        &self.notifier
    }

    pub fn image_base(&self) -> &ImageBase {
        self.image.base()
    }

    pub fn has_key(&self, key: &str) -> bool {
        *self.unique_id.borrow() == key
    }

    pub fn set_unique_id(&self, value: &str) -> bool {
        self.notifier
            .set_if_changed(&self.unique_id, value.to_string(), Property::UniqueId)
    }
}

/// Observable accessors for anything built on a [`RecordCore`].
pub trait Record {
    fn core(&self) -> &RecordCore;

    fn unique_id(&self) -> String {
        self.core().unique_id.borrow().clone()
    }

    fn set_unique_id(&self, value: &str) -> bool {
        self.core().set_unique_id(value)
    }

    fn title(&self) -> String {
        self.core().title.borrow().clone()
    }

    fn set_title(&self, value: &str) -> bool {
        let core = self.core();
        core.notifier
            .set_if_changed(&core.title, value.to_string(), Property::Title)
    }

    fn subtitle(&self) -> String {
        self.core().subtitle.borrow().clone()
    }

    fn set_subtitle(&self, value: &str) -> bool {
        let core = self.core();
        core.notifier
            .set_if_changed(&core.subtitle, value.to_string(), Property::Subtitle)
    }

    fn description(&self) -> String {
        self.core().description.borrow().clone()
    }

    fn set_description(&self, value: &str) -> bool {
        let core = self.core();
        core.notifier
            .set_if_changed(&core.description, value.to_string(), Property::Description)
    }

    /// The image, resolving and caching the pending path on first access.
    fn image(&self) -> Option<ImageRef> {
        self.core().image.get()
    }

    fn image_path(&self) -> Option<String> {
        self.core().image.path()
    }

    /// Supplies the image directly, discarding any pending path.
    fn set_image(&self, image: Option<ImageRef>) -> bool {
        let core = self.core();
        let changed = core.image.set_image(image);
        if changed {
            core.notifier.notify(Property::Image);
        }
        changed
    }

    /// Points the image at a new path; always announces `Image`.
    fn set_image_path(&self, path: &str) {
        let core = self.core();
        core.image.set_path(path.to_string());
        core.notifier.notify(Property::Image);
    }

    fn subscribe(
        &self,
        property: Property,
        callback: impl Fn(Property) + 'static,
    ) -> SubscriptionId
    where
        Self: Sized,
    {
        self.core().notifier.subscribe(property, callback)
    }

    fn subscribe_all(&self, callback: impl Fn(Property) + 'static) -> SubscriptionId
    where
        Self: Sized,
    {
        self.core().notifier.subscribe_all(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.core().notifier.unsubscribe(id)
    }
}
