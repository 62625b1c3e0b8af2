use std::{cell::RefCell, fmt, rc::Rc};

use serde::Deserialize;

use crate::{
    error::{CatalogError, Result},
    image::ImageBase,
    notify::Property,
    record::{Record, RecordCore, RecordFields},
};

/// Items are shared between a group's full sequence and its top-items window.
pub type ItemRef = Rc<Item>;

fn default_span() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemFields {
    #[serde(flatten)]
    pub record: RecordFields,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_span")]
    pub col_span: u32,
    #[serde(default = "default_span")]
    pub row_span: u32,
}

impl ItemFields {
    pub fn new(record: RecordFields) -> Self {
        Self {
            record,
            content: String::new(),
            col_span: default_span(),
            row_span: default_span(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn spans(mut self, col_span: u32, row_span: u32) -> Self {
        self.col_span = col_span;
        self.row_span = row_span;
        self
    }
}

#[derive(Debug)]
pub struct Item {
    core: RecordCore,
    content: RefCell<String>,
    col_span: RefCell<u32>,
    row_span: RefCell<u32>,
    /// Key of the owning group. Lookup only; the group owns the item, not the other way round.
    group: RefCell<String>,
}

impl Item {
    pub fn new(fields: ItemFields, group_key: &str, image_base: &ImageBase) -> Result<Self> {
        let col_span = positive_span("col_span", fields.col_span)?;
        let row_span = positive_span("row_span", fields.row_span)?;
        Ok(Self {
            core: RecordCore::new(fields.record, image_base),
            content: RefCell::new(fields.content),
            col_span: RefCell::new(col_span),
            row_span: RefCell::new(row_span),
            group: RefCell::new(group_key.to_string()),
        })
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    pub fn set_content(&self, value: &str) -> bool {
        self.core
            .notifier()
            .set_if_changed(&self.content, value.to_string(), Property::Content)
    }

    pub fn col_span(&self) -> u32 {
        *self.col_span.borrow()
    }

    pub fn set_col_span(&self, value: u32) -> Result<bool> {
        let value = positive_span("col_span", value)?;
        Ok(self
            .core
            .notifier()
            .set_if_changed(&self.col_span, value, Property::ColSpan))
    }

    pub fn row_span(&self) -> u32 {
        *self.row_span.borrow()
    }

    pub fn set_row_span(&self, value: u32) -> Result<bool> {
        let value = positive_span("row_span", value)?;
        Ok(self
            .core
            .notifier()
            .set_if_changed(&self.row_span, value, Property::RowSpan))
    }

    pub fn group_key(&self) -> String {
        self.group.borrow().clone()
    }

    pub fn set_group_key(&self, key: &str) -> bool {
        self.core
            .notifier()
            .set_if_changed(&self.group, key.to_string(), Property::Group)
    }
}

impl Record for Item {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

fn positive_span(field: &'static str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(CatalogError::InvalidSpan { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::image::DEFAULT_IMAGE_BASE;

    fn item() -> Item {
        let base = ImageBase::parse(DEFAULT_IMAGE_BASE).expect("base");
        let fields = ItemFields::new(
            RecordFields::new("Small-Group-1-Item2", "Significance of Forex Robots")
                .image("Assets/12.jpg"),
        )
        .spans(53, 49);
        Item::new(fields, "Group-1", &base).expect("item")
    }

    #[test]
    fn notifies_once_per_distinct_value() {
        let item = item();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        item.subscribe(Property::Title, move |_| counter.set(counter.get() + 1));

        assert!(item.set_title("Robots"));
        assert!(!item.set_title("Robots"));
        assert!(!item.set_subtitle(""));

        assert_eq!(hits.get(), 1);
        assert_eq!(item.title(), "Robots");
        assert_eq!(item.to_string(), "Robots");
    }

    #[test]
    fn span_setters_reject_zero() {
        let item = item();
        let err = item.set_row_span(0).expect_err("zero span");
        assert!(matches!(
            err,
            CatalogError::InvalidSpan {
                field: "row_span",
                value: 0
            }
        ));
        assert_eq!(item.row_span(), 49);
        assert!(!item.set_col_span(53).expect("same span"));
        assert!(item.set_col_span(79).expect("wide span"));
    }

    #[test]
    fn zero_span_fails_construction() {
        let base = ImageBase::parse(DEFAULT_IMAGE_BASE).expect("base");
        let fields = ItemFields::new(RecordFields::new("x", "x")).spans(0, 1);
        assert!(Item::new(fields, "g", &base).is_err());
    }

    #[test]
    fn image_path_change_always_announces() {
        let item = item();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        item.subscribe_all(move |property| sink.borrow_mut().push(property));

        assert_eq!(
            item.image().expect("image").uri().as_str(),
            "app:///Assets/12.jpg"
        );
        item.set_image_path("Assets/13.jpg");
        assert!(item.image().is_some());
        assert!(item.set_image(None));
        assert!(!item.set_image(None));

        assert_eq!(*seen.borrow(), vec![Property::Image, Property::Image]);
        assert_eq!(item.image(), None);
    }

    #[test]
    fn clearing_unread_image_announces() {
        let item = item();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        item.subscribe(Property::Image, move |_| counter.set(counter.get() + 1));

        assert!(item.set_image(None));
        assert_eq!(hits.get(), 1);
        assert_eq!(item.image(), None);
        assert_eq!(item.image_path(), None);
    }
}
