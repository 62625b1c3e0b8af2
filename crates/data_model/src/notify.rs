//! Observer plumbing shared by records and observable sequences.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<E> = Rc<dyn Fn(&E)>;

/// A list of callbacks fired synchronously, in subscription order, on every emit.
pub struct Subscribers<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(SubscriptionId, Callback<E>)>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}

impl<E> Subscribers<E> {
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn emit(&self, event: &E) {
        // Callbacks may (un)subscribe while we iterate.
        let snapshot: Vec<Callback<E>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }
}

/// Observable fields of items and groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    UniqueId,
    Title,
    Subtitle,
    Description,
    Image,
    Content,
    ColSpan,
    RowSpan,
    Group,
}

impl Property {
    /// Binding name used by rendering layers.
    pub fn name(self) -> &'static str {
        match self {
            Self::UniqueId => "UniqueId",
            Self::Title => "Title",
            Self::Subtitle => "Subtitle",
            Self::Description => "Description",
            Self::Image => "Image",
            Self::Content => "Content",
            Self::ColSpan => "ColSpan",
            Self::RowSpan => "RowSpan",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-record change notifier, embedded by composition in every record type.
#[derive(Debug, Default)]
pub struct PropertyNotifier {
    subscribers: Subscribers<Property>,
}

impl PropertyNotifier {
    pub fn subscribe(
        &self,
        property: Property,
        callback: impl Fn(Property) + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(move |changed: &Property| {
            if *changed == property {
                callback(*changed);
            }
        })
    }

    pub fn subscribe_all(&self, callback: impl Fn(Property) + 'static) -> SubscriptionId {
        self.subscribers
            .subscribe(move |changed: &Property| callback(*changed))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn notify(&self, property: Property) {
        tracing::trace!(property = property.name(), "property changed");
        self.subscribers.emit(&property);
    }

    /// Stores `value` and notifies `property` only when it differs from the current value.
    pub fn set_if_changed<T: PartialEq>(
        &self,
        slot: &RefCell<T>,
        value: T,
        property: Property,
    ) -> bool {
        {
            let mut current = slot.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify(property);
        true
    }
}
