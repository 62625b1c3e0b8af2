//! Ordered sequences that announce every structural mutation.

use crate::{
    error::{CatalogError, Result},
    notify::{SubscriptionId, Subscribers},
};

/// Structural change of an ordered sequence, reported after it has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Insert { new_index: usize },
    Remove { old_index: usize },
    Move { old_index: usize, new_index: usize },
    Replace { index: usize },
    Reset,
}

/// A structural edit to apply to an [`ObservableVec`].
#[derive(Debug, Clone)]
pub enum SequenceEdit<T> {
    Push(T),
    Insert(usize, T),
    Remove(usize),
    /// Removes the element at the first index and reinserts it at the second.
    Move(usize, usize),
    Replace(usize, T),
    Clear,
    Reset(Vec<T>),
}

/// Outcome of an applied edit: the change to announce and any element that left the sequence.
#[derive(Debug)]
pub struct Applied<T> {
    pub change: CollectionChange,
    pub displaced: Option<T>,
}

pub struct ObservableVec<T> {
    items: Vec<T>,
    changes: Subscribers<CollectionChange>,
}

impl<T> Default for ObservableVec<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            changes: Subscribers::default(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableVec")
            .field("items", &self.items)
            .field("subscribers", &self.changes.len())
            .finish()
    }
}

impl<T> ObservableVec<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to an element's contents; not a structural change, nothing is announced.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn subscribe(&self, callback: impl Fn(&CollectionChange) + 'static) -> SubscriptionId {
        self.changes.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    /// Appends `value`, announces it, and hands back the stored element.
    pub fn push(&mut self, value: T) -> &mut T {
        let index = self.items.len();
        self.items.push(value);
        self.announce(&CollectionChange::Insert { new_index: index });
        &mut self.items[index]
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.apply(SequenceEdit::Insert(index, value)).map(|_| ())
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.apply(SequenceEdit::Remove(index))
            .and_then(|applied| displaced(applied, index))
    }

    pub fn pop(&mut self) -> Option<T> {
        let last = self.items.len().checked_sub(1)?;
        self.remove(last).ok()
    }

    pub fn move_item(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        self.apply(SequenceEdit::Move(old_index, new_index))
            .map(|_| ())
    }

    pub fn replace(&mut self, index: usize, value: T) -> Result<T> {
        self.apply(SequenceEdit::Replace(index, value))
            .and_then(|applied| displaced(applied, index))
    }

    pub fn clear(&mut self) {
        if let Ok(applied) = self.apply_silently(SequenceEdit::Clear) {
            self.announce(&applied.change);
        }
    }

    pub fn reset_with(&mut self, values: impl IntoIterator<Item = T>) {
        let values = values.into_iter().collect();
        if let Ok(applied) = self.apply_silently(SequenceEdit::Reset(values)) {
            self.announce(&applied.change);
        }
    }

    /// Applies `edit` and announces it to subscribers.
    pub fn apply(&mut self, edit: SequenceEdit<T>) -> Result<Applied<T>> {
        let applied = self.apply_silently(edit)?;
        self.announce(&applied.change);
        Ok(applied)
    }

    /// Applies `edit` without announcing it; the caller must follow up with [`Self::announce`].
    ///
    /// Indices are validated before anything is touched, so a rejected edit leaves the
    /// sequence unchanged.
    pub fn apply_silently(&mut self, edit: SequenceEdit<T>) -> Result<Applied<T>> {
        let len = self.items.len();
        let applied = match edit {
            SequenceEdit::Push(value) => {
                self.items.push(value);
                Applied {
                    change: CollectionChange::Insert { new_index: len },
                    displaced: None,
                }
            }
            SequenceEdit::Insert(index, value) => {
                if index > len {
                    return Err(CatalogError::IndexOutOfRange { index, len });
                }
                self.items.insert(index, value);
                Applied {
                    change: CollectionChange::Insert { new_index: index },
                    displaced: None,
                }
            }
            SequenceEdit::Remove(index) => {
                ensure_index(index, len)?;
                Applied {
                    displaced: Some(self.items.remove(index)),
                    change: CollectionChange::Remove { old_index: index },
                }
            }
            SequenceEdit::Move(old_index, new_index) => {
                ensure_index(old_index, len)?;
                ensure_index(new_index, len)?;
                let value = self.items.remove(old_index);
                self.items.insert(new_index, value);
                Applied {
                    change: CollectionChange::Move {
                        old_index,
                        new_index,
                    },
                    displaced: None,
                }
            }
            SequenceEdit::Replace(index, value) => {
                ensure_index(index, len)?;
                Applied {
                    displaced: Some(std::mem::replace(&mut self.items[index], value)),
                    change: CollectionChange::Replace { index },
                }
            }
            SequenceEdit::Clear => {
                self.items.clear();
                Applied {
                    change: CollectionChange::Reset,
                    displaced: None,
                }
            }
            SequenceEdit::Reset(values) => {
                self.items = values;
                Applied {
                    change: CollectionChange::Reset,
                    displaced: None,
                }
            }
        };
        Ok(applied)
    }

    pub fn announce(&self, change: &CollectionChange) {
        self.changes.emit(change);
    }
}

impl<'a, T> IntoIterator for &'a ObservableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(crate) fn ensure_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CatalogError::IndexOutOfRange { index, len })
    }
}

fn displaced<T>(applied: Applied<T>, index: usize) -> Result<T> {
    applied
        .displaced
        .ok_or(CatalogError::IndexOutOfRange { index, len: 0 })
}

#[cfg(test)]
#[path = "tests/observable_tests.rs"]
mod tests;
