//! Capacity-bounded preview of the front of a larger sequence.
//!
//! A [`BoundedMirror`] holds at most `capacity` elements and always equals the first
//! `min(full.len(), capacity)` elements of the sequence it follows. It is never authored
//! directly: the owner mutates the full sequence and then forwards the resulting
//! [`CollectionChange`] to [`BoundedMirror::on_full_changed`], which patches the window
//! using at most one lookup into the full sequence (a reset copies the whole window).

use crate::{
    error::{CatalogError, Result},
    notify::SubscriptionId,
    observable::{ensure_index, CollectionChange, ObservableVec},
};

/// Number of items shown in a group's preview; fills grid columns evenly for 1, 2, 3, 4 or 6 rows.
pub const TOP_ITEMS_CAPACITY: usize = 12;

#[derive(Debug)]
pub struct BoundedMirror<T> {
    capacity: usize,
    window: ObservableVec<T>,
}

impl<T: Clone> Default for BoundedMirror<T> {
    fn default() -> Self {
        Self::new(TOP_ITEMS_CAPACITY)
    }
}

impl<T: Clone> BoundedMirror<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            window: ObservableVec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.window.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        self.window.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.window.iter()
    }

    /// Subscribes to the window's own structural changes.
    pub fn subscribe(&self, callback: impl Fn(&CollectionChange) + 'static) -> SubscriptionId {
        self.window.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.window.unsubscribe(id)
    }

    /// Patches the window after `change` has already been applied to `full`.
    ///
    /// Indices in `change` must be valid for `full` as it is now; anything else is
    /// rejected with [`CatalogError::IndexOutOfRange`] before the window is touched.
    pub fn on_full_changed(&mut self, full: &[T], change: &CollectionChange) -> Result<()> {
        let capacity = self.capacity;
        match *change {
            CollectionChange::Insert { new_index } => {
                ensure_index(new_index, full.len())?;
                if new_index < capacity {
                    self.window.insert(new_index, full[new_index].clone())?;
                    self.drop_overflow();
                }
            }
            CollectionChange::Remove { old_index } => {
                // `full` has already shrunk, so the old position may equal its length.
                if old_index > full.len() {
                    return Err(CatalogError::IndexOutOfRange {
                        index: old_index,
                        len: full.len(),
                    });
                }
                if old_index < capacity {
                    self.window.remove(old_index)?;
                    self.refill_boundary(full);
                }
            }
            CollectionChange::Move {
                old_index,
                new_index,
            } => {
                ensure_index(old_index, full.len())?;
                ensure_index(new_index, full.len())?;
                match (old_index < capacity, new_index < capacity) {
                    (true, true) => self.window.move_item(old_index, new_index)?,
                    (true, false) => {
                        self.window.remove(old_index)?;
                        self.refill_boundary(full);
                    }
                    (false, true) => {
                        self.window.insert(new_index, full[new_index].clone())?;
                        self.drop_overflow();
                    }
                    (false, false) => {}
                }
            }
            CollectionChange::Replace { index } => {
                ensure_index(index, full.len())?;
                if index < capacity {
                    self.window.replace(index, full[index].clone())?;
                }
            }
            CollectionChange::Reset => {
                self.window
                    .reset_with(full.iter().take(capacity).cloned());
            }
        }

        tracing::debug!(
            ?change,
            mirror_len = self.window.len(),
            full_len = full.len(),
            "patched bounded window"
        );
        Ok(())
    }

    /// Pulls in the element that slid onto the last window slot, if `full` still has one.
    fn refill_boundary(&mut self, full: &[T]) {
        let Some(boundary) = self.capacity.checked_sub(1) else {
            return;
        };
        if full.len() >= self.capacity {
            if let Some(value) = full.get(boundary) {
                self.window.push(value.clone());
            }
        }
    }

    fn drop_overflow(&mut self) {
        while self.window.len() > self.capacity {
            self.window.pop();
        }
    }
}

#[cfg(test)]
#[path = "tests/mirror_tests.rs"]
mod tests;
