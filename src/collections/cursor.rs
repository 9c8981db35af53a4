//! Reentrant cursor over a shared, mutable sequence.
//!
//! A [`Cursor`] walks a sequence it does not own while items are inserted into
//! or removed from that same sequence. Edits made through the cursor shift
//! its position so the walk neither skips nor repeats an item: removing the
//! current item steps the cursor back by one, so the next `move_next` lands on
//! the item that slid into the freed slot.

use super::error::KeyedListError;
use super::keyed_list::KeyedList;

/// A sequence that a [`Cursor`] can walk and edit.
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// Inserts at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    fn insert_at(&mut self, index: usize, item: Self::Item);

    /// Removes at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn remove_at(&mut self, index: usize) -> Self::Item;
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn insert_at(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }

    fn remove_at(&mut self, index: usize) -> T {
        self.remove(index)
    }
}

impl<T> Sequence for KeyedList<T> {
    type Item = T;

    fn len(&self) -> usize {
        KeyedList::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.get_at(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.get_at_mut(index)
    }

    fn insert_at(&mut self, index: usize, item: T) {
        if let Err(error) = self.insert(index, item) {
            panic!("cursor insertion out of bounds: {error}");
        }
    }

    fn remove_at(&mut self, index: usize) -> T {
        match KeyedList::remove_at(self, index) {
            Ok(item) => item,
            Err(error) => panic!("cursor removal out of bounds: {error}"),
        }
    }
}

/// Cursor over a borrowed [`Sequence`].
///
/// Starts before the first item; call [`move_next`](Self::move_next) to
/// reach it.
///
/// # Example
///
/// ```rust
/// use crossfade::collections::Cursor;
///
/// let mut items = vec![1, 2, 3, 4];
/// let mut cursor = Cursor::new(&mut items);
/// while cursor.move_next() {
///     if cursor.current().is_some_and(|value| value % 2 == 0) {
///         cursor.remove_current().unwrap();
///     }
/// }
/// assert_eq!(items, vec![1, 3]);
/// ```
pub struct Cursor<'a, S: Sequence> {
    sequence: &'a mut S,
    index: Option<usize>,
}

impl<'a, S: Sequence> Cursor<'a, S> {
    pub fn new(sequence: &'a mut S) -> Self {
        Self {
            sequence,
            index: None,
        }
    }

    /// Starts the cursor on `index`, so the next `move_next` yields `index + 1`.
    pub fn starting_at(sequence: &'a mut S, index: usize) -> Self {
        Self {
            sequence,
            index: Some(index),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Position of the current item, `None` before the first step.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    pub fn move_next(&mut self) -> bool {
        let len = self.sequence.len();
        let next = self.index.map_or(0, |index| index + 1);
        if next < len {
            self.index = Some(next);
            true
        } else {
            self.index = Some(len);
            false
        }
    }

    pub fn move_previous(&mut self) -> bool {
        let Some(index) = self.index else {
            return false;
        };

        let bounded = index.min(self.sequence.len());
        if bounded == 0 {
            self.index = None;
            false
        } else {
            self.index = Some(bounded - 1);
            true
        }
    }

    pub fn current(&self) -> Option<&S::Item> {
        self.sequence.get(self.index?)
    }

    pub fn current_mut(&mut self) -> Option<&mut S::Item> {
        let index = self.index?;
        self.sequence.get_mut(index)
    }

    pub fn get(&self, index: usize) -> Result<&S::Item, KeyedListError> {
        let len = self.sequence.len();
        self.sequence
            .get(index)
            .ok_or(KeyedListError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut S::Item, KeyedListError> {
        let len = self.sequence.len();
        self.sequence
            .get_mut(index)
            .ok_or(KeyedListError::IndexOutOfRange { index, len })
    }

    /// Inserts at `index`, stepping the cursor forward when the insertion is
    /// at or before it so it keeps pointing at the same item.
    pub fn insert(&mut self, index: usize, item: S::Item) -> Result<(), KeyedListError> {
        let len = self.sequence.len();
        if index > len {
            return Err(KeyedListError::IndexOutOfRange { index, len });
        }

        self.sequence.insert_at(index, item);
        if let Some(current) = self.index {
            if index <= current {
                self.index = Some(current + 1);
            }
        }
        Ok(())
    }

    /// Removes at `index`, stepping the cursor back when the removal is at or
    /// before it.
    pub fn remove_at(&mut self, index: usize) -> Result<S::Item, KeyedListError> {
        let len = self.sequence.len();
        if index >= len {
            return Err(KeyedListError::IndexOutOfRange { index, len });
        }

        let item = self.sequence.remove_at(index);
        if let Some(current) = self.index {
            if index <= current {
                self.index = current.checked_sub(1);
            }
        }
        Ok(item)
    }

    /// Removes the current item. The next `move_next` yields its successor.
    pub fn remove_current(&mut self) -> Result<S::Item, KeyedListError> {
        match self.index {
            Some(index) if index < self.sequence.len() => self.remove_at(index),
            _ => Err(KeyedListError::NoCurrentItem),
        }
    }
}
