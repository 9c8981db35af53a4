//! Order-preserving list with O(1) identity lookup.
//!
//! Every item added to a [`KeyedList`] is given an [`ItemKey`]: a generational
//! handle that resolves to the item's current slot. The list keeps a dense
//! `Vec` of items next to a slot map of `key -> index`, and every structural
//! edit re-synchronises the affected entries before returning, so
//! `list[list.index_of(key)]` is always the item the key was issued for.
//!
//! Keys are tagged with the id of the list that issued them. Resolving a key
//! issued by a different list is a [`KeyedListError::ForeignKey`]; resolving a
//! key whose item was removed is a [`KeyedListError::StaleKey`].

use super::error::KeyedListError;
use slotmap::SlotMap;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

slotmap::new_key_type! {
    struct Slot;
}

static NEXT_LIST_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one item inside one [`KeyedList`].
///
/// A key stays valid for as long as its item remains in the list; once the
/// item is removed (or the list cleared) the key is permanently stale, even if
/// the slot is later reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ItemKey {
    list: u32,
    slot: Slot,
}

impl ItemKey {
    /// Id of the list that issued this key.
    pub fn list_id(&self) -> u32 {
        self.list
    }
}

/// Ordered collection supporting O(1) add, swap-removal and removal by key.
///
/// # Example
///
/// ```rust
/// use crossfade::collections::KeyedList;
///
/// let mut list = KeyedList::new();
/// let a = list.add("A");
/// let _b = list.add("B");
/// let c = list.add("C");
///
/// list.remove_at_swap(0).unwrap();
/// assert_eq!(list.as_slice(), &["C", "B"]);
/// assert_eq!(list.index_of(a), None);
/// assert_eq!(list.index_of(c), Some(0));
/// ```
#[derive(Debug)]
pub struct KeyedList<T> {
    id: u32,
    items: Vec<T>,
    slots: Vec<Slot>,
    indices: SlotMap<Slot, usize>,
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KeyedList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            items: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            indices: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Unique id of this list, shared by every key it issues.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Appends `item` and returns its key. O(1).
    pub fn add(&mut self, item: T) -> ItemKey {
        let index = self.items.len();
        let slot = self.indices.insert(index);
        self.items.push(item);
        self.slots.push(slot);
        self.key(slot)
    }

    /// Inserts `item` at `index`, shifting and re-indexing every later item. O(n).
    pub fn insert(&mut self, index: usize, item: T) -> Result<ItemKey, KeyedListError> {
        if index > self.items.len() {
            return Err(KeyedListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let slot = self.indices.insert(index);
        self.items.insert(index, item);
        self.slots.insert(index, slot);
        self.reindex_from(index + 1);
        Ok(self.key(slot))
    }

    /// Removes the item at `index`, preserving the order of the rest. O(n).
    pub fn remove_at(&mut self, index: usize) -> Result<T, KeyedListError> {
        self.check_index(index)?;

        let slot = self.slots.remove(index);
        self.indices.remove(slot);
        let item = self.items.remove(index);
        self.reindex_from(index);
        Ok(item)
    }

    /// Removes the item at `index` by moving the last item into its place. O(1).
    ///
    /// Only the moved item is re-indexed; iteration order changes.
    pub fn remove_at_swap(&mut self, index: usize) -> Result<T, KeyedListError> {
        self.check_index(index)?;

        let slot = self.slots.swap_remove(index);
        self.indices.remove(slot);
        let item = self.items.swap_remove(index);
        if let Some(&moved) = self.slots.get(index) {
            self.indices[moved] = index;
        }
        Ok(item)
    }

    /// Removes the item identified by `key`, preserving order. O(n).
    pub fn remove(&mut self, key: ItemKey) -> Result<T, KeyedListError> {
        let index = self.resolve(key)?;
        self.remove_at(index)
    }

    /// Removes the item identified by `key` with a swap. O(1).
    pub fn remove_swap(&mut self, key: ItemKey) -> Result<T, KeyedListError> {
        let index = self.resolve(key)?;
        self.remove_at_swap(index)
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.index_of(key).is_some()
    }

    /// Current index of the item identified by `key`, or `None` if the key is
    /// stale or was issued by another list.
    pub fn index_of(&self, key: ItemKey) -> Option<usize> {
        self.resolve(key).ok()
    }

    /// Resolves `key` to its current index, reporting why it cannot be resolved.
    pub fn resolve(&self, key: ItemKey) -> Result<usize, KeyedListError> {
        if key.list != self.id {
            return Err(KeyedListError::ForeignKey {
                key,
                owner: key.list,
                list: self.id,
            });
        }

        let stale = KeyedListError::StaleKey { key, list: self.id };
        let index = *self.indices.get(key.slot).ok_or(stale.clone())?;

        // The slot map and the dense array must agree.
        if self.slots.get(index) == Some(&key.slot) {
            Ok(index)
        } else {
            Err(stale)
        }
    }

    pub fn get(&self, key: ItemKey) -> Option<&T> {
        let index = self.index_of(key)?;
        self.items.get(index)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut T> {
        let index = self.index_of(key)?;
        self.items.get_mut(index)
    }

    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Key of the item currently at `index`.
    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.slots.get(index).map(|&slot| self.key(slot))
    }

    /// Removes every item. All outstanding keys become stale first.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.slots.clear();
        self.items.clear();
    }

    fn key(&self, slot: Slot) -> ItemKey {
        ItemKey {
            list: self.id,
            slot,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), KeyedListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(KeyedListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (index, &slot) in self.slots.iter().enumerate().skip(start) {
            self.indices[slot] = index;
        }
    }
}

impl<T> Index<usize> for KeyedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for KeyedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a KeyedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_synchronized<T>(list: &KeyedList<T>) {
        for index in 0..list.len() {
            let key = list.key_at(index).unwrap();
            assert_eq!(list.index_of(key), Some(index));
        }
    }

    #[test]
    fn add_assigns_sequential_indices() {
        let mut list = KeyedList::new();
        let a = list.add('a');
        let b = list.add('b');

        assert_eq!(list.index_of(a), Some(0));
        assert_eq!(list.index_of(b), Some(1));
        assert_eq!(list.get(b), Some(&'b'));
    }

    #[test]
    fn remove_at_swap_moves_last_item_into_hole() {
        let mut list = KeyedList::new();
        let a = list.add('A');
        let b = list.add('B');
        let c = list.add('C');

        assert_eq!(list.remove_at_swap(0), Ok('A'));

        assert_eq!(list.as_slice(), &['C', 'B']);
        assert_eq!(list.index_of(a), None);
        assert_eq!(list.index_of(c), Some(0));
        assert_eq!(list.index_of(b), Some(1));
    }

    #[test]
    fn remove_at_preserves_order_and_reindexes() {
        let mut list = KeyedList::new();
        let keys: Vec<_> = (0..5).map(|i| list.add(i)).collect();

        assert_eq!(list.remove_at(1), Ok(1));

        assert_eq!(list.as_slice(), &[0, 2, 3, 4]);
        assert!(!list.contains(keys[1]));
        assert_eq!(list.index_of(keys[4]), Some(3));
        assert_synchronized(&list);
    }

    #[test]
    fn insert_shifts_later_items() {
        let mut list = KeyedList::new();
        let a = list.add("a");
        let c = list.add("c");
        let b = list.insert(1, "b").unwrap();

        assert_eq!(list.as_slice(), &["a", "b", "c"]);
        assert_eq!(list.index_of(a), Some(0));
        assert_eq!(list.index_of(b), Some(1));
        assert_eq!(list.index_of(c), Some(2));
    }

    #[test]
    fn insert_past_end_is_rejected_without_mutation() {
        let mut list = KeyedList::new();
        list.add(1);

        let result = list.insert(3, 2);

        assert_eq!(
            result,
            Err(KeyedListError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_by_key_twice_reports_stale_key() {
        let mut list = KeyedList::new();
        let a = list.add(10);

        assert_eq!(list.remove(a), Ok(10));
        assert!(matches!(
            list.remove(a),
            Err(KeyedListError::StaleKey { .. })
        ));
    }

    #[test]
    fn key_from_other_list_is_foreign() {
        let mut first = KeyedList::new();
        let mut second = KeyedList::new();
        let key = first.add(1);
        second.add(2);

        let result = second.remove_swap(key);

        assert!(matches!(result, Err(KeyedListError::ForeignKey { .. })));
        assert_eq!(second.len(), 1);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn reused_slot_does_not_revive_old_key() {
        let mut list = KeyedList::new();
        let old = list.add("old");
        list.remove(old).unwrap();
        let new = list.add("new");

        assert_ne!(old, new);
        assert_eq!(list.get(old), None);
        assert_eq!(list.get(new), Some(&"new"));
    }

    #[test]
    fn clear_invalidates_all_keys() {
        let mut list = KeyedList::new();
        let keys: Vec<_> = (0..3).map(|i| list.add(i)).collect();

        list.clear();

        assert!(list.is_empty());
        assert!(keys.iter().all(|&key| !list.contains(key)));
    }

    #[test]
    fn out_of_range_removal_is_an_error() {
        let mut list: KeyedList<u8> = KeyedList::new();

        assert_eq!(
            list.remove_at(0),
            Err(KeyedListError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            list.remove_at_swap(2),
            Err(KeyedListError::IndexOutOfRange { index: 2, len: 0 })
        );
    }

    #[test]
    fn removing_last_item_with_swap_needs_no_reindex() {
        let mut list = KeyedList::new();
        let a = list.add(1);
        let b = list.add(2);

        assert_eq!(list.remove_swap(b), Ok(2));
        assert_eq!(list.index_of(a), Some(0));
        assert_synchronized(&list);
    }
}
