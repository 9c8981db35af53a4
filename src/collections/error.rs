//! Errors raised by the keyed collections.

use super::keyed_list::ItemKey;
use thiserror::Error;

/// Usage errors for [`KeyedList`](super::KeyedList) and [`Cursor`](super::Cursor).
///
/// These are programmer errors: the list is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyedListError {
    #[error("Key {key:?} belongs to keyed list #{owner}, not to keyed list #{list}")]
    ForeignKey { key: ItemKey, owner: u32, list: u32 },

    #[error("Key {key:?} is not in keyed list #{list} (the item was already removed)")]
    StaleKey { key: ItemKey, list: u32 },

    #[error("Index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The cursor is not positioned on an item")]
    NoCurrentItem,
}
