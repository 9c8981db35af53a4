//! Collections that stay consistent while they are walked and edited.
//!
//! - [`KeyedList`]: ordered list with generational keys for O(1) identity lookup
//! - [`Cursor`]: reentrant cursor that survives inserts/removals mid-walk
//! - [`LazyStack`]: per-depth scratch instances for recursive calls

mod cursor;
mod error;
mod keyed_list;
mod lazy_stack;

pub use cursor::{Cursor, Sequence};
pub use error::KeyedListError;
pub use keyed_list::{ItemKey, KeyedList};
pub use lazy_stack::LazyStack;
