//! Free-list pool of reusable instances.

use crate::config::PoolConfig;
use std::any::type_name;
use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};

/// Typed free list of default-constructible instances.
///
/// [`acquire`](Self::acquire) hands out the most recently released instance
/// (LIFO) or constructs a new one; [`release`](Self::release) puts an instance
/// back. The pool never inspects what it is given: callers return items in a
/// neutral state, or use [`scoped_with`](Self::scoped_with) to run a cleanup
/// action on release.
///
/// # Example
///
/// ```rust
/// use crossfade::pool::Pool;
///
/// let mut pool: Pool<Vec<u32>> = Pool::new();
/// {
///     let mut list = pool.scoped_container();
///     list.push(1);
/// } // cleared and released here
/// assert_eq!(pool.count(), 1);
/// assert!(pool.acquire().is_empty());
/// ```
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
    max_free: Option<usize>,
    constructed: usize,
}

impl<T: Default> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> Pool<T> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            max_free: None,
            constructed: 0,
        }
    }

    /// Creates a pool sized by `config`, pre-warming `config.prewarm` instances.
    pub fn with_config(config: &PoolConfig) -> Self {
        let mut pool = Self::new();
        pool.max_free = config.max_free;
        pool.set_count(config.prewarm);
        pool
    }

    /// Number of instances currently waiting in the free list.
    pub fn count(&self) -> usize {
        self.free.len()
    }

    /// Grows the free list with new instances or drops the surplus until it
    /// holds exactly `count` instances.
    pub fn set_count(&mut self, count: usize) {
        if count < self.free.len() {
            self.free.truncate(count);
            return;
        }

        let missing = count - self.free.len();
        self.free.reserve(missing);
        for _ in 0..missing {
            self.free.push(T::default());
        }
        self.constructed += missing;
    }

    /// Allocated capacity of the free list.
    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }

    /// Resizes the free list's allocation, dropping instances that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity < self.free.len() {
            self.free.truncate(capacity);
        }
        if capacity > self.free.capacity() {
            self.free.reserve_exact(capacity - self.free.len());
        } else {
            self.free.shrink_to(capacity);
        }
    }

    /// Total instances this pool has ever constructed.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    pub fn max_free(&self) -> Option<usize> {
        self.max_free
    }

    pub fn set_max_free(&mut self, max_free: Option<usize>) {
        self.max_free = max_free;
        if let Some(max) = max_free {
            self.free.truncate(max);
        }
    }

    /// Takes a free instance, constructing one if the free list is empty.
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(item) => item,
            None => {
                self.constructed += 1;
                T::default()
            }
        }
    }

    /// Returns an instance to the free list.
    pub fn release(&mut self, item: T) {
        if self.max_free.is_some_and(|max| self.free.len() >= max) {
            log::trace!("Pool<{}> is full, dropping released item", type_name::<T>());
            return;
        }
        self.free.push(item);
    }

    /// Acquires an instance that is released when the guard is dropped.
    pub fn scoped(&mut self) -> Pooled<'_, T> {
        let item = self.acquire();
        Pooled {
            pool: self,
            item: Some(item),
            cleanup: None,
        }
    }

    /// Like [`scoped`](Self::scoped), running `cleanup` before the release.
    pub fn scoped_with(&mut self, cleanup: fn(&mut T)) -> Pooled<'_, T> {
        let item = self.acquire();
        Pooled {
            pool: self,
            item: Some(item),
            cleanup: Some(cleanup),
        }
    }
}

impl<C: Container + Default> Pool<C> {
    /// Acquires a container, asserting in debug builds that it is empty.
    ///
    /// A non-empty pooled container means an earlier caller released it
    /// without clearing it.
    pub fn acquire_empty(&mut self) -> C {
        let container = self.acquire();
        debug_assert!(
            container.is_empty(),
            "pooled {} was released without being cleared",
            type_name::<C>()
        );
        container
    }

    /// Acquires an empty container that is cleared and released on drop.
    pub fn scoped_container(&mut self) -> Pooled<'_, C> {
        let item = self.acquire_empty();
        Pooled {
            pool: self,
            item: Some(item),
            cleanup: Some(C::clear),
        }
    }
}

/// Containers that can be handed out by [`Pool::acquire_empty`].
pub trait Container {
    fn is_empty(&self) -> bool;

    fn clear(&mut self);
}

impl<T> Container for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T: Eq + Hash, S: BuildHasher> Container for HashSet<T, S> {
    fn is_empty(&self) -> bool {
        HashSet::is_empty(self)
    }

    fn clear(&mut self) {
        HashSet::clear(self);
    }
}

impl Container for String {
    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

/// Scope guard returned by [`Pool::scoped`].
///
/// Dereferences to the pooled value and gives it back to the pool when it goes
/// out of scope, on every exit path including unwinding.
pub struct Pooled<'a, T: Default> {
    pool: &'a mut Pool<T>,
    item: Option<T>,
    cleanup: Option<fn(&mut T)>,
}

impl<T: Default> Pooled<'_, T> {
    /// Detaches the value from the guard; it will not be released.
    pub fn into_inner(mut self) -> T {
        self.item.take().unwrap_or_default()
    }
}

impl<T: Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("pooled value is only taken on drop or into_inner"),
        }
    }
}

impl<T: Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("pooled value is only taken on drop or into_inner"),
        }
    }
}

impl<T: Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(mut item) = self.item.take() {
            if let Some(cleanup) = self.cleanup {
                cleanup(&mut item);
            }
            self.pool.release(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Buffer {
        id: u32,
    }

    #[test]
    fn acquire_constructs_when_empty() {
        let mut pool: Pool<Buffer> = Pool::new();

        let item = pool.acquire();

        assert_eq!(item, Buffer::default());
        assert_eq!(pool.constructed(), 1);
        assert_eq!(pool.count(), 0);
    }

    #[test]
    fn release_then_acquire_is_lifo() {
        let mut pool: Pool<Buffer> = Pool::new();
        pool.release(Buffer { id: 1 });
        pool.release(Buffer { id: 2 });

        assert_eq!(pool.acquire().id, 2);
        assert_eq!(pool.acquire().id, 1);
        assert_eq!(pool.constructed(), 0);
    }

    #[test]
    fn set_count_prewarms_and_trims() {
        let mut pool: Pool<Buffer> = Pool::new();

        pool.set_count(5);
        assert_eq!(pool.count(), 5);
        assert_eq!(pool.constructed(), 5);

        pool.set_count(2);
        assert_eq!(pool.count(), 2);
    }

    #[test]
    fn set_capacity_drops_items_that_do_not_fit() {
        let mut pool: Pool<Buffer> = Pool::new();
        pool.set_count(4);

        pool.set_capacity(1);
        assert_eq!(pool.count(), 1);

        pool.set_capacity(32);
        assert!(pool.capacity() >= 32);
        assert_eq!(pool.count(), 1);
    }

    #[test]
    fn max_free_bounds_the_free_list() {
        let mut pool: Pool<Buffer> = Pool::with_config(&PoolConfig {
            prewarm: 0,
            max_free: Some(1),
        });

        pool.release(Buffer { id: 1 });
        pool.release(Buffer { id: 2 });

        assert_eq!(pool.count(), 1);
        assert_eq!(pool.acquire().id, 1);
    }

    #[test]
    fn scoped_guard_releases_on_drop() {
        let mut pool: Pool<Buffer> = Pool::new();
        {
            let mut item = pool.scoped();
            item.id = 9;
        }

        assert_eq!(pool.count(), 1);
        assert_eq!(pool.acquire().id, 9);
    }

    #[test]
    fn scoped_guard_runs_cleanup_first() {
        let mut pool: Pool<Buffer> = Pool::new();
        {
            let mut item = pool.scoped_with(|buffer| buffer.id = 0);
            item.id = 9;
        }

        assert_eq!(pool.acquire().id, 0);
    }

    #[test]
    fn scoped_guard_releases_on_early_return() {
        fn fill(pool: &mut Pool<Vec<u8>>, fail: bool) -> Result<usize, &'static str> {
            let mut list = pool.scoped_container();
            list.push(1);
            if fail {
                return Err("failed");
            }
            Ok(list.len())
        }

        let mut pool = Pool::new();
        assert_eq!(fill(&mut pool, true), Err("failed"));
        assert_eq!(fill(&mut pool, false), Ok(1));
        assert_eq!(pool.count(), 1);
        assert_eq!(pool.constructed(), 1);
    }

    #[test]
    fn into_inner_detaches_value() {
        let mut pool: Pool<String> = Pool::new();
        let text = {
            let mut guard = pool.scoped_container();
            guard.push_str("kept");
            guard.into_inner()
        };

        assert_eq!(text, "kept");
        assert_eq!(pool.count(), 0);
    }

    #[test]
    fn set_containers_are_cleared_on_release() {
        let mut pool: Pool<HashSet<u32>> = Pool::new();
        {
            let mut set = pool.scoped_container();
            set.insert(3);
        }

        assert!(pool.acquire_empty().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "released without being cleared")]
    fn non_empty_container_is_caught_in_debug() {
        let mut pool: Pool<Vec<u8>> = Pool::new();
        pool.release(vec![1]);
        let _ = pool.acquire_empty();
    }
}
