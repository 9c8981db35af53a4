//! One pool per value type, owned by whoever needs pooling.

use super::object_pool::{Pool, Pooled};
use crate::config::PoolConfig;
use rustc_hash::FxHashMap;
use std::any::{type_name, Any, TypeId};
use std::collections::HashSet;

/// Holds a [`Pool`] for every value type it has been asked for.
///
/// Pools are created lazily on first use, sized by the registry's default
/// [`PoolConfig`], and live as long as the registry. Owning the registry
/// explicitly (one per application context or subsystem) replaces global
/// per-type pools.
///
/// # Example
///
/// ```rust
/// use crossfade::pool::PoolRegistry;
///
/// let mut pools = PoolRegistry::new();
/// {
///     let mut names = pools.string();
///     names.push_str("idle");
/// }
/// let mut ids = pools.list::<u32>();
/// ids.push(7);
/// ```
#[derive(Default)]
pub struct PoolRegistry {
    pools: FxHashMap<TypeId, Box<dyn Any>>,
    defaults: PoolConfig,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose lazily created pools use `defaults`.
    pub fn with_defaults(defaults: PoolConfig) -> Self {
        Self {
            pools: FxHashMap::default(),
            defaults,
        }
    }

    /// Number of value types with a pool.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Pool for `T`, if one was created.
    pub fn get<T: Default + 'static>(&self) -> Option<&Pool<T>> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.downcast_ref::<Pool<T>>())
    }

    /// Pool for `T`, created on first use.
    pub fn pool<T: Default + 'static>(&mut self) -> &mut Pool<T> {
        let defaults = &self.defaults;
        let entry = self.pools.entry(TypeId::of::<T>()).or_insert_with(|| {
            log::trace!("Creating pool for {}", type_name::<T>());
            Box::new(Pool::<T>::with_config(defaults))
        });

        match entry.downcast_mut::<Pool<T>>() {
            Some(pool) => pool,
            None => unreachable!("pool registry entries are keyed by their own TypeId"),
        }
    }

    /// Installs a pool for `T` sized by `config`, replacing any existing one.
    pub fn configure<T: Default + 'static>(&mut self, config: &PoolConfig) {
        self.pools
            .insert(TypeId::of::<T>(), Box::new(Pool::<T>::with_config(config)));
    }

    pub fn acquire<T: Default + 'static>(&mut self) -> T {
        self.pool::<T>().acquire()
    }

    pub fn release<T: Default + 'static>(&mut self, item: T) {
        self.pool::<T>().release(item);
    }

    pub fn scoped<T: Default + 'static>(&mut self) -> Pooled<'_, T> {
        self.pool::<T>().scoped()
    }

    /// Empty `Vec` that is cleared and released on drop.
    pub fn list<T: 'static>(&mut self) -> Pooled<'_, Vec<T>> {
        self.pool::<Vec<T>>().scoped_container()
    }

    /// Empty `HashSet` that is cleared and released on drop.
    pub fn set<T: Eq + std::hash::Hash + 'static>(&mut self) -> Pooled<'_, HashSet<T>> {
        self.pool::<HashSet<T>>().scoped_container()
    }

    /// Empty `String` builder that is cleared and released on drop.
    pub fn string(&mut self) -> Pooled<'_, String> {
        self.pool::<String>().scoped_container()
    }
}

impl std::fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.pools.len())
            .field("defaults", &self.defaults)
            .finish()
    }
}
