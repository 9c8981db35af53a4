//! Per-tick driver for custom-eased fades.

use super::error::FadeError;
use super::graph::BlendGraph;
use super::operation::{FadeOperation, FadeStatus};
use crate::clock::FrameClock;
use crate::collections::{Cursor, ItemKey, KeyedList};
use crate::config::FadeConfig;
use crate::easing::{validate_function, EaseFn, Easing};
use crate::pool::PoolRegistry;
use std::fmt::Debug;
use stillwater::validation::Validation;

/// What a single [`FadeScheduler::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Fades still running after the tick.
    pub active: usize,
    /// Fades that reached their final weights this tick.
    pub completed: usize,
    /// Fades that found themselves superseded or invalidated this tick.
    pub cancelled: usize,
}

/// Owns every in-flight [`FadeOperation`] for one blend graph.
///
/// Operations are registered in a [`KeyedList`] and updated once per tick in
/// registration order. An operation that completes or is cancelled removes
/// itself during the tick and goes back to the scheduler's pool, so steady
/// state fading does not allocate.
///
/// Supersession is polled: starting a second fade on a node does not stop the
/// first one immediately. The stale operation notices the layer's command
/// count moved on its next tick and cancels itself then.
///
/// ```rust
/// use crossfade::easing::Easing;
/// use crossfade::fade::{BlendGraph, BlendTree, FadeScheduler};
///
/// let mut tree = BlendTree::new();
/// let layer = tree.add_layer();
/// let idle = tree.add_node(layer);
/// let walk = tree.add_node(layer);
/// tree.play(idle, 0.0);
/// tree.play(walk, 0.25);
///
/// let mut scheduler = FadeScheduler::new();
/// scheduler.start_easing(&mut tree, walk, Easing::SineInOut).unwrap();
///
/// let report = scheduler.tick(&mut tree, &0.25);
/// assert_eq!(report.completed, 1);
/// assert_eq!(tree.weight(walk), 1.0);
/// assert_eq!(tree.weight(idle), 0.0);
/// ```
#[derive(Debug)]
pub struct FadeScheduler<N, L> {
    active: KeyedList<FadeOperation<N, L>>,
    pools: PoolRegistry,
    config: FadeConfig,
}

impl<N, L> Default for FadeScheduler<N, L>
where
    N: Copy + Eq + Debug + 'static,
    L: Copy + Eq + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, L> FadeScheduler<N, L>
where
    N: Copy + Eq + Debug + 'static,
    L: Copy + Eq + Debug + 'static,
{
    pub fn new() -> Self {
        Self::with_config(FadeConfig::default())
    }

    pub fn with_config(config: FadeConfig) -> Self {
        let mut pools = PoolRegistry::new();
        pools.configure::<FadeOperation<N, L>>(&config.pool);
        Self {
            active: KeyedList::new(),
            pools,
            config,
        }
    }

    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    /// Replaces `node`'s built-in fade with one shaped by `ease`.
    ///
    /// `node` must be valid, belong to a layer and already be fading. On
    /// error the graph is untouched and nothing is registered.
    pub fn start<G>(&mut self, graph: &mut G, node: N, ease: EaseFn) -> Result<ItemKey, FadeError>
    where
        G: BlendGraph<Node = N, Layer = L>,
    {
        if cfg!(debug_assertions) && self.config.validate_easing {
            warn_on_violations(ease);
        }

        let mut operation = self.pools.acquire::<FadeOperation<N, L>>();
        let applied = {
            let mut scratch = self.pools.list::<N>();
            operation.apply(graph, node, ease, &mut scratch)
        };

        match applied {
            Ok(()) => Ok(self.require_tick(operation)),
            Err(error) => {
                operation.reset();
                self.pools.release(operation);
                Err(error)
            }
        }
    }

    /// Same as [`start`](Self::start) with a named curve.
    pub fn start_easing<G>(
        &mut self,
        graph: &mut G,
        node: N,
        easing: Easing,
    ) -> Result<ItemKey, FadeError>
    where
        G: BlendGraph<Node = N, Layer = L>,
    {
        self.start(graph, node, easing.function())
    }

    /// Registers an already applied operation for per-tick updates.
    pub fn require_tick(&mut self, operation: FadeOperation<N, L>) -> ItemKey {
        self.active.add(operation)
    }

    /// Unregisters an operation without touching any weights.
    pub fn cancel_tick(&mut self, key: ItemKey) -> Result<(), FadeError> {
        let mut operation = self.active.remove(key)?;
        operation.reset();
        self.pools.release(operation);
        Ok(())
    }

    /// Advances every registered fade by the clock's delta time.
    pub fn tick<G, C>(&mut self, graph: &mut G, clock: &C) -> TickReport
    where
        G: BlendGraph<Node = N, Layer = L>,
        C: FrameClock + ?Sized,
    {
        let delta_time = clock.delta_time();
        let mut report = TickReport::default();

        let mut cursor = Cursor::new(&mut self.active);
        while cursor.move_next() {
            let status = match cursor.current_mut() {
                Some(operation) => operation.update(graph, delta_time),
                None => break,
            };

            match status {
                FadeStatus::Active => continue,
                FadeStatus::Completed => report.completed += 1,
                FadeStatus::Cancelled => report.cancelled += 1,
            }

            if let Ok(mut operation) = cursor.remove_current() {
                operation.reset();
                self.pools.release(operation);
            }
        }

        report.active = self.active.len();
        report
    }

    /// Drops every registered fade, leaving weights where they are.
    pub fn clear(&mut self) {
        while let Ok(mut operation) = self.active.remove_at_swap(0) {
            operation.reset();
            self.pools.release(operation);
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.active.contains(key)
    }

    pub fn operation(&self, key: ItemKey) -> Option<&FadeOperation<N, L>> {
        self.active.get(key)
    }

    /// Progress of a registered fade.
    pub fn progress(&self, key: ItemKey) -> Option<f32> {
        self.active.get(key).map(FadeOperation::progress)
    }

    /// Pools backing operations and scratch buffers.
    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    /// Number of operations waiting in the pool for reuse.
    pub fn pooled_count(&self) -> usize {
        self.pools
            .get::<FadeOperation<N, L>>()
            .map_or(0, |pool| pool.count())
    }
}

fn warn_on_violations(ease: EaseFn) {
    if let Validation::Failure(violations) = validate_function("custom", ease) {
        for violation in violations.iter() {
            log::warn!("{violation}; fade weights will jump at the ends");
        }
    }
}
