//! Per-depth scratch instances for recursive algorithms.

/// Grows one scratch value per call depth and reuses it on later calls.
///
/// Recursive code calls [`increment`](Self::increment) on the way in and
/// [`decrement`](Self::decrement) on the way out; each depth level always gets
/// the same instance back, so nothing is allocated once the deepest level has
/// been reached once. Instances are never dropped until the stack is.
#[derive(Debug, Default)]
pub struct LazyStack<T> {
    items: Vec<T>,
    depth: usize,
}

impl<T: Default> LazyStack<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            depth: 0,
        }
    }

    /// Pre-allocates instances for the first `depth` levels.
    pub fn with_depth(depth: usize) -> Self {
        let mut items = Vec::with_capacity(depth);
        items.resize_with(depth, T::default);
        Self { items, depth: 0 }
    }

    /// Number of levels currently entered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of instances created so far.
    pub fn allocated(&self) -> usize {
        self.items.len()
    }

    /// Enters the next level and returns its instance.
    pub fn increment(&mut self) -> &mut T {
        if self.depth == self.items.len() {
            self.items.push(T::default());
        }
        self.depth += 1;
        &mut self.items[self.depth - 1]
    }

    /// Leaves the current level.
    pub fn decrement(&mut self) {
        debug_assert!(self.depth > 0, "LazyStack::decrement called at depth 0");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Instance of the current level, if any level has been entered.
    pub fn current(&mut self) -> Option<&mut T> {
        let index = self.depth.checked_sub(1)?;
        self.items.get_mut(index)
    }

    /// Runs `f` with the next level's instance while that level is entered.
    ///
    /// `f` also receives the stack itself so it can recurse; nested calls use
    /// deeper instances. The instance is returned to its level afterwards.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut T, &mut Self) -> R) -> R {
        let level = self.depth;
        let mut item = std::mem::take(self.increment());
        let result = f(&mut item, self);
        self.items[level] = item;
        self.decrement();
        result
    }
}
