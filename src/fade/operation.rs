//! A single eased weight transition.

use super::error::FadeError;
use super::graph::BlendGraph;
use crate::easing::{functions::linear, lerp, EaseFn};
use smallvec::SmallVec;

/// A node together with the weight it had when a fade captured it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeWeight<N> {
    pub node: N,
    pub start_weight: f32,
}

/// Outcome of one [`FadeOperation::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeStatus {
    /// Still interpolating; call `update` again next tick.
    Active,
    /// Progress reached 1 and every node was snapped to its final weight.
    Completed,
    /// The target was invalidated, moved to another layer, or superseded by a
    /// newer command. Weights were left as they were.
    Cancelled,
}

/// Drives one node's weight toward its target with a custom easing curve while
/// fading its siblings out in lockstep.
///
/// While `progress < 1` the target's weight is
/// `lerp(start, target_weight, ease(progress))` and each sibling's weight is
/// `start * (1 - ease(progress))`, so the siblings reach zero exactly when the
/// target reaches its final weight, however many siblings there are.
///
/// Operations are pooled by the [`FadeScheduler`](super::FadeScheduler); a
/// released operation is always [`reset`](Self::reset) first.
#[derive(Debug)]
pub struct FadeOperation<N, L> {
    target: Option<NodeWeight<N>>,
    layer: Option<L>,
    command_count: u64,
    progress: f32,
    fade_speed: f32,
    ease: EaseFn,
    siblings: SmallVec<[NodeWeight<N>; 4]>,
}

impl<N, L> Default for FadeOperation<N, L> {
    fn default() -> Self {
        Self {
            target: None,
            layer: None,
            command_count: 0,
            progress: 0.0,
            fade_speed: 0.0,
            ease: linear::ease,
            siblings: SmallVec::new(),
        }
    }
}

impl<N: Copy + Eq + std::fmt::Debug, L: Copy + Eq + std::fmt::Debug> FadeOperation<N, L> {
    /// Takes over the fade `node` is already performing.
    ///
    /// Captures the node's weight, its layer's command count and its fade
    /// speed, zeroes the node's own fade speed, and captures every sibling
    /// with a non-zero weight so it fades out alongside. `scratch` is a
    /// working buffer for sibling collection and is left cleared.
    ///
    /// Nothing is modified when an error is returned.
    pub fn apply<G>(
        &mut self,
        graph: &mut G,
        node: N,
        ease: EaseFn,
        scratch: &mut Vec<N>,
    ) -> Result<(), FadeError>
    where
        G: BlendGraph<Node = N, Layer = L>,
    {
        if !graph.is_valid(node) {
            return Err(FadeError::InvalidTarget {
                node: format!("{node:?}"),
            });
        }
        let layer = graph.layer_of(node).ok_or_else(|| FadeError::Detached {
            node: format!("{node:?}"),
        })?;
        let fade_speed = graph.fade_speed(node);
        if fade_speed == 0.0 {
            return Err(FadeError::NotFading {
                node: format!("{node:?}"),
            });
        }

        self.target = Some(NodeWeight {
            node,
            start_weight: graph.weight(node),
        });
        self.layer = Some(layer);
        self.command_count = graph.command_count(layer);
        self.progress = 0.0;
        self.fade_speed = fade_speed.abs();
        self.ease = ease;
        graph.set_fade_speed(node, 0.0);

        self.siblings.clear();
        scratch.clear();
        graph.collect_siblings(node, scratch);
        for &sibling in scratch.iter() {
            if sibling == node || !graph.is_valid(sibling) {
                continue;
            }
            let start_weight = graph.weight(sibling);
            if start_weight != 0.0 {
                self.siblings.push(NodeWeight {
                    node: sibling,
                    start_weight,
                });
                graph.set_fade_speed(sibling, 0.0);
            }
        }
        scratch.clear();

        log::debug!(
            "Fade started on {:?}: weight {} at speed {} with {} sibling(s)",
            node,
            graph.weight(node),
            self.fade_speed,
            self.siblings.len()
        );
        Ok(())
    }

    /// Advances the fade by `delta_time` seconds.
    pub fn update<G>(&mut self, graph: &mut G, delta_time: f32) -> FadeStatus
    where
        G: BlendGraph<Node = N, Layer = L>,
    {
        let (Some(target), Some(layer)) = (self.target, self.layer) else {
            return FadeStatus::Cancelled;
        };

        if !graph.is_valid(target.node)
            || graph.layer_of(target.node) != Some(layer)
            || graph.command_count(layer) != self.command_count
        {
            log::debug!("Fade on {:?} cancelled: superseded or invalidated", target.node);
            self.siblings.clear();
            return FadeStatus::Cancelled;
        }

        self.progress += delta_time * graph.layer_speed(layer) * self.fade_speed;

        if self.progress < 1.0 {
            let eased = (self.ease)(self.progress);
            let target_weight = graph.target_weight(target.node);
            graph.set_weight(target.node, lerp(target.start_weight, target_weight, eased));

            let remaining = 1.0 - eased;
            for sibling in &self.siblings {
                if graph.is_valid(sibling.node) {
                    graph.set_weight(sibling.node, sibling.start_weight * remaining);
                }
            }

            log::trace!("Fade on {:?} at progress {}", target.node, self.progress);
            FadeStatus::Active
        } else {
            let final_weight = graph.target_weight(target.node);
            graph.set_weight(target.node, final_weight);
            if final_weight == 0.0 {
                graph.stop(target.node);
            }

            for sibling in &self.siblings {
                if graph.is_valid(sibling.node) {
                    graph.set_weight(sibling.node, 0.0);
                    graph.stop(sibling.node);
                }
            }

            log::debug!("Fade on {:?} completed at weight {}", target.node, final_weight);
            FadeStatus::Completed
        }
    }

    /// Node this fade drives, if it has been applied.
    pub fn target(&self) -> Option<NodeWeight<N>> {
        self.target
    }

    pub fn layer(&self) -> Option<L> {
        self.layer
    }

    /// Progress in `[0, 1)` while active.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Rate at which progress advances per second of layer time.
    pub fn fade_speed(&self) -> f32 {
        self.fade_speed
    }

    pub fn ease(&self) -> EaseFn {
        self.ease
    }

    /// Siblings being faded out, with their captured weights.
    pub fn siblings(&self) -> &[NodeWeight<N>] {
        &self.siblings
    }

    /// Returns the operation to its neutral state, keeping sibling capacity.
    pub fn reset(&mut self) {
        self.target = None;
        self.layer = None;
        self.command_count = 0;
        self.progress = 0.0;
        self.fade_speed = 0.0;
        self.ease = linear::ease;
        self.siblings.clear();
    }
}
