//! Contract between the fade scheduler and the host's blend graph.

use std::fmt::Debug;

/// A host graph of blendable nodes grouped into layers.
///
/// Nodes and layers are referred to by copyable handles; a fade never owns a
/// node, it only holds its handle and asks the graph whether it is still
/// valid. The graph decides what "stopping" a node means downstream.
pub trait BlendGraph {
    type Node: Copy + Eq + Debug + 'static;
    type Layer: Copy + Eq + Debug + 'static;

    /// Whether `node` still exists.
    fn is_valid(&self, node: Self::Node) -> bool;

    /// Layer currently owning `node`.
    fn layer_of(&self, node: Self::Node) -> Option<Self::Layer>;

    /// Playback speed multiplier of `layer`.
    fn layer_speed(&self, layer: Self::Layer) -> f32;

    /// Number of playback commands issued on `layer` so far.
    fn command_count(&self, layer: Self::Layer) -> u64;

    fn weight(&self, node: Self::Node) -> f32;

    fn set_weight(&mut self, node: Self::Node, weight: f32);

    /// Weight `node` is being driven toward when no custom fade owns it.
    fn target_weight(&self, node: Self::Node) -> f32;

    /// Built-in fade rate of `node` in weight units per second; zero when the
    /// node is not fading on its own.
    fn fade_speed(&self, node: Self::Node) -> f32;

    fn set_fade_speed(&mut self, node: Self::Node, speed: f32);

    /// Appends every other node of `node`'s layer to `siblings`.
    fn collect_siblings(&self, node: Self::Node, siblings: &mut Vec<Self::Node>);

    /// Releases `node` from active playback once it has faded out.
    fn stop(&mut self, node: Self::Node);
}
