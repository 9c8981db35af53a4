//! In-memory blend graph.
//!
//! [`BlendTree`] is a small reference host: layers of nodes with weights,
//! target weights and built-in linear fades. It is enough to drive the
//! scheduler in tests and tools without a real animation backend.

use super::graph::BlendGraph;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to a node of a [`BlendTree`].
    pub struct NodeId;

    /// Handle to a layer of a [`BlendTree`].
    pub struct LayerId;
}

#[derive(Debug)]
struct LayerData {
    speed: f32,
    command_count: u64,
    nodes: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct NodeData {
    layer: Option<LayerId>,
    weight: f32,
    target_weight: f32,
    fade_speed: f32,
    playing: bool,
}

#[derive(Debug, Default)]
pub struct BlendTree {
    layers: SlotMap<LayerId, LayerData>,
    nodes: SlotMap<NodeId, NodeData>,
}

impl BlendTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_layer(&mut self) -> LayerId {
        self.layers.insert(LayerData {
            speed: 1.0,
            command_count: 0,
            nodes: Vec::new(),
        })
    }

    pub fn set_layer_speed(&mut self, layer: LayerId, speed: f32) {
        if let Some(data) = self.layers.get_mut(layer) {
            data.speed = speed;
        }
    }

    pub fn add_node(&mut self, layer: LayerId) -> NodeId {
        let node = self.nodes.insert(NodeData {
            layer: Some(layer),
            ..NodeData::default()
        });
        if let Some(data) = self.layers.get_mut(layer) {
            data.nodes.push(node);
        }
        node
    }

    /// Adds a node that is not part of any layer yet.
    pub fn add_detached_node(&mut self) -> NodeId {
        self.nodes.insert(NodeData::default())
    }

    pub fn remove_node(&mut self, node: NodeId) {
        self.detach(node);
        self.nodes.remove(node);
    }

    /// Moves `node` to `layer`, keeping its weights.
    pub fn move_node(&mut self, node: NodeId, layer: LayerId) {
        if !self.nodes.contains_key(node) || !self.layers.contains_key(layer) {
            return;
        }
        self.detach(node);
        self.nodes[node].layer = Some(layer);
        self.layers[layer].nodes.push(node);
    }

    /// Issues a play command: `node` fades in to weight 1 over `fade_duration`
    /// seconds while every other node of its layer fades out.
    ///
    /// Bumps the layer's command count, superseding any fade started by an
    /// earlier command. A non-positive duration applies the weights at once.
    pub fn play(&mut self, node: NodeId, fade_duration: f32) {
        let Some(layer) = self.nodes.get(node).and_then(|data| data.layer) else {
            return;
        };
        let Some(layer_data) = self.layers.get_mut(layer) else {
            return;
        };
        layer_data.command_count += 1;

        let fade_speed = if fade_duration > 0.0 {
            1.0 / fade_duration
        } else {
            0.0
        };

        for &member in &layer_data.nodes {
            let data = &mut self.nodes[member];
            let target_weight = if member == node { 1.0 } else { 0.0 };
            data.target_weight = target_weight;

            if member == node {
                data.playing = true;
            }
            if fade_speed == 0.0 {
                data.weight = target_weight;
                data.fade_speed = 0.0;
                if target_weight == 0.0 {
                    data.playing = false;
                }
            } else if data.weight != target_weight {
                data.fade_speed = fade_speed;
            } else {
                data.fade_speed = 0.0;
            }
        }
    }

    /// Advances built-in linear fades. Nodes owned by a custom fade have a
    /// zero fade speed and are left alone.
    pub fn update(&mut self, delta_time: f32) {
        for data in self.nodes.values_mut() {
            if data.fade_speed == 0.0 {
                continue;
            }
            let layer_speed = data
                .layer
                .and_then(|layer| self.layers.get(layer))
                .map_or(1.0, |layer| layer.speed);
            let step = data.fade_speed * delta_time * layer_speed;

            if (data.target_weight - data.weight).abs() <= step {
                data.weight = data.target_weight;
                data.fade_speed = 0.0;
                if data.weight == 0.0 {
                    data.playing = false;
                }
            } else if data.target_weight > data.weight {
                data.weight += step;
            } else {
                data.weight -= step;
            }
        }
    }

    pub fn is_playing(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|data| data.playing)
    }

    pub fn set_target_weight(&mut self, node: NodeId, weight: f32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.target_weight = weight;
        }
    }

    pub fn layer_nodes(&self, layer: LayerId) -> &[NodeId] {
        self.layers
            .get(layer)
            .map(|data| data.nodes.as_slice())
            .unwrap_or(&[])
    }

    fn detach(&mut self, node: NodeId) {
        let Some(layer) = self.nodes.get_mut(node).and_then(|data| data.layer.take()) else {
            return;
        };
        if let Some(data) = self.layers.get_mut(layer) {
            data.nodes.retain(|&member| member != node);
        }
    }
}

impl BlendGraph for BlendTree {
    type Node = NodeId;
    type Layer = LayerId;

    fn is_valid(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn layer_of(&self, node: NodeId) -> Option<LayerId> {
        self.nodes.get(node).and_then(|data| data.layer)
    }

    fn layer_speed(&self, layer: LayerId) -> f32 {
        self.layers.get(layer).map_or(0.0, |data| data.speed)
    }

    fn command_count(&self, layer: LayerId) -> u64 {
        self.layers.get(layer).map_or(0, |data| data.command_count)
    }

    fn weight(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |data| data.weight)
    }

    fn set_weight(&mut self, node: NodeId, weight: f32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.weight = weight;
        }
    }

    fn target_weight(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |data| data.target_weight)
    }

    fn fade_speed(&self, node: NodeId) -> f32 {
        self.nodes.get(node).map_or(0.0, |data| data.fade_speed)
    }

    fn set_fade_speed(&mut self, node: NodeId, speed: f32) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.fade_speed = speed;
        }
    }

    fn collect_siblings(&self, node: NodeId, siblings: &mut Vec<NodeId>) {
        let Some(layer) = self.layer_of(node) else {
            return;
        };
        siblings.extend(
            self.layer_nodes(layer)
                .iter()
                .copied()
                .filter(|&member| member != node),
        );
    }

    fn stop(&mut self, node: NodeId) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.playing = false;
            data.fade_speed = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_without_fade_snaps_weights() {
        let mut tree = BlendTree::new();
        let layer = tree.add_layer();
        let a = tree.add_node(layer);
        let b = tree.add_node(layer);

        tree.play(a, 0.0);
        tree.play(b, 0.0);

        assert_eq!(tree.weight(a), 0.0);
        assert_eq!(tree.weight(b), 1.0);
        assert!(!tree.is_playing(a));
        assert!(tree.is_playing(b));
        assert_eq!(tree.command_count(layer), 2);
    }

    #[test]
    fn built_in_fade_moves_linearly() {
        let mut tree = BlendTree::new();
        let layer = tree.add_layer();
        let a = tree.add_node(layer);
        let b = tree.add_node(layer);
        tree.play(a, 0.0);

        tree.play(b, 0.5);
        tree.update(0.25);

        assert!((tree.weight(a) - 0.5).abs() < 1e-6);
        assert!((tree.weight(b) - 0.5).abs() < 1e-6);

        tree.update(0.25);
        assert_eq!(tree.weight(a), 0.0);
        assert_eq!(tree.weight(b), 1.0);
        assert!(!tree.is_playing(a));
        assert_eq!(tree.fade_speed(b), 0.0);
    }

    #[test]
    fn layer_speed_scales_built_in_fade() {
        let mut tree = BlendTree::new();
        let layer = tree.add_layer();
        tree.set_layer_speed(layer, 2.0);
        let a = tree.add_node(layer);

        tree.play(a, 1.0);
        tree.update(0.25);

        assert!((tree.weight(a) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn move_node_changes_layer_membership() {
        let mut tree = BlendTree::new();
        let first = tree.add_layer();
        let second = tree.add_layer();
        let node = tree.add_node(first);

        tree.move_node(node, second);

        assert_eq!(tree.layer_of(node), Some(second));
        assert!(tree.layer_nodes(first).is_empty());
        assert_eq!(tree.layer_nodes(second), &[node]);
    }

    #[test]
    fn collect_siblings_excludes_node_itself() {
        let mut tree = BlendTree::new();
        let layer = tree.add_layer();
        let a = tree.add_node(layer);
        let b = tree.add_node(layer);
        let mut siblings = Vec::new();

        tree.collect_siblings(a, &mut siblings);

        assert_eq!(siblings, vec![b]);
    }

    #[test]
    fn removed_node_is_invalid() {
        let mut tree = BlendTree::new();
        let layer = tree.add_layer();
        let a = tree.add_node(layer);

        tree.remove_node(a);

        assert!(!tree.is_valid(a));
        assert!(tree.layer_nodes(layer).is_empty());
    }
}
