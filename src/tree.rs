use std::sync::Mutex;

use crate::game::GameState;

/// Handle to a node in a [`Tree`].
///
/// Ids are monotonic and unique within one tree. They exist for diagnostics
/// and serialization only; node identity never participates in state
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One tree node: the state it represents, its distance from the root and
/// its children in discovery (pair index) order.
#[derive(Debug)]
pub struct Node {
    state: GameState,
    depth: u32,
    children: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Shared game tree, stored as a handle-indexed arena.
///
/// Nodes are owned exclusively by the arena and linked under exactly one
/// parent; once a node's children are attached they are never detached or
/// rewritten. All mutation and traversal go through the one mutex scoped to
/// the tree, so a child append is indivisible with respect to appends on
/// sibling subtrees and to serialization.
pub struct Tree {
    nodes: Mutex<Vec<Node>>,
}

impl Tree {
    /// A tree holding only the root state.
    pub fn new(root: GameState) -> Self {
        Tree {
            nodes: Mutex::new(vec![Node {
                state: root,
                depth: 0,
                children: Vec::new(),
            }]),
        }
    }

    /// Allocate one child node per successor state and link them under
    /// `parent`, as a single atomic append.
    ///
    /// Returns the fresh ids in the same order as `states`. A parent receives
    /// children at most once; whichever caller claimed the parent's state in
    /// the memo cache is the only one allowed here.
    pub fn attach_children(&self, parent: NodeId, states: &[GameState]) -> Vec<NodeId> {
        let mut nodes = self.nodes.lock().expect("tree mutex poisoned");
        debug_assert!(
            nodes[parent.0].children.is_empty(),
            "children attached twice to node {}",
            parent.0
        );
        let depth = nodes[parent.0].depth + 1;
        let mut ids = Vec::with_capacity(states.len());
        for state in states {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                state: state.clone(),
                depth,
                children: Vec::new(),
            });
            ids.push(id);
        }
        nodes[parent.0].children.extend_from_slice(&ids);
        ids
    }

    /// Total nodes created so far.
    pub fn len(&self) -> usize {
        self.nodes.lock().expect("tree mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` over the arena under the tree lock.
    ///
    /// Readers that need a consistent view of the whole tree (the serializer,
    /// tests) use this; the lock is held for the full traversal.
    pub fn with_nodes<R>(&self, f: impl FnOnce(&[Node]) -> R) -> R {
        let nodes = self.nodes.lock().expect("tree mutex poisoned");
        f(&nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_is_a_lone_root() {
        let tree = Tree::new(GameState::new(vec![2, 5]));
        assert_eq!(tree.len(), 1);
        tree.with_nodes(|nodes| {
            assert_eq!(nodes[0].depth(), 0);
            assert!(nodes[0].children().is_empty());
        });
    }

    #[test]
    fn attach_links_children_in_order() {
        let root = GameState::new(vec![2, 5, 9]);
        let successors = root.next_states();
        let tree = Tree::new(root);
        let ids = tree.attach_children(NodeId::ROOT, &successors);

        assert_eq!(ids.len(), 2);
        assert_eq!(tree.len(), 3);
        tree.with_nodes(|nodes| {
            assert_eq!(nodes[0].children(), &ids[..]);
            for (id, state) in ids.iter().zip(&successors) {
                assert_eq!(nodes[id.index()].state(), state);
                assert_eq!(nodes[id.index()].depth(), 1);
            }
        });
    }

    #[test]
    fn depth_grows_per_level() {
        let root = GameState::new(vec![1, 1, 1]);
        let level_one = root.next_states();
        let tree = Tree::new(root);
        let ids = tree.attach_children(NodeId::ROOT, &level_one);
        let level_two = level_one[0].next_states();
        let grand = tree.attach_children(ids[0], &level_two);
        tree.with_nodes(|nodes| {
            assert_eq!(nodes[grand[0].index()].depth(), 2);
        });
    }
}
