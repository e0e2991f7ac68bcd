use crate::explore::{ExploreConfig, ExploreStats, StateCache};
use crate::game::GameState;
use crate::tree::{NodeId, Tree};

/// Single-threaded recursive tree builder.
///
/// Shares the transition model, memo cache and tree type with
/// [`ExplorerParallel`](crate::explore::ExplorerParallel); only the
/// scheduling differs (direct call stack, depth-first, children visited in
/// pair order). Useful as an oracle when validating the concurrent engine.
pub struct Explorer {
    cfg: ExploreConfig,
    stats: ExploreStats,
}

impl Explorer {
    pub fn new() -> Self {
        Self::with_config(ExploreConfig::default())
    }

    pub fn with_config(cfg: ExploreConfig) -> Self {
        Explorer {
            cfg,
            stats: ExploreStats::default(),
        }
    }

    /// Build the full (or depth-bounded) tree rooted at `initial`.
    pub fn build(&mut self, initial: GameState) -> Tree {
        let tree = Tree::new(initial.clone());
        let cache = StateCache::new();
        self.expand_from(&tree, &cache, NodeId::ROOT, initial, 0);
        self.stats = ExploreStats {
            nodes_created: tree.len() as u64,
            unique_states: cache.len() as u64,
        };
        tree
    }

    /// Counters from the last call to [`build`](Self::build).
    #[inline]
    pub fn last_stats(&self) -> ExploreStats {
        self.stats
    }

    fn expand_from(
        &self,
        tree: &Tree,
        cache: &StateCache,
        node: NodeId,
        state: GameState,
        depth: u32,
    ) {
        if state.is_terminal() {
            return;
        }
        if let Some(bound) = self.cfg.max_depth {
            if depth >= bound {
                return;
            }
        }
        if !cache.try_claim(&state, node) {
            // Duplicate path: the first owner expands this state, this
            // branch stays a leaf.
            return;
        }
        let successors = state.next_states();
        let ids = tree.attach_children(node, &successors);
        for (id, child) in ids.into_iter().zip(successors) {
            self.expand_from(tree, cache, id, child, depth + 1);
        }
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Winner;

    #[test]
    fn terminal_root_yields_a_lone_leaf() {
        let mut explorer = Explorer::new();
        let tree = explorer.build(GameState::new(vec![8]));
        assert_eq!(tree.len(), 1);
        assert_eq!(explorer.last_stats().nodes_created, 1);
        assert_eq!(explorer.last_stats().unique_states, 0);
    }

    #[test]
    fn three_four_builds_a_two_node_tree() {
        let mut explorer = Explorer::new();
        let tree = explorer.build(GameState::new(vec![3, 4]));
        assert_eq!(tree.len(), 2);
        assert_eq!(explorer.last_stats().unique_states, 1);
        tree.with_nodes(|nodes| {
            let leaf = &nodes[1];
            assert!(leaf.state().is_terminal());
            assert_eq!(leaf.state().winner(), Some(Winner::PlayerTwo));
        });
    }

    #[test]
    fn duplicate_branches_expand_once() {
        // Both children of [1,9,1] are the same state; only the first claim
        // grows a subtree, the twin stays a leaf.
        let mut explorer = Explorer::new();
        let tree = explorer.build(GameState::new(vec![1, 9, 1]));
        tree.with_nodes(|nodes| {
            let root_children = nodes[0].children();
            assert_eq!(root_children.len(), 2);
            let expanded: Vec<_> = root_children
                .iter()
                .filter(|id| !nodes[id.index()].children().is_empty())
                .collect();
            assert_eq!(expanded.len(), 1);
        });
        assert_eq!(explorer.last_stats().nodes_created, 4);
        assert_eq!(explorer.last_stats().unique_states, 2);
    }

    #[test]
    fn depth_bound_is_never_exceeded() {
        let cfg = ExploreConfig {
            max_depth: Some(2),
            ..Default::default()
        };
        let mut explorer = Explorer::with_config(cfg);
        let tree = explorer.build(GameState::new(vec![1, 2, 3, 4, 5, 6]));
        tree.with_nodes(|nodes| {
            for node in nodes {
                assert!(node.depth() <= 2);
                if node.depth() == 2 {
                    assert!(node.children().is_empty());
                }
            }
        });
    }

    #[test]
    fn loose_depth_bound_matches_exhaustive_build() {
        let sequence = vec![6, 1, 8, 2, 4];
        let mut unbounded = Explorer::new();
        unbounded.build(GameState::new(sequence.clone()));
        let mut bounded = Explorer::with_config(ExploreConfig {
            max_depth: Some(32),
            ..Default::default()
        });
        bounded.build(GameState::new(sequence));
        assert_eq!(
            unbounded.last_stats().nodes_created,
            bounded.last_stats().nodes_created
        );
        assert_eq!(
            unbounded.last_stats().unique_states,
            bounded.last_stats().unique_states
        );
    }
}
