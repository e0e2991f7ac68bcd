use std::thread;

use crate::explore::queue::{WorkItem, WorkQueue};
use crate::explore::{ExploreConfig, ExploreStats, StateCache};
use crate::game::GameState;
use crate::tree::{NodeId, Tree};

/// Pool size when hardware parallelism cannot be detected.
const FALLBACK_THREADS: usize = 4;

/// Worker-pool tree builder.
///
/// A fixed set of OS threads drains a shared queue of pending expansions.
/// Each worker claims the popped state in the memo cache, computes its
/// successors, attaches the children to the owning node in one locked append
/// and re-enqueues the non-terminal children. Workers block on the queue
/// between items; the queue itself detects quiescence through its
/// pending-task counter, so shutdown needs no stop flag and cannot drop a
/// racing push.
///
/// The queue, the memo cache and the tree are guarded independently and no
/// operation holds more than one of the three locks at a time.
pub struct ExplorerParallel {
    cfg: ExploreConfig,
    stats: ExploreStats,
}

impl ExplorerParallel {
    pub fn new() -> Self {
        Self::with_config(ExploreConfig::default())
    }

    pub fn with_config(cfg: ExploreConfig) -> Self {
        ExplorerParallel {
            cfg,
            stats: ExploreStats::default(),
        }
    }

    /// Build the full (or depth-bounded) tree rooted at `initial`.
    ///
    /// Blocks until the state space is exhausted; in-flight expansions always
    /// run to completion. The pool lives for exactly one build.
    pub fn build(&mut self, initial: GameState) -> Tree {
        let tree = Tree::new(initial.clone());
        let cache = StateCache::new();
        let queue = WorkQueue::new();
        queue.push(WorkItem {
            node: NodeId::ROOT,
            state: initial,
            depth: 0,
        });

        let threads = self.pool_size();
        let max_depth = self.cfg.max_depth;
        log::debug!("expanding on {threads} worker threads");
        thread::scope(|scope| {
            for _ in 0..threads {
                scope.spawn(|| worker_loop(&queue, &tree, &cache, max_depth));
            }
        });

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

    fn pool_size(&self) -> usize {
        match self.cfg.threads {
            Some(n) => n.max(1),
            None => thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_THREADS),
        }
    }
}

impl Default for ExplorerParallel {
    fn default() -> Self {
        Self::new()
    }
}

fn worker_loop(queue: &WorkQueue, tree: &Tree, cache: &StateCache, max_depth: Option<u32>) {
    while let Some(item) = queue.pop() {
        expand_item(item, queue, tree, cache, max_depth);
        // Children are already pushed; only now may the task stop counting
        // as in-flight.
        queue.complete();
    }
}

fn expand_item(
    item: WorkItem,
    queue: &WorkQueue,
    tree: &Tree,
    cache: &StateCache,
    max_depth: Option<u32>,
) {
    let WorkItem { node, state, depth } = item;
    if state.is_terminal() {
        return;
    }
    if let Some(bound) = max_depth {
        if depth >= bound {
            return;
        }
    }
    if !cache.try_claim(&state, node) {
        // Duplicate path: the first owner expands this state, this branch
        // stays a leaf.
        return;
    }
    let successors = state.next_states();
    let ids = tree.attach_children(node, &successors);
    for (id, child) in ids.into_iter().zip(successors) {
        if !child.is_terminal() {
            queue.push(WorkItem {
                node: id,
                state: child,
                depth: depth + 1,
            });
        }
    }
}
