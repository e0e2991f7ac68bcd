//! Tree construction engines (single-threaded and worker pool).
//!
//! This module provides two builder implementations:
//! - [`Explorer`]: recursive, depth-first, single-threaded.
//! - [`ExplorerParallel`]: a fixed pool of worker threads draining a shared
//!   work queue.
//!
//! Both variants share the transition model, the memo cache and the tree
//! type, and produce the same set of unique states and terminal outcomes for
//! a given starting sequence; only the scheduling differs. Ids may be
//! assigned in a different order under concurrency, so consumers should never
//! compare trees by literal node id.
//!
//! Quick start
//! ```
//! use sevens::explore::{Explorer, ExplorerParallel};
//! use sevens::game::GameState;
//!
//! let mut seq = Explorer::new();
//! let mut par = ExplorerParallel::new();
//! seq.build(GameState::new(vec![4, 2, 8, 1]));
//! par.build(GameState::new(vec![4, 2, 8, 1]));
//! assert_eq!(
//!     seq.last_stats().unique_states,
//!     par.last_stats().unique_states,
//! );
//! ```

use ahash::RandomState as AHasher;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::game::GameState;
use crate::tree::NodeId;

mod build_par;
mod build_seq;
pub(crate) mod queue;

pub use build_par::ExplorerParallel;
pub use build_seq::Explorer;

/// Configurable knobs shared by both builders.
#[derive(Debug, Clone, Default)]
pub struct ExploreConfig {
    /// Worker pool size. `None` uses available hardware parallelism.
    /// Ignored by the single-threaded builder.
    pub threads: Option<usize>,
    /// Depth bound: a node at this depth is never expanded, regardless of
    /// terminality. `None` explores exhaustively.
    pub max_depth: Option<u32>,
}

/// Counters from a single build, for process-level reporting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreStats {
    /// Total tree nodes created, including pruned duplicates and leaves.
    pub nodes_created: u64,
    /// Unique states recorded in the memo cache (states expanded once).
    pub unique_states: u64,
}

/// Visited-set keyed by full game state, mapping to the node that first
/// reached it.
///
/// This is the at-most-once gate: a state is expanded only by the caller
/// whose [`try_claim`](StateCache::try_claim) succeeded. Capacity grows
/// unbounded for the lifetime of one build; there is no eviction. Terminal
/// states are never recorded.
pub struct StateCache {
    map: DashMap<GameState, NodeId, AHasher>,
}

impl StateCache {
    pub fn new() -> Self {
        StateCache {
            map: DashMap::with_hasher(AHasher::new()),
        }
    }

    /// Atomically check-and-insert: if `state` is absent, record `owner` as
    /// its first discoverer and return true (the caller now owns expansion of
    /// this state); if present, return false and leave the entry untouched.
    ///
    /// The check and the insert happen in a single critical section, so two
    /// racing workers can never both see "absent".
    pub fn try_claim(&self, state: &GameState, owner: NodeId) -> bool {
        match self.map.entry(state.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(owner);
                true
            }
        }
    }

    /// Number of unique states claimed so far.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}
