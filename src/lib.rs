//! sevens: exhaustive tree builder for a two-player pairwise-reduction game.
//!
//! Two players take turns collapsing an adjacent pair of tokens into a single
//! replacement token, scoring on the pair sum relative to seven, until one
//! token remains. This crate materializes the complete (or depth-bounded)
//! state space of that game as an explicit tree:
//! - A [`GameState`](game::GameState) value type with the pure transition
//!   model (`game` module)
//! - Sequential and worker-pool builders sharing one memo cache, so each
//!   unique state is expanded at most once (`explore` module)
//! - A stable JSON document emitter for the built tree (`serialize` module)
//!
//! Quick start:
//! ```
//! use sevens::explore::ExplorerParallel;
//! use sevens::game::GameState;
//! use sevens::serialize;
//!
//! let mut explorer = ExplorerParallel::new();
//! let tree = explorer.build(GameState::new(vec![3, 4, 5]));
//! let stats = explorer.last_stats();
//! assert_eq!(stats.nodes_created, tree.len() as u64);
//!
//! let json = serialize::to_json_string(&tree, false).unwrap();
//! assert!(json.contains("\"sequence\""));
//! ```
//!
//! Note: node ids are assigned in scheduling order and may differ between
//! runs of the parallel builder; everything else about the built tree is
//! deterministic for a fixed starting sequence and depth bound.

pub mod explore;
pub mod game;
pub mod serialize;
pub mod tree;
