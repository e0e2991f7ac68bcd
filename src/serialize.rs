//! JSON emission for built trees.
//!
//! The output is a single hierarchical document: each node carries `id`, the
//! serialized state and an ordered `children` array in the same shape,
//! recursively, with an empty array at the leaves. Depth-bounded builds also
//! carry each node's `depth`. Field names and nesting are stable; consumers
//! parse them directly.
//!
//! The whole traversal runs under the tree lock, so emission is indivisible
//! with respect to concurrent child attaches.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeSeq, SerializeStruct, Serializer};
use serde::Serialize;

use crate::game::{GameState, Player, Winner};
use crate::tree::{Node, NodeId, Tree};

#[derive(thiserror::Error, Debug)]
pub enum SerializeError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the tree as a pretty-printed JSON string.
///
/// `with_depth` adds the per-node `depth` field; depth-bounded builds set it,
/// exhaustive builds leave it off.
pub fn to_json_string(tree: &Tree, with_depth: bool) -> Result<String, SerializeError> {
    tree.with_nodes(|nodes| {
        let doc = NodeView {
            nodes,
            id: NodeId::ROOT,
            with_depth,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    })
}

/// Stream the tree as pretty-printed JSON into `writer`.
pub fn write_json<W: Write>(writer: W, tree: &Tree, with_depth: bool) -> Result<(), SerializeError> {
    tree.with_nodes(|nodes| {
        let doc = NodeView {
            nodes,
            id: NodeId::ROOT,
            with_depth,
        };
        Ok(serde_json::to_writer_pretty(writer, &doc)?)
    })
}

/// Write the tree document to a file path.
pub fn write_json_to_path<P: AsRef<Path>>(
    path: P,
    tree: &Tree,
    with_depth: bool,
) -> Result<(), SerializeError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, tree, with_depth)?;
    writer.flush()?;
    Ok(())
}

/// Borrowed view of one node inside the locked arena.
struct NodeView<'a> {
    nodes: &'a [Node],
    id: NodeId,
    with_depth: bool,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.nodes[self.id.index()];
        let fields = if self.with_depth { 4 } else { 3 };
        let mut out = serializer.serialize_struct("Node", fields)?;
        out.serialize_field("id", &self.id.index())?;
        if self.with_depth {
            out.serialize_field("depth", &node.depth())?;
        }
        out.serialize_field("state", &StateDoc::new(node.state()))?;
        out.serialize_field(
            "children",
            &ChildrenView {
                nodes: self.nodes,
                ids: node.children(),
                with_depth: self.with_depth,
            },
        )?;
        out.end()
    }
}

struct ChildrenView<'a> {
    nodes: &'a [Node],
    ids: &'a [NodeId],
    with_depth: bool,
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeView {
                nodes: self.nodes,
                id,
                with_depth: self.with_depth,
            })?;
        }
        seq.end()
    }
}

/// Flat state record with the stable external field names.
#[derive(Serialize)]
struct StateDoc<'a> {
    sequence: &'a [u32],
    player1_score: i32,
    player2_score: i32,
    is_player1_turn: bool,
    is_terminal: bool,
    winner: u8,
}

impl<'a> StateDoc<'a> {
    fn new(state: &'a GameState) -> Self {
        StateDoc {
            sequence: state.sequence(),
            player1_score: state.score_one(),
            player2_score: state.score_two(),
            is_player1_turn: state.to_move() == Player::One,
            is_terminal: state.is_terminal(),
            winner: state.winner().map_or(0, Winner::code),
        }
    }
}
