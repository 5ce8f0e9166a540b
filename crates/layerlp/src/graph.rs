//! Layered graph model and the `.sgf` line format.
//!
//! An `.sgf` file is a sequence of lines:
//!
//! ```text
//! c <comment text>
//! t <name> [<nodes> <edges> <layers>]
//! n <id> <layer> <position>
//! e <source> <target>
//! ```
//!
//! Blank lines are ignored and the order of `n`/`e` lines is insignificant. Nodes and edges
//! keep their declaration order, which is the build order for every formulation pass.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::fmt::Write as _;
use std::io::{BufRead, Read};

pub type NodeIx = usize;
pub type EdgeIx = usize;

/// Punctuation allowed in node ids besides ASCII letters and digits. Ids end up inside LP
/// variable names, so LP operators and delimiters (`+ - * / ^ : < > = [ ]`), whitespace and the
/// `_` separator are all excluded.
const ID_PUNCTUATION: &[char] = &['.', '!', '#', '$', '%', '&', ',', ';', '?', '@', '{', '}', '|', '~'];

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ID_PUNCTUATION.contains(&c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub layer: usize,
    /// Position from the input file. Informational only: solved order variables are authoritative.
    pub position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeIx,
    pub target: NodeIx,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub name: Option<String>,
    pub comments: Vec<String>,
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    /// Unordered endpoint pairs of `edges`.
    links: FxHashSet<(NodeIx, NodeIx)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `.sgf` text. Edges may refer to nodes declared further down the file.
    pub fn parse(text: &str) -> Result<Self> {
        let mut graph = Graph::new();
        let mut pending_edges: Vec<(String, String)> = Vec::new();
        let mut node_lines: Vec<(usize, String)> = Vec::new();
        let mut saw_content = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            saw_content = true;

            let malformed = |reason: &'static str| Error::MalformedLine {
                line,
                text: trimmed.to_string(),
                reason,
            };

            let mut fields = trimmed.split_whitespace();
            match fields.next() {
                Some("c") => {
                    let body = trimmed[1..].trim();
                    graph.comments.push(body.to_string());
                }
                Some("t") => {
                    graph.name = fields.next().map(str::to_string);
                }
                Some("n") => {
                    let (Some(id), Some(layer), Some(position)) =
                        (fields.next(), fields.next(), fields.next())
                    else {
                        return Err(malformed("node line needs `n <id> <layer> <position>`"));
                    };
                    let layer = layer
                        .parse::<usize>()
                        .map_err(|_| malformed("layer is not a non-negative integer"))?;
                    let position = position
                        .parse::<i64>()
                        .map_err(|_| malformed("position is not an integer"))?;
                    graph.add_node(id, layer, position)?;
                    node_lines.push((line, trimmed.to_string()));
                }
                Some("e") => {
                    let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
                        return Err(malformed("edge line needs `e <source> <target>`"));
                    };
                    pending_edges.push((source.to_string(), target.to_string()));
                }
                _ => return Err(malformed("unrecognized line type")),
            }
        }

        if !saw_content {
            return Err(Error::EmptyInput);
        }

        if let Some(ix) = graph.sparse_layer_node() {
            let (line, text) = node_lines.swap_remove(ix);
            return Err(Error::MalformedLine {
                line,
                text,
                reason: "layer is larger than the number of nodes",
            });
        }

        for (source, target) in pending_edges {
            graph.add_edge(&source, &target)?;
        }

        if graph.edges.is_empty() {
            tracing::warn!(nodes = graph.node_count(), "graph has no edges");
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            layers = graph.layer_count(),
            comments = graph.comments.len(),
            "parsed sgf graph"
        );
        Ok(graph)
    }

    pub fn read(mut input: impl BufRead) -> Result<Self> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn add_node(&mut self, id: &str, layer: usize, position: i64) -> Result<NodeIx> {
        if !is_valid_id(id) {
            return Err(Error::InvalidNodeId { id: id.to_string() });
        }
        if self.nodes.contains_key(id) {
            return Err(Error::DuplicateNode { id: id.to_string() });
        }
        let (ix, _) = self.nodes.insert_full(id.to_string(), Node { layer, position });
        Ok(ix)
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeIx> {
        let lookup = |id: &str| {
            self.nodes
                .get_full(id)
                .map(|(ix, _, node)| (ix, node.layer))
                .ok_or_else(|| Error::UnknownNode {
                    node: id.to_string(),
                })
        };
        let (s, source_layer) = lookup(source)?;
        let (t, target_layer) = lookup(target)?;
        if source_layer.abs_diff(target_layer) != 1 {
            return Err(Error::NonAdjacentEdge {
                source_id: source.to_string(),
                target_id: target.to_string(),
                source_layer,
                target_layer,
            });
        }
        if !self.links.insert((s.min(t), s.max(t))) {
            return Err(Error::DuplicateEdge {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }
        self.edges.push(Edge {
            source: s,
            target: t,
        });
        Ok(self.edges.len() - 1)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of layers, counting from 0 up to the highest layer any node is on.
    pub fn layer_count(&self) -> usize {
        self.nodes
            .values()
            .map(|n| n.layer.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    /// # Panics
    ///
    /// Panics if `ix` is not a node of this graph.
    pub fn id(&self, ix: NodeIx) -> &str {
        match self.nodes.get_index(ix) {
            Some((id, _)) => id,
            None => panic!("node index {ix} out of range ({} nodes)", self.nodes.len()),
        }
    }

    pub fn node(&self, ix: NodeIx) -> Option<&Node> {
        self.nodes.get_index(ix).map(|(_, node)| node)
    }

    /// # Panics
    ///
    /// Panics if `ix` is not a node of this graph.
    pub fn layer_of(&self, ix: NodeIx) -> usize {
        self.nodes[ix].layer
    }

    pub fn find(&self, id: &str) -> Option<NodeIx> {
        self.nodes.get_index_of(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &str, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, (id, node))| (ix, id.as_str(), node))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node indices grouped by layer, each layer in build order.
    pub fn layers(&self) -> Vec<Vec<NodeIx>> {
        let mut layers: Vec<Vec<NodeIx>> = vec![Vec::new(); self.layer_count()];
        for (ix, _, node) in self.nodes() {
            layers[node.layer].push(ix);
        }
        layers
    }

    /// First node whose layer exceeds the node count. Layers are dense, so such a node means
    /// the layer index is bogus, and sizing per-layer tables by it would be unbounded.
    pub fn sparse_layer_node(&self) -> Option<NodeIx> {
        let limit = self.nodes.len();
        self.nodes.values().position(|n| n.layer > limit)
    }

    /// Fails with [`Error::LayerOutOfRange`] for graphs built through [`Graph::add_node`] whose
    /// layers are not plausible (see [`Graph::sparse_layer_node`]).
    pub fn check_layers(&self) -> Result<()> {
        match self.sparse_layer_node() {
            Some(ix) => Err(Error::LayerOutOfRange {
                node: self.id(ix).to_string(),
                layer: self.layer_of(ix),
                nodes: self.node_count(),
            }),
            None => Ok(()),
        }
    }

    /// The channel an edge belongs to: the larger of its two endpoint layers.
    pub fn channel(&self, e: EdgeIx) -> usize {
        let edge = self.edges[e];
        self.layer_of(edge.source).max(self.layer_of(edge.target))
    }

    /// Endpoints of an edge as `(lower layer endpoint, upper layer endpoint)`, independent of
    /// the declared direction.
    pub fn oriented(&self, e: EdgeIx) -> (NodeIx, NodeIx) {
        let edge = self.edges[e];
        if self.layer_of(edge.source) < self.layer_of(edge.target) {
            (edge.source, edge.target)
        } else {
            (edge.target, edge.source)
        }
    }

    pub fn channel_count(&self) -> usize {
        let mut channels: Vec<usize> = (0..self.edges.len()).map(|e| self.channel(e)).collect();
        channels.sort_unstable();
        channels.dedup();
        channels.len()
    }

    /// Renders the graph back into `.sgf` text.
    pub fn to_sgf(&self) -> String {
        let mut out = String::new();
        for comment in &self.comments {
            let _ = writeln!(out, "c {comment}");
        }
        let _ = writeln!(
            out,
            "t {} {} {} {}",
            self.name.as_deref().unwrap_or("graph"),
            self.node_count(),
            self.edge_count(),
            self.layer_count()
        );
        for (_, id, node) in self.nodes() {
            let _ = writeln!(out, "n {id} {} {}", node.layer, node.position);
        }
        for edge in &self.edges {
            let _ = writeln!(out, "e {} {}", self.id(edge.source), self.id(edge.target));
        }
        out
    }
}
