//! Typed variable keys and their textual names.
//!
//! Variables are built as [`Var`] values holding node/edge indices and are only turned into text
//! when a program is emitted. The textual scheme is the contract with the solution reader
//! ([`ParsedVar::parse`] is its exact inverse), so both live here and are versioned together.
//!
//! | variable | name |
//! |---|---|
//! | order | `x_<before>_<after>` |
//! | position | `p_<node>_<layer>` |
//! | crossing | `d_<source1>_<target1>_<source2>_<target2>` |
//! | stretch | `s_<source>_<target>` |
//! | raw stretch | `z_<source>_<target>` |
//! | aggregates | `total`, `bottleneck`, `stretch`, `bn_stretch` |

use crate::graph::{EdgeIx, Graph, NodeIx};
use std::fmt;

/// Bump when any name in the table above changes.
pub const NAMING_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    /// 1 iff `before` precedes `after` on their shared layer.
    Order { before: NodeIx, after: NodeIx },
    Position(NodeIx),
    /// 1 iff the two edges cross. `Crossing(e, e)` is the per-edge marker fixed to 0.
    Crossing(EdgeIx, EdgeIx),
    Stretch(EdgeIx),
    RawStretch(EdgeIx),
    Total,
    Bottleneck,
    TotalStretch,
    BottleneckStretch,
}

impl Var {
    pub fn order(before: NodeIx, after: NodeIx) -> Self {
        Var::Order { before, after }
    }

    pub fn display<'g>(self, graph: &'g Graph) -> VarName<'g> {
        VarName { var: self, graph }
    }

    pub fn name(self, graph: &Graph) -> String {
        self.display(graph).to_string()
    }
}

pub struct VarName<'g> {
    var: Var,
    graph: &'g Graph,
}

impl fmt::Display for VarName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.graph;
        let edge = |e: EdgeIx| {
            let edge = g.edges()[e];
            (g.id(edge.source), g.id(edge.target))
        };
        match self.var {
            Var::Order { before, after } => write!(f, "x_{}_{}", g.id(before), g.id(after)),
            Var::Position(n) => write!(f, "p_{}_{}", g.id(n), g.layer_of(n)),
            Var::Crossing(a, b) => {
                let (s1, t1) = edge(a);
                let (s2, t2) = edge(b);
                write!(f, "d_{s1}_{t1}_{s2}_{t2}")
            }
            Var::Stretch(e) => {
                let (s, t) = edge(e);
                write!(f, "s_{s}_{t}")
            }
            Var::RawStretch(e) => {
                let (s, t) = edge(e);
                write!(f, "z_{s}_{t}")
            }
            Var::Total => f.write_str("total"),
            Var::Bottleneck => f.write_str("bottleneck"),
            Var::TotalStretch => f.write_str("stretch"),
            Var::BottleneckStretch => f.write_str("bn_stretch"),
        }
    }
}

/// A variable name read back from solver output, with ids as borrowed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedVar<'a> {
    Order {
        before: &'a str,
        after: &'a str,
    },
    Position {
        node: &'a str,
        layer: usize,
    },
    Crossing {
        first: (&'a str, &'a str),
        second: (&'a str, &'a str),
    },
    Stretch {
        source: &'a str,
        target: &'a str,
    },
    RawStretch {
        source: &'a str,
        target: &'a str,
    },
    Total,
    Bottleneck,
    TotalStretch,
    BottleneckStretch,
}

impl<'a> ParsedVar<'a> {
    pub fn parse(name: &'a str) -> Option<Self> {
        match name {
            "total" => return Some(ParsedVar::Total),
            "bottleneck" => return Some(ParsedVar::Bottleneck),
            "stretch" => return Some(ParsedVar::TotalStretch),
            "bn_stretch" => return Some(ParsedVar::BottleneckStretch),
            _ => {}
        }

        let mut parts = name.split('_');
        let kind = parts.next()?;
        let fields: Vec<&'a str> = parts.collect();
        if fields.iter().any(|f| f.is_empty()) {
            return None;
        }
        match (kind, fields.as_slice()) {
            ("x", &[before, after]) => Some(ParsedVar::Order { before, after }),
            ("p", &[node, layer]) => Some(ParsedVar::Position {
                node,
                layer: layer.parse().ok()?,
            }),
            ("d", &[s1, t1, s2, t2]) => Some(ParsedVar::Crossing {
                first: (s1, t1),
                second: (s2, t2),
            }),
            ("s", &[source, target]) => Some(ParsedVar::Stretch { source, target }),
            ("z", &[source, target]) => Some(ParsedVar::RawStretch { source, target }),
            _ => None,
        }
    }
}
