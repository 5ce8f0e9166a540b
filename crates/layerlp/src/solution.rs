//! Reading solver output back into a layered graph.
//!
//! Only names matter here: positions come from `p_<node>_<layer>` values and edges from the
//! endpoints spelled out in every `d_<s1>_<t1>_<s2>_<t2>` name, which is why the generator
//! always emits one `d_s_t_s_t` marker per edge.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::var::ParsedVar;
use indexmap::IndexSet;

const BEGIN: &str = "BeginSolution";
const END: &str = "EndSolution";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    values: Vec<(String, f64)>,
}

impl Solution {
    /// Parses `<variable> <value>` lines. When a `BeginSolution` / `EndSolution` block is
    /// present only its contents are read.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .collect();

        let body: &[(usize, &str)] = match lines.iter().position(|(_, l)| *l == BEGIN) {
            Some(start) => {
                let rest = &lines[start + 1..];
                let end = rest.iter().position(|(_, l)| *l == END).unwrap_or(rest.len());
                &rest[..end]
            }
            None => &lines,
        };

        let mut values = Vec::new();
        for &(line, text) in body {
            if text.is_empty() {
                continue;
            }
            let malformed = || Error::MalformedSolution {
                line,
                text: text.to_string(),
            };
            let mut fields = text.split_whitespace();
            let (Some(name), Some(value), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed());
            };
            let value = value.parse::<f64>().map_err(|_| malformed())?;
            values.push((name.to_string(), value));
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, value)| value)
    }

    /// Rebuilds the layout: nodes sorted by `(layer, position)` with positions rounded to the
    /// nearest integer, edges in first-seen order.
    pub fn to_graph(&self, name: Option<&str>) -> Result<Graph> {
        let mut nodes: Vec<(&str, usize, i64)> = Vec::new();
        let mut edges: IndexSet<(&str, &str)> = IndexSet::new();

        for (var, value) in &self.values {
            match ParsedVar::parse(var) {
                Some(ParsedVar::Position { node, layer }) => {
                    nodes.push((node, layer, value.round() as i64));
                }
                Some(ParsedVar::Crossing { first, second }) => {
                    edges.insert(first);
                    edges.insert(second);
                }
                _ => {}
            }
        }
        nodes.sort_by_key(|&(_, layer, position)| (layer, position));

        let mut graph = Graph::new();
        graph.name = name.map(str::to_string);
        for (id, layer, position) in nodes {
            graph.add_node(id, layer, position)?;
        }
        graph.check_layers()?;
        for (source, target) in edges {
            graph.add_edge(source, target)?;
        }
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "decoded solution"
        );
        Ok(graph)
    }
}
