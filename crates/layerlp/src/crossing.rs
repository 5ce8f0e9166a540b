//! Edge-crossing indicators.
//!
//! Two edges can cross only if they lie in the same channel and share no endpoint. For such a
//! pair `(a, b)`, `(c, d)` with `a`, `c` on the lower layer, `d_ab_cd` is forced to 1 whenever
//! the two layers disagree on the order of the endpoints:
//!
//! ```text
//! d - x_c_a - x_b_d >= -1     c before a below, b before d above
//! d - x_a_c - x_d_b >= -1     a before c below, d before b above
//! ```

use crate::formulation::{Block, Category, Constraint};
use crate::graph::{EdgeIx, Graph};
use crate::var::Var;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Crossings {
    pub block: Block,
    /// Crossing-eligible pairs, first edge before second in build order.
    pub pairs: Vec<(EdgeIx, EdgeIx)>,
    /// Crossing variables touching each edge, indexed by edge.
    pub incident: Vec<Vec<Var>>,
}

impl Crossings {
    pub fn variables(&self) -> impl Iterator<Item = Var> + '_ {
        self.pairs.iter().map(|&(a, b)| Var::Crossing(a, b))
    }
}

/// `d_s_t_s_t = 0` for every edge, so each edge shows up in the solution even when it has no
/// crossing partner.
pub fn edge_markers(graph: &Graph) -> Block {
    let mut block = Block::default();
    for e in 0..graph.edge_count() {
        let marker = Var::Crossing(e, e);
        block.push(Constraint::eq(0.0).plus(marker));
        block.declare(Category::Binary, marker);
    }
    block
}

pub fn build(graph: &Graph) -> Crossings {
    let edge_count = graph.edge_count();
    let mut by_channel: FxHashMap<usize, Vec<EdgeIx>> = FxHashMap::default();
    for e in 0..edge_count {
        by_channel.entry(graph.channel(e)).or_default().push(e);
    }

    let mut crossings = Crossings {
        incident: vec![Vec::new(); edge_count],
        ..Default::default()
    };

    for first in 0..edge_count {
        let (a, b) = graph.oriented(first);
        let peers = &by_channel[&graph.channel(first)];
        for &second in peers.iter().filter(|&&e| e > first) {
            let (c, d) = graph.oriented(second);
            if a == c || b == d {
                continue;
            }

            let var = Var::Crossing(first, second);
            crossings.block.push(
                Constraint::ge(-1.0)
                    .plus(var)
                    .minus(Var::order(c, a))
                    .minus(Var::order(b, d)),
            );
            crossings.block.push(
                Constraint::ge(-1.0)
                    .plus(var)
                    .minus(Var::order(a, c))
                    .minus(Var::order(d, b)),
            );
            crossings.block.declare(Category::Binary, var);
            crossings.pairs.push((first, second));
            crossings.incident[first].push(var);
            crossings.incident[second].push(var);
        }
    }

    tracing::debug!(
        channels = by_channel.len(),
        pairs = crossings.pairs.len(),
        "built crossing constraints"
    );
    crossings
}
