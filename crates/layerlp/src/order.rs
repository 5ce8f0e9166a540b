//! Relative-order and position constraints.
//!
//! For each layer, binary `x_i_j` encodes "i precedes j". Antisymmetry makes exactly one of
//! `x_i_j`, `x_j_i` true and two transitivity inequalities per triple rule out 3-cycles; the
//! other four rotations of the triangle inequality follow from these two plus antisymmetry.
//! Positions are then defined as the number of predecessors on the layer.

use crate::formulation::{Block, Category, Constraint};
use crate::graph::Graph;
use crate::var::Var;

pub fn build(graph: &Graph) -> Block {
    let layers = graph.layers();
    let mut block = Block::default();

    for layer in &layers {
        for (a, &i) in layer.iter().enumerate() {
            for &j in &layer[a + 1..] {
                block.push(Constraint::eq(1.0).plus(Var::order(i, j)).plus(Var::order(j, i)));
                block.declare(Category::Binary, Var::order(i, j));
                block.declare(Category::Binary, Var::order(j, i));
            }
        }
    }
    let antisymmetry = block.constraints.len();

    for layer in &layers {
        for (a, &i) in layer.iter().enumerate() {
            for (b, &j) in layer.iter().enumerate().skip(a + 1) {
                for &k in &layer[b + 1..] {
                    // i < j and j < k imply i < k
                    block.push(
                        Constraint::ge(-1.0)
                            .plus(Var::order(i, k))
                            .minus(Var::order(i, j))
                            .minus(Var::order(j, k)),
                    );
                    // i < k and k < j imply i < j
                    block.push(
                        Constraint::ge(-1.0)
                            .plus(Var::order(i, j))
                            .minus(Var::order(i, k))
                            .minus(Var::order(k, j)),
                    );
                }
            }
        }
    }
    let transitivity = block.constraints.len() - antisymmetry;

    for (i, _, node) in graph.nodes() {
        let predecessors = layers[node.layer]
            .iter()
            .filter(|&&j| j != i)
            .map(|&j| Var::order(j, i));
        block.push(Constraint::eq(0.0).plus(Var::Position(i)).minus_all(predecessors));
        block.declare(Category::General, Var::Position(i));
    }

    tracing::debug!(
        antisymmetry,
        transitivity,
        positions = graph.node_count(),
        "built order constraints"
    );
    block
}
