//! Objective machinery for each metric, plus the side-bound constraints.
//!
//! Every builder here is independent: the pipeline runs the ones a configuration asks for, as
//! the objective or only to support a bound.

use crate::crossing::Crossings;
use crate::factor::LayerFactors;
use crate::formulation::{Block, Category, Constraint};
use crate::graph::{EdgeIx, Graph};
use crate::var::Var;

/// `total - Σ d >= 0` over every crossing indicator.
pub fn total(crossings: &Crossings) -> Block {
    let mut block = Block::default();
    block.push(Constraint::ge(0.0).plus(Var::Total).minus_all(crossings.variables()));
    block.declare(Category::General, Var::Total);
    block
}

/// `bottleneck - Σ d(e, ·) >= 0` for every edge with at least one potential crossing.
pub fn bottleneck(crossings: &Crossings) -> Block {
    let mut block = Block::default();
    for incident in crossings.incident.iter().filter(|vars| !vars.is_empty()) {
        block.push(
            Constraint::ge(0.0)
                .plus(Var::Bottleneck)
                .minus_all(incident.iter().copied()),
        );
    }
    block.declare(Category::General, Var::Bottleneck);
    block
}

/// Signed normalized displacement of an edge as `(coefficient, variable)` pairs:
/// `factor[source]·p_source - factor[target]·p_target`.
fn displacement(graph: &Graph, factors: &LayerFactors, e: EdgeIx) -> [(f64, Var); 2] {
    let edge = graph.edges()[e];
    [
        (factors.of_node(graph, edge.source), Var::Position(edge.source)),
        (-factors.of_node(graph, edge.target), Var::Position(edge.target)),
    ]
}

/// Per-edge stretch `s_e >= |displacement|`, linearized as two inequalities.
pub struct StretchVars {
    pub block: Block,
    pub vars: Vec<Var>,
}

pub fn stretch(graph: &Graph, factors: &LayerFactors) -> StretchVars {
    let mut block = Block::default();
    let mut vars = Vec::with_capacity(graph.edge_count());
    for e in 0..graph.edge_count() {
        let s = Var::Stretch(e);
        let [(fs, ps), (ft, pt)] = displacement(graph, factors, e);
        // s - displacement >= 0
        block.push(Constraint::ge(0.0).plus(s).term(-fs, ps).term(-ft, pt));
        // s + displacement >= 0
        block.push(Constraint::ge(0.0).plus(s).term(fs, ps).term(ft, pt));
        block.declare(Category::Semi, s);
        vars.push(s);
    }
    StretchVars { block, vars }
}

/// `stretch - Σ s_e >= 0`.
pub fn total_stretch(stretch: &StretchVars) -> Block {
    let mut block = Block::default();
    block.push(
        Constraint::ge(0.0)
            .plus(Var::TotalStretch)
            .minus_all(stretch.vars.iter().copied()),
    );
    block.declare(Category::Semi, Var::TotalStretch);
    block
}

/// `bn_stretch - s_e >= 0` for every edge.
pub fn bottleneck_stretch(stretch: &StretchVars) -> Block {
    let mut block = Block::default();
    for &s in &stretch.vars {
        block.push(Constraint::ge(0.0).plus(Var::BottleneckStretch).minus(s));
    }
    block.declare(Category::Semi, Var::BottleneckStretch);
    block
}

/// Raw signed stretch `z_e = displacement`, bounded to `[-1, 1]`. The objective squares these
/// directly instead of linearizing an absolute value.
pub struct QuadraticVars {
    pub block: Block,
    pub vars: Vec<Var>,
}

pub fn quadratic(graph: &Graph, factors: &LayerFactors) -> QuadraticVars {
    let mut block = Block::default();
    let mut vars = Vec::with_capacity(graph.edge_count());
    for e in 0..graph.edge_count() {
        let z = Var::RawStretch(e);
        let [(fs, ps), (ft, pt)] = displacement(graph, factors, e);
        block.push(Constraint::eq(0.0).plus(z).term(-fs, ps).term(-ft, pt));
        block.bound(z, -1.0, 1.0);
        vars.push(z);
    }
    QuadraticVars { block, vars }
}

/// `var <= bound`.
pub fn upper_bound(var: Var, bound: f64) -> Constraint {
    Constraint::le(bound).plus(var)
}
