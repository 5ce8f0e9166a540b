#![forbid(unsafe_code)]

//! Layered-graph crossing and stretch minimization as mathematical programs.
//!
//! `layerlp` compiles a layered graph (`.sgf`) into an LP-format program whose optimum orders
//! the nodes of every layer so that a chosen metric is minimal: total crossings, bottleneck
//! crossings, total stretch, bottleneck stretch, or a quadratic stretch proxy. Solving is left to
//! an external solver; [`solution`] turns its output back into a layered graph.

pub mod config;
pub mod crossing;
pub mod emit;
pub mod error;
pub mod factor;
pub mod formulation;
pub mod graph;
pub mod objective;
pub mod order;
pub mod pipeline;
pub mod shuffle;
pub mod solution;
pub mod var;

pub use config::{Bounds, GeneratorConfig, Metric};
pub use emit::Header;
pub use error::{Error, Result};
pub use formulation::{Constraint, Formulation, Objective, Relation, Summary, Term};
pub use graph::Graph;
pub use pipeline::generate;
pub use solution::Solution;
pub use var::{NAMING_VERSION, ParsedVar, Var};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses `.sgf` text and renders the program for `config`.
pub fn compile(sgf: &str, config: &GeneratorConfig, header: &Header) -> Result<String> {
    config.validate()?;
    let graph = Graph::parse(sgf)?;
    let formulation = generate(&graph, config)?;
    Ok(emit::render(&formulation, header))
}
