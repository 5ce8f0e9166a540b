//! Graph → program compilation.
//!
//! All structural checks (configuration, layer factors) run before the first constraint is
//! built, so a run either produces a complete program or fails without output.

use crate::config::{GeneratorConfig, Metric};
use crate::error::Result;
use crate::factor::LayerFactors;
use crate::formulation::{Block, Formulation, Objective};
use crate::graph::Graph;
use crate::var::Var;
use crate::{crossing, objective, order, shuffle};

pub fn generate<'g>(graph: &'g Graph, config: &GeneratorConfig) -> Result<Formulation<'g>> {
    let metric = config.validate()?;
    graph.check_layers()?;
    let factors = if config.stretch_active() {
        Some(LayerFactors::compute(graph)?)
    } else {
        None
    };

    // Positions and edge markers are always present: the solution reader needs both.
    let mut body: Block = order::build(graph);
    body.extend(crossing::edge_markers(graph));

    let mut crossing_pairs = 0;
    if config.crossings_active() {
        let crossings = crossing::build(graph);
        crossing_pairs = crossings.pairs.len();
        let totals = config.wants_total().then(|| objective::total(&crossings));
        let bottlenecks = config
            .wants_bottleneck()
            .then(|| objective::bottleneck(&crossings));
        body.extend(crossings.block);
        body.extend(totals.unwrap_or_default());
        body.extend(bottlenecks.unwrap_or_default());
    }

    let mut squares = Vec::new();
    if let Some(factors) = &factors {
        if config.linear_stretch_active() {
            let stretch = objective::stretch(graph, factors);
            let totals = config
                .wants_stretch()
                .then(|| objective::total_stretch(&stretch));
            let bottlenecks = config
                .wants_bn_stretch()
                .then(|| objective::bottleneck_stretch(&stretch));
            body.extend(stretch.block);
            body.extend(totals.unwrap_or_default());
            body.extend(bottlenecks.unwrap_or_default());
        }
        if config.wants_quadratic() {
            let quadratic = objective::quadratic(graph, factors);
            squares = quadratic.vars;
            body.extend(quadratic.block);
        }
    }

    let bounds = &config.bounds;
    let side_bounds = [
        (Var::Total, bounds.total.map(|b| b as f64)),
        (Var::Bottleneck, bounds.bottleneck.map(|b| b as f64)),
        (Var::TotalStretch, bounds.stretch),
        (Var::BottleneckStretch, bounds.bn_stretch),
    ];
    for (var, bound) in side_bounds {
        if let Some(bound) = bound {
            body.push(objective::upper_bound(var, bound));
        }
    }

    if let Some(seed) = config.seed {
        shuffle::permute_seeded(&mut body.constraints, seed);
    }

    let objective = match metric {
        Metric::Total => Objective::Linear(Var::Total),
        Metric::Bottleneck => Objective::Linear(Var::Bottleneck),
        Metric::Stretch => Objective::Linear(Var::TotalStretch),
        Metric::BottleneckStretch => Objective::Linear(Var::BottleneckStretch),
        Metric::Quadratic => Objective::HalfSumOfSquares(squares),
    };

    let formulation = Formulation {
        graph,
        metric,
        objective,
        body,
        crossing_pairs,
    };
    tracing::info!(summary = ?formulation.summary(), "generated formulation");
    Ok(formulation)
}
