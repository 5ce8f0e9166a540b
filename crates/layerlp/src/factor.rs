use crate::error::{Error, Result};
use crate::graph::{Graph, NodeIx};

/// Per-layer scale that maps an integer position onto `[0, 1]`.
///
/// A layer of `n >= 2` nodes uses `1 / (n - 1)`. A single-node layer uses `1 / 2` instead of
/// dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFactors {
    factors: Vec<f64>,
}

impl LayerFactors {
    /// Fails with [`Error::EmptyLayer`] when any layer from 0 up to the highest one has no node.
    pub fn compute(graph: &Graph) -> Result<Self> {
        let mut counts = vec![0usize; graph.layer_count()];
        for (_, _, node) in graph.nodes() {
            counts[node.layer] += 1;
        }

        let factors = counts
            .iter()
            .enumerate()
            .map(|(layer, &count)| match count {
                0 => Err(Error::EmptyLayer { layer }),
                1 => Ok(0.5),
                n => Ok(1.0 / (n - 1) as f64),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(layers = factors.len(), "computed layer factors");
        Ok(Self { factors })
    }

    pub fn layer(&self, layer: usize) -> f64 {
        self.factors[layer]
    }

    pub fn of_node(&self, graph: &Graph, node: NodeIx) -> f64 {
        self.layer(graph.layer_of(node))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
