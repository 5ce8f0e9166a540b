pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input contains no graph lines")]
    EmptyInput,

    #[error("line {line}: {reason}: `{text}`")]
    MalformedLine {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("node `{id}` is declared more than once")]
    DuplicateNode { id: String },

    #[error(
        "node id `{id}` must be a non-empty token of ASCII letters, digits and `.!#$%&,;?@{{}}|~`"
    )]
    InvalidNodeId { id: String },

    #[error("edge refers to undeclared node `{node}`")]
    UnknownNode { node: String },

    #[error(
        "edge {source_id} -> {target_id} joins layers {source_layer} and {target_layer}; only adjacent layers are modeled"
    )]
    NonAdjacentEdge {
        source_id: String,
        target_id: String,
        source_layer: usize,
        target_layer: usize,
    },

    #[error("edge {source_id} -> {target_id} repeats an edge between the same nodes")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("node `{node}` is on layer {layer}, but the graph has only {nodes} nodes")]
    LayerOutOfRange {
        node: String,
        layer: usize,
        nodes: usize,
    },

    #[error("layer {layer} has no nodes")]
    EmptyLayer { layer: usize },

    #[error("no objective specified")]
    NoObjective,

    #[error("unknown metric `{value}` (expected total, bottleneck, stretch, bn_stretch or quadratic)")]
    UnknownMetric { value: String },

    #[error("bound on {metric} must be a finite, non-negative number (got {value})")]
    InvalidBound { metric: &'static str, value: f64 },

    #[error("solution line {line} is not a `<variable> <value>` pair: `{text}`")]
    MalformedSolution { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
