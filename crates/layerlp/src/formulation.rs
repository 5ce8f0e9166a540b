use crate::config::Metric;
use crate::graph::Graph;
use crate::var::Var;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coeff: f64,
    pub var: Var,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Eq => "=",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Σ coeff·var  <relation>  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub terms: Vec<Term>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    pub fn new(relation: Relation, rhs: f64) -> Self {
        Self {
            terms: Vec::new(),
            relation,
            rhs,
        }
    }

    pub fn eq(rhs: f64) -> Self {
        Self::new(Relation::Eq, rhs)
    }

    pub fn le(rhs: f64) -> Self {
        Self::new(Relation::Le, rhs)
    }

    pub fn ge(rhs: f64) -> Self {
        Self::new(Relation::Ge, rhs)
    }

    pub fn term(mut self, coeff: f64, var: Var) -> Self {
        self.terms.push(Term { coeff, var });
        self
    }

    pub fn plus(self, var: Var) -> Self {
        self.term(1.0, var)
    }

    pub fn minus(self, var: Var) -> Self {
        self.term(-1.0, var)
    }

    pub fn minus_all(mut self, vars: impl IntoIterator<Item = Var>) -> Self {
        self.terms
            .extend(vars.into_iter().map(|var| Term { coeff: -1.0, var }));
        self
    }

    /// Checks the constraint under a variable assignment.
    pub fn is_satisfied_by(&self, value: impl Fn(Var) -> f64) -> bool {
        const EPS: f64 = 1e-9;
        let lhs: f64 = self.terms.iter().map(|t| t.coeff * value(t.var)).sum();
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= EPS,
            Relation::Le => lhs <= self.rhs + EPS,
            Relation::Ge => lhs >= self.rhs - EPS,
        }
    }

    pub fn mentions(&self, var: Var) -> bool {
        self.terms.iter().any(|t| t.var == var)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Binary,
    General,
    Semi,
}

/// `lower <= var <= upper`, emitted in the `Bounds` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarBound {
    pub var: Var,
    pub lower: f64,
    pub upper: f64,
}

/// The output of one formulation pass: its constraints and the variables it declares.
///
/// Blocks are merged by the pipeline; declaration sets keep first-seen order and drop
/// duplicates.
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub constraints: Vec<Constraint>,
    pub binary: IndexSet<Var>,
    pub general: IndexSet<Var>,
    pub semi: IndexSet<Var>,
    pub bounds: Vec<VarBound>,
}

impl Block {
    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn declare(&mut self, category: Category, var: Var) {
        match category {
            Category::Binary => self.binary.insert(var),
            Category::General => self.general.insert(var),
            Category::Semi => self.semi.insert(var),
        };
    }

    pub fn bound(&mut self, var: Var, lower: f64, upper: f64) {
        self.bounds.push(VarBound { var, lower, upper });
    }

    pub fn extend(&mut self, other: Block) {
        self.constraints.extend(other.constraints);
        self.binary.extend(other.binary);
        self.general.extend(other.general);
        self.semi.extend(other.semi);
        self.bounds.extend(other.bounds);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    /// Minimize a single aggregate variable.
    Linear(Var),
    /// Minimize `[ Σ v^2 ] / 2`.
    HalfSumOfSquares(Vec<Var>),
}

/// A complete program for one graph, ready to be emitted.
#[derive(Debug, Clone)]
pub struct Formulation<'g> {
    pub graph: &'g Graph,
    pub metric: Metric,
    pub objective: Objective,
    pub body: Block,
    pub crossing_pairs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub objective: Metric,
    pub nodes: usize,
    pub edges: usize,
    pub layers: usize,
    pub channels: usize,
    pub crossing_pairs: usize,
    pub constraints: usize,
    pub binary: usize,
    pub general: usize,
    pub semi: usize,
    pub bounded: usize,
}

impl Formulation<'_> {
    pub fn summary(&self) -> Summary {
        Summary {
            objective: self.metric,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            layers: self.graph.layer_count(),
            channels: self.graph.channel_count(),
            crossing_pairs: self.crossing_pairs,
            constraints: self.body.constraints.len(),
            binary: self.body.binary.len(),
            general: self.body.general.len(),
            semi: self.body.semi.len(),
            bounded: self.body.bounds.len(),
        }
    }

    /// Every variable name in the program, in section order.
    pub fn variable_names(&self) -> Vec<String> {
        let b = &self.body;
        b.binary
            .iter()
            .chain(&b.general)
            .chain(&b.semi)
            .copied()
            .chain(b.bounds.iter().map(|bound| bound.var))
            .map(|v| v.name(self.graph))
            .collect()
    }
}
