use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The layout-quality metrics a program can minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total number of edge crossings.
    Total,
    /// Largest number of crossings on any single edge.
    Bottleneck,
    /// Sum of normalized edge stretch.
    Stretch,
    /// Largest stretch of any single edge.
    #[serde(rename = "bn_stretch")]
    BottleneckStretch,
    /// Half the sum of squared signed stretch.
    Quadratic,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Total,
        Metric::Bottleneck,
        Metric::Stretch,
        Metric::BottleneckStretch,
        Metric::Quadratic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Total => "total",
            Metric::Bottleneck => "bottleneck",
            Metric::Stretch => "stretch",
            Metric::BottleneckStretch => "bn_stretch",
            Metric::Quadratic => "quadratic",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMetric {
                value: s.to_string(),
            })
    }
}

/// Optional upper bounds, each applied as a side constraint whether or not the metric is the
/// objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    pub total: Option<u64>,
    pub bottleneck: Option<u64>,
    pub stretch: Option<f64>,
    pub bn_stretch: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneratorConfig {
    pub objective: Option<Metric>,
    pub bounds: Bounds,
    /// When set, constraint and term order are shuffled with this seed.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(objective: Metric) -> Self {
        Self {
            objective: Some(objective),
            bounds: Bounds::default(),
            seed: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration and returns the objective. Runs before any input is read.
    pub fn validate(&self) -> Result<Metric> {
        let objective = self.objective.ok_or(Error::NoObjective)?;
        for (metric, bound) in [
            ("stretch", self.bounds.stretch),
            ("bn_stretch", self.bounds.bn_stretch),
        ] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidBound { metric, value });
                }
            }
        }
        Ok(objective)
    }

    fn is(&self, metric: Metric) -> bool {
        self.objective == Some(metric)
    }

    pub fn wants_total(&self) -> bool {
        self.is(Metric::Total) || self.bounds.total.is_some()
    }

    pub fn wants_bottleneck(&self) -> bool {
        self.is(Metric::Bottleneck) || self.bounds.bottleneck.is_some()
    }

    pub fn wants_stretch(&self) -> bool {
        self.is(Metric::Stretch) || self.bounds.stretch.is_some()
    }

    pub fn wants_bn_stretch(&self) -> bool {
        self.is(Metric::BottleneckStretch) || self.bounds.bn_stretch.is_some()
    }

    pub fn wants_quadratic(&self) -> bool {
        self.is(Metric::Quadratic)
    }

    /// Crossing indicators are needed.
    pub fn crossings_active(&self) -> bool {
        self.wants_total() || self.wants_bottleneck()
    }

    /// Per-edge linear stretch variables are needed.
    pub fn linear_stretch_active(&self) -> bool {
        self.wants_stretch() || self.wants_bn_stretch()
    }

    /// Layer factors are needed.
    pub fn stretch_active(&self) -> bool {
        self.linear_stretch_active() || self.wants_quadratic()
    }
}
