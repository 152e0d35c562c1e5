//! Which coverage figure a series shows (`MetricType`) and how it is read (`ValueKind`).

use crate::messages::Messages;
use crate::models::{Coverage, CoverageObject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coverage counter a series is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Instruction,
    Branch,
    Complexity,
    Method,
    Class,
    Line,
}

impl MetricType {
    pub const ALL: [MetricType; 6] = [
        MetricType::Instruction,
        MetricType::Branch,
        MetricType::Complexity,
        MetricType::Method,
        MetricType::Class,
        MetricType::Line,
    ];

    /// The reading this metric selects on `obj`, if the coverage tool reported one.
    pub fn coverage(self, obj: &CoverageObject) -> Option<&Coverage> {
        match self {
            MetricType::Instruction => obj.instruction.as_ref(),
            MetricType::Branch => obj.branch.as_ref(),
            MetricType::Complexity => obj.complexity.as_ref(),
            MetricType::Method => obj.method.as_ref(),
            MetricType::Class => obj.class.as_ref(),
            MetricType::Line => obj.line.as_ref(),
        }
    }

    /// Value of `kind` for this metric on `obj`; an absent reading yields 0.
    pub fn value(self, obj: &CoverageObject, kind: ValueKind) -> f64 {
        self.coverage(obj).map_or(0.0, |c| kind.extract(c))
    }

    pub fn label(self, messages: &Messages) -> &str {
        messages.metric_label(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricType::Instruction => "instruction",
            MetricType::Branch => "branch",
            MetricType::Complexity => "complexity",
            MetricType::Method => "method",
            MetricType::Class => "class",
            MetricType::Line => "line",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which number of a reading a series shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Missed,
    Covered,
    Percentage,
}

impl ValueKind {
    pub fn extract(self, coverage: &Coverage) -> f64 {
        match self {
            ValueKind::Missed => coverage.missed as f64,
            ValueKind::Covered => coverage.covered as f64,
            ValueKind::Percentage => coverage.percentage_float() as f64,
        }
    }

    /// Series name for `metric` shown with this value kind.
    /// Percentages are named after the metric alone.
    pub fn message(self, metric: MetricType, messages: &Messages) -> String {
        let label = metric.label(messages);
        match self {
            ValueKind::Missed => messages.missed_label(label),
            ValueKind::Covered => messages.covered_label(label),
            ValueKind::Percentage => label.to_string(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Missed => "missed",
            ValueKind::Covered => "covered",
            ValueKind::Percentage => "percentage",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
