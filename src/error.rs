use std::fmt;
use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Plots without a metric type or value kind. Lists every gap, not just the first.
    #[error("incomplete layout: {}", join(.missing))]
    Configuration { missing: Vec<MissingField> },

    #[error("chart has no dataset for axis {axis}")]
    MissingDataset { axis: usize },

    #[error("series {series:?} not found in the dataset of axis {axis}")]
    SeriesNotFound { axis: usize, series: String },

    #[error("unknown axis handle {0}")]
    UnknownAxis(usize),

    #[error("unknown plot handle {0}")]
    UnknownPlot(usize),
}

/// A required plot field that was never set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    pub plot: usize,
    pub field: PlotField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotField {
    MetricType,
    ValueKind,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            PlotField::MetricType => "metric type",
            PlotField::ValueKind => "value kind",
        };
        write!(f, "plot {} has no {}", self.plot, field)
    }
}

fn join(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
