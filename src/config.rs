//! Layout files (JSON).
//!
//! ```json
//! {
//!   "base_stroke": 2.0,
//!   "palette": { "good": "#00FF00", "bad": "#FF0000" },
//!   "item_labels": true,
//!   "axes": [
//!     { "label": "Lines",
//!       "plots": [ { "metric": "line", "value": "covered" },
//!                  { "metric": "line", "value": "missed" } ] }
//!   ]
//! }
//! ```
//!
//! Plots are nested under their axis. A plot without `metric` or `value` is accepted
//! here and reported by [`LayoutBuilder::build`].

use crate::error::LayoutResult;
use crate::layout::{DEFAULT_BASE_STROKE, LayoutBuilder};
use crate::metrics::{MetricType, ValueKind};
use crate::style::SeriesPalette;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_base_stroke")]
    pub base_stroke: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<SeriesPalette>,
    #[serde(default)]
    pub item_labels: bool,
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub plots: Vec<PlotConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueKind>,
}

fn default_base_stroke() -> f32 {
    DEFAULT_BASE_STROKE
}

impl LayoutConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing layout {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replay the file through the handle API, axis by axis, plot by plot.
    pub fn into_builder(self) -> LayoutResult<LayoutBuilder> {
        let mut builder = LayoutBuilder::new();
        builder.set_base_stroke(self.base_stroke);
        builder.set_item_labels(self.item_labels);
        if let Some(palette) = self.palette {
            builder.set_palette(palette);
        }
        for axis_cfg in self.axes {
            let axis = builder.add_axis();
            if let Some(label) = axis_cfg.label {
                builder.set_axis_label(axis, label)?;
            }
            for plot_cfg in axis_cfg.plots {
                let plot = builder.add_plot(axis)?;
                if let Some(metric) = plot_cfg.metric {
                    builder.set_metric(plot, metric)?;
                }
                if let Some(value) = plot_cfg.value {
                    builder.set_value(plot, value)?;
                }
            }
        }
        Ok(builder)
    }
}
