//! Coverage graph layout: which metric and value kind is drawn on which axis.
//!
//! A [`LayoutBuilder`] collects axes and plots, either through chained calls that act
//! on the most recently created element:
//!
//! ```
//! use cov_trend::{LayoutBuilder, MetricType, ValueKind};
//!
//! let layout = LayoutBuilder::new()
//!     .base_stroke(2.0)
//!     .axis()
//!     .label("Lines")
//!     .plot()
//!     .metric(MetricType::Line)
//!     .value(ValueKind::Covered)
//!     .plot()
//!     .metric(MetricType::Line)
//!     .value(ValueKind::Missed)
//!     .build()?;
//! assert_eq!(layout.plots().len(), 2);
//! # Ok::<(), cov_trend::LayoutError>(())
//! ```
//!
//! or through explicit handles (`add_axis`, `add_plot`, `set_metric`, ...).
//! [`LayoutBuilder::build`] checks that every plot is complete and returns an
//! immutable [`Layout`], which is then applied onto any [`ChartTarget`].

use crate::chart::{ChartAppearance, ChartTarget, LineRenderer};
use crate::error::{LayoutError, LayoutResult, MissingField, PlotField};
use crate::messages::Messages;
use crate::metrics::{MetricType, ValueKind};
use crate::models::CoverageObject;
use crate::style::{Rgba, SeriesPalette};
use log::debug;

pub const DEFAULT_BASE_STROKE: f32 = 4.0;

/// Handle to an axis of one builder. Its index is the axis' renderer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(usize);

impl AxisId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a plot of one builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotId(usize);

impl PlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An axis under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisDraft {
    pub label: Option<String>,
}

/// A plot under construction; metric and value may still be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotDraft {
    axis: AxisId,
    pub metric: Option<MetricType>,
    pub value: Option<ValueKind>,
}

impl PlotDraft {
    pub fn axis(&self) -> AxisId {
        self.axis
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBuilder {
    base_stroke: f32,
    palette: SeriesPalette,
    item_labels: bool,
    axes: Vec<AxisDraft>,
    plots: Vec<PlotDraft>,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            base_stroke: DEFAULT_BASE_STROKE,
            palette: SeriesPalette::default(),
            item_labels: false,
            axes: Vec::new(),
            plots: Vec::new(),
        }
    }

    /// One axis with covered lines (good) followed by missed lines (bad).
    pub fn line_trend() -> Self {
        Self::new()
            .plot()
            .metric(MetricType::Line)
            .value(ValueKind::Covered)
            .plot()
            .metric(MetricType::Line)
            .value(ValueKind::Missed)
    }

    // ------------------------ Chained API ------------------------

    /// Line width used for every series.
    pub fn base_stroke(mut self, width: f32) -> Self {
        self.base_stroke = width;
        self
    }

    pub fn palette(mut self, palette: SeriesPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Print the latest value next to every series.
    pub fn item_labels(mut self, visible: bool) -> Self {
        self.item_labels = visible;
        self
    }

    /// Start a new axis; later `label` and `plot` calls target it.
    pub fn axis(mut self) -> Self {
        self.add_axis();
        self
    }

    /// Label the current axis, creating one if there is none yet.
    pub fn label(mut self, text: impl Into<String>) -> Self {
        let axis = self.current_axis();
        self.axes[axis.0].label = Some(text.into());
        self
    }

    /// Start a new plot on the current axis, creating an axis if there is none yet.
    pub fn plot(mut self) -> Self {
        let axis = self.current_axis();
        self.push_plot(axis);
        self
    }

    /// Set the metric of the current plot, creating one if there is none yet.
    pub fn metric(mut self, metric: MetricType) -> Self {
        let plot = self.current_plot();
        self.plots[plot.0].metric = Some(metric);
        self
    }

    /// Set the value kind of the current plot, creating one if there is none yet.
    pub fn value(mut self, value: ValueKind) -> Self {
        let plot = self.current_plot();
        self.plots[plot.0].value = Some(value);
        self
    }

    // ------------------------ Handle API ------------------------

    pub fn add_axis(&mut self) -> AxisId {
        self.axes.push(AxisDraft::default());
        AxisId(self.axes.len() - 1)
    }

    pub fn set_axis_label(&mut self, axis: AxisId, text: impl Into<String>) -> LayoutResult<()> {
        let draft = self
            .axes
            .get_mut(axis.0)
            .ok_or(LayoutError::UnknownAxis(axis.0))?;
        draft.label = Some(text.into());
        Ok(())
    }

    pub fn add_plot(&mut self, axis: AxisId) -> LayoutResult<PlotId> {
        if axis.0 >= self.axes.len() {
            return Err(LayoutError::UnknownAxis(axis.0));
        }
        Ok(self.push_plot(axis))
    }

    pub fn set_metric(&mut self, plot: PlotId, metric: MetricType) -> LayoutResult<()> {
        self.plot_mut(plot)?.metric = Some(metric);
        Ok(())
    }

    pub fn set_value(&mut self, plot: PlotId, value: ValueKind) -> LayoutResult<()> {
        self.plot_mut(plot)?.value = Some(value);
        Ok(())
    }

    pub fn set_base_stroke(&mut self, width: f32) {
        self.base_stroke = width;
    }

    pub fn set_palette(&mut self, palette: SeriesPalette) {
        self.palette = palette;
    }

    pub fn set_item_labels(&mut self, visible: bool) {
        self.item_labels = visible;
    }

    // ------------------------ Views ------------------------

    /// Axes in creation order.
    pub fn axes(&self) -> &[AxisDraft] {
        &self.axes
    }

    /// Plots in creation order.
    pub fn plots(&self) -> &[PlotDraft] {
        &self.plots
    }

    // ------------------------ Finishing ------------------------

    /// Check that every plot has a metric and a value kind and freeze the layout.
    pub fn build(&self) -> LayoutResult<Layout> {
        let mut missing = Vec::new();
        let mut plots = Vec::with_capacity(self.plots.len());
        for (i, p) in self.plots.iter().enumerate() {
            if p.metric.is_none() {
                missing.push(MissingField {
                    plot: i,
                    field: PlotField::MetricType,
                });
            }
            if p.value.is_none() {
                missing.push(MissingField {
                    plot: i,
                    field: PlotField::ValueKind,
                });
            }
            if let (Some(metric), Some(value)) = (p.metric, p.value) {
                plots.push(Plot {
                    axis: p.axis.0,
                    metric,
                    value,
                });
            }
        }
        if !missing.is_empty() {
            return Err(LayoutError::Configuration { missing });
        }
        Ok(Layout {
            base_stroke: self.base_stroke,
            palette: self.palette,
            item_labels: self.item_labels,
            axes: self
                .axes
                .iter()
                .map(|a| Axis {
                    label: a.label.clone(),
                })
                .collect(),
            plots,
        })
    }

    /// Build and apply in one step. Nothing on `chart` changes when this fails.
    pub fn apply<C: ChartTarget + ?Sized>(
        &self,
        chart: &mut C,
        messages: &Messages,
    ) -> LayoutResult<ApplyReport> {
        self.build()?.apply(chart, messages)
    }

    fn current_axis(&mut self) -> AxisId {
        if self.axes.is_empty() {
            self.add_axis()
        } else {
            AxisId(self.axes.len() - 1)
        }
    }

    fn current_plot(&mut self) -> PlotId {
        if self.plots.is_empty() {
            let axis = self.current_axis();
            self.push_plot(axis)
        } else {
            PlotId(self.plots.len() - 1)
        }
    }

    fn push_plot(&mut self, axis: AxisId) -> PlotId {
        self.plots.push(PlotDraft {
            axis,
            metric: None,
            value: None,
        });
        PlotId(self.plots.len() - 1)
    }

    fn plot_mut(&mut self, plot: PlotId) -> LayoutResult<&mut PlotDraft> {
        self.plots
            .get_mut(plot.0)
            .ok_or(LayoutError::UnknownPlot(plot.0))
    }
}

/// One rendering lane of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    label: Option<String>,
}

impl Axis {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// One series: a metric read as one value kind, drawn on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plot {
    axis: usize,
    metric: MetricType,
    value: ValueKind,
}

impl Plot {
    /// Index of the axis this plot is drawn on.
    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn metric(&self) -> MetricType {
        self.metric
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value
    }

    pub fn value_of(&self, obj: &CoverageObject) -> f64 {
        self.metric.value(obj, self.value)
    }

    /// Series name, also used to find the series in its axis' dataset.
    pub fn message(&self, messages: &Messages) -> String {
        self.value.message(self.metric, messages)
    }
}

/// A complete, immutable layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    base_stroke: f32,
    palette: SeriesPalette,
    item_labels: bool,
    axes: Vec<Axis>,
    plots: Vec<Plot>,
}

/// Where `apply` put each plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesAssignment {
    pub plot: usize,
    pub axis: usize,
    pub row: usize,
    pub color: Rgba,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Renderer slots registered, in axis order.
    pub renderer_slots: Vec<usize>,
    /// One entry per plot, in plot order.
    pub series: Vec<SeriesAssignment>,
}

impl Layout {
    pub fn base_stroke(&self) -> f32 {
        self.base_stroke
    }

    pub fn palette(&self) -> SeriesPalette {
        self.palette
    }

    pub fn item_labels(&self) -> bool {
        self.item_labels
    }

    /// Axes in creation order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Plots in creation order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Plots drawn on `axis`, in creation order.
    pub fn plots_on(&self, axis: usize) -> impl Iterator<Item = &Plot> {
        self.plots.iter().filter(move |p| p.axis == axis)
    }

    /// Register one line renderer per axis on `chart`, color every plot's series and
    /// set the chart-wide appearance.
    ///
    /// All series lookups happen before the first mutation, so a failing apply leaves
    /// `chart` untouched.
    pub fn apply<C: ChartTarget + ?Sized>(
        &self,
        chart: &mut C,
        messages: &Messages,
    ) -> LayoutResult<ApplyReport> {
        let mut renderers: Vec<LineRenderer> = self
            .axes
            .iter()
            .map(|_| {
                let mut renderer =
                    LineRenderer::new(true, false).with_base_stroke(self.base_stroke);
                renderer.item_labels_visible = self.item_labels;
                renderer
            })
            .collect();

        let mut per_axis = vec![0usize; self.axes.len()];
        let mut series = Vec::with_capacity(self.plots.len());
        for (i, plot) in self.plots.iter().enumerate() {
            let axis = plot.axis;
            let dataset = chart
                .dataset(axis)
                .ok_or(LayoutError::MissingDataset { axis })?;
            let name = plot.message(messages);
            let row = dataset
                .row_index(&name)
                .ok_or_else(|| LayoutError::SeriesNotFound {
                    axis,
                    series: name.clone(),
                })?;

            let renderer = &mut renderers[axis];
            // Plots sharing a series keep the color of the first one.
            let color = match renderer.series_paint(row).map(|p| p.paint) {
                Some(color) => color,
                None => {
                    let color = self.palette.color_for(per_axis[axis]);
                    renderer.set_series_paint(row, color);
                    renderer.set_series_item_label_paint(row, color);
                    renderer.set_series_fill_paint(row, color);
                    color
                }
            };
            per_axis[axis] += 1;

            debug!("plot {i} ({name}) -> axis {axis}, row {row}, color {color}");
            series.push(SeriesAssignment {
                plot: i,
                axis,
                row,
                color,
            });
        }

        let renderer_slots = (0..renderers.len()).collect();
        for (axis, renderer) in renderers.into_iter().enumerate() {
            chart.set_renderer(axis, renderer);
        }
        chart.set_appearance(ChartAppearance::default());

        Ok(ApplyReport {
            renderer_slots,
            series,
        })
    }
}
