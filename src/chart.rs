//! The narrow surface a layout needs from a chart: per-axis datasets, per-axis
//! line renderers and chart-wide appearance.
//!
//! [`crate::render::TrendChart`] implements [`ChartTarget`] on top of plotters; tests
//! can implement it with a plain struct.

use crate::style::Rgba;
use std::collections::BTreeMap;

/// Table of values keyed by series (rows) and category (columns), one per axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDataset {
    rows: Vec<String>,
    columns: Vec<String>,
    values: BTreeMap<(usize, usize), f64>,
}

impl CategoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell `(row, column)`, adding the keys in first-seen order.
    pub fn add_value(&mut self, value: f64, row: &str, column: &str) {
        let r = index_or_push(&mut self.rows, row);
        let c = index_or_push(&mut self.columns, column);
        self.values.insert((r, c), value);
    }

    pub fn add_row(&mut self, row: &str) -> usize {
        index_or_push(&mut self.rows, row)
    }

    pub fn add_column(&mut self, column: &str) -> usize {
        index_or_push(&mut self.columns, column)
    }

    pub fn row_index(&self, row: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == row)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(&(row, column)).copied()
    }

    /// `(column index, value)` pairs of one row, in column order.
    pub fn row_values(&self, row: usize) -> Vec<(usize, f64)> {
        (0..self.columns.len())
            .filter_map(|c| self.value(row, c).map(|v| (c, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn index_or_push(keys: &mut Vec<String>, key: &str) -> usize {
    match keys.iter().position(|k| k == key) {
        Some(i) => i,
        None => {
            keys.push(key.to_string());
            keys.len() - 1
        }
    }
}

/// Colors of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPaint {
    /// Line color.
    pub paint: Rgba,
    /// Marker fill.
    pub fill_paint: Rgba,
    /// Value label text.
    pub item_label_paint: Rgba,
}

impl SeriesPaint {
    pub fn uniform(color: Rgba) -> Self {
        Self {
            paint: color,
            fill_paint: color,
            item_label_paint: color,
        }
    }
}

/// Draws every series of one axis as a line, optionally with point markers.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRenderer {
    pub lines_visible: bool,
    pub shapes_visible: bool,
    pub item_labels_visible: bool,
    pub base_stroke: f32,
    series: BTreeMap<usize, SeriesPaint>,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl LineRenderer {
    pub fn new(lines_visible: bool, shapes_visible: bool) -> Self {
        Self {
            lines_visible,
            shapes_visible,
            item_labels_visible: false,
            base_stroke: 1.0,
            series: BTreeMap::new(),
        }
    }

    pub fn with_base_stroke(mut self, width: f32) -> Self {
        self.base_stroke = width;
        self
    }

    pub fn set_series_paint(&mut self, series: usize, color: Rgba) {
        self.entry(series, color).paint = color;
    }

    pub fn set_series_fill_paint(&mut self, series: usize, color: Rgba) {
        self.entry(series, color).fill_paint = color;
    }

    pub fn set_series_item_label_paint(&mut self, series: usize, color: Rgba) {
        self.entry(series, color).item_label_paint = color;
    }

    pub fn series_paint(&self, series: usize) -> Option<&SeriesPaint> {
        self.series.get(&series)
    }

    /// Stroke width in whole pixels, at least 1.
    pub fn stroke_px(&self) -> u32 {
        self.base_stroke.round().max(1.0) as u32
    }

    fn entry(&mut self, series: usize, color: Rgba) -> &mut SeriesPaint {
        self.series
            .entry(series)
            .or_insert_with(|| SeriesPaint::uniform(color))
    }
}

/// Chart edge the legend is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Padding around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Chart-wide cosmetics.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAppearance {
    pub legend: LegendEdge,
    pub chart_background: Rgba,
    pub plot_background: Rgba,
    /// `None` draws no outline around the plot area.
    pub plot_outline: Option<Rgba>,
    pub range_gridlines_visible: bool,
    pub range_gridline_paint: Rgba,
    pub insets: Insets,
}

impl Default for ChartAppearance {
    fn default() -> Self {
        Self {
            legend: LegendEdge::Right,
            chart_background: Rgba::WHITE,
            plot_background: Rgba::WHITE,
            plot_outline: None,
            range_gridlines_visible: true,
            range_gridline_paint: Rgba::BLACK,
            insets: Insets::new(5.0, 0.0, 0.0, 5.0),
        }
    }
}

/// What a [`crate::layout::Layout`] mutates when applied.
///
/// Axis indices are positional: the n-th axis of a layout owns renderer slot n and
/// reads series from dataset n.
pub trait ChartTarget {
    /// Dataset bound to `axis`, if any.
    fn dataset(&self, axis: usize) -> Option<&CategoryDataset>;

    /// Register `renderer` at `axis`, replacing whatever was there.
    fn set_renderer(&mut self, axis: usize, renderer: LineRenderer);

    fn renderer(&self, axis: usize) -> Option<&LineRenderer>;

    fn set_appearance(&mut self, appearance: ChartAppearance);
}
