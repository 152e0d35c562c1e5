//! Plotters-backed chart target: render coverage trends to **SVG** or **PNG**.
//!
//! - One lane per layout axis, stacked vertically, sharing the build axis
//! - Series colors and stroke width come from the renderers a layout registers
//! - Legend outside the plot on the configured edge, labels wrapped to fit
//! - Locale-aware tick labels (`30,000` vs `30.000`)

pub mod legend;
pub mod text;
pub mod util;

use crate::chart::{CategoryDataset, ChartAppearance, ChartTarget, LegendEdge, LineRenderer};
use crate::layout::{ApplyReport, Layout};
use crate::messages::Messages;
use crate::models::BuildCoverage;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Once;

use legend::{band_height_px, draw_legend_panel, side_panel_width_px};
use util::{
    compute_left_label_area_px, format_tick, map_locale, office_color, to_plotters,
    value_axis_max,
};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const Y_TICKS: usize = 6;
const MAX_X_LABELS: usize = 12;
const TICK_FONT_PX: u32 = 12;

/// A coverage trend chart: one dataset per axis, columns are builds.
#[derive(Debug, Clone, Default)]
pub struct TrendChart {
    title: Option<String>,
    locale: String,
    axis_labels: Vec<Option<String>>,
    datasets: Vec<Option<CategoryDataset>>,
    renderers: BTreeMap<usize, LineRenderer>,
    appearance: ChartAppearance,
}

impl TrendChart {
    pub fn new() -> Self {
        Self {
            locale: "en".into(),
            ..Default::default()
        }
    }

    /// One dataset per layout axis, one row per plot message (plot order; equal
    /// messages on one axis share a row), one column per build.
    pub fn from_builds(layout: &Layout, builds: &[BuildCoverage], messages: &Messages) -> Self {
        let mut datasets = vec![CategoryDataset::new(); layout.axes().len()];
        let names: Vec<String> = layout.plots().iter().map(|p| p.message(messages)).collect();
        for (plot, name) in layout.plots().iter().zip(&names) {
            datasets[plot.axis()].add_row(name);
        }
        for build in builds {
            for dataset in datasets.iter_mut() {
                dataset.add_column(&build.build);
            }
            for (plot, name) in layout.plots().iter().zip(&names) {
                let value = plot.value_of(&build.coverage);
                datasets[plot.axis()].add_value(value, name, &build.build);
            }
        }

        let mut chart = Self::new();
        chart.axis_labels = layout
            .axes()
            .iter()
            .map(|a| a.label().map(str::to_string))
            .collect();
        chart.datasets = datasets.into_iter().map(Some).collect();
        chart
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Locale tag for tick labels (`"en"`, `"de"`, ...).
    pub fn with_locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    /// Bind `dataset` to `axis`, growing the axis list as needed.
    pub fn set_dataset(&mut self, axis: usize, dataset: CategoryDataset) {
        if self.datasets.len() <= axis {
            self.datasets.resize(axis + 1, None);
        }
        self.datasets[axis] = Some(dataset);
    }

    pub fn set_axis_label(&mut self, axis: usize, label: impl Into<String>) {
        if self.axis_labels.len() <= axis {
            self.axis_labels.resize(axis + 1, None);
        }
        self.axis_labels[axis] = Some(label.into());
    }

    pub fn appearance(&self) -> &ChartAppearance {
        &self.appearance
    }

    /// Number of lanes: every axis that has a dataset, a renderer or a label.
    pub fn axis_count(&self) -> usize {
        let renderers = self.renderers.keys().next_back().map_or(0, |k| k + 1);
        self.datasets.len().max(self.axis_labels.len()).max(renderers)
    }

    /// Build labels in first-seen order across all datasets.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for d in self.datasets.iter().flatten() {
            for c in d.columns() {
                if !out.contains(c) {
                    out.push(c.clone());
                }
            }
        }
        out
    }

    /// Write the chart to `out_path`; `.svg` selects the SVG backend, anything else PNG.
    pub fn render<P: AsRef<Path>>(&self, out_path: P, width: u32, height: u32) -> Result<()> {
        let categories = self.categories();
        if categories.is_empty() {
            bail!("no builds to plot");
        }
        if self.axis_count() == 0 {
            bail!("chart has no axes");
        }
        ensure_fonts_registered();

        let out_path = out_path.as_ref();
        let path_string = out_path.to_string_lossy().into_owned();
        if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root, &categories)?;
        } else {
            let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            self.draw(root, &categories)?;
        }
        info!(
            "rendered {} axis lane(s), {} build(s) to {}",
            self.axis_count(),
            categories.len(),
            out_path.display()
        );
        Ok(())
    }

    /// Series color on `axis`, row `row`: the registered paint, else the Office palette.
    fn series_color(&self, axis: usize, row: usize) -> RGBAColor {
        self.renderers
            .get(&axis)
            .and_then(|r| r.series_paint(row))
            .map_or_else(|| office_color(row), |p| to_plotters(p.paint))
    }

    fn legend_items(&self) -> Vec<(String, RGBAColor)> {
        let mut items = Vec::new();
        for (axis, dataset) in self.datasets.iter().enumerate() {
            let Some(dataset) = dataset else { continue };
            for (row, name) in dataset.rows().iter().enumerate() {
                items.push((name.clone(), self.series_color(axis, row)));
            }
        }
        items
    }

    fn draw<DB>(&self, root: DrawingArea<DB, Shift>, categories: &[String]) -> Result<()>
    where
        DB: DrawingBackend,
    {
        let look = &self.appearance;
        root.fill(&to_plotters(look.chart_background))
            .map_err(|e| anyhow!("{:?}", e))?;

        let items = self.legend_items();
        let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
        let (root_w, root_h) = root.dim_in_pixel();
        let (root_w, root_h) = (root_w as i32, root_h as i32);

        let (plot_area, legend_area) = match look.legend {
            LegendEdge::Right => {
                let w = side_panel_width_px(&labels, root_w);
                let (plot, legend) = root.split_horizontally((root_w - w).max(40));
                (plot, legend)
            }
            LegendEdge::Left => {
                let w = side_panel_width_px(&labels, root_w);
                let (legend, plot) = root.split_horizontally(w);
                (plot, legend)
            }
            LegendEdge::Top => {
                let h = band_height_px(&labels, root_w);
                let (legend, plot) = root.split_vertically(h);
                (plot, legend)
            }
            LegendEdge::Bottom => {
                let h = band_height_px(&labels, root_w);
                let (plot, legend) = root.split_vertically((root_h - h).max(40));
                (plot, legend)
            }
        };

        let plot_area = match &self.title {
            Some(t) if !t.trim().is_empty() => plot_area
                .titled(t.trim(), (FontFamily::SansSerif, 22))
                .map_err(|e| anyhow!("{:?}", e))?,
            _ => plot_area,
        };
        let insets = look.insets;
        let plot_area = plot_area.margin(
            insets.top.round() as i32,
            insets.bottom.round() as i32,
            insets.left.round() as i32,
            insets.right.round() as i32,
        );

        let lanes = plot_area.split_evenly((self.axis_count(), 1));
        for (axis, lane) in lanes.iter().enumerate() {
            self.draw_lane(lane, axis, categories)?;
        }

        draw_legend_panel(
            &legend_area,
            &items,
            look.legend,
            &to_plotters(look.chart_background),
        )?;

        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }

    fn draw_lane<DB>(
        &self,
        lane: &DrawingArea<DB, Shift>,
        axis: usize,
        categories: &[String],
    ) -> Result<()>
    where
        DB: DrawingBackend,
    {
        let look = &self.appearance;
        let num_locale = map_locale(&self.locale);
        let default_renderer = LineRenderer::default();
        let renderer = self.renderers.get(&axis).unwrap_or(&default_renderer);
        let dataset = self.datasets.get(axis).and_then(Option::as_ref);
        let axis_label = self.axis_labels.get(axis).cloned().flatten();

        // Columns of this dataset are placed at their position in the shared build list.
        let column_x: Vec<f64> = dataset
            .map(|d| {
                d.columns()
                    .iter()
                    .map(|c| categories.iter().position(|k| k == c).unwrap_or(0) as f64)
                    .collect()
            })
            .unwrap_or_default();

        let max_value = dataset
            .map(|d| {
                (0..d.rows().len())
                    .flat_map(|r| d.row_values(r))
                    .map(|(_, v)| v)
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .unwrap_or(0.0);
        let y_max = value_axis_max(max_value);
        let (x_min, x_max) = if categories.len() > 1 {
            (0.0, (categories.len() - 1) as f64)
        } else {
            (-0.5, 0.5)
        };

        let left_px = compute_left_label_area_px(
            y_max,
            Y_TICKS,
            TICK_FONT_PX,
            num_locale,
            axis_label.is_some(),
        );
        let mut chart = ChartBuilder::on(lane)
            .margin(8u32)
            .set_label_area_size(LabelAreaPosition::Left, left_px)
            .set_label_area_size(LabelAreaPosition::Bottom, 32u32)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .plotting_area()
            .fill(&to_plotters(look.plot_background))
            .map_err(|e| anyhow!("{:?}", e))?;

        let x_label_fmt = |x: &f64| {
            let i = x.round();
            if (x - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            categories.get(i as usize).cloned().unwrap_or_default()
        };
        let y_label_fmt = |v: &f64| format_tick(*v, num_locale);
        let no_line = RGBAColor(0, 0, 0, 0.0);

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(categories.len().min(MAX_X_LABELS))
            .y_labels(Y_TICKS)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, TICK_FONT_PX))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .light_line_style(no_line);
        if look.range_gridlines_visible {
            mesh.bold_line_style(to_plotters(look.range_gridline_paint).mix(0.35));
        } else {
            mesh.disable_y_mesh();
        }
        if let Some(label) = &axis_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw().map_err(|e| anyhow!("{:?}", e))?;

        if let Some(outline) = look.plot_outline {
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x_min, 0.0), (x_max, y_max)],
                    to_plotters(outline).stroke_width(1),
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        let Some(dataset) = dataset.filter(|d| !d.is_empty()) else {
            debug!("axis {axis} has no values, drawing an empty lane");
            return Ok(());
        };

        let stroke = renderer.stroke_px();
        for row in 0..dataset.rows().len() {
            let points: Vec<(f64, f64)> = dataset
                .row_values(row)
                .into_iter()
                .map(|(c, v)| (column_x[c], v))
                .collect();
            if points.is_empty() {
                continue;
            }
            let paint = renderer.series_paint(row);
            let color = self.series_color(axis, row);

            if renderer.lines_visible {
                let style = ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: stroke,
                };
                chart
                    .draw_series(LineSeries::new(points.clone(), style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            if renderer.shapes_visible || points.len() == 1 {
                let fill = paint.map_or(color, |p| to_plotters(p.fill_paint));
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|(x, y)| Circle::new((*x, *y), stroke as i32 + 2, fill.filled())),
                    )
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            if renderer.item_labels_visible {
                let label_color = paint.map_or(color, |p| to_plotters(p.item_label_paint));
                if let Some(&(x, y)) = points.last() {
                    let style = TextStyle::from((FontFamily::SansSerif, 11)).color(&label_color);
                    chart
                        .draw_series(std::iter::once(Text::new(
                            format_tick(y, num_locale),
                            (x, y),
                            style,
                        )))
                        .map_err(|e| anyhow!("{:?}", e))?;
                }
            }
        }
        Ok(())
    }
}

impl ChartTarget for TrendChart {
    fn dataset(&self, axis: usize) -> Option<&CategoryDataset> {
        self.datasets.get(axis).and_then(Option::as_ref)
    }

    fn set_renderer(&mut self, axis: usize, renderer: LineRenderer) {
        self.renderers.insert(axis, renderer);
    }

    fn renderer(&self, axis: usize) -> Option<&LineRenderer> {
        self.renderers.get(&axis)
    }

    fn set_appearance(&mut self, appearance: ChartAppearance) {
        self.appearance = appearance;
    }
}

/// Build a trend chart from `builds`, apply `layout` and write it to `out_path`.
#[allow(clippy::too_many_arguments)]
pub fn plot_trend<P: AsRef<Path>>(
    layout: &Layout,
    builds: &[BuildCoverage],
    messages: &Messages,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    title: Option<&str>,
) -> Result<ApplyReport> {
    if builds.is_empty() {
        bail!("no builds to plot");
    }
    let mut chart = TrendChart::from_builds(layout, builds, messages).with_locale(locale_tag);
    if let Some(t) = title {
        chart = chart.with_title(t);
    }
    let report = layout
        .apply(&mut chart, messages)
        .context("applying layout to trend chart")?;
    chart.render(out_path, width, height)?;
    Ok(report)
}
