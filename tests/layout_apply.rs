use cov_trend::chart::{
    CategoryDataset, ChartAppearance, ChartTarget, Insets, LegendEdge, LineRenderer,
};
use cov_trend::{LayoutBuilder, LayoutError, Messages, MetricType, Rgba, SeriesPalette, ValueKind};
use std::collections::BTreeMap;

/// Records everything a layout does to it.
#[derive(Debug, Default, Clone, PartialEq)]
struct FakeChart {
    datasets: BTreeMap<usize, CategoryDataset>,
    renderers: BTreeMap<usize, LineRenderer>,
    appearance: Option<ChartAppearance>,
    renderer_calls: Vec<usize>,
}

impl FakeChart {
    fn with_rows(axes: &[&[&str]]) -> Self {
        let mut chart = FakeChart::default();
        for (i, rows) in axes.iter().enumerate() {
            let mut d = CategoryDataset::new();
            for r in rows.iter() {
                d.add_value(1.0, r, "#1");
            }
            chart.datasets.insert(i, d);
        }
        chart
    }
}

impl ChartTarget for FakeChart {
    fn dataset(&self, axis: usize) -> Option<&CategoryDataset> {
        self.datasets.get(&axis)
    }

    fn set_renderer(&mut self, axis: usize, renderer: LineRenderer) {
        self.renderer_calls.push(axis);
        self.renderers.insert(axis, renderer);
    }

    fn renderer(&self, axis: usize) -> Option<&LineRenderer> {
        self.renderers.get(&axis)
    }

    fn set_appearance(&mut self, appearance: ChartAppearance) {
        self.appearance = Some(appearance);
    }
}

fn paint(chart: &FakeChart, axis: usize, row: usize) -> Rgba {
    chart.renderers[&axis].series_paint(row).unwrap().paint
}

#[test]
fn lines_axis_end_to_end() {
    let messages = Messages::english();
    let layout = LayoutBuilder::new()
        .axis()
        .label("Lines")
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Covered)
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Missed)
        .build()
        .unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Line"]]);

    let report = layout.apply(&mut chart, &messages).unwrap();

    assert_eq!(report.renderer_slots, vec![0]);
    assert_eq!(chart.renderer_calls, vec![0]);
    let renderer = &chart.renderers[&0];
    assert!(renderer.lines_visible);
    assert!(!renderer.shapes_visible);
    assert_eq!(renderer.base_stroke, 4.0);
    assert_eq!(paint(&chart, 0, 0), Rgba::GREEN);
    assert_eq!(paint(&chart, 0, 1), Rgba::RED);
    let p1 = renderer.series_paint(1).unwrap();
    assert_eq!(p1.fill_paint, Rgba::RED);
    assert_eq!(p1.item_label_paint, Rgba::RED);

    let look = chart.appearance.as_ref().unwrap();
    assert_eq!(look.legend, LegendEdge::Right);
    assert_eq!(look.chart_background, Rgba::WHITE);
    assert_eq!(look.plot_background, Rgba::WHITE);
    assert_eq!(look.plot_outline, None);
    assert!(look.range_gridlines_visible);
    assert_eq!(look.range_gridline_paint, Rgba::BLACK);
    assert_eq!(look.insets, Insets::new(5.0, 0.0, 0.0, 5.0));
}

#[test]
fn axis_creation_order_fixes_renderer_slots() {
    let messages = Messages::english();
    // Plots are declared out of axis order on purpose.
    let mut b = LayoutBuilder::new().base_stroke(2.0);
    let first = b.add_axis();
    let second = b.add_axis();
    let third = b.add_axis();
    for (axis, metric) in [
        (third, MetricType::Class),
        (first, MetricType::Line),
        (second, MetricType::Branch),
    ] {
        let p = b.add_plot(axis).unwrap();
        b.set_metric(p, metric).unwrap();
        b.set_value(p, ValueKind::Percentage).unwrap();
    }
    let mut chart = FakeChart::with_rows(&[&["Line"], &["Branch"], &["Class"]]);

    let report = b.apply(&mut chart, &messages).unwrap();

    assert_eq!(report.renderer_slots, vec![0, 1, 2]);
    let axes: Vec<usize> = report.series.iter().map(|s| s.axis).collect();
    assert_eq!(axes, vec![2, 0, 1]);
    assert!(chart.renderers.values().all(|r| r.base_stroke == 2.0));
    // Each plot is the first on its own axis.
    assert!(report.series.iter().all(|s| s.color == Rgba::GREEN));
}

#[test]
fn first_plot_per_axis_is_good_rest_bad() {
    let messages = Messages::english();
    let layout = LayoutBuilder::new()
        .axis()
        .plot()
        .metric(MetricType::Branch)
        .value(ValueKind::Missed)
        .plot()
        .metric(MetricType::Instruction)
        .value(ValueKind::Percentage)
        .plot()
        .metric(MetricType::Method)
        .value(ValueKind::Covered)
        .axis()
        .plot()
        .metric(MetricType::Complexity)
        .value(ValueKind::Covered)
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Missed)
        .build()
        .unwrap();
    let mut chart = FakeChart::with_rows(&[
        &["Missed Branch", "Instruction", "Covered Method"],
        &["Covered Complexity", "Missed Line"],
    ]);

    let report = layout.apply(&mut chart, &messages).unwrap();

    let colors: Vec<(usize, Rgba)> = report.series.iter().map(|s| (s.axis, s.color)).collect();
    assert_eq!(
        colors,
        vec![
            (0, Rgba::GREEN),
            (0, Rgba::RED),
            (0, Rgba::RED),
            (1, Rgba::GREEN),
            (1, Rgba::RED),
        ]
    );
    assert_eq!(paint(&chart, 1, 0), Rgba::GREEN);
    assert_eq!(paint(&chart, 1, 1), Rgba::RED);
}

#[test]
fn color_follows_plot_order_not_row_order() {
    let messages = Messages::english();
    let layout = LayoutBuilder::line_trend().build().unwrap();
    // Dataset lists the missed series first.
    let mut chart = FakeChart::with_rows(&[&["Missed Line", "Covered Line"]]);

    layout.apply(&mut chart, &messages).unwrap();

    assert_eq!(paint(&chart, 0, 1), Rgba::GREEN);
    assert_eq!(paint(&chart, 0, 0), Rgba::RED);
}

#[test]
fn custom_palette_replaces_green_and_red() {
    let messages = Messages::english();
    let palette = SeriesPalette::new(Rgba::rgb(68, 114, 196), Rgba::rgb(237, 125, 49));
    let layout = LayoutBuilder::line_trend().palette(palette).build().unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Line"]]);

    layout.apply(&mut chart, &messages).unwrap();

    assert_eq!(paint(&chart, 0, 0), palette.good);
    assert_eq!(paint(&chart, 0, 1), palette.bad);
}

#[test]
fn implicit_axis_and_plot_from_setters() {
    let b = LayoutBuilder::new()
        .value(ValueKind::Percentage)
        .metric(MetricType::Branch)
        .label("Branches");
    assert_eq!(b.axes().len(), 1);
    assert_eq!(b.plots().len(), 1);
    assert_eq!(b.axes()[0].label.as_deref(), Some("Branches"));
    assert_eq!(b.plots()[0].metric, Some(MetricType::Branch));
    assert_eq!(b.plots()[0].value, Some(ValueKind::Percentage));

    let layout = b.build().unwrap();
    assert_eq!(layout.axes()[0].label(), Some("Branches"));
    assert_eq!(layout.plots()[0].axis(), 0);
}

#[test]
fn incomplete_plot_fails_before_touching_chart() {
    let messages = Messages::english();
    let b = LayoutBuilder::line_trend().plot().metric(MetricType::Branch);
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Line"]]);
    let before = chart.clone();

    let err = b.apply(&mut chart, &messages).unwrap_err();

    assert!(matches!(err, LayoutError::Configuration { ref missing } if missing.len() == 1));
    assert_eq!(chart, before);
}

#[test]
fn unknown_series_fails_before_touching_chart() {
    let messages = Messages::english();
    let layout = LayoutBuilder::line_trend().build().unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Branch"]]);
    let before = chart.clone();

    let err = layout.apply(&mut chart, &messages).unwrap_err();

    assert_eq!(
        err,
        LayoutError::SeriesNotFound {
            axis: 0,
            series: "Missed Line".into()
        }
    );
    assert_eq!(chart, before);
}

#[test]
fn missing_dataset_is_reported() {
    let messages = Messages::english();
    let layout = LayoutBuilder::new()
        .axis()
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Covered)
        .axis()
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Missed)
        .build()
        .unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line"]]);

    let err = layout.apply(&mut chart, &messages).unwrap_err();

    assert_eq!(err, LayoutError::MissingDataset { axis: 1 });
    assert!(chart.renderers.is_empty());
    assert!(chart.appearance.is_none());
}

#[test]
fn apply_twice_gives_identical_charts() {
    let messages = Messages::german();
    let layout = LayoutBuilder::new()
        .label("Zeilen")
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Covered)
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Missed)
        .build()
        .unwrap();
    let rows: &[&[&str]] = &[&["Zeile abgedeckt", "Zeile nicht abgedeckt"]];
    let mut a = FakeChart::with_rows(rows);
    let mut b = FakeChart::with_rows(rows);

    let ra = layout.apply(&mut a, &messages).unwrap();
    let rb = layout.apply(&mut b, &messages).unwrap();

    assert_eq!(ra, rb);
    assert_eq!(a, b);
}

#[test]
fn reapplying_replaces_renderers() {
    let messages = Messages::english();
    let layout = LayoutBuilder::line_trend().base_stroke(1.5).build().unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Line"]]);
    chart.set_renderer(0, LineRenderer::new(false, true));

    layout.apply(&mut chart, &messages).unwrap();

    let r = chart.renderer(0).unwrap();
    assert!(r.lines_visible && !r.shapes_visible);
    assert_eq!(r.base_stroke, 1.5);
}

#[test]
fn plots_sharing_a_series_keep_the_first_color() {
    let messages = Messages::english();
    let layout = LayoutBuilder::new()
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Covered)
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Covered)
        .plot()
        .metric(MetricType::Line)
        .value(ValueKind::Missed)
        .build()
        .unwrap();
    let mut chart = FakeChart::with_rows(&[&["Covered Line", "Missed Line"]]);

    let report = layout.apply(&mut chart, &messages).unwrap();

    assert_eq!(paint(&chart, 0, 0), Rgba::GREEN);
    assert_eq!(paint(&chart, 0, 1), Rgba::RED);
    let colors: Vec<(usize, Rgba)> = report.series.iter().map(|s| (s.row, s.color)).collect();
    assert_eq!(
        colors,
        vec![(0, Rgba::GREEN), (0, Rgba::GREEN), (1, Rgba::RED)]
    );
}

#[test]
fn item_labels_flag_reaches_every_renderer() {
    let messages = Messages::english();
    let rows: &[&[&str]] = &[&["Covered Line", "Missed Line"]];

    let mut plain = FakeChart::with_rows(rows);
    LayoutBuilder::line_trend()
        .apply(&mut plain, &messages)
        .unwrap();
    assert!(!plain.renderers[&0].item_labels_visible);

    let mut labeled = FakeChart::with_rows(rows);
    let layout = LayoutBuilder::line_trend().item_labels(true).build().unwrap();
    assert!(layout.item_labels());
    layout.apply(&mut labeled, &messages).unwrap();
    assert!(labeled.renderers[&0].item_labels_visible);
}
