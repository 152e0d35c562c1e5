use cov_trend::chart::{CategoryDataset, ChartTarget};
use cov_trend::render::{self, TrendChart};
use cov_trend::{
    BuildCoverage, Coverage, CoverageObject, LayoutBuilder, Messages, MetricType, Rgba, ValueKind,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sample_builds() -> Vec<BuildCoverage> {
    [(40, 60), (30, 70), (25, 80), (10, 95)]
        .iter()
        .enumerate()
        .map(|(i, &(missed, covered))| {
            BuildCoverage::new(
                format!("#{}", i + 1),
                CoverageObject {
                    line: Some(Coverage::new(missed, covered)),
                    branch: Some(Coverage::new(missed / 2, covered / 2)),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn assert_non_empty(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} has content", path.display());
}

#[test]
fn datasets_follow_layout() {
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
        .axis()
        .label("%")
        .plot()
        .metric(MetricType::Branch)
        .value(ValueKind::Percentage)
        .plot()
        .metric(MetricType::Method)
        .value(ValueKind::Percentage)
        .build()
        .unwrap();

    let chart = TrendChart::from_builds(&layout, &sample_builds(), &messages);

    assert_eq!(chart.axis_count(), 2);
    assert_eq!(chart.categories(), vec!["#1", "#2", "#3", "#4"]);
    let lines = chart.dataset(0).unwrap();
    assert_eq!(lines.rows(), ["Covered Line", "Missed Line"]);
    assert_eq!(lines.value(0, 3), Some(95.0));
    assert_eq!(lines.value(1, 0), Some(40.0));
    let pct = chart.dataset(1).unwrap();
    assert_eq!(pct.rows(), ["Branch", "Method"]);
    assert!((pct.value(0, 0).unwrap() - 60.0).abs() < 1e-4);
    // No method reading in any build.
    assert_eq!(pct.value(1, 2), Some(0.0));
}

#[test]
fn applied_chart_renders_svg_and_png() {
    let dir = tempdir().unwrap();
    let messages = Messages::english();
    let layout = LayoutBuilder::line_trend()
        .base_stroke(2.0)
        .item_labels(true)
        .build()
        .unwrap();
    let mut chart = TrendChart::from_builds(&layout, &sample_builds(), &messages)
        .with_title("Coverage trend");

    let report = layout.apply(&mut chart, &messages).unwrap();
    assert_eq!(report.renderer_slots, vec![0]);
    assert_eq!(
        chart.renderer(0).unwrap().series_paint(0).unwrap().paint,
        Rgba::GREEN
    );
    assert!(chart.renderer(0).unwrap().item_labels_visible);

    let svg = dir.path().join("trend.svg");
    chart.render(&svg, 800, 480).unwrap();
    assert_non_empty(&svg);
    let text = fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("Covered Line"));

    let png = dir.path().join("trend.png");
    chart.render(&png, 800, 480).unwrap();
    assert_non_empty(&png);
}

#[test]
fn plot_trend_writes_file_with_german_labels() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("de.svg");
    let messages = Messages::german();
    let layout = LayoutBuilder::line_trend().build().unwrap();

    let report = render::plot_trend(
        &layout,
        &sample_builds(),
        &messages,
        &out,
        900,
        500,
        "de",
        Some("Abdeckung"),
    )
    .unwrap();

    assert_eq!(report.series.len(), 2);
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Zeile abgedeckt"));
}

#[test]
fn single_build_and_unapplied_chart_still_render() {
    let dir = tempdir().unwrap();
    let mut dataset = CategoryDataset::new();
    dataset.add_value(12.0, "Covered Line", "#1");
    dataset.add_value(3.0, "Missed Line", "#1");
    let mut chart = TrendChart::new();
    chart.set_dataset(0, dataset);
    chart.set_axis_label(0, "Lines");

    let out = dir.path().join("single.svg");
    chart.render(&out, 640, 360).unwrap();
    assert_non_empty(&out);
}

#[test]
fn no_builds_is_error() {
    let dir = tempdir().unwrap();
    let messages = Messages::english();
    let layout = LayoutBuilder::line_trend().build().unwrap();
    let out = dir.path().join("empty.svg");

    let chart = TrendChart::from_builds(&layout, &[], &messages);
    assert!(chart.render(&out, 640, 360).is_err());
    assert!(
        render::plot_trend(&layout, &[], &messages, &out, 640, 360, "en", None).is_err()
    );
}

#[test]
fn huge_counts_render_without_overflow() {
    let dir = tempdir().unwrap();
    let messages = Messages::english();
    let layout = LayoutBuilder::new()
        .metric(MetricType::Line)
        .value(ValueKind::Percentage)
        .build()
        .unwrap();
    let builds = vec![BuildCoverage::new(
        "#1",
        CoverageObject {
            line: Some(Coverage::new(u64::MAX, 1)),
            ..Default::default()
        },
    )];

    let chart = TrendChart::from_builds(&layout, &builds, &messages);
    let pct = chart.dataset(0).unwrap().value(0, 0).unwrap();
    assert!(pct < 1e-6);

    let out = dir.path().join("huge.svg");
    render::plot_trend(&layout, &builds, &messages, &out, 640, 360, "en", None).unwrap();
    assert_non_empty(&out);
}

#[test]
fn axis_without_values_draws_empty_lane() {
    let dir = tempdir().unwrap();
    let mut chart = TrendChart::new();
    let mut lines = CategoryDataset::new();
    lines.add_value(5.0, "Covered Line", "#1");
    chart.set_dataset(0, lines);
    chart.set_dataset(1, CategoryDataset::new());
    assert!(chart.dataset(1).unwrap().is_empty());

    let out = dir.path().join("lanes.svg");
    chart.render(&out, 640, 480).unwrap();
    assert_non_empty(&out);
}
