use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cov_trend::config::LayoutConfig;
use cov_trend::render::util::{format_tick, map_locale};
use cov_trend::{LayoutBuilder, Messages, render, storage};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "cov-trend",
    version,
    about = "Draw coverage trend charts from per-build coverage counters"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the trend chart to an SVG or PNG file.
    Plot(PlotArgs),
    /// Print the value of every series for every build.
    Values(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Trend file (.csv or .json), one row per build.
    #[arg(short, long)]
    data: PathBuf,
    /// Layout file (JSON). Defaults to covered/missed lines on one axis.
    #[arg(short, long)]
    layout: Option<PathBuf>,
    /// Locale for labels and numbers (e.g. en, de).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Custom message catalog (JSON); overrides --locale for labels.
    #[arg(long)]
    messages: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output file (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Width of the chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Chart title.
    #[arg(long)]
    title: Option<String>,
    /// Print the latest value next to each series.
    #[arg(long, default_value_t = false)]
    value_labels: bool,
}

fn load_builder(layout: Option<&Path>) -> Result<LayoutBuilder> {
    match layout {
        Some(path) => Ok(LayoutConfig::load(path)?.into_builder()?),
        None => Ok(LayoutBuilder::line_trend()),
    }
}

fn load_messages(args: &InputArgs) -> Result<Messages> {
    match &args.messages {
        Some(path) => Messages::load(path),
        None => Ok(Messages::for_locale(&args.locale)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Values(args) => cmd_values(args),
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let mut builder = load_builder(args.input.layout.as_deref())?;
    if args.value_labels {
        builder.set_item_labels(true);
    }
    let layout = builder.build().context("invalid layout")?;
    let messages = load_messages(&args.input)?;
    let builds = storage::load_trend(&args.input.data)?;
    if builds.is_empty() {
        anyhow::bail!("{} contains no builds", args.input.data.display());
    }

    let mut chart = render::TrendChart::from_builds(&layout, &builds, &messages)
        .with_locale(args.input.locale.as_str());
    if let Some(title) = &args.title {
        chart = chart.with_title(title.as_str());
    }
    let report = layout
        .apply(&mut chart, &messages)
        .context("applying layout")?;
    info!("registered renderer slots {:?}", report.renderer_slots);
    chart.render(&args.out, args.width, args.height)?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_values(args: InputArgs) -> Result<()> {
    let layout = load_builder(args.layout.as_deref())?
        .build()
        .context("invalid layout")?;
    let messages = load_messages(&args)?;
    let builds = storage::load_trend(&args.data)?;
    let locale = map_locale(&args.locale);

    let header: Vec<String> = std::iter::once("build".to_string())
        .chain(layout.plots().iter().map(|p| p.message(&messages)))
        .collect();
    println!("{}", header.join("\t"));
    for b in &builds {
        let row: Vec<String> = std::iter::once(b.build.clone())
            .chain(
                layout
                    .plots()
                    .iter()
                    .map(|p| format_tick(p.value_of(&b.coverage), locale)),
            )
            .collect();
        println!("{}", row.join("\t"));
    }
    Ok(())
}
