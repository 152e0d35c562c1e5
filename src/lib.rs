//! cov_trend
//!
//! Declarative layouts for coverage trend charts. A layout says which coverage metric
//! (instruction, branch, complexity, method, class, line) and which value (missed,
//! covered, percentage) is drawn on which axis, how thick the lines are and how the
//! series are colored. It is applied onto any [`chart::ChartTarget`]; the bundled
//! [`render::TrendChart`] draws the result to SVG or PNG.
//!
//! ### Example
//! ```no_run
//! use cov_trend::{LayoutBuilder, Messages, MetricType, ValueKind};
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
//!
//! let builds = cov_trend::storage::load_trend("trend.csv")?;
//! cov_trend::render::plot_trend(
//!     &layout,
//!     &builds,
//!     &Messages::english(),
//!     "coverage.svg",
//!     1000,
//!     600,
//!     "en",
//!     None,
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod layout;
pub mod messages;
pub mod metrics;
pub mod models;
pub mod render;
pub mod storage;
pub mod style;

pub use chart::{CategoryDataset, ChartAppearance, ChartTarget, LegendEdge, LineRenderer};
pub use error::{LayoutError, LayoutResult};
pub use layout::{ApplyReport, Axis, AxisId, Layout, LayoutBuilder, Plot, PlotId};
pub use messages::Messages;
pub use metrics::{MetricType, ValueKind};
pub use models::{BuildCoverage, Coverage, CoverageObject};
pub use style::{Rgba, SeriesPalette};
