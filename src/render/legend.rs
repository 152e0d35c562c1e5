//! Legend panel drawn outside the plot area on one chart edge.
//!
//! Left/Right: a single column. Top/Bottom: items flow left to right and wrap into
//! rows. Sizing and drawing share [`flow_rows`] so the band never clips.

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, wrap_text_to_width};
use crate::chart::LegendEdge;

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const PAD: i32 = 8;
const SWATCH_W: i32 = 18;
const SWATCH_TO_TEXT: i32 = 8;
const ITEM_GAP: i32 = 16;
const ROW_GAP: i32 = 4;

/// One legend entry after wrapping.
struct Item<'a> {
    lines: Vec<String>,
    color: &'a RGBAColor,
    width: i32,
}

/// Width of a Left/Right panel: fits the longest label, at most a third of the chart.
pub fn side_panel_width_px(labels: &[String], total_w: i32) -> i32 {
    let widest = labels
        .iter()
        .map(|l| estimate_text_width_px(l, FONT_PX) as i32)
        .max()
        .unwrap_or(0);
    let max_w = (total_w / 3).max(100);
    (2 * PAD + SWATCH_W + SWATCH_TO_TEXT + widest).clamp(100.min(max_w), max_w)
}

/// Height of a Top/Bottom band of width `band_w` holding `labels`.
pub fn band_height_px(labels: &[String], band_w: i32) -> i32 {
    let placeholder = RGBAColor(0, 0, 0, 1.0);
    let items: Vec<(String, RGBAColor)> = labels
        .iter()
        .map(|l| (l.clone(), placeholder))
        .collect();
    let rows = flow_rows(&items, band_w);
    let content: i32 = rows.iter().map(|r| row_height(r)).sum();
    let gaps = ROW_GAP * (rows.len() as i32 - 1).max(0);
    2 * PAD + content + gaps
}

fn text_cap_px(area_w: i32) -> u32 {
    (area_w - 2 * PAD - SWATCH_W - SWATCH_TO_TEXT).max(40) as u32
}

fn wrap_item<'a>(label: &str, color: &'a RGBAColor, cap: u32) -> Item<'a> {
    let lines = wrap_text_to_width(label, FONT_PX, cap);
    let text_w = lines
        .iter()
        .map(|l| estimate_text_width_px(l, FONT_PX) as i32)
        .max()
        .unwrap_or(0);
    Item {
        lines,
        color,
        width: SWATCH_W + SWATCH_TO_TEXT + text_w,
    }
}

/// Greedy left-to-right packing into rows no wider than `band_w`.
fn flow_rows(items: &[(String, RGBAColor)], band_w: i32) -> Vec<Vec<Item<'_>>> {
    let cap = text_cap_px(band_w);
    let mut rows: Vec<Vec<Item<'_>>> = Vec::new();
    let mut current: Vec<Item<'_>> = Vec::new();
    let mut x = PAD;
    for (label, color) in items {
        let item = wrap_item(label, color, cap);
        if x + item.width > band_w - PAD && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            x = PAD;
        }
        x += item.width + ITEM_GAP;
        current.push(item);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn row_height(row: &[Item<'_>]) -> i32 {
    row.iter()
        .map(|i| i.lines.len().max(1) as i32 * LINE_H)
        .max()
        .unwrap_or(LINE_H)
}

fn draw_item<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    item: &Item<'_>,
    x: i32,
    y_top: i32,
    style: &TextStyle,
) -> Result<()> {
    let y_mid = y_top + LINE_H / 2;
    area.draw(&PathElement::new(
        vec![(x, y_mid), (x + SWATCH_W, y_mid)],
        item.color.stroke_width(3),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;
    let text_x = x + SWATCH_W + SWATCH_TO_TEXT;
    for (k, line) in item.lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            (text_x, y_mid + k as i32 * LINE_H),
            style.clone(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Fill `area` with `background` and draw one swatch plus label per item.
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBAColor)],
    edge: LegendEdge,
    background: &RGBAColor,
) -> Result<()> {
    area.fill(background).map_err(|e| anyhow!("{:?}", e))?;

    let (w, _) = area.dim_in_pixel();
    let w = w as i32;
    let style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    match edge {
        LegendEdge::Left | LegendEdge::Right => {
            let cap = text_cap_px(w);
            let mut y = PAD;
            for (label, color) in items {
                let item = wrap_item(label, color, cap);
                draw_item(area, &item, PAD, y, &style)?;
                y += item.lines.len().max(1) as i32 * LINE_H + ROW_GAP;
            }
        }
        LegendEdge::Top | LegendEdge::Bottom => {
            let mut y = PAD;
            for row in flow_rows(items, w) {
                let mut x = PAD;
                for item in &row {
                    draw_item(area, item, x, y, &style)?;
                    x += item.width + ITEM_GAP;
                }
                y += row_height(&row) + ROW_GAP;
            }
        }
    }
    Ok(())
}
