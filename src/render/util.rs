//! Color conversion, locale mapping and axis sizing helpers for the plotters renderer.

use crate::style::Rgba;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Microsoft Office (2013+) chart series palette, used for series no layout colored.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

#[inline]
pub fn to_plotters(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
}

/// Map a locale tag to the `num_format` table used for tick labels.
/// Same tags as [`crate::Messages::for_locale`], plus a few number-only ones.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "de_at" | "de_ch" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Tick label: whole numbers get thousands separators, small values one decimal.
pub fn format_tick(v: f64, locale: &Locale) -> String {
    if v.abs() >= 100.0 || v.fract().abs() < 1e-9 {
        (v.round() as i64).to_formatted_string(locale)
    } else {
        let s = format!("{v:.1}");
        if locale.decimal() == "." {
            s
        } else {
            s.replace('.', locale.decimal())
        }
    }
}

/// Upper bound of the value axis: 10% headroom over the largest value, at least 1.
pub fn value_axis_max(max_value: f64) -> f64 {
    if max_value.is_finite() && max_value > 0.0 {
        (max_value * 1.1).max(1.0)
    } else {
        1.0
    }
}

/// Width of the left label area so the widest tick label and the axis caption fit.
pub fn compute_left_label_area_px(
    y_max: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
    has_desc: bool,
) -> u32 {
    let widest = (0..=ticks)
        .map(|i| y_max * i as f64 / ticks.max(1) as f64)
        .map(|v| estimate_text_width_px(&format_tick(v, locale), font_px))
        .max()
        .unwrap_or(0);
    let desc = if has_desc { font_px + 10 } else { 0 };
    (widest + 14 + desc).clamp(40, 160)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_follow_locale() {
        assert_eq!(format_tick(12500.0, map_locale("en")), "12,500");
        assert_eq!(format_tick(12500.0, map_locale("de_DE")), "12.500");
        assert_eq!(format_tick(2.5, map_locale("de")), "2,5");
        assert_eq!(format_tick(40.0, map_locale("en")), "40");
    }

    #[test]
    fn axis_max_has_headroom() {
        assert!((value_axis_max(100.0) - 110.0).abs() < 1e-9);
        assert_eq!(value_axis_max(0.0), 1.0);
        assert_eq!(value_axis_max(1e-18), 1.0);
        assert_eq!(value_axis_max(f64::NAN), 1.0);
    }

    #[test]
    fn colors_convert_alpha() {
        let c = to_plotters(Rgba::new(1, 2, 3, 255));
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
        assert!((c.3 - 1.0).abs() < 1e-9);
    }
}
