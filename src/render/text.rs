//! Text measurement and wrapping for legend labels.

/// Plotters has no text measuring outside a backend; approximate with an average
/// glyph width of 0.6 em.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Cut `text` so it fits `max_px`, ending in an ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut kept: Vec<char> = text.chars().collect();
    while !kept.is_empty() {
        kept.pop();
        let candidate: String = kept.iter().chain(std::iter::once(&'…')).collect();
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            return candidate;
        }
    }
    String::new()
}

/// Break `text` into lines no wider than `max_px`, on whitespace where possible.
/// A single word wider than the limit is truncated.
pub fn wrap_text_to_width(text: &str, font_px: u32, max_px: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current = truncate_to_width(word, font_px, max_px);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Line", 10, 100), "Line");
        assert_eq!(wrap_text_to_width("Covered Line", 10, 200), vec!["Covered Line"]);
    }

    #[test]
    fn long_text_wraps_on_words() {
        let lines = wrap_text_to_width("Covered Instruction", 10, 60);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Covered");
        assert!(lines[1].starts_with("Instruct") && lines[1].ends_with('…'));
        assert!(lines.iter().all(|l| estimate_text_width_px(l, 10) <= 60));
    }

    #[test]
    fn truncation_adds_ellipsis() {
        let t = truncate_to_width("Complexity", 10, 30);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 10) <= 30);
    }
}
