//! Localized legend labels for coverage metrics.
//!
//! A catalog holds one label per metric and two templates for the
//! "missed"/"covered" phrasing. Templates use `{0}` as the metric placeholder.

use crate::metrics::MetricType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const PLACEHOLDER: &str = "{0}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub instruction: String,
    pub branch: String,
    pub complexity: String,
    pub method: String,
    pub class: String,
    pub line: String,
    /// e.g. `"Missed {0}"`
    pub missed: String,
    /// e.g. `"Covered {0}"`
    pub covered: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    pub fn english() -> Self {
        Self {
            instruction: "Instruction".into(),
            branch: "Branch".into(),
            complexity: "Complexity".into(),
            method: "Method".into(),
            class: "Class".into(),
            line: "Line".into(),
            missed: "Missed {0}".into(),
            covered: "Covered {0}".into(),
        }
    }

    pub fn german() -> Self {
        Self {
            instruction: "Anweisung".into(),
            branch: "Zweig".into(),
            complexity: "Komplexität".into(),
            method: "Methode".into(),
            class: "Klasse".into(),
            line: "Zeile".into(),
            missed: "{0} nicht abgedeckt".into(),
            covered: "{0} abgedeckt".into(),
        }
    }

    /// Map a user-provided locale tag to a catalog.
    /// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`.
    /// Defaults to English.
    pub fn for_locale(tag: &str) -> Self {
        match tag.to_lowercase().replace('-', "_").as_str() {
            "de" | "de_de" | "de_at" | "de_ch" | "german" => Self::german(),
            _ => Self::english(),
        }
    }

    /// Load a custom catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading message catalog {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing message catalog {}", path.display()))
    }

    pub fn metric_label(&self, metric: MetricType) -> &str {
        match metric {
            MetricType::Instruction => &self.instruction,
            MetricType::Branch => &self.branch,
            MetricType::Complexity => &self.complexity,
            MetricType::Method => &self.method,
            MetricType::Class => &self.class,
            MetricType::Line => &self.line,
        }
    }

    pub fn missed_label(&self, metric_label: &str) -> String {
        self.missed.replace(PLACEHOLDER, metric_label)
    }

    pub fn covered_label(&self, metric_label: &str) -> String {
        self.covered.replace(PLACEHOLDER, metric_label)
    }
}
